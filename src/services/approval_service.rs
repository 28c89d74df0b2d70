use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ DatabaseConnection, TransactionTrait, EntityTrait, QueryFilter, ColumnTrait };
use sea_orm::DatabaseTransaction;
use sea_orm::sea_query::{ Expr, ExprTrait as _ };
use uuid::Uuid;

use crate::db::{ AuditLogRepository, NewAuditEntry, TransactionRepository, UserRepository };
use crate::db::entity::{ audit_log, transaction, user };
use crate::enums::{ AdjustDirection, AuditAction, TxKind, TxStatus };
use crate::error::{ AppError, Result };

/// Admin side of the ledger. Each mutating operation settles exactly one
/// record or user row: the status transition, the ledger change and the
/// audit entry commit together or not at all. The transition itself is a
/// conditional update on `status = 'pending'`, so two admins racing on the
/// same record leaves one winner and one `AlreadyProcessed` failure.
pub struct ApprovalService {
    db: Arc<DatabaseConnection>,
    users: Arc<UserRepository>,
    transactions: Arc<TransactionRepository>,
    audit: Arc<AuditLogRepository>,
}

impl ApprovalService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        users: Arc<UserRepository>,
        transactions: Arc<TransactionRepository>,
        audit: Arc<AuditLogRepository>
    ) -> Self {
        Self {
            db,
            users,
            transactions,
            audit,
        }
    }

    pub async fn approve_deposit(
        &self,
        deposit_id: Uuid,
        note: Option<String>,
        admin_name: &str
    ) -> Result<()> {
        self.settle(deposit_id, TxKind::Deposit, TxStatus::Approved, note, admin_name).await
    }

    pub async fn reject_deposit(
        &self,
        deposit_id: Uuid,
        note: Option<String>,
        admin_name: &str
    ) -> Result<()> {
        self.settle(deposit_id, TxKind::Deposit, TxStatus::Rejected, note, admin_name).await
    }

    pub async fn approve_withdrawal(
        &self,
        withdrawal_id: Uuid,
        note: Option<String>,
        admin_name: &str
    ) -> Result<()> {
        self.settle(withdrawal_id, TxKind::Withdrawal, TxStatus::Approved, note, admin_name).await
    }

    pub async fn reject_withdrawal(
        &self,
        withdrawal_id: Uuid,
        note: Option<String>,
        admin_name: &str
    ) -> Result<()> {
        self.settle(withdrawal_id, TxKind::Withdrawal, TxStatus::Rejected, note, admin_name).await
    }

    /// Shared settlement path for the four approve/reject operations.
    async fn settle(
        &self,
        record_id: Uuid,
        kind: TxKind,
        status: TxStatus,
        note: Option<String>,
        admin_name: &str
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        let record = TransactionRepository::find_by_id_on(&txn, record_id).await?;
        if record.kind != kind.as_str() {
            return Err(AppError::NotFound("Transaction"));
        }

        let changed = TransactionRepository::mark_processed(
            &txn,
            record_id,
            status,
            note.clone()
        ).await?;
        if changed == 0 {
            return Err(AppError::AlreadyProcessed);
        }

        let (balance_delta, pending_delta) = settlement_effect(kind, status, record.amount);
        if balance_delta != Decimal::ZERO || pending_delta != Decimal::ZERO {
            apply_user_delta(&txn, record.user_id, balance_delta, pending_delta, Decimal::ZERO).await?;
        }

        AuditLogRepository::insert_on(&txn, NewAuditEntry {
            action: settlement_action(kind, status),
            admin_name: admin_name.to_string(),
            target_user_id: Some(record.user_id),
            note: note.unwrap_or_default(),
            amount: record.amount,
        }).await?;

        txn.commit().await?;

        tracing::info!(
            record = %record_id,
            user = %record.user_id,
            amount = %record.amount,
            "{} {}", kind, status
        );

        Ok(())
    }

    /// Manual credit or debit against a user's balance. A debit that would
    /// push the balance below zero is rejected, not clamped.
    pub async fn adjust_balance(
        &self,
        user_id: Uuid,
        amount: Decimal,
        direction: AdjustDirection,
        note: Option<String>,
        admin_name: &str
    ) -> Result<Decimal> {
        require_positive(amount)?;

        let txn = self.db.begin().await?;

        UserRepository::find_by_id_on(&txn, user_id).await?;

        let mut update = user::Entity
            ::update_many()
            .col_expr(user::Column::Balance, Expr::col(user::Column::Balance).add(signed_delta(direction, amount)))
            .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(user::Column::Id.eq(user_id));
        if direction == AdjustDirection::Debit {
            update = update.filter(user::Column::Balance.gte(amount));
        }

        let result = update.exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::InvalidAdjustment);
        }

        TransactionRepository::insert_settled(
            &txn,
            user_id,
            TxKind::Adjustment,
            amount,
            note.clone()
        ).await?;

        AuditLogRepository::insert_on(&txn, NewAuditEntry {
            action: AuditAction::AdjustBalance,
            admin_name: admin_name.to_string(),
            target_user_id: Some(user_id),
            note: note.unwrap_or_default(),
            amount,
        }).await?;

        let updated = UserRepository::find_by_id_on(&txn, user_id).await?;

        txn.commit().await?;

        Ok(updated.balance)
    }

    /// Credit trading profit: raises both `profit` and `balance`.
    pub async fn add_profit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        note: Option<String>,
        admin_name: &str
    ) -> Result<user::Model> {
        require_positive(amount)?;

        let txn = self.db.begin().await?;

        UserRepository::find_by_id_on(&txn, user_id).await?;

        apply_user_delta(&txn, user_id, amount, Decimal::ZERO, amount).await?;

        TransactionRepository::insert_settled(
            &txn,
            user_id,
            TxKind::Profit,
            amount,
            note.clone()
        ).await?;

        AuditLogRepository::insert_on(&txn, NewAuditEntry {
            action: AuditAction::AddProfit,
            admin_name: admin_name.to_string(),
            target_user_id: Some(user_id),
            note: note.unwrap_or_default(),
            amount,
        }).await?;

        let updated = UserRepository::find_by_id_on(&txn, user_id).await?;

        txn.commit().await?;

        Ok(updated)
    }

    /// Read-only snapshot for admin display; leaves an audit trace.
    pub async fn impersonate_user(&self, user_id: Uuid, admin_name: &str) -> Result<user::Model> {
        let user = self.users.find_by_id(user_id).await?;

        self.audit.append(NewAuditEntry {
            action: AuditAction::ImpersonateUser,
            admin_name: admin_name.to_string(),
            target_user_id: Some(user_id),
            note: "Admin impersonated user".to_string(),
            amount: Decimal::ZERO,
        }).await?;

        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        self.users.find_all().await
    }

    pub async fn user_detail(
        &self,
        user_id: Uuid
    ) -> Result<(user::Model, Vec<transaction::Model>)> {
        let user = self.users.find_by_id(user_id).await?;
        let transactions = self.transactions.find_by_user(user_id, 20).await?;

        Ok((user, transactions))
    }

    pub async fn pending_transactions(&self) -> Result<Vec<transaction::Model>> {
        self.transactions.find_pending().await
    }

    pub async fn logs(
        &self,
        target_user: Option<Uuid>,
        limit: u64
    ) -> Result<Vec<audit_log::Model>> {
        match target_user {
            Some(user_id) => self.audit.find_by_target_user(user_id, limit).await,
            None => self.audit.find_recent(limit).await,
        }
    }
}

/// Ledger effect of settling a record: (balance delta, pending-hold delta).
fn settlement_effect(kind: TxKind, status: TxStatus, amount: Decimal) -> (Decimal, Decimal) {
    match (kind, status) {
        (TxKind::Deposit, TxStatus::Approved) => (amount, Decimal::ZERO),
        (TxKind::Deposit, TxStatus::Rejected) => (Decimal::ZERO, Decimal::ZERO),
        (TxKind::Withdrawal, TxStatus::Approved) => (-amount, -amount),
        // Rejection only releases the hold; the balance never moved.
        (TxKind::Withdrawal, TxStatus::Rejected) => (Decimal::ZERO, -amount),
        _ => (Decimal::ZERO, Decimal::ZERO),
    }
}

fn settlement_action(kind: TxKind, status: TxStatus) -> AuditAction {
    match (kind, status) {
        (TxKind::Deposit, TxStatus::Approved) => AuditAction::ApproveDeposit,
        (TxKind::Deposit, _) => AuditAction::RejectDeposit,
        (TxKind::Withdrawal, TxStatus::Approved) => AuditAction::ApproveWithdrawal,
        _ => AuditAction::RejectWithdrawal,
    }
}

fn signed_delta(direction: AdjustDirection, amount: Decimal) -> Decimal {
    match direction {
        AdjustDirection::Credit => amount,
        AdjustDirection::Debit => -amount,
    }
}

async fn apply_user_delta(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    balance_delta: Decimal,
    pending_delta: Decimal,
    profit_delta: Decimal
) -> Result<()> {
    let result = user::Entity
        ::update_many()
        .col_expr(user::Column::Balance, Expr::col(user::Column::Balance).add(balance_delta))
        .col_expr(
            user::Column::WithdrawalsPending,
            Expr::col(user::Column::WithdrawalsPending).add(pending_delta)
        )
        .col_expr(user::Column::Profit, Expr::col(user::Column::Profit).add(profit_delta))
        .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(user::Column::Id.eq(user_id))
        .exec(txn).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("User"));
    }

    Ok(())
}

fn require_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(AppError::field("amount", "Amount must be greater than 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_settlement_effect_deposit() {
        assert_eq!(
            settlement_effect(TxKind::Deposit, TxStatus::Approved, dec!(1000)),
            (dec!(1000), dec!(0))
        );
        assert_eq!(
            settlement_effect(TxKind::Deposit, TxStatus::Rejected, dec!(1000)),
            (dec!(0), dec!(0))
        );
    }

    #[test]
    fn test_settlement_effect_withdrawal() {
        assert_eq!(
            settlement_effect(TxKind::Withdrawal, TxStatus::Approved, dec!(200)),
            (dec!(-200), dec!(-200))
        );
        assert_eq!(
            settlement_effect(TxKind::Withdrawal, TxStatus::Rejected, dec!(200)),
            (dec!(0), dec!(-200))
        );
    }

    #[test]
    fn test_settlement_action() {
        assert_eq!(
            settlement_action(TxKind::Deposit, TxStatus::Approved),
            AuditAction::ApproveDeposit
        );
        assert_eq!(
            settlement_action(TxKind::Withdrawal, TxStatus::Rejected),
            AuditAction::RejectWithdrawal
        );
    }

    #[test]
    fn test_signed_delta() {
        assert_eq!(signed_delta(AdjustDirection::Credit, dec!(50)), dec!(50));
        assert_eq!(signed_delta(AdjustDirection::Debit, dec!(50)), dec!(-50));
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive(dec!(0.01)).is_ok());
        assert!(require_positive(dec!(0)).is_err());
        assert!(require_positive(dec!(-1)).is_err());
    }
}
