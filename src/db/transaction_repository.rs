use sea_orm::{ DatabaseConnection, EntityTrait, QueryFilter, ColumnTrait, QueryOrder, Set };
use sea_orm::{ ConnectionTrait, QuerySelect };
use sea_orm::sea_query::{ Expr, ExprTrait as _ };
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::enums::{ Currency, MethodDetails, TxKind, TxStatus };
use crate::error::{ AppError, Result };
use crate::db::entity::{ transaction, Transaction };

pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn new_row(
        user_id: Uuid,
        kind: TxKind,
        amount: Decimal,
        status: TxStatus
    ) -> transaction::ActiveModel {
        let now = chrono::Utc::now();
        transaction::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            kind: Set(kind.as_str().to_string()),
            amount: Set(amount),
            currency: Set(None),
            tx_hash: Set(None),
            status: Set(status.as_str().to_string()),
            admin_note: Set(None),
            method: Set(None),
            bank_account_name: Set(None),
            bank_account_number: Set(None),
            bank_name: Set(None),
            bank_routing_number: Set(None),
            crypto_address: Set(None),
            crypto_network: Set(None),
            paypal_email: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    pub async fn insert_deposit<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        amount: Decimal,
        currency: Currency,
        tx_hash: Option<String>
    ) -> Result<transaction::Model> {
        let mut row = Self::new_row(user_id, TxKind::Deposit, amount, TxStatus::Pending);
        row.currency = Set(Some(currency.as_str().to_string()));
        row.tx_hash = Set(tx_hash);

        let created = Transaction::insert(row).exec_with_returning(conn).await?;
        Ok(created)
    }

    pub async fn insert_withdrawal<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        amount: Decimal,
        details: &MethodDetails
    ) -> Result<transaction::Model> {
        let mut row = Self::new_row(user_id, TxKind::Withdrawal, amount, TxStatus::Pending);
        row.method = Set(Some(details.method().as_str().to_string()));

        match details {
            MethodDetails::Bank { account_name, account_number, bank_name, routing_number } => {
                row.bank_account_name = Set(Some(account_name.clone()));
                row.bank_account_number = Set(Some(account_number.clone()));
                row.bank_name = Set(Some(bank_name.clone()));
                row.bank_routing_number = Set(routing_number.clone());
            }
            MethodDetails::Crypto { address, network } => {
                row.crypto_address = Set(Some(address.clone()));
                row.crypto_network = Set(Some(network.clone()));
            }
            MethodDetails::Paypal { email } => {
                row.paypal_email = Set(Some(email.clone()));
            }
        }

        let created = Transaction::insert(row).exec_with_returning(conn).await?;
        Ok(created)
    }

    /// Insert a row that is already in its terminal state (adjustment, profit).
    pub async fn insert_settled<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        kind: TxKind,
        amount: Decimal,
        note: Option<String>
    ) -> Result<transaction::Model> {
        let mut row = Self::new_row(user_id, kind, amount, TxStatus::Approved);
        row.admin_note = Set(note);

        let created = Transaction::insert(row).exec_with_returning(conn).await?;
        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<transaction::Model> {
        Self::find_by_id_on(&self.db, id).await
    }

    pub async fn find_by_id_on<C: ConnectionTrait>(
        conn: &C,
        id: Uuid
    ) -> Result<transaction::Model> {
        Transaction::find_by_id(id)
            .one(conn).await?
            .ok_or(AppError::NotFound("Transaction"))
    }

    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: u64
    ) -> Result<Vec<transaction::Model>> {
        let transactions = Transaction::find()
            .filter(transaction::Column::UserId.eq(user_id))
            .order_by_desc(transaction::Column::CreatedAt)
            .limit(limit)
            .all(&self.db).await?;

        Ok(transactions)
    }

    pub async fn find_pending(&self) -> Result<Vec<transaction::Model>> {
        let transactions = Transaction::find()
            .filter(transaction::Column::Status.eq(TxStatus::Pending.as_str()))
            .order_by_desc(transaction::Column::CreatedAt)
            .all(&self.db).await?;

        Ok(transactions)
    }

    /// Conditional one-way transition out of `pending`. Returns the number of
    /// rows changed: 0 means another request already processed the record.
    pub async fn mark_processed<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
        status: TxStatus,
        note: Option<String>
    ) -> Result<u64> {
        let result = Transaction::update_many()
            .col_expr(transaction::Column::Status, Expr::value(status.as_str()))
            .col_expr(transaction::Column::AdminNote, Expr::value(note))
            .col_expr(transaction::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(transaction::Column::Id.eq(id))
            .filter(transaction::Column::Status.eq(TxStatus::Pending.as_str()))
            .exec(conn).await?;

        Ok(result.rows_affected)
    }
}
