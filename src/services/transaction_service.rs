use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ DatabaseConnection, TransactionTrait, EntityTrait, QueryFilter, ColumnTrait };
use sea_orm::sea_query::{ Expr, ExprTrait as _ };
use uuid::Uuid;

use crate::db::{ TransactionRepository, UserRepository };
use crate::db::entity::{ transaction, user };
use crate::enums::{ Currency, MethodDetails };
use crate::error::{ AppError, Result };

/// User-facing side of the ledger: records deposit and withdrawal requests
/// in `pending` state for the approval workflow to settle later.
pub struct TransactionService {
    db: Arc<DatabaseConnection>,
    users: Arc<UserRepository>,
    transactions: Arc<TransactionRepository>,
    min_amount: Decimal,
    max_amount: Decimal,
}

impl TransactionService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        users: Arc<UserRepository>,
        transactions: Arc<TransactionRepository>,
        min_amount: Decimal,
        max_amount: Decimal
    ) -> Self {
        Self {
            db,
            users,
            transactions,
            min_amount,
            max_amount,
        }
    }

    /// Record a deposit claim. The balance is untouched until an admin
    /// approves the deposit.
    pub async fn request_deposit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        currency: Currency,
        tx_hash: Option<String>
    ) -> Result<transaction::Model> {
        check_amount(amount, self.min_amount, self.max_amount)?;

        let tx_hash = tx_hash
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());
        if let Some(hash) = &tx_hash {
            validate_tx_hash(hash)?;
        }

        self.users.find_by_id(user_id).await?;

        TransactionRepository::insert_deposit(
            self.db.as_ref(),
            user_id,
            amount,
            currency,
            tx_hash
        ).await
    }

    /// Record a withdrawal request and place the pending hold. The hold and
    /// the record land in one transaction: a crash cannot leave one without
    /// the other.
    pub async fn request_withdrawal(
        &self,
        user_id: Uuid,
        amount: Decimal,
        details: MethodDetails
    ) -> Result<transaction::Model> {
        check_amount(amount, self.min_amount, self.max_amount)?;
        validate_details(&details)?;

        let current = self.users.find_by_id(user_id).await?;
        if amount > current.balance {
            return Err(AppError::InsufficientFunds);
        }

        let txn = self.db.begin().await?;

        // Guarded re-check: the balance may have moved since the read above.
        let held = user::Entity
            ::update_many()
            .col_expr(
                user::Column::WithdrawalsPending,
                Expr::col(user::Column::WithdrawalsPending).add(amount)
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(user::Column::Id.eq(user_id))
            .filter(user::Column::Balance.gte(amount))
            .exec(&txn).await?;

        if held.rows_affected == 0 {
            return Err(AppError::InsufficientFunds);
        }

        let record = TransactionRepository::insert_withdrawal(&txn, user_id, amount, &details).await?;

        txn.commit().await?;

        Ok(record)
    }

    pub async fn history(&self, user_id: Uuid, limit: u64) -> Result<Vec<transaction::Model>> {
        self.users.find_by_id(user_id).await?;

        self.transactions.find_by_user(user_id, limit).await
    }
}

fn check_amount(amount: Decimal, min: Decimal, max: Decimal) -> Result<()> {
    if amount < min {
        return Err(AppError::field("amount", format!("Amount must be at least {}", min)));
    }
    if amount > max {
        return Err(AppError::field("amount", format!("Amount must not exceed {}", max)));
    }
    Ok(())
}

fn validate_tx_hash(hash: &str) -> Result<()> {
    if hash.len() < 10 || hash.len() > 100 || !hash.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(
            AppError::field(
                "tx_hash",
                "Transaction hash must be 10 to 100 alphanumeric characters"
            )
        );
    }
    Ok(())
}

fn validate_details(details: &MethodDetails) -> Result<()> {
    match details {
        MethodDetails::Bank { account_name, account_number, bank_name, .. } => {
            if account_name.trim().is_empty() {
                return Err(AppError::field("account_name", "Account name is required"));
            }
            if account_number.trim().is_empty() {
                return Err(AppError::field("account_number", "Account number is required"));
            }
            if bank_name.trim().is_empty() {
                return Err(AppError::field("bank_name", "Bank name is required"));
            }
        }
        MethodDetails::Crypto { address, network } => {
            if address.len() < 10 || address.len() > 200 {
                return Err(
                    AppError::field("address", "Address must be between 10 and 200 characters")
                );
            }
            if network.len() < 2 || network.len() > 50 {
                return Err(
                    AppError::field("network", "Network must be between 2 and 50 characters")
                );
            }
        }
        MethodDetails::Paypal { email } => {
            if !email.contains('@') {
                return Err(AppError::field("email", "Please provide a valid PayPal email"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_check_amount_bounds() {
        assert!(check_amount(dec!(0.01), dec!(0.01), dec!(1000000)).is_ok());
        assert!(check_amount(dec!(1000000), dec!(0.01), dec!(1000000)).is_ok());
        assert!(check_amount(dec!(0.001), dec!(0.01), dec!(1000000)).is_err());
        assert!(check_amount(dec!(0), dec!(0.01), dec!(1000000)).is_err());
        assert!(check_amount(dec!(-5), dec!(0.01), dec!(1000000)).is_err());
        assert!(check_amount(dec!(1000000.01), dec!(0.01), dec!(1000000)).is_err());
    }

    #[test]
    fn test_validate_tx_hash() {
        assert!(validate_tx_hash("0xdeadbeef00").is_ok());
        assert!(validate_tx_hash("short").is_err());
        assert!(validate_tx_hash("has spaces in it!!").is_err());
    }

    #[test]
    fn test_validate_details_requires_bank_fields() {
        let details = MethodDetails::Bank {
            account_name: "".to_string(),
            account_number: "12345678".to_string(),
            bank_name: "First National".to_string(),
            routing_number: None,
        };
        assert!(validate_details(&details).is_err());

        let details = MethodDetails::Bank {
            account_name: "J. Trader".to_string(),
            account_number: "12345678".to_string(),
            bank_name: "First National".to_string(),
            routing_number: Some("021000021".to_string()),
        };
        assert!(validate_details(&details).is_ok());
    }

    #[test]
    fn test_validate_details_crypto_address_length() {
        let details = MethodDetails::Crypto {
            address: "tooshort".to_string(),
            network: "Bitcoin".to_string(),
        };
        assert!(validate_details(&details).is_err());
    }
}
