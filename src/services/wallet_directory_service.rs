use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ DatabaseConnection, TransactionTrait };

use crate::db::{ AuditLogRepository, NewAuditEntry, WalletAddressRepository };
use crate::db::entity::wallet_address;
use crate::enums::{ AuditAction, Currency };
use crate::error::{ AppError, Result };

/// Admin-maintained currency -> deposit-address directory. Reads are public;
/// writes overwrite in place (no address history).
pub struct WalletDirectoryService {
    db: Arc<DatabaseConnection>,
    wallets: Arc<WalletAddressRepository>,
}

impl WalletDirectoryService {
    pub fn new(db: Arc<DatabaseConnection>, wallets: Arc<WalletAddressRepository>) -> Self {
        Self { db, wallets }
    }

    pub async fn list(&self) -> Result<Vec<wallet_address::Model>> {
        self.wallets.find_all().await
    }

    pub async fn upsert(
        &self,
        currency: Currency,
        network: String,
        address: String,
        admin_name: &str
    ) -> Result<wallet_address::Model> {
        let network = network.trim().to_string();
        let address = address.trim().to_string();

        if network.len() < 2 || network.len() > 50 {
            return Err(AppError::field("network", "Network must be between 2 and 50 characters"));
        }
        // No format check against the target network; any plausible string is
        // accepted here.
        if address.len() < 10 || address.len() > 200 {
            return Err(AppError::field("address", "Address must be between 10 and 200 characters"));
        }

        let txn = self.db.begin().await?;

        let wallet = WalletAddressRepository::upsert_on(
            &txn,
            currency,
            network.clone(),
            address,
            admin_name.to_string()
        ).await?;

        AuditLogRepository::insert_on(&txn, NewAuditEntry {
            action: AuditAction::UpdateWallet,
            admin_name: admin_name.to_string(),
            target_user_id: None,
            note: format!("Updated {} wallet address (network {})", currency, network),
            amount: Decimal::ZERO,
        }).await?;

        txn.commit().await?;

        Ok(wallet)
    }
}
