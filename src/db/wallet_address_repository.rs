use sea_orm::{ DatabaseConnection, EntityTrait, QueryOrder, Set };
use sea_orm::ConnectionTrait;
use sea_orm::sea_query::OnConflict;
use uuid::Uuid;

use crate::enums::Currency;
use crate::error::Result;
use crate::db::entity::{ wallet_address, WalletAddress };

pub struct WalletAddressRepository {
    db: DatabaseConnection,
}

impl WalletAddressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<wallet_address::Model>> {
        let wallets = WalletAddress::find()
            .order_by_asc(wallet_address::Column::Currency)
            .all(&self.db).await?;

        Ok(wallets)
    }

    /// Insert-or-overwrite keyed by currency. No history is kept; the previous
    /// address for the currency is gone after this returns.
    pub async fn upsert_on<C: ConnectionTrait>(
        conn: &C,
        currency: Currency,
        network: String,
        address: String,
        updated_by: String
    ) -> Result<wallet_address::Model> {
        let now = chrono::Utc::now();
        let row = wallet_address::ActiveModel {
            id: Set(Uuid::new_v4()),
            currency: Set(currency.as_str().to_string()),
            network: Set(network),
            address: Set(address),
            updated_by: Set(updated_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let wallet = WalletAddress::insert(row)
            .on_conflict(
                OnConflict::column(wallet_address::Column::Currency)
                    .update_columns([
                        wallet_address::Column::Network,
                        wallet_address::Column::Address,
                        wallet_address::Column::UpdatedBy,
                        wallet_address::Column::UpdatedAt,
                    ])
                    .to_owned()
            )
            .exec_with_returning(conn).await?;

        Ok(wallet)
    }
}
