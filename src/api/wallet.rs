use axum::{ extract::State, Json };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::auth::AdminAuth;
use crate::db::entity::wallet_address;
use crate::enums::Currency;
use crate::error::Result;

use super::AppState;

#[derive(Serialize)]
pub struct WalletAddressResponse {
    pub id: Uuid,
    pub currency: String,
    pub network: String,
    pub address: String,
    pub updated_by: String,
    pub updated_at: String,
}

impl From<wallet_address::Model> for WalletAddressResponse {
    fn from(wallet: wallet_address::Model) -> Self {
        Self {
            id: wallet.id,
            currency: wallet.currency,
            network: wallet.network,
            address: wallet.address,
            updated_by: wallet.updated_by,
            updated_at: wallet.updated_at.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct WalletListResponse {
    pub wallets: Vec<WalletAddressResponse>,
}

/// Public read so users can see where to deposit.
pub async fn list_wallets(State(state): State<AppState>) -> Result<Json<WalletListResponse>> {
    let wallets = state.wallet_service.list().await?;

    Ok(Json(WalletListResponse { wallets: wallets.into_iter().map(Into::into).collect() }))
}

#[derive(Deserialize)]
pub struct UpdateWalletRequest {
    pub currency: String,
    pub network: String,
    pub address: String,
}

#[derive(Serialize)]
pub struct UpdateWalletResponse {
    pub message: String,
    pub wallet: WalletAddressResponse,
}

pub async fn update_wallet(
    State(state): State<AppState>,
    admin: AdminAuth,
    Json(req): Json<UpdateWalletRequest>
) -> Result<Json<UpdateWalletResponse>> {
    let currency = req.currency.parse::<Currency>()?;

    let wallet = state.wallet_service.upsert(
        currency,
        req.network,
        req.address,
        &admin.admin_name
    ).await?;

    Ok(
        Json(UpdateWalletResponse {
            message: "Wallet address updated successfully".to_string(),
            wallet: wallet.into(),
        })
    )
}
