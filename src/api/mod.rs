use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

pub mod auth;
pub mod user;
pub mod admin;
pub mod wallet;

use crate::config::Config;
use crate::db::entity;
use crate::services::{
    AccountService,
    ApprovalService,
    TransactionService,
    WalletDirectoryService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub account_service: Arc<AccountService>,
    pub transaction_service: Arc<TransactionService>,
    pub approval_service: Arc<ApprovalService>,
    pub wallet_service: Arc<WalletDirectoryService>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        account_service: Arc<AccountService>,
        transaction_service: Arc<TransactionService>,
        approval_service: Arc<ApprovalService>,
        wallet_service: Arc<WalletDirectoryService>
    ) -> Self {
        Self {
            config,
            account_service,
            transaction_service,
            approval_service,
            wallet_service,
        }
    }
}

/// User snapshot safe for display: no credential fields.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub country: String,
    pub phone: String,
    pub balance: Decimal,
    pub profit: Decimal,
    pub withdrawals_pending: Decimal,
    pub created_at: String,
}

impl From<entity::user::Model> for UserResponse {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            country: user.country,
            phone: user.phone,
            balance: user.balance,
            profit: user.profit,
            withdrawals_pending: user.withdrawals_pending,
            created_at: user.created_at.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub tx_hash: Option<String>,
    pub status: String,
    pub admin_note: Option<String>,
    pub method: Option<String>,
    pub bank_account_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_name: Option<String>,
    pub bank_routing_number: Option<String>,
    pub crypto_address: Option<String>,
    pub crypto_network: Option<String>,
    pub paypal_email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<entity::transaction::Model> for TransactionResponse {
    fn from(tx: entity::transaction::Model) -> Self {
        Self {
            id: tx.id,
            user_id: tx.user_id,
            kind: tx.kind,
            amount: tx.amount,
            currency: tx.currency,
            tx_hash: tx.tx_hash,
            status: tx.status,
            admin_note: tx.admin_note,
            method: tx.method,
            bank_account_name: tx.bank_account_name,
            bank_account_number: tx.bank_account_number,
            bank_name: tx.bank_name,
            bank_routing_number: tx.bank_routing_number,
            crypto_address: tx.crypto_address,
            crypto_network: tx.crypto_network,
            paypal_email: tx.paypal_email,
            created_at: tx.created_at.to_string(),
            updated_at: tx.updated_at.to_string(),
        }
    }
}
