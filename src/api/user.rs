use axum::{ extract::State, http::StatusCode, Json };
use rust_decimal::Decimal;
use serde::{ Deserialize, Serialize };

use crate::auth::AuthUser;
use crate::enums::{ Currency, MethodDetails, WithdrawalMethod };
use crate::error::{ AppError, Result };

use super::{ AppState, TransactionResponse, UserResponse };

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser
) -> Result<Json<ProfileResponse>> {
    let user = state.account_service.profile(auth.user_id).await?;

    Ok(Json(ProfileResponse { user: user.into() }))
}

#[derive(Deserialize)]
pub struct DepositRequest {
    pub amount: Decimal,
    pub currency: String,
    pub tx_hash: Option<String>,
}

#[derive(Serialize)]
pub struct TransactionEnvelope {
    pub message: String,
    pub transaction: TransactionResponse,
}

pub async fn create_deposit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DepositRequest>
) -> Result<(StatusCode, Json<TransactionEnvelope>)> {
    let currency = req.currency.parse::<Currency>()?;

    let record = state.transaction_service.request_deposit(
        auth.user_id,
        req.amount,
        currency,
        req.tx_hash
    ).await?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionEnvelope {
            message: "Deposit request created successfully".to_string(),
            transaction: record.into(),
        }),
    ))
}

#[derive(Deserialize)]
pub struct WithdrawRequest {
    pub amount: Decimal,
    pub method: String,
    // bank
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub routing_number: Option<String>,
    // crypto
    pub address: Option<String>,
    pub network: Option<String>,
    // paypal
    pub email: Option<String>,
}

impl WithdrawRequest {
    /// Pick out the detail block matching the declared method; the other
    /// blocks are ignored.
    fn details(self) -> Result<(Decimal, MethodDetails)> {
        let method = self.method.parse::<WithdrawalMethod>()?;

        let details = match method {
            WithdrawalMethod::Bank =>
                MethodDetails::Bank {
                    account_name: self.account_name
                        .ok_or(AppError::field("account_name", "Account name is required"))?,
                    account_number: self.account_number
                        .ok_or(AppError::field("account_number", "Account number is required"))?,
                    bank_name: self.bank_name
                        .ok_or(AppError::field("bank_name", "Bank name is required"))?,
                    routing_number: self.routing_number,
                },
            WithdrawalMethod::Crypto =>
                MethodDetails::Crypto {
                    address: self.address
                        .ok_or(AppError::field("address", "Wallet address is required"))?,
                    network: self.network
                        .ok_or(AppError::field("network", "Network is required"))?,
                },
            WithdrawalMethod::Paypal =>
                MethodDetails::Paypal {
                    email: self.email
                        .ok_or(AppError::field("email", "PayPal email is required"))?,
                },
        };

        Ok((self.amount, details))
    }
}

pub async fn create_withdrawal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<WithdrawRequest>
) -> Result<(StatusCode, Json<TransactionEnvelope>)> {
    let (amount, details) = req.details()?;

    let record = state.transaction_service.request_withdrawal(
        auth.user_id,
        amount,
        details
    ).await?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionEnvelope {
            message: "Withdrawal request created successfully".to_string(),
            transaction: record.into(),
        }),
    ))
}

#[derive(Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,
}

pub async fn transactions(
    State(state): State<AppState>,
    auth: AuthUser
) -> Result<Json<TransactionListResponse>> {
    let transactions = state.transaction_service.history(auth.user_id, 50).await?;

    Ok(
        Json(TransactionListResponse {
            transactions: transactions.into_iter().map(Into::into).collect(),
        })
    )
}
