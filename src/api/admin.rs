use axum::{ extract::{ Path, Query, State }, Json };
use rust_decimal::Decimal;
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::auth::AdminAuth;
use crate::db::entity::audit_log;
use crate::enums::AdjustDirection;
use crate::error::Result;

use super::{ AppState, TransactionResponse, UserResponse };

#[derive(Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminAuth
) -> Result<Json<UserListResponse>> {
    let users = state.approval_service.list_users().await?;

    Ok(Json(UserListResponse { users: users.into_iter().map(Into::into).collect() }))
}

#[derive(Serialize)]
pub struct UserDetailResponse {
    pub user: UserResponse,
    pub transactions: Vec<TransactionResponse>,
}

pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(user_id): Path<Uuid>
) -> Result<Json<UserDetailResponse>> {
    let (user, transactions) = state.approval_service.user_detail(user_id).await?;

    Ok(
        Json(UserDetailResponse {
            user: user.into(),
            transactions: transactions.into_iter().map(Into::into).collect(),
        })
    )
}

#[derive(Deserialize)]
pub struct AdjustBalanceRequest {
    pub amount: Decimal,
    pub direction: String,
    pub note: Option<String>,
}

#[derive(Serialize)]
pub struct AdjustBalanceResponse {
    pub message: String,
    pub new_balance: Decimal,
}

pub async fn adjust_balance(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(user_id): Path<Uuid>,
    Json(req): Json<AdjustBalanceRequest>
) -> Result<Json<AdjustBalanceResponse>> {
    let direction = req.direction.parse::<AdjustDirection>()?;

    let new_balance = state.approval_service.adjust_balance(
        user_id,
        req.amount,
        direction,
        req.note,
        &admin.admin_name
    ).await?;

    Ok(
        Json(AdjustBalanceResponse {
            message: "Balance adjusted successfully".to_string(),
            new_balance,
        })
    )
}

#[derive(Deserialize)]
pub struct AddProfitRequest {
    pub amount: Decimal,
    pub note: Option<String>,
}

#[derive(Serialize)]
pub struct AddProfitResponse {
    pub message: String,
    pub new_profit: Decimal,
    pub new_balance: Decimal,
}

pub async fn add_profit(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(user_id): Path<Uuid>,
    Json(req): Json<AddProfitRequest>
) -> Result<Json<AddProfitResponse>> {
    let user = state.approval_service.add_profit(
        user_id,
        req.amount,
        req.note,
        &admin.admin_name
    ).await?;

    Ok(
        Json(AddProfitResponse {
            message: "Profit added successfully".to_string(),
            new_profit: user.profit,
            new_balance: user.balance,
        })
    )
}

#[derive(Deserialize)]
pub struct ActionRequest {
    pub note: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn approve_deposit(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(deposit_id): Path<Uuid>,
    Json(req): Json<ActionRequest>
) -> Result<Json<MessageResponse>> {
    state.approval_service.approve_deposit(deposit_id, req.note, &admin.admin_name).await?;

    Ok(Json(MessageResponse { message: "Deposit approved successfully".to_string() }))
}

pub async fn reject_deposit(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(deposit_id): Path<Uuid>,
    Json(req): Json<ActionRequest>
) -> Result<Json<MessageResponse>> {
    state.approval_service.reject_deposit(deposit_id, req.note, &admin.admin_name).await?;

    Ok(Json(MessageResponse { message: "Deposit rejected successfully".to_string() }))
}

pub async fn approve_withdrawal(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(withdrawal_id): Path<Uuid>,
    Json(req): Json<ActionRequest>
) -> Result<Json<MessageResponse>> {
    state.approval_service.approve_withdrawal(withdrawal_id, req.note, &admin.admin_name).await?;

    Ok(Json(MessageResponse { message: "Withdrawal approved successfully".to_string() }))
}

pub async fn reject_withdrawal(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(withdrawal_id): Path<Uuid>,
    Json(req): Json<ActionRequest>
) -> Result<Json<MessageResponse>> {
    state.approval_service.reject_withdrawal(withdrawal_id, req.note, &admin.admin_name).await?;

    Ok(Json(MessageResponse { message: "Withdrawal rejected successfully".to_string() }))
}

#[derive(Serialize)]
pub struct ImpersonateResponse {
    pub message: String,
    pub user: UserResponse,
}

pub async fn impersonate_user(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(user_id): Path<Uuid>
) -> Result<Json<ImpersonateResponse>> {
    let user = state.approval_service.impersonate_user(user_id, &admin.admin_name).await?;

    Ok(
        Json(ImpersonateResponse {
            message: "User data retrieved for impersonation".to_string(),
            user: user.into(),
        })
    )
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub transactions: Vec<TransactionResponse>,
}

pub async fn pending_transactions(
    State(state): State<AppState>,
    _admin: AdminAuth
) -> Result<Json<PendingResponse>> {
    let transactions = state.approval_service.pending_transactions().await?;

    Ok(Json(PendingResponse { transactions: transactions.into_iter().map(Into::into).collect() }))
}

#[derive(Deserialize)]
pub struct LogQueryParams {
    pub user: Option<Uuid>,
    pub limit: Option<u64>,
}

#[derive(Serialize)]
pub struct AuditLogResponse {
    pub id: Uuid,
    pub action: String,
    pub admin_name: String,
    pub target_user_id: Option<Uuid>,
    pub note: String,
    pub amount: Decimal,
    pub created_at: String,
}

impl From<audit_log::Model> for AuditLogResponse {
    fn from(entry: audit_log::Model) -> Self {
        Self {
            id: entry.id,
            action: entry.action,
            admin_name: entry.admin_name,
            target_user_id: entry.target_user_id,
            note: entry.note,
            amount: entry.amount,
            created_at: entry.created_at.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct LogListResponse {
    pub logs: Vec<AuditLogResponse>,
}

pub async fn logs(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Query(params): Query<LogQueryParams>
) -> Result<Json<LogListResponse>> {
    let limit = params.limit.unwrap_or(100).min(500);

    let logs = state.approval_service.logs(params.user, limit).await?;

    Ok(Json(LogListResponse { logs: logs.into_iter().map(Into::into).collect() }))
}
