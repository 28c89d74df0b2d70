use axum::{ extract::State, http::StatusCode, Json };
use serde::{ Deserialize, Serialize };

use crate::auth::sign_token;
use crate::error::Result;
use crate::services::NewUser;

use super::{ AppState, UserResponse };

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub country: String,
    pub phone: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let user = state.account_service.register(NewUser {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        country: req.country,
        phone: req.phone,
        password: req.password,
    }).await?;

    let token = sign_token(user.id, &state.config.jwt_secret, state.config.token_ttl_days)?;

    tracing::info!(user = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: user.into(),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>
) -> Result<Json<AuthResponse>> {
    let user = state.account_service.login(&req.phone, &req.password).await?;

    let token = sign_token(user.id, &state.config.jwt_secret, state.config.token_ttl_days)?;

    Ok(
        Json(AuthResponse {
            message: "Login successful".to_string(),
            token,
            user: user.into(),
        })
    )
}
