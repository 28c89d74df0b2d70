use argon2::{ Argon2, PasswordHash, PasswordHasher, PasswordVerifier };
use argon2::password_hash::{ SaltString, rand_core::OsRng };
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::AppState;
use crate::error::{ AppError, Result };

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Verify a candidate password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;

    let argon2 = Argon2::default();
    Ok(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a bearer token for the given user.
pub fn sign_token(user_id: Uuid, secret: &str, ttl_days: i64) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + Duration::days(ttl_days)).timestamp(),
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Decode and validate a bearer token. Expiry is checked by the library.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token"))
}

/// Authenticated end user, extracted from the `Authorization: Bearer` header.
/// Carries the token subject only; handlers load current state from the store.
pub struct AuthUser {
    pub user_id: Uuid,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let header = parts.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized("Missing authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized("Authorization header must be a bearer token"))?;

        let claims = decode_token(token, &state.config.jwt_secret)?;

        Ok(AuthUser { user_id: claims.sub })
    }
}

/// Admin caller, authorized by the shared `x-admin-key` secret. The display
/// name written to audit entries comes from server configuration, never from
/// the request.
pub struct AdminAuth {
    pub admin_name: String,
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let key = parts.headers
            .get("x-admin-key")
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized("Missing admin key"))?;

        if key != state.config.admin_key {
            return Err(AppError::Unauthorized("Invalid admin key"));
        }

        Ok(AdminAuth { admin_name: state.config.admin_name.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("S3cure-pass!").unwrap();
        assert_ne!(hash, "S3cure-pass!");
        assert!(verify_password("S3cure-pass!", &hash).unwrap());
        assert!(!verify_password("wrong-pass", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hash1 = hash_password("S3cure-pass!").unwrap();
        let hash2 = hash_password("S3cure-pass!").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = sign_token(user_id, "0123456789abcdef0123456789abcdef", 7).unwrap();
        let claims = decode_token(&token, "0123456789abcdef0123456789abcdef").unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let token = sign_token(Uuid::new_v4(), "0123456789abcdef0123456789abcdef", 7).unwrap();
        assert!(decode_token(&token, "another-secret-another-secret-00").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Issued with a lifetime well in the past, beyond validation leeway.
        let token = sign_token(Uuid::new_v4(), "0123456789abcdef0123456789abcdef", -2).unwrap();
        assert!(decode_token(&token, "0123456789abcdef0123456789abcdef").is_err());
    }
}
