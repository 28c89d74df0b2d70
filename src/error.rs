use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("{message}")] Validation {
        field: Option<String>,
        message: String,
    },

    #[error("{0} not found")] NotFound(&'static str),

    #[error("Already processed")]
    AlreadyProcessed,

    #[error("Insufficient balance")]
    InsufficientFunds,

    #[error("Balance cannot be negative")]
    InvalidAdjustment,

    #[error("{0}")] Unauthorized(&'static str),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation { field: None, message: message.into() }
    }

    pub fn field(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation { field: Some(field.to_string()), message: message.into() }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn to_error_response(&self) -> ErrorResponse {
        // Storage and internal failures surface a generic message only.
        let (code, message, field) = match self {
            AppError::Database(_) => ("DATABASE_ERROR", "Server error".to_string(), None),
            AppError::Validation { field, message } =>
                ("INVALID_INPUT", message.clone(), field.clone()),
            AppError::NotFound(what) => ("NOT_FOUND", format!("{} not found", what), None),
            AppError::AlreadyProcessed =>
                ("ALREADY_PROCESSED", "Already processed".to_string(), None),
            AppError::InsufficientFunds =>
                ("INSUFFICIENT_FUNDS", "Insufficient balance".to_string(), None),
            AppError::InvalidAdjustment =>
                ("INVALID_ADJUSTMENT", "Balance cannot be negative".to_string(), None),
            AppError::Unauthorized(msg) => ("UNAUTHORIZED", msg.to_string(), None),
            AppError::Config(_) => ("CONFIG_ERROR", "Server error".to_string(), None),
            AppError::Internal(_) => ("INTERNAL_ERROR", "Server error".to_string(), None),
        };

        ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NotFound(_) => axum::http::StatusCode::NOT_FOUND,
            AppError::AlreadyProcessed => axum::http::StatusCode::CONFLICT,
            | AppError::Validation { .. }
            | AppError::InsufficientFunds
            | AppError::InvalidAdjustment => {
                axum::http::StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => axum::http::StatusCode::UNAUTHORIZED,
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == axum::http::StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
        }

        let response = self.to_error_response();
        (status, axum::Json(response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound("User").into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::AlreadyProcessed.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InsufficientFunds.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::validation("bad amount").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("Invalid credentials").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let response = AppError::Internal("pool exhausted at 10.0.0.3".to_string())
            .to_error_response();
        assert_eq!(response.error.message, "Server error");
    }
}
