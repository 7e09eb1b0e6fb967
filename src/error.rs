use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not found")]
    NotFound,

    #[error("Email already registered")]
    Conflict,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Account already verified")]
    AlreadyVerified,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AccountError>;

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        // Unknown email and wrong password share one message so callers
        // cannot enumerate accounts.
        let (status, error_message) = match self {
            AccountError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AccountError::InvalidToken | AccountError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            AccountError::NotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            AccountError::Conflict => {
                (StatusCode::CONFLICT, "Email already registered".to_string())
            }
            AccountError::Forbidden => {
                (StatusCode::FORBIDDEN, "Not allowed to access this resource".to_string())
            }
            AccountError::AlreadyVerified => {
                (StatusCode::BAD_REQUEST, "User already verified".to_string())
            }
            AccountError::InvalidCode => {
                (StatusCode::BAD_REQUEST, "Invalid verification code".to_string())
            }
            AccountError::CodeExpired => {
                (StatusCode::BAD_REQUEST, "Verification code expired".to_string())
            }
            AccountError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AccountError::Database(_) | AccountError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        AccountError::Database(err.to_string())
    }
}
