//! Application-wide error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Every failure path in the crate funnels into this enum; the
/// `IntoResponse` impl turns it into `{"error":{"code","message"}}`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid or expired OTP")]
    InvalidOtp,

    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Insufficient stock. Remaining: {0}")]
    InsufficientStock(Decimal),

    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// HTTP status and stable machine-readable code, together so the
    /// two can never drift apart.
    fn parts(&self) -> (StatusCode, &'static str) {
        use AppError::*;

        match self {
            Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Jwt(_) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR"),
            Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            InvalidOtp => (StatusCode::BAD_REQUEST, "OTP_INVALID"),
            Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            InsufficientStock(_) => (StatusCode::BAD_REQUEST, "INSUFFICIENT_STOCK"),
            Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message sent to the client. Server-side failures are logged in
    /// full and replaced with a generic line.
    fn client_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("database error: {e:?}");
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::error!("jwt error: {e:?}");
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let message = self.client_message();

        (status, Json(ErrorEnvelope { error: ErrorBody { code, message } })).into_response()
    }
}

/// `repo.find(..).await?.ok_or_not_found()?` is the common lookup shape.
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_and_code_pairing() {
        assert_eq!(
            AppError::Unauthorized.parts(),
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
        );
        assert_eq!(
            AppError::InvalidOtp.parts(),
            (StatusCode::BAD_REQUEST, "OTP_INVALID")
        );
        assert_eq!(
            AppError::InsufficientStock(dec!(5)).parts(),
            (StatusCode::BAD_REQUEST, "INSUFFICIENT_STOCK")
        );
    }

    #[test]
    fn test_insufficient_stock_message_carries_remaining() {
        let err = AppError::InsufficientStock(dec!(25.5));
        assert_eq!(err.to_string(), "Insufficient stock. Remaining: 25.5");
    }

    #[test]
    fn test_internal_details_are_hidden_from_clients() {
        let err = AppError::internal("connection pool exhausted");
        assert_eq!(err.client_message(), "An internal error occurred");
    }

    #[test]
    fn test_option_ext_maps_none_to_not_found() {
        let missing: Option<u32> = None;
        assert!(matches!(
            missing.ok_or_not_found().unwrap_err(),
            AppError::NotFound
        ));
    }
}
