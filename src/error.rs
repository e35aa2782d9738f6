//! Error taxonomy shared by the link store, the code allocator and the HTTP layer.
//!
//! Every public operation returns [`AppError`]. Each variant carries a human-readable
//! message and structured JSON details, and maps to a stable machine-readable code
//! and HTTP status:
//!
//! | Variant | Status | Code |
//! |---|---|---|
//! | `Validation` | 400 | `validation_error` |
//! | `InvalidUrl` | 400 | `invalid_url` |
//! | `InvalidCodeFormat` | 400 | `invalid_code_format` |
//! | `CodeTaken` | 409 | `code_taken` |
//! | `AllocationExhausted` | 503 | `allocation_exhausted` |
//! | `NotFound` | 404 | `not_found` |
//! | `StoreUnavailable` | 500 | `store_unavailable` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::is_unique_violation_on_code;

/// Wire representation of an error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload, also embedded in CLI and batch outputs.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request body.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// URL missing or not an absolute http/https URL.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// Custom code does not match `^[A-Za-z0-9]{6,8}$`.
    #[error("{message}")]
    InvalidCodeFormat { message: String, details: Value },

    /// The chosen code already belongs to an existing link.
    #[error("{message}")]
    CodeTaken { message: String, details: Value },

    /// Every random code attempt collided. Transient; the caller may resubmit.
    #[error("{message}")]
    AllocationExhausted { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The database could not be reached or a query failed for infrastructure reasons.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_code_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCodeFormat {
            message: message.into(),
            details,
        }
    }

    pub fn code_taken(message: impl Into<String>, details: Value) -> Self {
        Self::CodeTaken {
            message: message.into(),
            details,
        }
    }

    pub fn allocation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::AllocationExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidCodeFormat { .. } => "invalid_code_format",
            AppError::CodeTaken { .. } => "code_taken",
            AppError::AllocationExhausted { .. } => "allocation_exhausted",
            AppError::NotFound { .. } => "not_found",
            AppError::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::InvalidUrl { .. }
            | AppError::InvalidCodeFormat { .. } => StatusCode::BAD_REQUEST,
            AppError::CodeTaken { .. } => StatusCode::CONFLICT,
            AppError::AllocationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::InvalidUrl { details, .. }
            | AppError::InvalidCodeFormat { details, .. }
            | AppError::CodeTaken { details, .. }
            | AppError::AllocationExhausted { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::StoreUnavailable { details, .. } => details,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

/// Translates database errors into the taxonomy.
///
/// A unique violation on the `code` constraint becomes [`AppError::CodeTaken`];
/// everything else is an infrastructure failure.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_code(&e) {
            return AppError::code_taken("Short code is already in use", json!({}));
        }

        tracing::error!(error = %e, "Link store query failed");
        AppError::store_unavailable("Link store is unavailable", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&errors).unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::bad_request("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::invalid_url("x", json!({})), StatusCode::BAD_REQUEST),
            (
                AppError::invalid_code_format("x", json!({})),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::code_taken("x", json!({})), StatusCode::CONFLICT),
            (
                AppError::allocation_exhausted("x", json!({})),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AppError::not_found("x", json!({})), StatusCode::NOT_FOUND),
            (
                AppError::store_unavailable("x", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "{}", err.code());
        }
    }

    #[test]
    fn test_error_info_carries_message_and_details() {
        let err = AppError::code_taken("Custom code is taken", json!({ "code": "github" }));
        let info = err.to_error_info();

        assert_eq!(info.code, "code_taken");
        assert_eq!(info.message, "Custom code is taken");
        assert_eq!(info.details["code"], "github");
    }

    #[test]
    fn test_row_not_found_is_store_unavailable() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::StoreUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = AppError::not_found("Short link not found", json!({ "code": "abc123" }))
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"]["code"], "not_found");
        assert_eq!(body["error"]["message"], "Short link not found");
        assert_eq!(body["error"]["details"]["code"], "abc123");
    }
}
