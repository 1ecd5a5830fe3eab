//! HTTP error mapping shared by every route.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::domain::ledger::LedgerError;

// ════════════════════════════════════════════════════════════════════════════════
// Response Body
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// API error that implements IntoResponse.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(ErrorResponse),
    NotFound(ErrorResponse),
    Unprocessable(ErrorResponse),
    Conflict(ErrorResponse),
    Internal(ErrorResponse),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(ErrorResponse::bad_request(message))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> &ErrorResponse {
        match self {
            ApiError::BadRequest(body)
            | ApiError::NotFound(body)
            | ApiError::Unprocessable(body)
            | ApiError::Conflict(body)
            | ApiError::Internal(body) => body,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(body)
            | ApiError::NotFound(body)
            | ApiError::Unprocessable(body)
            | ApiError::Conflict(body)
            | ApiError::Internal(body) => body,
        };
        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let code = err.code().to_string();
        let message = err.message();
        match err {
            LedgerError::NotFound { entity, id } => ApiError::NotFound(
                ErrorResponse::new(code, message)
                    .with_details(json!({ "entity": entity, "id": id })),
            ),
            LedgerError::ValidationFailed { field, .. } => ApiError::Unprocessable(
                ErrorResponse::new(code, message).with_details(json!({ "field": field })),
            ),
            LedgerError::PartialBatchFailure { saved, failures } => ApiError::Unprocessable(
                ErrorResponse::new("PARTIAL_BATCH_FAILURE", message)
                    .with_details(json!({ "saved": saved, "failures": failures })),
            ),
            LedgerError::Conflict(_) => ApiError::Conflict(ErrorResponse::new(code, message)),
            LedgerError::Infrastructure(detail) => {
                error!(error = %detail, "ledger store failure");
                ApiError::Internal(ErrorResponse::internal("Internal server error"))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Parses an identifier taken from a path segment.
pub fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID format", what)))
}
