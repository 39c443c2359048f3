//! Error handling for API endpoints

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use smtpmailer_core::MailerError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error type that can be converted to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// Request failed field validation; nothing was sent
    BadRequest(String),
    /// Composition or transport failed; the detail string carries the
    /// cause so callers can see why the email was not sent
    DeliveryFailed(String),
    /// Unexpected failure; detail suppressed, logged server-side
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", Some(msg)),
            ApiError::DeliveryFailed(msg) => {
                tracing::error!("Email delivery failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some(msg),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

/// Convert domain errors to ApiError
impl From<MailerError> for ApiError {
    fn from(err: MailerError) -> Self {
        match err {
            MailerError::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::DeliveryFailed(other.to_string()),
        }
    }
}
