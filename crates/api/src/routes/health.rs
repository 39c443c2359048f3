//! Health check endpoint

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Configured relay, echoed without probing it
    pub smtp_relay: String,
}

/// Health check endpoint
///
/// Returns 200 OK when the service is up. The relay is echoed but not
/// probed; the service is stateless and has nothing else to check.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub(crate) async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let smtp = state.mailer.smtp();
    Json(HealthResponse {
        status: "ok".to_string(),
        smtp_relay: format!("{}:{}", smtp.host, smtp.port),
    })
}

/// Health check routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
