//! Waitlist confirmation endpoint

use axum::{Json, Router, extract::State, routing::post};
use smtpmailer_core::{WaitlistEmailRequest, WaitlistEmailResponse};

use crate::AppState;
use crate::error::ApiError;

/// Send a waitlist confirmation email
///
/// The message is personalized by the offerings the user registered
/// interest in; the outcome echoes the resolved personalization for
/// debugging.
#[utoipa::path(
    post,
    path = "/waitlist/send_confirmation",
    request_body = WaitlistEmailRequest,
    responses(
        (status = 200, description = "Confirmation email sent", body = WaitlistEmailResponse),
        (status = 400, description = "Invalid request field"),
        (status = 500, description = "Delivery failed, detail carries the cause")
    ),
    tag = "waitlist"
)]
pub(crate) async fn send_confirmation(
    State(state): State<AppState>,
    Json(request): Json<WaitlistEmailRequest>,
) -> Result<Json<WaitlistEmailResponse>, ApiError> {
    request.validate()?;

    let response = state.mailer.send_waitlist(&request).await;
    if !response.success {
        return Err(ApiError::DeliveryFailed(response.message));
    }

    Ok(Json(response))
}

/// Waitlist routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/waitlist/send_confirmation", post(send_confirmation))
}
