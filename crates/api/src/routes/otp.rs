//! OTP email endpoints
//!
//! Both endpoints delegate to the same composition/transport path; the
//! legacy route only reshapes the request and the response at the
//! boundary.

use axum::{Json, Router, extract::State, routing::post};
use smtpmailer_core::{LegacyOtpRequest, LegacyOtpResponse, OtpEmailRequest, OtpEmailResponse};

use crate::AppState;
use crate::error::ApiError;

/// Send a one-time-password email
#[utoipa::path(
    post,
    path = "/email/send_otp",
    request_body = OtpEmailRequest,
    responses(
        (status = 200, description = "OTP email sent", body = OtpEmailResponse),
        (status = 400, description = "Invalid request field"),
        (status = 500, description = "Delivery failed, detail carries the cause")
    ),
    tag = "email"
)]
pub(crate) async fn send_otp(
    State(state): State<AppState>,
    Json(request): Json<OtpEmailRequest>,
) -> Result<Json<OtpEmailResponse>, ApiError> {
    request.validate()?;

    let response = state.mailer.send_otp(&request).await;
    if !response.success {
        return Err(ApiError::DeliveryFailed(response.message));
    }

    Ok(Json(response))
}

/// Send a one-time-password email, legacy flat request shape
#[utoipa::path(
    post,
    path = "/email/send_otp_legacy",
    request_body = LegacyOtpRequest,
    responses(
        (status = 200, description = "OTP email sent", body = LegacyOtpResponse),
        (status = 400, description = "Invalid request field"),
        (status = 500, description = "Delivery failed, detail carries the cause")
    ),
    tag = "email"
)]
pub(crate) async fn send_otp_legacy(
    State(state): State<AppState>,
    Json(request): Json<LegacyOtpRequest>,
) -> Result<Json<LegacyOtpResponse>, ApiError> {
    request.validate()?;

    let otp_request = OtpEmailRequest {
        email: request.email.clone(),
        code: request.code.clone(),
        expiry_minutes: None,
        redirect_url: None,
    };
    let response = state
        .mailer
        .send_otp_branded(&otp_request, &request.app_name)
        .await;
    if !response.success {
        return Err(ApiError::DeliveryFailed(response.message));
    }

    Ok(Json(LegacyOtpResponse {
        success: response.success,
        message: response.message,
        email_sent_to: response.email_sent_to,
    }))
}

/// OTP email routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/email/send_otp", post(send_otp))
        .route("/email/send_otp_legacy", post(send_otp_legacy))
}
