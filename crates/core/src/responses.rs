//! Delivery outcome models
//!
//! Each response is constructed once per request, serialized immediately
//! and never persisted. Timestamps are RFC 3339 UTC with a `Z` suffix.

use crate::offerings::MessageType;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// ISO-8601 UTC timestamp for delivery outcomes
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Outcome of an OTP email delivery attempt
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OtpEmailResponse {
    pub success: bool,
    pub message: String,
    pub email_sent_to: String,
    pub timestamp: String,
    pub expiry_minutes: Option<u32>,
    pub has_verification_button: bool,
    pub logo_used: Option<String>,
}

/// Outcome of a waitlist confirmation delivery attempt
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WaitlistEmailResponse {
    pub success: bool,
    pub message: String,
    pub email_sent_to: String,
    pub timestamp: String,
    /// Display name actually rendered into the email
    pub user_name: String,
    pub has_website_button: bool,
    pub logo_used: Option<String>,
    pub offerings_count: usize,
    pub message_type: MessageType,
    pub offerings_text: String,
    pub offerings_text_html: String,
}

/// Simplified outcome returned by the legacy OTP endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LegacyOtpResponse {
    pub success: bool,
    pub message: String,
    pub email_sent_to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let ts = utc_timestamp();
        assert!(ts.ends_with('Z'));
        assert!(ts.contains('T'));
        // seconds precision: 2025-01-19T10:30:00Z
        assert_eq!(ts.len(), 20);
    }

    #[test]
    fn test_otp_response_serialization() {
        let response = OtpEmailResponse {
            success: true,
            message: "Código OTP enviado exitosamente".to_string(),
            email_sent_to: "usuario@ejemplo.com".to_string(),
            timestamp: utc_timestamp(),
            expiry_minutes: Some(10),
            has_verification_button: true,
            logo_used: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("usuario@ejemplo.com"));
        assert!(json.contains("\"expiry_minutes\":10"));
    }

    #[test]
    fn test_waitlist_response_carries_offerings_metadata() {
        let offerings = crate::offerings::format_offerings(&[
            "CRM".to_string(),
            "Analytics".to_string(),
        ]);
        let response = WaitlistEmailResponse {
            success: true,
            message: "Email de confirmación de waitlist enviado exitosamente".to_string(),
            email_sent_to: "usuario@ejemplo.com".to_string(),
            timestamp: utc_timestamp(),
            user_name: "Juan Pérez".to_string(),
            has_website_button: true,
            logo_used: Some("https://cdn.example.com/logo.png".to_string()),
            offerings_count: 2,
            message_type: offerings.message_type,
            offerings_text: offerings.offerings_text,
            offerings_text_html: offerings.offerings_text_html,
        };

        assert_eq!(response.message_type, MessageType::Multiple);
        assert_eq!(response.offerings_text, "CRM, Analytics");

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"message_type\":\"multiple\""));
        assert!(json.contains("<strong>CRM</strong>"));
    }
}
