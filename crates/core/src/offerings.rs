//! Offerings formatter
//!
//! Turns the list of offerings a user registered interest in into the
//! text fragments rendered into the waitlist confirmation email. Pure
//! function over any valid list; item validation happens upstream when
//! the request is checked.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How the confirmation message addresses the user's offerings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// No specific offerings, generic platform wording
    Platform,
    /// Exactly one offering, named directly
    Single,
    /// Two or more offerings, listed in order
    Multiple,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Platform => "platform",
            MessageType::Single => "single",
            MessageType::Multiple => "multiple",
        }
    }
}

/// Formatted offerings fragments for one waitlist email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferingsText {
    pub message_type: MessageType,
    /// Plain-text variant, e.g. "CRM, Analytics"
    pub offerings_text: String,
    /// HTML variant with each offering emphasized
    pub offerings_text_html: String,
    /// Full availability sentence rendered into the email body
    pub availability_message: String,
}

/// Generate the tri-modal offerings fragments
///
/// - empty list: generic platform wording
/// - one entry: that offering named verbatim, emphasized in HTML
/// - two or more: entries joined with ", ", each emphasized in HTML
pub fn format_offerings(offerings: &[String]) -> OfferingsText {
    match offerings {
        [] => OfferingsText {
            message_type: MessageType::Platform,
            offerings_text: "nuestra plataforma".to_string(),
            offerings_text_html: "nuestra plataforma".to_string(),
            availability_message: "En cuanto nuestra plataforma esté disponible oficialmente"
                .to_string(),
        },
        [offering] => OfferingsText {
            message_type: MessageType::Single,
            offerings_text: offering.clone(),
            offerings_text_html: format!("<strong>{offering}</strong>"),
            availability_message: format!(
                "En cuanto <strong>{offering}</strong> esté disponible oficialmente"
            ),
        },
        _ => {
            let offerings_text = offerings.join(", ");
            let offerings_text_html = offerings
                .iter()
                .map(|offering| format!("<strong>{offering}</strong>"))
                .collect::<Vec<_>>()
                .join(", ");
            let availability_message = format!(
                "En cuanto nuestras soluciones {offerings_text_html} estén disponibles oficialmente"
            );
            OfferingsText {
                message_type: MessageType::Multiple,
                offerings_text,
                offerings_text_html,
                availability_message,
            }
        }
    }
}
