//! Email template registry and render contexts
//!
//! Templates are embedded at compile time and registered once when the
//! mailer is constructed. Each operation renders through an explicit
//! context struct, so a missing field is a compile error rather than a
//! silently empty template variable.

use handlebars::Handlebars;
use serde::Serialize;
use smtpmailer_core::{MailerError, MessageType};

/// Render context for the OTP email
#[derive(Debug, Clone, Serialize)]
pub struct OtpContext {
    pub email: String,
    pub otp_code: String,
    pub app_name: String,
    pub logo_url: Option<String>,
    /// Expiry notice shown only when a positive expiry was requested
    pub show_expiry: bool,
    pub expiry_minutes: u32,
    pub show_verification_button: bool,
    pub redirect_url: Option<String>,
}

/// Render context for the waitlist confirmation email
#[derive(Debug, Clone, Serialize)]
pub struct WaitlistContext {
    pub app_name: String,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub support_email: Option<String>,
    pub website_url: Option<String>,
    pub user_name: String,
    pub user_email: String,
    pub show_website_button: bool,
    pub message_type: MessageType,
    pub offerings_text: String,
    pub offerings_text_html: String,
    /// Availability sentence, emphasis markup included
    pub availability_message: String,
}

/// Compiled handlebars registry for all email views
#[derive(Clone)]
pub struct EmailTemplates {
    handlebars: Handlebars<'static>,
}

impl EmailTemplates {
    pub fn new() -> Result<Self, MailerError> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string("otp", include_str!("templates/otp.hbs"))
            .map_err(|e| MailerError::Composition(e.to_string()))?;
        handlebars
            .register_template_string("waitlist", include_str!("templates/waitlist.hbs"))
            .map_err(|e| MailerError::Composition(e.to_string()))?;
        Ok(Self { handlebars })
    }

    pub fn render_otp(&self, context: &OtpContext) -> Result<String, MailerError> {
        self.handlebars
            .render("otp", context)
            .map_err(|e| MailerError::Composition(e.to_string()))
    }

    pub fn render_waitlist(&self, context: &WaitlistContext) -> Result<String, MailerError> {
        self.handlebars
            .render("waitlist", context)
            .map_err(|e| MailerError::Composition(e.to_string()))
    }
}
