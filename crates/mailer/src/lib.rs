//! SmtpMailer delivery orchestrator
//!
//! Composes transactional emails from embedded templates and delivers
//! them through the configured SMTP relay. Typed composition and
//! transport errors are converted at this boundary into a failure
//! outcome with `success = false`; validation happens upstream at the
//! HTTP boundary before any work starts here.

pub mod compose;
pub mod templates;
pub mod transport;

use smtpmailer_core::responses::utc_timestamp;
use smtpmailer_core::{
    BrandingConfig, MailerError, OtpEmailRequest, OtpEmailResponse, SmtpConfig,
    WaitlistEmailRequest, WaitlistEmailResponse, format_offerings,
};
use templates::{EmailTemplates, OtpContext, WaitlistContext};

/// Stateless per-request delivery pipeline
///
/// Holds the immutable SMTP and branding configuration plus the
/// compiled template registry. Built once at process start and shared
/// read-only; every send opens its own relay connection.
pub struct Mailer {
    smtp: SmtpConfig,
    branding: BrandingConfig,
    templates: EmailTemplates,
}

impl Mailer {
    pub fn new(smtp: SmtpConfig, branding: BrandingConfig) -> Result<Self, MailerError> {
        Ok(Self {
            smtp,
            branding,
            templates: EmailTemplates::new()?,
        })
    }

    pub fn branding(&self) -> &BrandingConfig {
        &self.branding
    }

    pub fn smtp(&self) -> &SmtpConfig {
        &self.smtp
    }

    /// Send an OTP email using the configured branding
    pub async fn send_otp(&self, request: &OtpEmailRequest) -> OtpEmailResponse {
        self.send_otp_branded(request, &self.branding.app_name).await
    }

    /// Send an OTP email with an overriding application name
    ///
    /// The legacy endpoint carries the app name per request; both
    /// endpoints share this path so the composition and transport logic
    /// exists only once.
    pub async fn send_otp_branded(
        &self,
        request: &OtpEmailRequest,
        app_name: &str,
    ) -> OtpEmailResponse {
        let context = OtpContext {
            email: request.email.clone(),
            otp_code: request.code.clone(),
            app_name: app_name.to_string(),
            logo_url: self.branding.logo_url.clone(),
            show_expiry: request.show_expiry(),
            expiry_minutes: request.expiry_minutes.unwrap_or(0),
            show_verification_button: request.resolved_redirect_url().is_some(),
            redirect_url: request.resolved_redirect_url().map(str::to_string),
        };

        let (success, message) = match self.deliver_otp(&context).await {
            Ok(()) => {
                tracing::info!(recipient = %request.email, "OTP email sent");
                (true, "Código OTP enviado exitosamente".to_string())
            }
            Err(err) => {
                tracing::error!(recipient = %request.email, error = %err, "OTP email failed");
                (false, format!("Error enviando email OTP: {err}"))
            }
        };

        OtpEmailResponse {
            success,
            message,
            email_sent_to: request.email.clone(),
            timestamp: utc_timestamp(),
            expiry_minutes: request.expiry_minutes,
            has_verification_button: context.show_verification_button,
            logo_used: self.branding.logo_url.clone(),
        }
    }

    /// Send a waitlist confirmation email
    pub async fn send_waitlist(&self, request: &WaitlistEmailRequest) -> WaitlistEmailResponse {
        let offerings = request.trimmed_offerings();
        let formatted = format_offerings(&offerings);

        let website_url = request.resolved_website_url(self.branding.website_url.as_deref());
        let context = WaitlistContext {
            app_name: self.branding.app_name.clone(),
            company_name: self.branding.company_name.clone(),
            logo_url: self.branding.logo_url.clone(),
            support_email: self.branding.support_email.clone(),
            show_website_button: website_url.is_some(),
            website_url,
            user_name: request.resolved_user_name(),
            user_email: request.email.clone(),
            message_type: formatted.message_type,
            offerings_text: formatted.offerings_text.clone(),
            offerings_text_html: formatted.offerings_text_html.clone(),
            availability_message: formatted.availability_message.clone(),
        };

        let (success, message) = match self.deliver_waitlist(&context).await {
            Ok(()) => {
                tracing::info!(recipient = %request.email, message_type = formatted.message_type.as_str(), "Waitlist email sent");
                (
                    true,
                    "Email de confirmación de waitlist enviado exitosamente".to_string(),
                )
            }
            Err(err) => {
                tracing::error!(recipient = %request.email, error = %err, "Waitlist email failed");
                (false, format!("Error enviando email de waitlist: {err}"))
            }
        };

        WaitlistEmailResponse {
            success,
            message,
            email_sent_to: request.email.clone(),
            timestamp: utc_timestamp(),
            user_name: context.user_name,
            has_website_button: context.show_website_button,
            logo_used: self.branding.logo_url.clone(),
            offerings_count: offerings.len(),
            message_type: formatted.message_type,
            offerings_text: formatted.offerings_text,
            offerings_text_html: formatted.offerings_text_html,
        }
    }

    async fn deliver_otp(&self, context: &OtpContext) -> Result<(), MailerError> {
        let html = self.templates.render_otp(context)?;
        let text = compose::otp_text_body(context);
        let message = compose::build_message(
            &self.smtp,
            &context.email,
            &compose::otp_subject(&context.app_name),
            text,
            html,
        )?;
        transport::send_message(&self.smtp, message).await?;
        Ok(())
    }

    async fn deliver_waitlist(&self, context: &WaitlistContext) -> Result<(), MailerError> {
        let html = self.templates.render_waitlist(context)?;
        let text = compose::waitlist_text_body(context);
        let message = compose::build_message(
            &self.smtp,
            &context.user_email,
            &compose::waitlist_subject(&context.app_name),
            text,
            html,
        )?;
        transport::send_message(&self.smtp, message).await?;
        Ok(())
    }
}
