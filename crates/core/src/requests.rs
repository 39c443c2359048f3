//! Request models and field validation
//!
//! Each request validates its own shape before any template is rendered
//! or any network connection is opened. Validation messages are the
//! user-facing Spanish strings surfaced through the HTTP boundary.

use crate::error::MailerError;
use lettre::Address;
use serde::Deserialize;
use utoipa::ToSchema;

const CODE_MIN_LEN: usize = 4;
const CODE_MAX_LEN: usize = 8;
const MAX_EXPIRY_MINUTES: u32 = 1440;
const MAX_URL_LEN: usize = 2048;
const MAX_OFFERINGS: usize = 10;
const MAX_OFFERING_LEN: usize = 100;
const MAX_USER_NAME_LEN: usize = 100;

/// Request to send a one-time-password email
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OtpEmailRequest {
    /// Recipient address, RFC-5322 mailbox
    pub email: String,
    /// Alphanumeric verification code, 4-8 characters
    pub code: String,
    /// Expiry notice in minutes; 0 or absent suppresses the notice
    #[serde(default)]
    pub expiry_minutes: Option<u32>,
    /// Optional verification-button target, http(s) only
    #[serde(default)]
    pub redirect_url: Option<String>,
}

impl OtpEmailRequest {
    /// Check all field constraints, rejecting before any network activity
    pub fn validate(&self) -> Result<(), MailerError> {
        validate_email(&self.email)?;
        validate_code(&self.code)?;

        if let Some(minutes) = self.expiry_minutes
            && minutes > MAX_EXPIRY_MINUTES
        {
            return Err(MailerError::Validation(format!(
                "El tiempo de expiración debe estar entre 0 y {MAX_EXPIRY_MINUTES} minutos"
            )));
        }

        validate_url(
            self.redirect_url.as_deref(),
            "URL de redirección debe comenzar con http:// o https://",
        )
    }

    /// Whether the rendered email shows an expiry notice
    pub fn show_expiry(&self) -> bool {
        self.expiry_minutes.is_some_and(|minutes| minutes > 0)
    }

    /// Verification-button target, blank values treated as absent
    pub fn resolved_redirect_url(&self) -> Option<&str> {
        self.redirect_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Flat request body accepted by the legacy OTP endpoint
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LegacyOtpRequest {
    pub email: String,
    pub code: String,
    /// Overrides the configured branding app name for this send
    pub app_name: String,
}

impl LegacyOtpRequest {
    pub fn validate(&self) -> Result<(), MailerError> {
        validate_email(&self.email)?;
        validate_code(&self.code)
    }
}

/// Request to send a waitlist confirmation email
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WaitlistEmailRequest {
    /// Address registered on the waitlist
    pub email: String,
    /// Display name for the greeting; "Usuario" when absent or blank
    #[serde(default)]
    pub user_name: Option<String>,
    /// Website-button target; configured default when absent or blank
    #[serde(default)]
    pub website_url: Option<String>,
    /// Offerings the user registered interest in, at most 10
    #[serde(default)]
    pub offerings: Vec<String>,
}

impl WaitlistEmailRequest {
    /// Check all field constraints, rejecting before any network activity
    pub fn validate(&self) -> Result<(), MailerError> {
        validate_email(&self.email)?;

        if let Some(name) = &self.user_name
            && name.chars().count() > MAX_USER_NAME_LEN
        {
            return Err(MailerError::Validation(format!(
                "El nombre del usuario debe tener máximo {MAX_USER_NAME_LEN} caracteres"
            )));
        }

        validate_url(
            self.website_url.as_deref(),
            "URL del sitio web debe comenzar con http:// o https://",
        )?;

        if self.offerings.len() > MAX_OFFERINGS {
            return Err(MailerError::Validation(format!(
                "Máximo {MAX_OFFERINGS} ofertas permitidas"
            )));
        }
        for offering in &self.offerings {
            let trimmed = offering.trim();
            if trimmed.is_empty() {
                return Err(MailerError::Validation(
                    "Las ofertas no pueden estar vacías".to_string(),
                ));
            }
            if trimmed.chars().count() > MAX_OFFERING_LEN {
                return Err(MailerError::Validation(format!(
                    "Cada oferta debe tener máximo {MAX_OFFERING_LEN} caracteres"
                )));
            }
        }

        Ok(())
    }

    /// Display name applied in the email, defaulting to "Usuario"
    pub fn resolved_user_name(&self) -> String {
        self.user_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Usuario")
            .to_string()
    }

    /// Website-button target: request value or the configured default
    pub fn resolved_website_url(&self, default: Option<&str>) -> Option<String> {
        self.website_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .or_else(|| default.map(str::trim).filter(|url| !url.is_empty()))
            .map(str::to_string)
    }

    /// Offerings with surrounding whitespace removed
    pub fn trimmed_offerings(&self) -> Vec<String> {
        self.offerings
            .iter()
            .map(|offering| offering.trim().to_string())
            .filter(|offering| !offering.is_empty())
            .collect()
    }
}

fn validate_email(email: &str) -> Result<(), MailerError> {
    email
        .parse::<Address>()
        .map(|_| ())
        .map_err(|_| MailerError::Validation(format!("Dirección de correo inválida: {email}")))
}

fn validate_code(code: &str) -> Result<(), MailerError> {
    let len = code.chars().count();
    if !(CODE_MIN_LEN..=CODE_MAX_LEN).contains(&len)
        || !code.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(MailerError::Validation(format!(
            "El código OTP debe tener entre {CODE_MIN_LEN} y {CODE_MAX_LEN} caracteres alfanuméricos"
        )));
    }
    Ok(())
}

fn validate_url(url: Option<&str>, scheme_message: &str) -> Result<(), MailerError> {
    let Some(url) = url else { return Ok(()) };
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if trimmed.chars().count() > MAX_URL_LEN {
        return Err(MailerError::Validation(format!(
            "La URL debe tener máximo {MAX_URL_LEN} caracteres"
        )));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(MailerError::Validation(scheme_message.to_string()));
    }
    Ok(())
}
