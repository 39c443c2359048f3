//! Configuration loaded from environment variables
//!
//! All values are read once at process start and passed explicitly into
//! the composer, transport and orchestrator. Nothing here is mutated
//! after startup.

use crate::error::ConfigError;
use std::env;
use std::time::Duration;

/// SMTP relay connection settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Upgrade a plaintext connection via STARTTLS (typically port 587)
    pub use_tls: bool,
    /// Open a TLS-wrapped connection from the start (typically port 465)
    pub use_ssl: bool,
    pub from_email: String,
    pub from_name: String,
    /// Bound on connect/authenticate/send waits, in seconds
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// Load SMTP configuration from `SMTP_*` environment variables
    ///
    /// Host, username, password and from-address are required; the rest
    /// fall back to the defaults of a STARTTLS submission setup.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: require("SMTP_HOST")?,
            port: parse_or("SMTP_PORT", 587)?,
            username: require("SMTP_USERNAME")?,
            password: require("SMTP_PASSWORD")?,
            use_tls: parse_or("SMTP_USE_TLS", true)?,
            use_ssl: parse_or("SMTP_USE_SSL", false)?,
            from_email: require("SMTP_FROM_EMAIL")?,
            from_name: env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "SmtpMailer API".to_string()),
            timeout_secs: parse_or("SMTP_TIMEOUT", 30)?,
        })
    }

    /// Connection timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Branding fields rendered into every email
#[derive(Debug, Clone)]
pub struct BrandingConfig {
    pub app_name: String,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub support_email: Option<String>,
    /// Default destination for the waitlist website button when the
    /// request does not provide one
    pub website_url: Option<String>,
}

impl BrandingConfig {
    /// Load branding configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "SmtpMailer".to_string()),
            company_name: env::var("COMPANY_NAME").unwrap_or_else(|_| "Mi Empresa".to_string()),
            logo_url: env::var("COMPANY_LOGO_URL").ok(),
            support_email: env::var("SUPPORT_EMAIL").ok(),
            website_url: env::var("WEBSITE_URL").ok(),
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}
