//! Error types for the smtpmailer domain

use thiserror::Error;

/// Errors raised while validating, composing or delivering an email.
///
/// Every request ends in exactly one of these kinds or in a success
/// outcome. None of them are retried: a single delivery attempt is
/// terminal for the request.
#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Invalid request field: {0}")]
    Validation(String),

    #[error("Failed to render email template: {0}")]
    Composition(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// SMTP transport failures, classified by phase
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("SMTP authentication failed: {0}")]
    Auth(String),

    #[error("Recipient refused by SMTP server: {0}")]
    RecipientRefused(String),

    #[error("SMTP protocol error: {0}")]
    Protocol(String),

    #[error("SMTP connection failed: {0}")]
    Connection(String),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}
