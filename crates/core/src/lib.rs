//! SmtpMailer Core - Domain logic and models
//!
//! This crate contains pure domain logic with no I/O operations.
//! Request/response models, validation rules, configuration values,
//! the offerings formatter and error types are defined here.

pub mod config;
pub mod error;
pub mod offerings;
pub mod requests;
pub mod responses;

pub use config::{BrandingConfig, SmtpConfig};
pub use error::{ConfigError, MailerError, TransportError};
pub use offerings::{MessageType, OfferingsText, format_offerings};
pub use requests::{LegacyOtpRequest, OtpEmailRequest, WaitlistEmailRequest};
pub use responses::{LegacyOtpResponse, OtpEmailResponse, WaitlistEmailResponse};

/// Result type alias for mailer operations
pub type MailerResult<T> = Result<T, MailerError>;
