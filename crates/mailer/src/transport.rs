//! SMTP transport
//!
//! Opens one fresh connection per delivery attempt under the security
//! mode resolved from configuration, authenticates, transmits and maps
//! relay failures onto [`TransportError`] kinds. No pooling and no
//! retries: the first failure is terminal for the request.

use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use smtpmailer_core::{SmtpConfig, TransportError};

pub type Transport = AsyncSmtpTransport<Tokio1Executor>;

/// Connection security, resolved from the two configuration flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityMode {
    /// TLS-wrapped from the first byte (typically port 465)
    Ssl,
    /// Plaintext connect, STARTTLS upgrade before credentials (port 587)
    StartTls,
    /// Plaintext throughout; allowed for compatibility, discouraged
    Insecure,
}

/// Resolve the security mode, SSL winning over TLS when both are set
pub fn security_mode(config: &SmtpConfig) -> SecurityMode {
    if config.use_ssl {
        if config.use_tls {
            tracing::warn!(
                host = %config.host,
                "SMTP_USE_SSL and SMTP_USE_TLS are both set; using SSL"
            );
        }
        SecurityMode::Ssl
    } else if config.use_tls {
        SecurityMode::StartTls
    } else {
        SecurityMode::Insecure
    }
}

/// Build a transport for a single delivery attempt
pub fn build_transport(config: &SmtpConfig) -> Result<Transport, TransportError> {
    let credentials = Credentials::new(config.username.clone(), config.password.clone());

    let builder = match security_mode(config) {
        SecurityMode::Ssl => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| TransportError::Connection(format!("Failed to create SSL transport: {e}")))?,
        SecurityMode::StartTls => {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host).map_err(|e| {
                TransportError::Connection(format!("Failed to create STARTTLS transport: {e}"))
            })?
        }
        SecurityMode::Insecure => {
            tracing::warn!(
                host = %config.host,
                port = config.port,
                "SMTP security disabled, connecting in plaintext"
            );
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        }
    };

    Ok(builder
        .port(config.port)
        .credentials(credentials)
        .timeout(Some(config.timeout()))
        .build())
}

/// Deliver one message over a fresh connection
///
/// A non-positive reply from the relay is reported as a refusal even
/// when the transmit call itself did not error.
pub async fn send_message(config: &SmtpConfig, message: Message) -> Result<(), TransportError> {
    let transport = build_transport(config)?;

    let response = transport.send(message).await.map_err(classify)?;
    if !response.is_positive() {
        return Err(TransportError::RecipientRefused(format!(
            "SMTP server returned {}",
            response.code()
        )));
    }

    Ok(())
}

/// Map a lettre SMTP error onto the transport error taxonomy
fn classify(error: lettre::transport::smtp::Error) -> TransportError {
    if error.is_timeout() {
        return TransportError::Connection(error.to_string());
    }
    if let Some(code) = error.status() {
        return match code.to_string().as_str() {
            "530" | "534" | "535" | "538" => TransportError::Auth(error.to_string()),
            "550" | "551" | "552" | "553" => TransportError::RecipientRefused(error.to_string()),
            _ => TransportError::Protocol(error.to_string()),
        };
    }
    if error.is_client() {
        TransportError::Protocol(error.to_string())
    } else {
        TransportError::Connection(error.to_string())
    }
}
