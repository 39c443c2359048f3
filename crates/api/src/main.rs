use std::sync::Arc;

use anyhow::Result;
use api::AppState;
use mailer::Mailer;
use smtpmailer_core::{BrandingConfig, SmtpConfig};

#[tokio::main]
async fn main() -> Result<()> {
    smtpmailer_shared::bootstrap::init_env();

    // The guard must be kept alive so buffered log lines are flushed
    let _guard = smtpmailer_shared::bootstrap::init_tracing("api");

    tracing::info!("Starting SmtpMailer API server");

    let config = api::config::Config::from_env()?;
    let smtp = SmtpConfig::from_env()?;
    let branding = BrandingConfig::from_env()?;
    tracing::info!(
        "Configuration loaded: listening on {}:{}, relay {}:{}",
        config.host,
        config.port,
        smtp.host,
        smtp.port
    );

    let mailer = Mailer::new(smtp, branding)?;
    let state = AppState {
        mailer: Arc::new(mailer),
    };

    api::run_api(state, &config).await?;

    Ok(())
}
