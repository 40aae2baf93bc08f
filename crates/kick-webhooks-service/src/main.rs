//! # Kick Webhooks Service
//!
//! Binary entry point. Loads configuration, initialises logging and serves
//! the webhook router until shutdown.
//!
//! Exits with status 3 when configuration cannot be loaded or is invalid.

use kick_webhooks_service::{start_server, LoggingConfig, ServiceConfig};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load();

    // Logging comes up before the error is reported so a broken config is still logged
    let logging = config
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Service configuration is invalid; aborting");
            std::process::exit(3);
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Kick Webhooks Service"
    );

    start_server(config).await?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "kick_webhooks_service={level},kick_webhooks={level}",
            level = logging.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.json_format {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
