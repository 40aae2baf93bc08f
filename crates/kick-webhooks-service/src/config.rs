//! Configuration types for the webhook service
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. `config/service.{yaml,toml}` relative to the working directory
//! 2. The file named by `KICK_WEBHOOKS_CONFIG_FILE`
//! 3. Environment variables prefixed `KICK_WEBHOOKS__` with `__` between
//!    path segments, e.g. `KICK_WEBHOOKS__SERVER__PORT=9090`
//!
//! Every field has a default, so only the issuer public key has to be
//! supplied.

use crate::error::ConfigError;
use kick_webhooks::webhook::DEFAULT_MAX_BODY_SIZE;
use kick_webhooks::PublicKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_FILE_ENV: &str = "KICK_WEBHOOKS_CONFIG_FILE";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "KICK_WEBHOOKS";

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Issuer key and dispatch settings
    pub webhook: WebhookConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from the default file, the file named by
    /// `KICK_WEBHOOKS_CONFIG_FILE` and the environment, then validate it.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_FILE_ENV)
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self::load_from(explicit.as_deref())
    }

    /// Same as [`ServiceConfig::load`] with the explicit file given directly.
    ///
    /// An explicit file must exist; the default file is optional.
    pub fn load_from(explicit_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/service").required(false));

        if let Some(path) = explicit_file {
            info!(path = %path.display(), "Loading configuration from explicit path");
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let service_config: ServiceConfig = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        service_config.validate()?;
        Ok(service_config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server.webhook_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                message: format!(
                    "server.webhook_path must start with '/', got '{}'",
                    self.server.webhook_path
                ),
            });
        }

        if self.server.max_body_size == 0 {
            return Err(ConfigError::Invalid {
                message: "server.max_body_size must be greater than zero".to_string(),
            });
        }

        match (&self.webhook.public_key_pem, &self.webhook.public_key_path) {
            (None, None) => Err(ConfigError::Missing {
                key: "webhook.public_key_pem or webhook.public_key_path".to_string(),
            }),
            (Some(_), Some(_)) => Err(ConfigError::Invalid {
                message: "set only one of webhook.public_key_pem and webhook.public_key_path"
                    .to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request size in bytes
    pub max_body_size: usize,

    /// Route serving webhooks
    pub webhook_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            webhook_path: "/webhooks/kick".to_string(),
        }
    }
}

/// How verified webhooks are handed to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Decode each event and route it by `Event-Type`.
    #[default]
    Typed,

    /// Forward every verified body without decoding.
    Passthrough,
}

/// Issuer key and dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WebhookConfig {
    /// Inline PEM-encoded issuer public key
    pub public_key_pem: Option<String>,

    /// Path to a PEM file holding the issuer public key
    pub public_key_path: Option<PathBuf>,

    /// Dispatch mode
    pub mode: DispatchMode,
}

impl WebhookConfig {
    /// Parse the configured issuer key from whichever source is set.
    pub fn public_key(&self) -> Result<PublicKey, ConfigError> {
        match (&self.public_key_pem, &self.public_key_path) {
            (Some(pem), None) => Ok(PublicKey::from_pem(pem)?),
            (None, Some(path)) => Ok(PublicKey::from_pem_file(path)?),
            (None, None) => Err(ConfigError::Missing {
                key: "webhook.public_key_pem or webhook.public_key_path".to_string(),
            }),
            (Some(_), Some(_)) => Err(ConfigError::Invalid {
                message: "set only one of webhook.public_key_pem and webhook.public_key_path"
                    .to_string(),
            }),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
