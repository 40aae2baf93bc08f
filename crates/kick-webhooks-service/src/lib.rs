//! # Kick Webhooks Service
//!
//! HTTP host for [`kick_webhooks`]. Builds a [`WebhookClient`] from
//! [`ServiceConfig`], mounts it on an axum router and serves it until
//! SIGINT or SIGTERM.
//!
//! In typed mode every event type gets a handler that logs the decoded
//! event; in passthrough mode every verified body is logged undecoded.
//! Both acknowledge with 200. Applications with real work to do embed the
//! `kick-webhooks` crate directly and register their own handlers.

pub mod config;
pub mod error;

#[cfg(test)]
mod test_support;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use kick_webhooks::events::{
    ChannelFollowed, ChatMessageSent, KicksGifted, LivestreamMetadataUpdated,
    LivestreamStatusUpdated, ModerationBanned, RewardRedemptionUpdated, SubscriptionGifted,
    SubscriptionNew, SubscriptionRenewal,
};
use kick_webhooks::webhook::{EventHandler, WebhookClient, WebhookHeaders};
use kick_webhooks::WebhookEvent;
use std::fmt::Debug;
use tracing::{debug, info, warn};

pub use self::config::{DispatchMode, LoggingConfig, ServerConfig, ServiceConfig, WebhookConfig};
pub use error::{ConfigError, ServiceError};

/// Route answering liveness probes.
pub const HEALTH_PATH: &str = "/health";

// ============================================================================
// Handlers
// ============================================================================

/// Typed handler that logs each decoded event and acknowledges it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventHandler;

#[async_trait::async_trait]
impl<E> EventHandler<E> for LoggingEventHandler
where
    E: WebhookEvent + Debug,
{
    async fn handle(&self, _request: Request, headers: WebhookHeaders, payload: E) -> Response {
        info!(
            event_type = %E::EVENT_TYPE,
            message_id = %headers.message_id,
            subscription_id = %headers.subscription_id,
            version = %headers.version,
            "Received webhook event"
        );
        debug!(event_type = %E::EVENT_TYPE, payload = ?payload, "Decoded webhook payload");

        StatusCode::OK.into_response()
    }
}

/// Passthrough handler that logs each verified body without decoding it.
pub async fn log_passthrough(request: Request, headers: WebhookHeaders) -> StatusCode {
    match axum::body::to_bytes(request.into_body(), usize::MAX).await {
        Ok(body) => {
            info!(
                event_type = %headers.event_type,
                message_id = %headers.message_id,
                body_len = body.len(),
                "Received webhook"
            );
            debug!(body = %String::from_utf8_lossy(&body), "Webhook body");
            StatusCode::OK
        }
        Err(e) => {
            warn!(error = %e, message_id = %headers.message_id, "Failed to re-read verified body");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Register [`LoggingEventHandler`] for every known event type.
pub fn register_logging_handlers(client: &mut WebhookClient) -> Result<(), ServiceError> {
    client.register::<ChatMessageSent, _>(LoggingEventHandler)?;
    client.register::<ChannelFollowed, _>(LoggingEventHandler)?;
    client.register::<SubscriptionRenewal, _>(LoggingEventHandler)?;
    client.register::<SubscriptionGifted, _>(LoggingEventHandler)?;
    client.register::<SubscriptionNew, _>(LoggingEventHandler)?;
    client.register::<RewardRedemptionUpdated, _>(LoggingEventHandler)?;
    client.register::<LivestreamStatusUpdated, _>(LoggingEventHandler)?;
    client.register::<LivestreamMetadataUpdated, _>(LoggingEventHandler)?;
    client.register::<ModerationBanned, _>(LoggingEventHandler)?;
    client.register::<KicksGifted, _>(LoggingEventHandler)?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

// ============================================================================
// Router and Server
// ============================================================================

/// Build the webhook client described by `config`.
pub fn build_client(config: &ServiceConfig) -> Result<WebhookClient, ServiceError> {
    let public_key = config.webhook.public_key()?;

    info!(
        key_bits = public_key.bits(),
        mode = ?config.webhook.mode,
        "Loaded issuer public key"
    );

    Ok(WebhookClient::builder(public_key)
        .max_body_size(config.server.max_body_size)
        .build())
}

/// Build the full HTTP router: the webhook route plus the health probe.
pub fn create_router(config: &ServiceConfig) -> Result<Router, ServiceError> {
    let mut client = build_client(config)?;
    let path = config.server.webhook_path.as_str();

    let webhooks = match config.webhook.mode {
        DispatchMode::Typed => {
            register_logging_handlers(&mut client)?;
            client.into_router(path)
        }
        DispatchMode::Passthrough => client.passthrough_router(path, log_passthrough),
    };

    Ok(webhooks.route(HEALTH_PATH, get(health)))
}

/// Bind, serve and shut down gracefully on SIGINT or SIGTERM.
pub async fn start_server(config: ServiceConfig) -> Result<(), ServiceError> {
    let app = create_router(&config)?;

    let addr = config.bind_address();
    let listener =
        tokio::net::TcpListener::bind(addr.as_str())
            .await
            .map_err(|e| ServiceError::BindFailed {
                address: addr.clone(),
                message: e.to_string(),
            })?;

    info!(
        address = %addr,
        path = %config.server.webhook_path,
        "Starting HTTP server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
