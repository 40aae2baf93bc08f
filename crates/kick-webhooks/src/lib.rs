//! # Kick Webhooks
//!
//! Signature-verified intake of Kick webhook notifications.
//!
//! This crate provides:
//! - RSA public key provisioning from the issuer's PEM
//! - Per-request signature verification over `message_id.timestamp.body`
//! - A typed event catalogue with payload schemas for every Kick event
//! - A write-once handler registry keyed by event type
//! - Typed and passthrough dispatch, ready to mount in an axum router
//!
//! # Examples
//!
//! ```rust,no_run
//! use axum::extract::Request;
//! use axum::http::StatusCode;
//! use kick_webhooks::events::ChatMessageSent;
//! use kick_webhooks::{WebhookClient, WebhookHeaders};
//!
//! # fn example(pem: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = WebhookClient::new(pem, None)?;
//!
//! client.register(
//!     |_request: Request, _headers: WebhookHeaders, message: ChatMessageSent| async move {
//!         println!("chat: {}", message.content);
//!         StatusCode::OK
//!     },
//! )?;
//!
//! let router = client.into_router("/webhooks/kick");
//! # let _ = router;
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod error;
pub mod events;
pub mod key;
pub mod webhook;

#[cfg(test)]
mod test_support;

// Re-export commonly used types at crate root for convenience
pub use error::{ConfigurationError, DuplicateHandlerError, VerificationError, WebhookError};
pub use events::{EventType, WebhookEvent};
pub use key::PublicKey;
pub use webhook::{
    EventHandler, HandlerRegistry, PassthroughHandler, SignatureVerifier, WebhookClient,
    WebhookHeaders,
};
