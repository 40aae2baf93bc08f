//! Kick webhook verification and dispatch.
//!
//! This module turns inbound HTTP requests from Kick into calls to
//! application code, guaranteeing that only requests signed by Kick's private
//! key ever reach a handler.
//!
//! # Core Components
//!
//! - [`WebhookClient`] - Owns the public key, handler registry and error reporter; dispatches requests
//! - [`WebhookHeaders`] - Protocol headers extracted from each request
//! - [`SignatureVerifier`] - RSA PKCS#1 v1.5 / SHA-256 signature verification
//! - [`HandlerRegistry`] - At most one typed handler per event type
//! - [`EventHandler`] / [`PassthroughHandler`] - Traits implemented by application handlers
//!
//! # Dispatch Modes
//!
//! Typed mode decodes the body into the payload registered for its event
//! type and hands it to that type's handler. Passthrough mode skips decoding
//! and hands every verified request to a single handler, which suits
//! forwarding opaque payloads into a separate pipeline.
//!
//! ## Passthrough to a Queue
//!
//! ```rust,no_run
//! use axum::extract::Request;
//! use axum::http::StatusCode;
//! use kick_webhooks::webhook::{WebhookClient, WebhookHeaders};
//!
//! # async fn example(pem: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let client = WebhookClient::new(pem, None)?;
//!
//! let app = client.passthrough_router(
//!     "/webhooks/kick",
//!     |request: Request, headers: WebhookHeaders| async move {
//!         let body = axum::body::to_bytes(request.into_body(), usize::MAX).await;
//!         match body {
//!             Ok(body) => {
//!                 println!("forwarding {} ({} bytes)", headers.event_type, body.len());
//!                 StatusCode::ACCEPTED
//!             }
//!             Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
//!         }
//!     },
//! );
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod handler;
pub mod headers;
pub mod receiver;
pub mod validation;

// Re-export main types
pub use handler::{EventHandler, HandlerRegistry, PassthroughHandler};
pub use headers::WebhookHeaders;
pub use receiver::{
    default_error_reporter, ErrorReporter, WebhookClient, WebhookClientBuilder,
    DEFAULT_MAX_BODY_SIZE,
};
pub use validation::{signing_input, SignatureVerifier};
