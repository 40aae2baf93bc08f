//! Webhook intake: verification, handler resolution and dispatch.
//!
//! [`WebhookClient`] is the entry point applications build once at startup.
//! It owns the issuer public key, the handler registry and the error
//! reporter, and turns each inbound HTTP request into exactly one response.
//!
//! # Request Lifecycle
//!
//! 1. Reject anything but `POST` with 405 (headers and body untouched)
//! 2. Extract the protocol headers
//! 3. Buffer the full body (400 if it cannot be read)
//! 4. Verify the signature over `message_id.timestamp.body` (401 on failure)
//! 5. Rebuild the request around the buffered body
//! 6. Typed mode: resolve the handler for `Event-Type` (400 if none), decode
//!    the payload (400 if it does not match) and invoke the handler.
//!    Passthrough mode: invoke the handler directly.
//!
//! No application code runs for a request whose signature failed to verify.
//! Every failure after step 1 is reported once through the [`ErrorReporter`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use axum::extract::Request;
//! use axum::http::StatusCode;
//! use kick_webhooks::events::ChannelFollowed;
//! use kick_webhooks::webhook::{WebhookClient, WebhookHeaders};
//!
//! # async fn example(pem: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = WebhookClient::new(pem, None)?;
//!
//! client.register(
//!     |_request: Request, _headers: WebhookHeaders, event: ChannelFollowed| async move {
//!         println!("new follower: {:?}", event.follower.username);
//!         StatusCode::OK
//!     },
//! )?;
//!
//! let app = client.into_router("/webhooks/kick");
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{ConfigurationError, DuplicateHandlerError, WebhookError};
use crate::events::WebhookEvent;
use crate::key::PublicKey;
use crate::webhook::handler::{EventHandler, HandlerRegistry, PassthroughHandler};
use crate::webhook::headers::WebhookHeaders;
use crate::webhook::validation::SignatureVerifier;
use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Default upper bound on buffered request bodies (10 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

// ============================================================================
// Error Reporter
// ============================================================================

/// Side-channel callback invoked once for every failed request.
///
/// The reporter is informational only; the response is decided before it
/// runs and is not affected by it.
pub type ErrorReporter = Arc<dyn Fn(&WebhookError) + Send + Sync>;

/// Reporter used when none is configured: logs the failure at `ERROR`.
pub fn default_error_reporter() -> ErrorReporter {
    Arc::new(|error: &WebhookError| {
        error!(
            status = error.status_code(),
            error = %error,
            "Webhook request failed"
        );
    })
}

// ============================================================================
// Webhook Client
// ============================================================================

/// Verifies inbound Kick webhooks and dispatches them to application handlers.
///
/// Build one at startup, register handlers, then share it (typically inside
/// an `Arc` or an axum router) across request tasks. Registration takes
/// `&mut self`, so once the client is shared the registry is read-only.
pub struct WebhookClient {
    verifier: SignatureVerifier,
    registry: HandlerRegistry,
    error_reporter: ErrorReporter,
    max_body_size: usize,
}

/// A request that passed signature verification.
struct VerifiedRequest {
    request: Request,
    headers: WebhookHeaders,
    body: Bytes,
}

impl WebhookClient {
    /// Create a client from a PEM-encoded RSA public key.
    ///
    /// Falls back to [`default_error_reporter`] when no reporter is given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the key material is invalid.
    pub fn new(
        public_key_pem: &str,
        error_reporter: Option<ErrorReporter>,
    ) -> Result<Self, ConfigurationError> {
        let public_key = PublicKey::from_pem(public_key_pem)?;

        let mut builder = Self::builder(public_key);
        if let Some(reporter) = error_reporter {
            builder.error_reporter = reporter;
        }

        Ok(builder.build())
    }

    /// Start building a client around an already parsed key.
    pub fn builder(public_key: PublicKey) -> WebhookClientBuilder {
        WebhookClientBuilder {
            public_key,
            error_reporter: default_error_reporter(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Register the handler for event type `E`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateHandlerError` if `E` already has a handler; the
    /// existing handler is kept.
    pub fn register<E, H>(&mut self, handler: H) -> Result<(), DuplicateHandlerError>
    where
        E: WebhookEvent,
        H: EventHandler<E>,
    {
        self.registry.register(handler).inspect(|()| {
            debug!(event_type = %E::EVENT_TYPE, "Registered webhook handler");
        })
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn verifier(&self) -> &SignatureVerifier {
        &self.verifier
    }

    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// Handle a webhook in typed mode.
    ///
    /// The body is decoded as the payload registered for the request's
    /// `Event-Type` and the matching handler produces the response.
    pub async fn dispatch(&self, request: Request) -> Response {
        let verified = match self.verify_request(request).await {
            Ok(verified) => verified,
            Err(response) => return response,
        };

        let Some(handler) = self.registry.resolve(&verified.headers.event_type) else {
            return self.reject(WebhookError::UnknownEventType {
                event_type: verified.headers.event_type,
            });
        };

        match handler
            .invoke(verified.request, verified.headers, verified.body)
            .await
        {
            Ok(response) => response,
            Err(e) => self.reject(e),
        }
    }

    /// Handle a webhook in passthrough mode.
    ///
    /// Every verified request reaches `handler` with its body intact; the
    /// handler registry is not consulted.
    pub async fn dispatch_passthrough<H>(&self, request: Request, handler: &H) -> Response
    where
        H: PassthroughHandler + ?Sized,
    {
        match self.verify_request(request).await {
            Ok(verified) => handler.handle(verified.request, verified.headers).await,
            Err(response) => response,
        }
    }

    /// Serve typed dispatch on `path` for any HTTP method.
    ///
    /// The route accepts every method so that the client itself answers
    /// non-POST requests with 405.
    pub fn into_router(self, path: &str) -> Router {
        let client = Arc::new(self);
        Router::new().route(
            path,
            any(move |request: Request| {
                let client = client.clone();
                async move { client.dispatch(request).await }
            }),
        )
    }

    /// Serve passthrough dispatch to `handler` on `path` for any HTTP method.
    pub fn passthrough_router<H>(self, path: &str, handler: H) -> Router
    where
        H: PassthroughHandler + 'static,
    {
        let client = Arc::new(self);
        let handler = Arc::new(handler);
        Router::new().route(
            path,
            any(move |request: Request| {
                let client = client.clone();
                let handler = handler.clone();
                async move { client.dispatch_passthrough(request, handler.as_ref()).await }
            }),
        )
    }

    /// Method check, header extraction, buffering and signature verification.
    async fn verify_request(&self, request: Request) -> Result<VerifiedRequest, Response> {
        if request.method() != Method::POST {
            debug!(method = %request.method(), "Rejecting non-POST webhook request");
            return Err((
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "POST")],
                "method not allowed",
            )
                .into_response());
        }

        let (parts, body) = request.into_parts();
        let headers = WebhookHeaders::from_header_map(&parts.headers);

        let body = match axum::body::to_bytes(body, self.max_body_size).await {
            Ok(body) => body,
            Err(e) => {
                return Err(self.reject(WebhookError::BodyRead {
                    message: e.to_string(),
                }))
            }
        };

        if let Err(e) = self.verifier.verify(&headers, &body) {
            return Err(self.reject(e.into()));
        }

        info!(
            event_type = %headers.event_type,
            message_id = %headers.message_id,
            body_len = body.len(),
            "Webhook signature verified"
        );

        let request = Request::from_parts(parts, Body::from(body.clone()));

        Ok(VerifiedRequest {
            request,
            headers,
            body,
        })
    }

    fn reject(&self, error: WebhookError) -> Response {
        (self.error_reporter)(&error);

        let status =
            StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
        (status, error.reason()).into_response()
    }
}

impl std::fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookClient")
            .field("verifier", &self.verifier)
            .field("registry", &self.registry)
            .field("max_body_size", &self.max_body_size)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`WebhookClient`].
pub struct WebhookClientBuilder {
    public_key: PublicKey,
    error_reporter: ErrorReporter,
    max_body_size: usize,
}

impl WebhookClientBuilder {
    /// Replace the default logging reporter.
    pub fn error_reporter<F>(mut self, reporter: F) -> Self
    where
        F: Fn(&WebhookError) + Send + Sync + 'static,
    {
        self.error_reporter = Arc::new(reporter);
        self
    }

    /// Largest body accepted before the request is answered with 400.
    pub fn max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    pub fn build(self) -> WebhookClient {
        WebhookClient {
            verifier: SignatureVerifier::new(self.public_key),
            registry: HandlerRegistry::new(),
            error_reporter: self.error_reporter,
            max_body_size: self.max_body_size,
        }
    }
}

#[cfg(test)]
#[path = "receiver_tests.rs"]
mod tests;
