//! Handler traits and the per-client handler registry.
//!
//! Applications supply handlers in one of two shapes:
//!
//! - [`EventHandler<E>`] receives the verified request together with its body
//!   decoded as the typed payload `E`. Handlers are registered per event type
//!   in a [`HandlerRegistry`]; at most one handler may exist per type.
//! - [`PassthroughHandler`] receives the verified request with its body left
//!   untouched, for forwarding opaque payloads to a queue or store.
//!
//! Both traits are implemented for async closures, so most applications never
//! name them directly.
//!
//! # Examples
//!
//! ```rust
//! use axum::extract::Request;
//! use axum::http::StatusCode;
//! use kick_webhooks::events::ChatMessageSent;
//! use kick_webhooks::webhook::{HandlerRegistry, WebhookHeaders};
//!
//! let mut registry = HandlerRegistry::new();
//!
//! registry
//!     .register(
//!         |_request: Request, _headers: WebhookHeaders, message: ChatMessageSent| async move {
//!             println!("{}: {}", message.sender.username.unwrap_or_default(), message.content);
//!             StatusCode::OK
//!         },
//!     )
//!     .expect("first registration succeeds");
//! ```

use crate::error::{DuplicateHandlerError, WebhookError};
use crate::events::{EventType, WebhookEvent};
use crate::webhook::headers::WebhookHeaders;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;

// ============================================================================
// Handler Traits
// ============================================================================

/// Application handler for one typed webhook event.
///
/// Invoked only after the request signature has been verified and the body
/// has decoded as `E`. The request passed in still carries the full original
/// body, readable as if it had never been consumed.
///
/// The returned response is sent to the issuer as-is; the handler owns the
/// success status.
#[async_trait]
pub trait EventHandler<E: WebhookEvent>: Send + Sync + 'static {
    async fn handle(&self, request: Request, headers: WebhookHeaders, payload: E) -> Response;
}

#[async_trait]
impl<E, F, Fut, R> EventHandler<E> for F
where
    E: WebhookEvent,
    F: Fn(Request, WebhookHeaders, E) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send,
    R: IntoResponse,
{
    async fn handle(&self, request: Request, headers: WebhookHeaders, payload: E) -> Response {
        (self)(request, headers, payload).await.into_response()
    }
}

/// Application handler for verified but undecoded webhooks.
///
/// No event type lookup happens in passthrough mode; every verified request
/// reaches the handler regardless of its `Event-Type` header.
#[async_trait]
pub trait PassthroughHandler: Send + Sync {
    async fn handle(&self, request: Request, headers: WebhookHeaders) -> Response;
}

#[async_trait]
impl<F, Fut, R> PassthroughHandler for F
where
    F: Fn(Request, WebhookHeaders) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send,
    R: IntoResponse,
{
    async fn handle(&self, request: Request, headers: WebhookHeaders) -> Response {
        (self)(request, headers).await.into_response()
    }
}

// ============================================================================
// Type-erased Registry Entries
// ============================================================================

/// Decode-then-invoke operation shared by every registry entry.
#[async_trait]
pub(crate) trait ErasedHandler: Send + Sync {
    async fn invoke(
        &self,
        request: Request,
        headers: WebhookHeaders,
        body: Bytes,
    ) -> Result<Response, WebhookError>;
}

struct TypedHandler<E, H> {
    handler: H,
    _event: PhantomData<fn() -> E>,
}

#[async_trait]
impl<E, H> ErasedHandler for TypedHandler<E, H>
where
    E: WebhookEvent,
    H: EventHandler<E>,
{
    async fn invoke(
        &self,
        request: Request,
        headers: WebhookHeaders,
        body: Bytes,
    ) -> Result<Response, WebhookError> {
        let payload: E =
            serde_json::from_slice(&body).map_err(|source| WebhookError::Decode {
                event_type: E::EVENT_TYPE,
                source,
            })?;

        Ok(self.handler.handle(request, headers, payload).await)
    }
}

// ============================================================================
// Handler Registry
// ============================================================================

/// Write-once map from event type to its handler.
///
/// Registration needs `&mut self`. Once the owning client is shared between
/// request tasks the registry can only be read, so all registration has to
/// happen during application setup.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<EventType, Box<dyn ErasedHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for event type `E::EVENT_TYPE`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateHandlerError` if a handler is already registered for
    /// this event type. The first registration stays in place.
    pub fn register<E, H>(&mut self, handler: H) -> Result<(), DuplicateHandlerError>
    where
        E: WebhookEvent,
        H: EventHandler<E>,
    {
        match self.handlers.entry(E::EVENT_TYPE) {
            Entry::Occupied(_) => Err(DuplicateHandlerError {
                event_type: E::EVENT_TYPE,
            }),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(TypedHandler {
                    handler,
                    _event: PhantomData,
                }));
                Ok(())
            }
        }
    }

    pub fn contains(&self, event_type: EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered event types in a stable order.
    pub fn event_types(&self) -> Vec<EventType> {
        let mut event_types: Vec<EventType> = self.handlers.keys().copied().collect();
        event_types.sort();
        event_types
    }

    /// Look up the handler for a raw `Event-Type` header value.
    pub(crate) fn resolve(&self, event_type: &str) -> Option<&dyn ErasedHandler> {
        let event_type: EventType = event_type.parse().ok()?;
        self.handlers.get(&event_type).map(|handler| handler.as_ref())
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("event_types", &self.event_types())
            .finish()
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
