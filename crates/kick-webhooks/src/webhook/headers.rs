//! Protocol headers carried by every Kick webhook request.

use axum::http::HeaderMap;

/// Opaque message identifier, part of the signed string.
pub const MESSAGE_ID_HEADER: &str = "event-message-id";

/// Subscription the event was delivered for. Not signed.
pub const SUBSCRIPTION_ID_HEADER: &str = "event-subscription-id";

/// Base64 RSA-PKCS1v15 signature over SHA-256(`id.timestamp.body`).
pub const SIGNATURE_HEADER: &str = "event-signature";

/// Opaque timestamp, part of the signed string.
pub const MESSAGE_TIMESTAMP_HEADER: &str = "event-message-timestamp";

/// Event type selecting the registered handler.
pub const EVENT_TYPE_HEADER: &str = "event-type";

/// Payload schema version. Not used for verification.
pub const VERSION_HEADER: &str = "event-version";

/// Webhook protocol headers extracted from a single request.
///
/// Missing headers (or values that are not valid UTF-8) are represented as
/// empty strings; extraction never fails. A request without a usable
/// signature is rejected later by the verifier.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WebhookHeaders {
    pub message_id: String,
    pub subscription_id: String,
    pub signature: String,
    pub message_timestamp: String,
    pub event_type: String,
    pub version: String,
}

impl WebhookHeaders {
    /// Pull the protocol headers out of an HTTP header map.
    ///
    /// Header name lookup is case-insensitive.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };

        Self {
            message_id: get(MESSAGE_ID_HEADER),
            subscription_id: get(SUBSCRIPTION_ID_HEADER),
            signature: get(SIGNATURE_HEADER),
            message_timestamp: get(MESSAGE_TIMESTAMP_HEADER),
            event_type: get(EVENT_TYPE_HEADER),
            version: get(VERSION_HEADER),
        }
    }
}

// Signatures are credentials for replay; keep them out of logs.
impl std::fmt::Debug for WebhookHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookHeaders")
            .field("message_id", &self.message_id)
            .field("subscription_id", &self.subscription_id)
            .field("signature", &"<REDACTED>")
            .field("message_timestamp", &self.message_timestamp)
            .field("event_type", &self.event_type)
            .field("version", &self.version)
            .finish()
    }
}

#[cfg(test)]
#[path = "headers_tests.rs"]
mod tests;
