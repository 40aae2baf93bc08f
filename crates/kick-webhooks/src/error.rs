//! Error types for Kick webhook intake.
//!
//! Construction-time failures ([`ConfigurationError`]) and registration
//! conflicts ([`DuplicateHandlerError`]) are returned to the caller. Everything
//! that can go wrong while serving a single request is a [`WebhookError`],
//! which the dispatcher converts into an HTTP status and hands to the
//! configured error reporter.

use thiserror::Error;

use crate::events::EventType;

/// Invalid public key material supplied when building a client.
///
/// These errors are fatal: a client cannot be constructed without a usable
/// verification key.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The PEM string was empty or whitespace only.
    #[error("Public key PEM cannot be empty")]
    EmptyKey,

    /// The PEM envelope could not be decoded.
    #[error("Invalid PEM envelope: {message}")]
    InvalidPem { message: String },

    /// The PEM envelope decoded, but the key material inside did not parse.
    #[error("Invalid public key material: {message}")]
    InvalidKeyMaterial { message: String },

    /// The key is not an RSA key.
    #[error("Unsupported key algorithm: {label}")]
    UnsupportedAlgorithm { label: String },

    /// The key file could not be read.
    #[error("Failed to read public key file {path}: {message}")]
    KeyFile { path: String, message: String },
}

/// A handler was already registered for this event type.
///
/// The existing registration is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("A handler is already registered for event type '{event_type}'")]
pub struct DuplicateHandlerError {
    pub event_type: EventType,
}

/// Signature verification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The signature header is not valid standard base64.
    #[error("Signature is not valid base64: {message}")]
    InvalidEncoding { message: String },

    /// The signature does not match the signed content under the public key.
    #[error("Signature does not match the signed content")]
    SignatureMismatch,
}

/// Failures encountered while handling a single webhook request.
///
/// None of these propagate into the hosting server. Each is reported once
/// through the error reporter and answered with [`WebhookError::status_code`].
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request body could not be read in full.
    #[error("Failed to read request body: {message}")]
    BodyRead { message: String },

    /// The request signature was rejected.
    #[error("Webhook signature verification failed: {0}")]
    Verification(#[from] VerificationError),

    /// No handler is registered for the event type named in the headers.
    #[error("Unknown handler type: '{event_type}'")]
    UnknownEventType { event_type: String },

    /// The body did not match the schema registered for its event type.
    #[error("Failed to decode '{event_type}' payload: {source}")]
    Decode {
        event_type: EventType,
        #[source]
        source: serde_json::Error,
    },
}

impl WebhookError {
    /// HTTP status code the dispatcher answers with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BodyRead { .. } => 400,
            Self::Verification(_) => 401,
            Self::UnknownEventType { .. } => 400,
            Self::Decode { .. } => 400,
        }
    }

    /// Short reason phrase written into the response body.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::BodyRead { .. } => "unreadable request body",
            Self::Verification(_) => "invalid signature",
            Self::UnknownEventType { .. } => "unknown event type",
            Self::Decode { .. } => "malformed event payload",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
