//! Webhook signature verification.
//!
//! Kick signs `message_id + "." + timestamp + "." + body` with RSA PKCS#1 v1.5
//! over a SHA-256 digest and sends the base64 signature in `Event-Signature`.
//! The body is the exact bytes received, never re-serialized JSON.

use crate::error::VerificationError;
use crate::key::PublicKey;
use crate::webhook::headers::WebhookHeaders;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Build the canonical signing string for a webhook.
///
/// ```rust
/// use kick_webhooks::webhook::signing_input;
///
/// let input = signing_input("msg-1", "2025-01-14T16:08:06Z", b"{}");
/// assert_eq!(input, b"msg-1.2025-01-14T16:08:06Z.{}");
/// ```
pub fn signing_input(message_id: &str, timestamp: &str, body: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(message_id.len() + timestamp.len() + body.len() + 2);
    input.extend_from_slice(message_id.as_bytes());
    input.push(b'.');
    input.extend_from_slice(timestamp.as_bytes());
    input.push(b'.');
    input.extend_from_slice(body);
    input
}

/// Verifies Kick webhook signatures against the issuer's public key.
///
/// Verification is stateless: the verifier only reads its key, so a single
/// instance can be shared across concurrent requests.
///
/// # Examples
///
/// ```rust,no_run
/// use kick_webhooks::{PublicKey, SignatureVerifier};
///
/// # fn example(pem: &str, body: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
/// let verifier = SignatureVerifier::new(PublicKey::from_pem(pem)?);
///
/// verifier.verify_parts("msg-1", "2025-01-14T16:08:06Z", body, "c2lnbmF0dXJl...")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: PublicKey,
}

impl SignatureVerifier {
    pub fn new(key: PublicKey) -> Self {
        Self { key }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.key
    }

    /// Verify a webhook body against the signature carried in its headers.
    pub fn verify(&self, headers: &WebhookHeaders, body: &[u8]) -> Result<(), VerificationError> {
        self.verify_parts(
            &headers.message_id,
            &headers.message_timestamp,
            body,
            &headers.signature,
        )
    }

    /// Verify a signature over explicit message parts.
    ///
    /// # Errors
    ///
    /// - `VerificationError::InvalidEncoding` if `signature` is not standard base64
    /// - `VerificationError::SignatureMismatch` if the signature has the wrong
    ///   length or was not produced by the matching private key over exactly
    ///   these bytes
    pub fn verify_parts(
        &self,
        message_id: &str,
        timestamp: &str,
        body: &[u8],
        signature: &str,
    ) -> Result<(), VerificationError> {
        let signature_bytes =
            STANDARD
                .decode(signature)
                .map_err(|e| VerificationError::InvalidEncoding {
                    message: e.to_string(),
                })?;

        let digest = Sha256::digest(signing_input(message_id, timestamp, body));

        self.key
            .rsa()
            .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature_bytes)
            .map_err(|e| {
                debug!(
                    message_id = %message_id,
                    signature_len = signature_bytes.len(),
                    error = %e,
                    "RSA signature check failed"
                );
                VerificationError::SignatureMismatch
            })
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
