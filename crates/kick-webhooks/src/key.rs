//! Public key provisioning for webhook signature verification.
//!
//! Kick signs every webhook with a single RSA key pair and publishes the
//! public half as PEM. The key is parsed once when a client is built and
//! shared read-only by every verification afterwards.

use crate::error::ConfigurationError;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::der::{pem, Decode};
use rsa::pkcs8::{DecodePublicKey, ObjectIdentifier, SubjectPublicKeyInfoRef};
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use std::path::Path;
use std::sync::Arc;

/// `rsaEncryption` from PKCS#1.
const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

const SPKI_LABEL: &str = "PUBLIC KEY";
const PKCS1_LABEL: &str = "RSA PUBLIC KEY";

/// RSA public key used to verify webhook signatures.
///
/// Immutable once constructed. Cloning shares the underlying key.
///
/// # Examples
///
/// ```no_run
/// # use kick_webhooks::PublicKey;
/// let pem = r#"-----BEGIN PUBLIC KEY-----
/// MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA...
/// -----END PUBLIC KEY-----"#;
///
/// let key = PublicKey::from_pem(pem).expect("Invalid PEM");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: Arc<RsaPublicKey>,
}

impl PublicKey {
    /// Parse a PEM-encoded RSA public key.
    ///
    /// Accepts both SubjectPublicKeyInfo (`BEGIN PUBLIC KEY`) and PKCS#1
    /// (`BEGIN RSA PUBLIC KEY`) envelopes. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if:
    /// - The string is empty
    /// - The PEM envelope cannot be decoded
    /// - The key material inside cannot be parsed
    /// - The key is not an RSA key
    pub fn from_pem(pem_str: &str) -> Result<Self, ConfigurationError> {
        let pem_str = pem_str.trim();

        if pem_str.is_empty() {
            return Err(ConfigurationError::EmptyKey);
        }

        let (label, der) =
            pem::decode_vec(pem_str.as_bytes()).map_err(|e| ConfigurationError::InvalidPem {
                message: e.to_string(),
            })?;

        let key = match label {
            SPKI_LABEL => {
                let spki = SubjectPublicKeyInfoRef::from_der(&der).map_err(|e| {
                    ConfigurationError::InvalidKeyMaterial {
                        message: e.to_string(),
                    }
                })?;

                if spki.algorithm.oid != RSA_ENCRYPTION_OID {
                    return Err(ConfigurationError::UnsupportedAlgorithm {
                        label: spki.algorithm.oid.to_string(),
                    });
                }

                RsaPublicKey::from_public_key_der(&der).map_err(|e| {
                    ConfigurationError::InvalidKeyMaterial {
                        message: e.to_string(),
                    }
                })?
            }
            PKCS1_LABEL => RsaPublicKey::from_pkcs1_der(&der).map_err(|e| {
                ConfigurationError::InvalidKeyMaterial {
                    message: e.to_string(),
                }
            })?,
            other => {
                return Err(ConfigurationError::UnsupportedAlgorithm {
                    label: other.to_string(),
                })
            }
        };

        Ok(Self {
            inner: Arc::new(key),
        })
    }

    /// Read and parse a PEM-encoded RSA public key from a file.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let pem_str = std::fs::read_to_string(path).map_err(|e| ConfigurationError::KeyFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_pem(&pem_str)
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.inner.size() * 8
    }

    pub(crate) fn rsa(&self) -> &RsaPublicKey {
        &self.inner
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("algorithm", &"RSA")
            .field("bits", &self.bits())
            .finish()
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
