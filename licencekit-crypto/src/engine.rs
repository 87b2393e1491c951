//! Ed25519 signing and verification over loaded key material.
//!
//! Keys are read from the standard interchange encodings: SubjectPublicKeyInfo
//! for the public key and PKCS#8 for the private key, each as DER or PEM.

use ed25519_dalek::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};
use tracing::debug;

use crate::error::{SecurityError, SecurityResult};
use crate::store::KeyStore;

/// Signature scheme used for every licence signature.
pub const SIGNATURE_ALGORITHM: &str = "Ed25519";

const PEM_PREFIX: &[u8] = b"-----BEGIN";

/// Signs and verifies licence payloads.
///
/// Holds a verifying key and, on the issuer side only, a signing key. Once
/// loaded the engine is immutable and can be shared across threads.
pub struct SignatureEngine {
    verifying_key: VerifyingKey,
    signing_key: Option<SigningKey>,
}

impl SignatureEngine {
    /// Parses key material.
    ///
    /// Without a private key the engine is verify-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the public key is empty or malformed, if the
    /// private key is malformed, or if the two keys do not form a pair.
    pub fn load(public_key: &[u8], private_key: Option<&[u8]>) -> SecurityResult<Self> {
        if public_key.is_empty() {
            return Err(SecurityError::MissingPublicKey);
        }
        let verifying_key = parse_public_key(public_key)?;

        let signing_key = match private_key {
            Some(bytes) => {
                let signing_key = parse_private_key(bytes)?;
                if signing_key.verifying_key() != verifying_key {
                    return Err(SecurityError::KeyMismatch);
                }
                Some(signing_key)
            }
            None => None,
        };

        Ok(Self {
            verifying_key,
            signing_key,
        })
    }

    /// Loads key material from a [`KeyStore`] by logical name.
    ///
    /// Storage failures are reported as [`SecurityError::Storage`] without
    /// their underlying cause.
    ///
    /// # Errors
    ///
    /// Returns an error if a named entry cannot be read or parsed.
    pub fn from_store(
        store: &dyn KeyStore,
        public_name: &str,
        private_name: Option<&str>,
    ) -> SecurityResult<Self> {
        let public_key = read_entry(store, public_name)?;
        let private_key = private_name
            .map(|name| read_entry(store, name))
            .transpose()?;
        Self::load(&public_key, private_key.as_deref())
    }

    /// Builds an engine directly from an in-memory signing key.
    pub(crate) fn from_signing_key(signing_key: SigningKey) -> Self {
        Self {
            verifying_key: signing_key.verifying_key(),
            signing_key: Some(signing_key),
        }
    }

    /// Returns true if a private key is loaded.
    #[must_use]
    pub fn can_sign(&self) -> bool {
        self.signing_key.is_some()
    }

    /// Signs a payload.
    ///
    /// # Errors
    ///
    /// Returns [`SecurityError::SigningKeyUnavailable`] in verify-only mode.
    pub fn sign(&self, payload: &[u8]) -> SecurityResult<Vec<u8>> {
        let signing_key = self
            .signing_key
            .as_ref()
            .ok_or(SecurityError::SigningKeyUnavailable)?;
        Ok(signing_key.sign(payload).to_bytes().to_vec())
    }

    /// Checks a signature against a payload.
    ///
    /// Any mismatch yields `false`: wrong key, malformed signature bytes, or
    /// a corrupted payload.
    #[must_use]
    pub fn verify(&self, payload: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::from_slice(signature) else {
            debug!(len = signature.len(), "signature has unexpected length");
            return false;
        };
        self.verifying_key.verify(payload, &signature).is_ok()
    }

    /// Returns the public key as SubjectPublicKeyInfo DER.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be encoded.
    pub fn public_key_der(&self) -> SecurityResult<Vec<u8>> {
        self.verifying_key
            .to_public_key_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| SecurityError::Encoding(e.to_string()))
    }
}

impl std::fmt::Debug for SignatureEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureEngine")
            .field("algorithm", &SIGNATURE_ALGORITHM)
            .field("verifying_key", &self.verifying_key)
            .field("signing_key", &self.signing_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn read_entry(store: &dyn KeyStore, name: &str) -> SecurityResult<Vec<u8>> {
    store.read(name).map_err(|e| {
        debug!(name, error = %e, "key store read failed");
        SecurityError::Storage(name.to_string())
    })
}

fn is_pem(bytes: &[u8]) -> bool {
    bytes.trim_ascii_start().starts_with(PEM_PREFIX)
}

fn parse_public_key(bytes: &[u8]) -> SecurityResult<VerifyingKey> {
    if is_pem(bytes) {
        let pem = std::str::from_utf8(bytes)
            .map_err(|e| SecurityError::InvalidPublicKey(e.to_string()))?;
        VerifyingKey::from_public_key_pem(pem.trim())
            .map_err(|e| SecurityError::InvalidPublicKey(e.to_string()))
    } else {
        VerifyingKey::from_public_key_der(bytes)
            .map_err(|e| SecurityError::InvalidPublicKey(e.to_string()))
    }
}

fn parse_private_key(bytes: &[u8]) -> SecurityResult<SigningKey> {
    if is_pem(bytes) {
        let pem = std::str::from_utf8(bytes)
            .map_err(|e| SecurityError::InvalidPrivateKey(e.to_string()))?;
        SigningKey::from_pkcs8_pem(pem.trim())
            .map_err(|e| SecurityError::InvalidPrivateKey(e.to_string()))
    } else {
        SigningKey::from_pkcs8_der(bytes)
            .map_err(|e| SecurityError::InvalidPrivateKey(e.to_string()))
    }
}
