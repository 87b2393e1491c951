//! Issuer key pair generation and export.

use ed25519_dalek::SigningKey;
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::engine::SignatureEngine;
use crate::error::{SecurityError, SecurityResult};

/// A freshly generated issuer key pair.
///
/// The public half ships with the application; the private half stays with
/// whoever issues licences.
pub struct IssuerKeyPair {
    signing_key: SigningKey,
}

impl IssuerKeyPair {
    /// Generates a new random key pair.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generates a key pair from the given RNG.
    pub fn generate_with_rng<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self {
            signing_key: SigningKey::generate(rng),
        }
    }

    /// Creates a key pair from a raw 32-byte secret.
    #[must_use]
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Public key as SubjectPublicKeyInfo DER.
    pub fn public_key_der(&self) -> SecurityResult<Vec<u8>> {
        self.signing_key
            .verifying_key()
            .to_public_key_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| SecurityError::Encoding(e.to_string()))
    }

    /// Private key as PKCS#8 DER.
    pub fn private_key_der(&self) -> SecurityResult<Vec<u8>> {
        self.signing_key
            .to_pkcs8_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| SecurityError::Encoding(e.to_string()))
    }

    /// Public key as PEM.
    pub fn public_key_pem(&self) -> SecurityResult<String> {
        self.signing_key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| SecurityError::Encoding(e.to_string()))
    }

    /// Private key as PEM.
    pub fn private_key_pem(&self) -> SecurityResult<String> {
        self.signing_key
            .to_pkcs8_pem(LineEnding::LF)
            .map(|pem| pem.as_str().to_owned())
            .map_err(|e| SecurityError::Encoding(e.to_string()))
    }

    /// Turns the pair into a signing-capable engine.
    #[must_use]
    pub fn into_engine(self) -> SignatureEngine {
        SignatureEngine::from_signing_key(self.signing_key)
    }
}

impl std::fmt::Debug for IssuerKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuerKeyPair")
            .field("verifying_key", &self.signing_key.verifying_key())
            .field("signing_key", &"[REDACTED]")
            .finish()
    }
}
