//! Error types for the signature engine.

use thiserror::Error;

/// Configuration and key-material errors.
///
/// A signature that simply does not verify is not an error; see
/// [`SignatureEngine::verify`](crate::SignatureEngine::verify).
#[derive(Debug, Error)]
pub enum SecurityError {
    /// No public key bytes were supplied.
    #[error("public key is missing")]
    MissingPublicKey,

    /// The public key could not be parsed.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The private key could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The private key does not belong to the public key.
    #[error("private key does not match public key")]
    KeyMismatch,

    /// Signing was attempted in verify-only mode.
    #[error("cannot sign: private key is not loaded")]
    SigningKeyUnavailable,

    /// Key material could not be exported.
    #[error("key encoding failed: {0}")]
    Encoding(String),

    /// Key material could not be read from storage.
    #[error("unable to read key material '{0}'")]
    Storage(String),
}

/// Result type for signature engine operations.
pub type SecurityResult<T> = Result<T, SecurityError>;
