//! Error types for licence documents.

use licencekit_crypto::SecurityError;
use thiserror::Error;

/// Licence document errors.
///
/// A document that fails verification is not an error: decoding returns
/// `Ok(None)` so callers cannot tell a forged licence from a missing one.
#[derive(Debug, Error)]
pub enum LicenceError {
    /// Signing or key material problem.
    #[error(transparent)]
    Security(#[from] SecurityError),

    /// The payload verified but does not match the schema.
    #[error("licence payload is corrupt: {0}")]
    CorruptPayload(String),

    /// A field is too large for its length prefix.
    #[error("licence field too large: {0}")]
    FieldTooLarge(&'static str),

    /// Reading or writing a licence file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for licence operations.
pub type LicenceResult<T> = Result<T, LicenceError>;
