//! Error types for configuration and context setup.

use licencekit_crypto::SecurityError;
use licencekit_productkey::ProductKeyError;
use thiserror::Error;

/// Errors raised while loading configuration or building a context.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`LicensingConfig`](crate::LicensingConfig).
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),

    /// Key material could not be loaded.
    #[error("security configuration error: {0}")]
    Security(#[from] SecurityError),

    /// Product key settings are inconsistent.
    #[error("product key configuration error: {0}")]
    ProductKey(#[from] ProductKeyError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
