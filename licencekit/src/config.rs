//! Licensing configuration.
//!
//! Read from a TOML file; every field has a default, so an empty file is a
//! valid (verify-only, base32, three-pass) configuration.

use std::path::{Path, PathBuf};

use licencekit_productkey::{
    Alphabet, DEFAULT_KEY_LENGTH, DEFAULT_PASSES, KEY_GROUP_SIZE, PermutationSignature,
    ProductKeyCodec,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default file name of the issuer's public key.
pub const DEFAULT_PUBLIC_KEY: &str = "public-key.der";

/// Default file name of the issuer's private key.
pub const DEFAULT_PRIVATE_KEY: &str = "private-key.der";

/// Which reference alphabet product keys use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetKind {
    /// 32 symbols, 5 bits per character.
    #[default]
    Base32,
    /// 64 symbols, 6 bits per character.
    Base64,
}

impl AlphabetKind {
    /// Returns the alphabet.
    #[must_use]
    pub fn alphabet(self) -> Alphabet {
        match self {
            Self::Base32 => Alphabet::base32(),
            Self::Base64 => Alphabet::base64(),
        }
    }
}

/// Settings for both credential kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LicensingConfig {
    /// Directory key files are read from.
    pub key_dir: PathBuf,
    /// Public key file name inside `key_dir`.
    pub public_key: String,
    /// Private key file name; only set on the issuer side.
    pub private_key: Option<String>,
    /// Product key alphabet.
    pub alphabet: AlphabetKind,
    /// Redundant payload copies per product key.
    pub passes: usize,
    /// Product key length in characters.
    pub key_length: usize,
    /// Characters per display group.
    pub group_size: usize,
    /// Serialized permutation signature (hex).
    pub permutation_signature: Option<String>,
}

impl Default for LicensingConfig {
    fn default() -> Self {
        Self {
            key_dir: PathBuf::from("."),
            public_key: DEFAULT_PUBLIC_KEY.to_string(),
            private_key: None,
            alphabet: AlphabetKind::default(),
            passes: DEFAULT_PASSES,
            key_length: DEFAULT_KEY_LENGTH,
            group_size: KEY_GROUP_SIZE,
            permutation_signature: None,
        }
    }
}

impl LicensingConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or validated.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero pass count, key length or
    /// group size, and a product key error for a malformed signature.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.passes == 0 {
            return Err(ConfigError::Invalid("passes must be at least 1".into()));
        }
        if self.key_length == 0 {
            return Err(ConfigError::Invalid("key_length must be at least 1".into()));
        }
        if self.group_size == 0 {
            return Err(ConfigError::Invalid("group_size must be at least 1".into()));
        }
        self.signature()?;
        Ok(())
    }

    /// Parses the configured permutation signature, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is malformed.
    pub fn signature(&self) -> ConfigResult<Option<PermutationSignature>> {
        self.permutation_signature
            .as_deref()
            .map(PermutationSignature::from_hex)
            .transpose()
            .map_err(ConfigError::from)
    }

    /// Builds the product key codec these settings describe.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is malformed or `passes` is zero.
    pub fn product_key_codec(&self) -> ConfigResult<ProductKeyCodec> {
        Ok(ProductKeyCodec::new(
            self.alphabet.alphabet(),
            self.passes,
            self.signature()?,
        )?)
    }
}
