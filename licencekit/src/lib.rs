//! licencekit: offline software licensing.
//!
//! Two credentials share one configuration:
//! - **Licence documents**: signed text blocks carrying owner, expiry and features
//! - **Product keys**: short typed keys hiding a few integers, bound to an owner
//!
//! [`LicensingContext::from_config`] loads key material and the permutation
//! signature once; the resulting context is immutable and `Sync`.
//!
//! ```toml
//! key_dir = "/etc/myapp/keys"
//! public_key = "public-key.der"
//! alphabet = "base32"
//! passes = 3
//! key_length = 35
//! permutation_signature = "0e3623140a07..."
//! ```

mod config;
mod context;
mod error;

pub use config::{AlphabetKind, DEFAULT_PRIVATE_KEY, DEFAULT_PUBLIC_KEY, LicensingConfig};
pub use context::LicensingContext;
pub use error::{ConfigError, ConfigResult};

pub use licencekit_crypto::{
    DirectoryKeyStore, IssuerKeyPair, KeyStore, MemoryKeyStore, SecurityError, SignatureEngine,
};
pub use licencekit_licence::{LicenceDocumentCodec, LicenceError, ProductLicence};
pub use licencekit_productkey::{
    Alphabet, KeyStatistics, PermutationSignature, PermutationSignatureGenerator,
    ProductKeyCodec, ProductKeyError, format_key, normalize, salt,
};
