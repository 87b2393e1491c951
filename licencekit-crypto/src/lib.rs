//! Signature engine for licencekit.
//!
//! Wraps an asymmetric sign/verify primitive (Ed25519) over key material
//! loaded once at startup:
//! - The public key is always required
//! - The private key is optional; without it the engine only verifies
//! - Verification never errors: a bad signature is simply `false`
//!
//! Key bytes come from a [`KeyStore`], so the engine itself performs no I/O.

mod engine;
mod error;
mod keypair;
mod store;

pub use engine::{SIGNATURE_ALGORITHM, SignatureEngine};
pub use error::{SecurityError, SecurityResult};
pub use keypair::IssuerKeyPair;
pub use store::{DirectoryKeyStore, KeyStore, MemoryKeyStore};
