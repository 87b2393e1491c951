//! Shared test helpers for licence document tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use licencekit_crypto::{IssuerKeyPair, SignatureEngine};
use licencekit_licence::{LicenceDocumentCodec, ProductLicence};

/// Deterministic issuer seed.
pub const ISSUER_SEED: [u8; 32] = [7; 32];

/// The licence used throughout the tests.
pub fn alice_licence() -> ProductLicence {
    let expire_at = Utc.with_ymd_and_hms(2031, 3, 14, 15, 9, 26).unwrap();
    ProductLicence::new("Alice", expire_at, ["x", "y"])
}

/// Issuer-side codec holding both keys.
pub fn issuer_codec() -> LicenceDocumentCodec {
    LicenceDocumentCodec::new(Arc::new(IssuerKeyPair::from_seed(&ISSUER_SEED).into_engine()))
}

/// Client-side codec holding only the issuer's public key.
pub fn client_codec() -> LicenceDocumentCodec {
    let public = IssuerKeyPair::from_seed(&ISSUER_SEED)
        .public_key_der()
        .unwrap();
    LicenceDocumentCodec::new(Arc::new(SignatureEngine::load(&public, None).unwrap()))
}

/// Client-side codec holding an unrelated public key.
pub fn stranger_codec() -> LicenceDocumentCodec {
    let public = IssuerKeyPair::from_seed(&[9; 32]).public_key_der().unwrap();
    LicenceDocumentCodec::new(Arc::new(SignatureEngine::load(&public, None).unwrap()))
}
