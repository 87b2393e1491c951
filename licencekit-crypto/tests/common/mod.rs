//! Shared test helpers for signature engine tests.

#![allow(dead_code)]

use licencekit_crypto::{IssuerKeyPair, SignatureEngine};

/// Fixed seed so failures are reproducible.
pub const TEST_SEED: [u8; 32] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
    26, 27, 28, 29, 30, 31, 32,
];

/// Returns a deterministic key pair.
pub fn test_keypair() -> IssuerKeyPair {
    IssuerKeyPair::from_seed(&TEST_SEED)
}

/// Returns `(public_der, private_der)` for the deterministic key pair.
pub fn test_key_der() -> (Vec<u8>, Vec<u8>) {
    let kp = test_keypair();
    (kp.public_key_der().unwrap(), kp.private_key_der().unwrap())
}

/// Returns a signing-capable engine over the deterministic key pair.
pub fn signing_engine() -> SignatureEngine {
    let (public, private) = test_key_der();
    SignatureEngine::load(&public, Some(&private)).unwrap()
}
