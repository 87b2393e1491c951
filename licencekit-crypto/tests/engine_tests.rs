mod common;

use common::{signing_engine, test_key_der, test_keypair};
use licencekit_crypto::{IssuerKeyPair, SecurityError, SignatureEngine};
use pretty_assertions::assert_eq;

// ── Loading ──────────────────────────────────────────────────────

#[test]
fn load_public_only_is_verify_only() {
    let (public, _) = test_key_der();
    let engine = SignatureEngine::load(&public, None).unwrap();
    assert!(!engine.can_sign());
}

#[test]
fn load_with_private_can_sign() {
    assert!(signing_engine().can_sign());
}

#[test]
fn load_empty_public_key_fails() {
    let err = SignatureEngine::load(&[], None).unwrap_err();
    assert!(matches!(err, SecurityError::MissingPublicKey));
}

#[test]
fn load_garbage_public_key_fails() {
    let err = SignatureEngine::load(b"not a key", None).unwrap_err();
    assert!(matches!(err, SecurityError::InvalidPublicKey(_)));
}

#[test]
fn load_garbage_private_key_fails() {
    let (public, _) = test_key_der();
    let err = SignatureEngine::load(&public, Some(b"not a key")).unwrap_err();
    assert!(matches!(err, SecurityError::InvalidPrivateKey(_)));
}

#[test]
fn load_mismatched_pair_fails() {
    let (public, _) = test_key_der();
    let other = IssuerKeyPair::generate().private_key_der().unwrap();
    let err = SignatureEngine::load(&public, Some(&other)).unwrap_err();
    assert!(matches!(err, SecurityError::KeyMismatch));
}

#[test]
fn load_pem_keys() {
    let kp = test_keypair();
    let public = kp.public_key_pem().unwrap();
    let private = kp.private_key_pem().unwrap();
    let engine = SignatureEngine::load(public.as_bytes(), Some(private.as_bytes())).unwrap();
    let sig = engine.sign(b"pem").unwrap();
    assert!(engine.verify(b"pem", &sig));
}

#[test]
fn public_key_der_roundtrip() {
    let (public, _) = test_key_der();
    let engine = SignatureEngine::load(&public, None).unwrap();
    assert_eq!(engine.public_key_der().unwrap(), public);
}

// ── Signing & verification ───────────────────────────────────────

#[test]
fn verify_only_cannot_sign() {
    let (public, _) = test_key_der();
    let engine = SignatureEngine::load(&public, None).unwrap();
    let err = engine.sign(b"payload").unwrap_err();
    assert!(matches!(err, SecurityError::SigningKeyUnavailable));
}

#[test]
fn verify_only_engine_checks_issuer_signature() {
    let signer = signing_engine();
    let sig = signer.sign(b"payload").unwrap();

    let (public, _) = test_key_der();
    let verifier = SignatureEngine::load(&public, None).unwrap();
    assert!(verifier.verify(b"payload", &sig));
}

#[test]
fn wrong_key_returns_false() {
    let sig = signing_engine().sign(b"payload").unwrap();
    let other = IssuerKeyPair::generate().into_engine();
    assert!(!other.verify(b"payload", &sig));
}

#[test]
fn corrupted_signature_returns_false() {
    let engine = signing_engine();
    let mut sig = engine.sign(b"payload").unwrap();
    sig[0] ^= 0x01;
    assert!(!engine.verify(b"payload", &sig));
}

#[test]
fn corrupted_payload_returns_false() {
    let engine = signing_engine();
    let sig = engine.sign(b"payload").unwrap();
    assert!(!engine.verify(b"paylaod", &sig));
}

#[test]
fn signatures_are_deterministic() {
    let engine = signing_engine();
    assert_eq!(engine.sign(b"same").unwrap(), engine.sign(b"same").unwrap());
}

#[test]
fn engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SignatureEngine>();
}
