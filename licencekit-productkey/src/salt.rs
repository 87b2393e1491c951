//! Owner-derived salt.
//!
//! The salt is a repeating XOR pad over the key bits. It binds a key to an
//! identity string; it is not a secret.

use sha2::{Digest, Sha256};

/// Derives the salt for an owner string (SHA-256 of its UTF-8 bytes).
#[must_use]
pub fn salt(owner: &str) -> Vec<u8> {
    Sha256::digest(owner.as_bytes()).to_vec()
}

/// Expands salt bytes into bits, most significant bit first.
pub(crate) fn salt_bits(salt: &[u8]) -> Vec<bool> {
    salt.iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

/// XORs the buffer with the salt bits, cycling through them.
///
/// Applying it twice restores the buffer. An empty salt leaves it untouched.
pub(crate) fn apply_salt(buffer: &mut [bool], salt_bits: &[bool]) {
    if salt_bits.is_empty() {
        return;
    }
    for (bit, salt) in buffer.iter_mut().zip(salt_bits.iter().cycle()) {
        *bit ^= *salt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_is_deterministic_per_owner() {
        assert_eq!(salt("Alice"), salt("Alice"));
        assert_ne!(salt("Alice"), salt("Bob"));
        assert_eq!(salt("Alice").len(), 32);
    }

    #[test]
    fn salt_bits_msb_first() {
        assert_eq!(
            salt_bits(&[0b1000_0001]),
            vec![true, false, false, false, false, false, false, true]
        );
    }

    #[test]
    fn apply_salt_cycles() {
        let mut buffer = vec![false; 5];
        apply_salt(&mut buffer, &[true, false]);
        assert_eq!(buffer, vec![true, false, true, false, true]);
    }

    #[test]
    fn apply_salt_twice_restores() {
        let original = vec![true, false, false, true, true, false, true];
        let bits = salt_bits(&[0xa5]);
        let mut buffer = original.clone();
        apply_salt(&mut buffer, &bits);
        apply_salt(&mut buffer, &bits);
        assert_eq!(buffer, original);
    }

    #[test]
    fn empty_salt_is_noop() {
        let mut buffer = vec![true, false];
        apply_salt(&mut buffer, &[]);
        assert_eq!(buffer, vec![true, false]);
    }
}
