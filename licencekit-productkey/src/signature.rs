//! The permutation signature: the secret mapping from payload bits to key slots.
//!
//! Serialized as lowercase hex, two digits per slot, which caps the key buffer
//! at 256 addressable bits.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::alphabet::Alphabet;
use crate::error::{ProductKeyError, ProductKeyResult};

/// Highest number of key bits a serialized signature can address.
pub const MAX_SLOTS: usize = 256;

/// An ordered list of distinct key-buffer slots.
///
/// Slot `p * payload_bits + i` receives payload bit `i` during pass `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationSignature {
    slots: Vec<u8>,
}

impl PermutationSignature {
    /// Wraps a slot list.
    ///
    /// # Errors
    ///
    /// Returns [`ProductKeyError::DuplicateSlot`] if any slot repeats.
    pub fn new(slots: Vec<u8>) -> ProductKeyResult<Self> {
        let mut seen = [false; MAX_SLOTS];
        for &slot in &slots {
            if std::mem::replace(&mut seen[usize::from(slot)], true) {
                return Err(ProductKeyError::DuplicateSlot(slot));
            }
        }
        Ok(Self { slots })
    }

    /// Parses the hex serialization.
    ///
    /// # Errors
    ///
    /// Returns an error on odd length, non-hex digits or repeated slots.
    pub fn from_hex(serialized: &str) -> ProductKeyResult<Self> {
        let serialized = serialized.trim();
        if serialized.len() % 2 != 0 {
            return Err(ProductKeyError::OddSignatureLength(serialized.len()));
        }
        let slots = hex::decode(serialized)
            .map_err(|e| ProductKeyError::InvalidSignatureHex(e.to_string()))?;
        Self::new(slots)
    }

    /// Serializes as lowercase hex, two digits per slot.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.slots)
    }

    /// The slot list.
    #[must_use]
    pub fn slots(&self) -> &[u8] {
        &self.slots
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl FromStr for PermutationSignature {
    type Err = ProductKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PermutationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Generates fresh permutation signatures.
#[derive(Debug, Clone, Copy)]
pub struct PermutationSignatureGenerator {
    bits_per_character: usize,
    passes: usize,
}

impl PermutationSignatureGenerator {
    /// Creates a generator for keys with the given character width and pass count.
    #[must_use]
    pub fn new(bits_per_character: usize, passes: usize) -> Self {
        Self {
            bits_per_character,
            passes,
        }
    }

    /// Creates a generator matching an alphabet.
    #[must_use]
    pub fn for_alphabet(alphabet: &Alphabet, passes: usize) -> Self {
        Self::new(alphabet.bits_per_character(), passes)
    }

    /// Generates a signature for `payload_bits` bits hidden in a key of
    /// `character_count` characters.
    ///
    /// # Errors
    ///
    /// See [`randomize_with_rng`](Self::randomize_with_rng).
    pub fn randomize(
        &self,
        payload_bits: usize,
        character_count: usize,
    ) -> ProductKeyResult<PermutationSignature> {
        self.randomize_with_rng(payload_bits, character_count, &mut rand::thread_rng())
    }

    /// Generates a signature using the given RNG.
    ///
    /// # Errors
    ///
    /// Returns an error if `passes` is zero, the key has more than
    /// [`MAX_SLOTS`] bits, or `payload_bits * passes` exceeds the key bits.
    pub fn randomize_with_rng<R: Rng + ?Sized>(
        &self,
        payload_bits: usize,
        character_count: usize,
        rng: &mut R,
    ) -> ProductKeyResult<PermutationSignature> {
        if self.passes == 0 {
            return Err(ProductKeyError::InvalidPasses);
        }
        let available = self.bits_per_character * character_count;
        let required = payload_bits * self.passes;
        if required > available {
            return Err(ProductKeyError::CapacityExceeded {
                required,
                available,
            });
        }
        if available > MAX_SLOTS {
            return Err(ProductKeyError::SlotSpaceTooLarge(available));
        }

        let mut slots: Vec<u8> = rand::seq::index::sample(rng, available, required)
            .into_iter()
            .map(|slot| slot as u8)
            .collect();
        slots.shuffle(rng);

        info!(
            slots = required,
            available_slots = available,
            "generated permutation signature"
        );
        Ok(PermutationSignature { slots })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let sig = PermutationSignature::new(vec![0x0e, 0x36, 0x00, 0xff]).unwrap();
        assert_eq!(sig.to_hex(), "0e3600ff");
        assert_eq!(PermutationSignature::from_hex("0e3600ff").unwrap(), sig);
    }

    #[test]
    fn odd_length_rejected() {
        assert!(matches!(
            PermutationSignature::from_hex("0e3"),
            Err(ProductKeyError::OddSignatureLength(3))
        ));
    }

    #[test]
    fn non_hex_rejected() {
        assert!(matches!(
            PermutationSignature::from_hex("zz"),
            Err(ProductKeyError::InvalidSignatureHex(_))
        ));
    }

    #[test]
    fn duplicate_slot_rejected() {
        assert!(matches!(
            PermutationSignature::from_hex("0102030401"),
            Err(ProductKeyError::DuplicateSlot(1))
        ));
    }

    #[test]
    fn capacity_exceeded() {
        let generator = PermutationSignatureGenerator::new(2, 3);
        let err = generator.randomize(3, 4).unwrap_err();
        assert!(matches!(
            err,
            ProductKeyError::CapacityExceeded {
                required: 9,
                available: 8
            }
        ));
    }

    #[test]
    fn exact_capacity_uses_every_slot() {
        let generator = PermutationSignatureGenerator::new(2, 2);
        let sig = generator.randomize(4, 4).unwrap();
        let mut slots = sig.slots().to_vec();
        slots.sort_unstable();
        assert_eq!(slots, (0..8).collect::<Vec<u8>>());
    }

    #[test]
    fn slot_space_above_256_rejected() {
        let generator = PermutationSignatureGenerator::new(6, 1);
        assert!(matches!(
            generator.randomize(8, 43),
            Err(ProductKeyError::SlotSpaceTooLarge(258))
        ));
    }

    #[test]
    fn full_256_slot_space_allowed() {
        let generator = PermutationSignatureGenerator::new(8, 1);
        let sig = generator.randomize(256, 32).unwrap();
        assert_eq!(sig.len(), 256);
    }

    #[test]
    fn zero_passes_rejected() {
        let generator = PermutationSignatureGenerator::new(5, 0);
        assert!(matches!(
            generator.randomize(16, 35),
            Err(ProductKeyError::InvalidPasses)
        ));
    }
}
