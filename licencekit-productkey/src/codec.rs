//! Packing integer fields into product keys and back.
//!
//! A key is a fixed-length bit buffer rendered through an [`Alphabet`]. The
//! buffer starts as random noise; the payload bits are then written once per
//! pass at the slots the [`PermutationSignature`] names, and finally the whole
//! buffer is XORed with the owner salt. Decoding reads every pass back and
//! rejects the key if any two passes disagree.

use std::sync::OnceLock;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::alphabet::Alphabet;
use crate::error::{ProductKeyError, ProductKeyResult};
use crate::format::normalize;
use crate::salt::{apply_salt, salt_bits};
use crate::signature::{PermutationSignature, PermutationSignatureGenerator};

/// Number of times the payload is written into a key.
pub const DEFAULT_PASSES: usize = 3;

/// Characters in a product key.
pub const DEFAULT_KEY_LENGTH: usize = 35;

/// Above this share of information bits the permutation gets easier to infer
/// from a collection of keys.
pub const OVERLOAD_RATIO_PERCENT: usize = 40;

/// Widest field a key can carry.
pub const MAX_FIELD_BITS: u8 = 32;

/// How much of a key carries information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyStatistics {
    /// Bits written by the payload across all passes.
    pub information_bits: usize,
    /// Total bits in the key buffer.
    pub total_bits: usize,
    /// Bits left as random noise.
    pub noise_bits: usize,
    /// `information_bits` as a whole percentage of `total_bits`.
    pub ratio_percent: usize,
}

impl KeyStatistics {
    /// True when the information ratio exceeds [`OVERLOAD_RATIO_PERCENT`].
    #[must_use]
    pub fn is_overloaded(&self) -> bool {
        self.ratio_percent > OVERLOAD_RATIO_PERCENT
    }
}

/// Encodes and decodes product keys.
///
/// The permutation signature is set at most once. A codec built without one
/// generates it on the first [`pack`](Self::pack); afterwards it never
/// changes, so the codec can be shared freely between threads.
#[derive(Debug)]
pub struct ProductKeyCodec {
    alphabet: Alphabet,
    passes: usize,
    signature: OnceLock<PermutationSignature>,
}

impl ProductKeyCodec {
    /// Creates a codec.
    ///
    /// # Errors
    ///
    /// Returns [`ProductKeyError::InvalidPasses`] if `passes` is zero.
    pub fn new(
        alphabet: Alphabet,
        passes: usize,
        signature: Option<PermutationSignature>,
    ) -> ProductKeyResult<Self> {
        if passes == 0 {
            return Err(ProductKeyError::InvalidPasses);
        }
        let cell = OnceLock::new();
        if let Some(signature) = signature {
            let _ = cell.set(signature);
        }
        Ok(Self {
            alphabet,
            passes,
            signature: cell,
        })
    }

    /// The alphabet keys are rendered with.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Redundant copies of the payload per key.
    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// The permutation signature, once loaded or generated.
    #[must_use]
    pub fn signature(&self) -> Option<&PermutationSignature> {
        self.signature.get()
    }

    /// A signature generator matching this codec's alphabet and passes.
    #[must_use]
    pub fn generator(&self) -> PermutationSignatureGenerator {
        PermutationSignatureGenerator::for_alphabet(&self.alphabet, self.passes)
    }

    /// Reports how densely a payload of `sizes` fills a key.
    #[must_use]
    pub fn statistics(&self, sizes: &[u8], character_count: usize) -> KeyStatistics {
        let information_bits = payload_bits(sizes) * self.passes;
        let total_bits = character_count * self.alphabet.bits_per_character();
        let ratio_percent = if total_bits == 0 {
            100
        } else {
            100 * information_bits / total_bits
        };
        KeyStatistics {
            information_bits,
            total_bits,
            noise_bits: total_bits.saturating_sub(information_bits),
            ratio_percent,
        }
    }

    /// Packs `values`, each `sizes[i]` bits wide, into a key of
    /// `character_count` characters.
    ///
    /// # Errors
    ///
    /// See [`pack_with_rng`](Self::pack_with_rng).
    pub fn pack(
        &self,
        values: &[u32],
        sizes: &[u8],
        character_count: usize,
        salt: &[u8],
    ) -> ProductKeyResult<String> {
        self.pack_with_rng(values, sizes, character_count, salt, &mut rand::thread_rng())
    }

    /// Packs values, drawing noise (and a signature, if none is set) from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fields are malformed, the payload does not fit,
    /// or the signature is too short for the payload or addresses bits beyond
    /// the key.
    pub fn pack_with_rng<R: Rng + ?Sized>(
        &self,
        values: &[u32],
        sizes: &[u8],
        character_count: usize,
        salt: &[u8],
        rng: &mut R,
    ) -> ProductKeyResult<String> {
        check_fields(values, sizes)?;
        let bits_per_pass = payload_bits(sizes);

        let signature = match self.signature.get() {
            Some(signature) => signature,
            None => {
                let generated =
                    self.generator()
                        .randomize_with_rng(bits_per_pass, character_count, rng)?;
                // A concurrent first pack may have stored its own; that one wins.
                self.signature.get_or_init(|| generated)
            }
        };
        let slots = used_slots(signature, bits_per_pass * self.passes)?;

        let stats = self.statistics(sizes, character_count);
        debug!(
            information_bits = stats.information_bits,
            total_bits = stats.total_bits,
            ratio_percent = stats.ratio_percent,
            "packing product key"
        );
        if stats.is_overloaded() {
            warn!(
                ratio_percent = stats.ratio_percent,
                "more than {OVERLOAD_RATIO_PERCENT}% of key bits carry information; the permutation is easier to guess"
            );
        }

        let buffer_bits = stats.total_bits;
        if let Some(&slot) = slots.iter().find(|&&slot| usize::from(slot) >= buffer_bits) {
            return Err(ProductKeyError::SlotOutOfRange {
                slot: slot.into(),
                buffer_bits,
            });
        }

        let mut to_hide = Vec::with_capacity(bits_per_pass);
        for (&value, &size) in values.iter().zip(sizes) {
            push_bits(&mut to_hide, value, size);
        }

        let mut buffer: Vec<bool> = (0..buffer_bits).map(|_| rng.r#gen()).collect();
        if bits_per_pass > 0 {
            for pass_slots in slots.chunks(bits_per_pass) {
                for (&slot, &bit) in pass_slots.iter().zip(&to_hide) {
                    buffer[usize::from(slot)] = bit;
                }
            }
        }

        apply_salt(&mut buffer, &salt_bits(salt));

        let bits = self.alphabet.bits_per_character();
        buffer
            .chunks(bits)
            .map(|chunk| {
                let index = read_bits(chunk) as usize;
                // Chunks are exactly `bits` wide, so the index is always in range.
                self.alphabet
                    .symbol(index)
                    .ok_or(ProductKeyError::AlphabetSize(self.alphabet.len()))
            })
            .collect()
    }

    /// Recovers the values packed into `key`.
    ///
    /// Returns `Ok(None)` when the key is too short for the signature or its
    /// redundant passes disagree; the caller learns nothing more than that the
    /// key is invalid.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed field sizes, a missing or short
    /// signature, or a character outside the alphabet.
    pub fn unpack(
        &self,
        key: &str,
        salt: &[u8],
        sizes: &[u8],
    ) -> ProductKeyResult<Option<Vec<u32>>> {
        let signature = self
            .signature
            .get()
            .ok_or(ProductKeyError::MissingSignature)?;
        for &size in sizes {
            check_width(size)?;
        }
        let bits_per_pass = payload_bits(sizes);
        let slots = used_slots(signature, bits_per_pass * self.passes)?;

        let bits = self.alphabet.bits_per_character();
        let mut buffer = Vec::new();
        for c in normalize(key).chars() {
            let index = self
                .alphabet
                .index_of(c)
                .ok_or(ProductKeyError::IllegalCharacter(c))?;
            push_bits(&mut buffer, index as u32, bits as u8);
        }
        apply_salt(&mut buffer, &salt_bits(salt));

        if sizes.is_empty() {
            return Ok(Some(Vec::new()));
        }
        if slots.iter().any(|&slot| usize::from(slot) >= buffer.len()) {
            debug!(key_bits = buffer.len(), "product key too short for signature");
            return Ok(None);
        }

        let passes: Vec<Vec<u32>> = slots
            .chunks(bits_per_pass)
            .map(|pass_slots| decode_pass(&buffer, pass_slots, sizes))
            .collect();

        if passes.windows(2).any(|pair| pair[0] != pair[1]) {
            warn!("product key redundancy check failed");
            return Ok(None);
        }
        Ok(passes.into_iter().next())
    }
}

fn payload_bits(sizes: &[u8]) -> usize {
    sizes.iter().map(|&s| usize::from(s)).sum()
}

fn check_width(size: u8) -> ProductKeyResult<()> {
    if size == 0 || size > MAX_FIELD_BITS {
        return Err(ProductKeyError::FieldWidth(size));
    }
    Ok(())
}

fn check_fields(values: &[u32], sizes: &[u8]) -> ProductKeyResult<()> {
    if values.len() != sizes.len() {
        return Err(ProductKeyError::FieldCountMismatch {
            values: values.len(),
            sizes: sizes.len(),
        });
    }
    for (&value, &width) in values.iter().zip(sizes) {
        check_width(width)?;
        if width < MAX_FIELD_BITS && value >> width != 0 {
            return Err(ProductKeyError::ValueOutOfRange { value, width });
        }
    }
    Ok(())
}

fn used_slots(signature: &PermutationSignature, required: usize) -> ProductKeyResult<&[u8]> {
    signature
        .slots()
        .get(..required)
        .ok_or(ProductKeyError::SignatureTooShort {
            required,
            actual: signature.len(),
        })
}

/// Appends `width` bits of `value`, most significant first.
fn push_bits(buffer: &mut Vec<bool>, value: u32, width: u8) {
    buffer.extend((0..width).rev().map(|shift| (value >> shift) & 1 == 1));
}

fn read_bits(bits: &[bool]) -> u32 {
    bits.iter().fold(0, |acc, &bit| (acc << 1) | u32::from(bit))
}

fn decode_pass(buffer: &[bool], pass_slots: &[u8], sizes: &[u8]) -> Vec<u32> {
    let bits: Vec<bool> = pass_slots
        .iter()
        .map(|&slot| buffer[usize::from(slot)])
        .collect();
    let mut offset = 0;
    sizes
        .iter()
        .map(|&size| {
            let end = offset + usize::from(size);
            let value = read_bits(&bits[offset..end]);
            offset = end;
            value
        })
        .collect()
}
