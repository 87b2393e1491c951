//! Offline product keys for licencekit.
//!
//! A product key is a short string such as `IXDIE-AXA4W-K8GG6-UU3R1-KMF99-3R6RB-Y6GRC`
//! that hides a few small integers (plan tier, duration, feature bitmap):
//! - The integers are written several times (passes) into a noisy bit buffer
//! - A secret permutation signature decides which buffer bits hold them
//! - An owner-derived salt is XORed over the whole buffer
//! - Decoding cross-checks the passes; any disagreement rejects the key
//!
//! This deters casual guessing. It is obfuscation, not cryptography: anyone
//! holding the permutation signature can mint keys.

mod alphabet;
mod codec;
mod error;
mod format;
mod salt;
mod signature;

pub use alphabet::{Alphabet, BASE32_SYMBOLS, BASE64_SYMBOLS};
pub use codec::{
    DEFAULT_KEY_LENGTH, DEFAULT_PASSES, KeyStatistics, MAX_FIELD_BITS, OVERLOAD_RATIO_PERCENT,
    ProductKeyCodec,
};
pub use error::{ProductKeyError, ProductKeyResult};
pub use format::{KEY_GROUP_SIZE, KEY_SEPARATOR, format_key, normalize};
pub use salt::salt;
pub use signature::{MAX_SLOTS, PermutationSignature, PermutationSignatureGenerator};
