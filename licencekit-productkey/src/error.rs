//! Error types for product key encoding.

use thiserror::Error;

/// Product key configuration errors.
///
/// A key that fails its redundancy check is not an error; `unpack` returns
/// `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum ProductKeyError {
    /// Alphabet size is not a power of two.
    #[error("alphabet must contain a power-of-two number of symbols, got {0}")]
    AlphabetSize(usize),

    /// Alphabet lists the same symbol twice.
    #[error("alphabet contains duplicate symbol '{0}'")]
    DuplicateSymbol(char),

    /// Key contains a symbol outside the alphabet.
    #[error("illegal character '{0}' in product key")]
    IllegalCharacter(char),

    /// Number of passes must be at least one.
    #[error("number of passes must be at least 1")]
    InvalidPasses,

    /// Values and sizes disagree in length.
    #[error("got {values} values for {sizes} field sizes")]
    FieldCountMismatch { values: usize, sizes: usize },

    /// A field width outside 1..=32.
    #[error("field width must be between 1 and 32 bits, got {0}")]
    FieldWidth(u8),

    /// A value does not fit its declared width.
    #[error("value {value} does not fit in {width} bits")]
    ValueOutOfRange { value: u32, width: u8 },

    /// The payload does not fit in the key without reusing slots.
    #[error("{required} bits to hide but only {available} available in the key")]
    CapacityExceeded { required: usize, available: usize },

    /// Slot indices are serialized as two hex digits.
    #[error("{0} key bits exceed the 256 addressable slots")]
    SlotSpaceTooLarge(usize),

    /// The permutation signature has fewer slots than the payload needs.
    #[error("signature has {actual} slots, {required} required")]
    SignatureTooShort { required: usize, actual: usize },

    /// A signature slot lies outside the key buffer.
    #[error("signature slot {slot} is outside a {buffer_bits}-bit key")]
    SlotOutOfRange { slot: usize, buffer_bits: usize },

    /// No permutation signature is available for decoding.
    #[error("permutation signature is not loaded")]
    MissingSignature,

    /// Serialized signature has an odd number of hex digits.
    #[error("serialized signature length {0} is odd")]
    OddSignatureLength(usize),

    /// Serialized signature is not hexadecimal.
    #[error("serialized signature is not valid hex: {0}")]
    InvalidSignatureHex(String),

    /// A signature uses the same slot twice.
    #[error("signature reuses slot {0}")]
    DuplicateSlot(u8),
}

/// Result type for product key operations.
pub type ProductKeyResult<T> = Result<T, ProductKeyError>;
