//! Symbol sets for rendering key bits as characters.

use crate::error::{ProductKeyError, ProductKeyResult};

/// The 32-symbol set: upper-case letters without `L`, `N`, `O`, plus `1`-`9`.
pub const BASE32_SYMBOLS: &str = "ABCDEFGHIJKMPQRSTUVWXYZ123456789";

/// The 64-symbol set: both letter cases without `l`, `n`, `o`, digits and punctuation.
pub const BASE64_SYMBOLS: &str =
    "ABCDEFGHIJKMPQRSTUVWXYZabcdefghijkmpqrstuvwxyz0123456789#+=[]()@";

/// An ordered set of distinct symbols whose size is a power of two.
///
/// Each symbol stands for `bits_per_character` key bits: the symbol at
/// index `i` encodes the bit pattern of `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    bits_per_character: usize,
}

impl Alphabet {
    /// Builds an alphabet from its symbols, in index order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than two symbols, the count is not
    /// a power of two, or a symbol repeats.
    pub fn new(symbols: &str) -> ProductKeyResult<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        let size = symbols.len();
        if size < 2 || !size.is_power_of_two() {
            return Err(ProductKeyError::AlphabetSize(size));
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(ProductKeyError::DuplicateSymbol(*c));
            }
        }
        Ok(Self {
            bits_per_character: size.trailing_zeros() as usize,
            symbols,
        })
    }

    /// The reference 32-symbol alphabet (5 bits per character).
    #[must_use]
    pub fn base32() -> Self {
        Self::from_static(BASE32_SYMBOLS)
    }

    /// The reference 64-symbol alphabet (6 bits per character).
    #[must_use]
    pub fn base64() -> Self {
        Self::from_static(BASE64_SYMBOLS)
    }

    fn from_static(symbols: &str) -> Self {
        let symbols: Vec<char> = symbols.chars().collect();
        Self {
            bits_per_character: symbols.len().trailing_zeros() as usize,
            symbols,
        }
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; an alphabet holds at least two symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Key bits carried by one character.
    #[must_use]
    pub fn bits_per_character(&self) -> usize {
        self.bits_per_character
    }

    /// Returns the symbol for a bit pattern, if in range.
    #[must_use]
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// Returns the bit pattern a symbol stands for.
    #[must_use]
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&c| c == symbol)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::base32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_alphabets_are_valid() {
        let b32 = Alphabet::new(BASE32_SYMBOLS).unwrap();
        assert_eq!(b32, Alphabet::base32());
        assert_eq!(b32.bits_per_character(), 5);

        let b64 = Alphabet::new(BASE64_SYMBOLS).unwrap();
        assert_eq!(b64, Alphabet::base64());
        assert_eq!(b64.bits_per_character(), 6);
    }

    #[test]
    fn base32_omits_ambiguous_symbols() {
        for c in ['L', 'N', 'O', '0'] {
            assert!(Alphabet::base32().index_of(c).is_none(), "{c} present");
        }
    }

    #[test]
    fn non_power_of_two_rejected() {
        let err = Alphabet::new("ABC").unwrap_err();
        assert!(matches!(err, ProductKeyError::AlphabetSize(3)));
    }

    #[test]
    fn single_symbol_rejected() {
        assert!(matches!(
            Alphabet::new("A"),
            Err(ProductKeyError::AlphabetSize(1))
        ));
    }

    #[test]
    fn duplicate_symbol_rejected() {
        assert!(matches!(
            Alphabet::new("ABCA"),
            Err(ProductKeyError::DuplicateSymbol('A'))
        ));
    }

    #[test]
    fn symbol_lookup_is_inverse() {
        let alphabet = Alphabet::new("ABCD").unwrap();
        for i in 0..4 {
            let c = alphabet.symbol(i).unwrap();
            assert_eq!(alphabet.index_of(c), Some(i));
        }
        assert_eq!(alphabet.symbol(4), None);
        assert_eq!(alphabet.index_of('E'), None);
    }
}
