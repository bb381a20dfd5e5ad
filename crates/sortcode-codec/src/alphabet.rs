//! Symbol alphabets: a bijection between symbol values and ASCII characters.

use std::fmt;

use tracing::debug;

use crate::bitpack::SymbolWidth;
use crate::error::{CodecError, CodecResult};

/// Sentinel in the inverse table for bytes outside the alphabet.
const NO_SYMBOL: u8 = u8::MAX;

/// An immutable alphabet of 32 or 64 distinct printable ASCII characters.
///
/// Symbol value `i` maps to the `i`-th character of the configuration string.
/// When that string is in ascending order, comparing symbol values and
/// comparing characters give the same answer, which is what the
/// order-preserving codecs rely on.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    /// Forward table, in symbol-value order.
    chars: String,
    /// Inverse table indexed by ASCII code.
    inverse: [u8; 128],
    width: SymbolWidth,
    sorted: bool,
}

impl Alphabet {
    /// Build an alphabet for `width` from `chars`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidConfiguration`] unless `chars` holds exactly
    /// `width.symbol_count()` distinct printable ASCII characters.
    pub fn new(chars: &str, width: SymbolWidth) -> CodecResult<Self> {
        let expected = width.symbol_count();
        let actual = chars.chars().count();
        if actual != expected {
            debug!(expected, actual, "rejecting alphabet of wrong size");
            return Err(CodecError::InvalidConfiguration(format!(
                "expected {expected} characters, got {actual} in {chars:?}"
            )));
        }

        let mut inverse = [NO_SYMBOL; 128];
        for (value, character) in chars.chars().enumerate() {
            if !character.is_ascii_graphic() {
                debug!(?character, "rejecting non-printable alphabet character");
                return Err(CodecError::InvalidConfiguration(format!(
                    "character {character:?} at index {value} is not printable ASCII"
                )));
            }
            let slot = &mut inverse[usize::from(character as u8)];
            if *slot != NO_SYMBOL {
                debug!(?character, "rejecting duplicate alphabet character");
                return Err(CodecError::InvalidConfiguration(format!(
                    "character {character:?} appears more than once in {chars:?}"
                )));
            }
            // value < 64 by the length check above
            *slot = u8::try_from(value).map_err(|_| {
                CodecError::InvalidConfiguration(format!("alphabet index {value} overflows"))
            })?;
        }

        let sorted = chars.as_bytes().windows(2).all(|pair| pair[0] < pair[1]);

        Ok(Self {
            chars: chars.to_owned(),
            inverse,
            width,
            sorted,
        })
    }

    /// The symbol value for `character`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidSymbol`] (with position 0) if the character
    /// is not in the alphabet.
    pub fn value_of(&self, character: char) -> CodecResult<u8> {
        self.lookup(character)
            .ok_or(CodecError::InvalidSymbol {
                character,
                position: 0,
            })
    }

    /// The character for symbol value `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::SymbolOutOfRange`] if `value >= self.len()`.
    pub fn character_of(&self, value: u8) -> CodecResult<char> {
        self.chars
            .as_bytes()
            .get(usize::from(value))
            .map(|&byte| char::from(byte))
            .ok_or(CodecError::SymbolOutOfRange {
                value,
                size: self.len(),
            })
    }

    /// Translate every character of `text` into its symbol value.
    pub(crate) fn values_of(&self, text: &str) -> CodecResult<Vec<u8>> {
        text.chars()
            .enumerate()
            .map(|(position, character)| {
                self.lookup(character)
                    .ok_or(CodecError::InvalidSymbol {
                        character,
                        position,
                    })
            })
            .collect()
    }

    /// Translate symbol values into text.
    ///
    /// Values come from a [`crate::bitpack::BitPacker`] of the same width and
    /// are therefore always in range.
    pub(crate) fn text_of(&self, values: &[u8]) -> String {
        let table = self.chars.as_bytes();
        values
            .iter()
            .map(|&value| char::from(table[usize::from(value)]))
            .collect()
    }

    fn lookup(&self, character: char) -> Option<u8> {
        if !character.is_ascii() {
            return None;
        }
        match self.inverse[usize::from(character as u8)] {
            NO_SYMBOL => None,
            value => Some(value),
        }
    }

    /// Number of symbols (32 or 64).
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; alphabets are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Symbol width this alphabet was built for.
    #[must_use]
    pub const fn width(&self) -> SymbolWidth {
        self.width
    }

    /// Whether characters appear in strictly ascending order.
    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The characters in symbol-value order.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.chars
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("chars", &self.chars)
            .field("width", &self.width)
            .field("sorted", &self.sorted)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chars)
    }
}
