//! Error types for the sortcode codecs.

use thiserror::Error;

/// Errors raised while building an alphabet or decoding text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A character in the input is not part of the codec's alphabet.
    #[error("invalid symbol {character:?} at position {position}")]
    InvalidSymbol {
        /// The offending character.
        character: char,
        /// Character index of the offending character in the input.
        position: usize,
    },

    /// A symbol value has no character in the alphabet.
    #[error("symbol value {value} is out of range for a {size}-symbol alphabet")]
    SymbolOutOfRange {
        /// Requested symbol value.
        value: u8,
        /// Number of symbols in the alphabet.
        size: usize,
    },

    /// The supplied alphabet cannot back a codec.
    #[error("invalid alphabet configuration: {0}")]
    InvalidConfiguration(String),
}

impl CodecError {
    /// Whether this error reports a symbol outside the alphabet, in either direction.
    #[must_use]
    pub const fn is_invalid_symbol(&self) -> bool {
        matches!(
            self,
            Self::InvalidSymbol { .. } | Self::SymbolOutOfRange { .. }
        )
    }
}

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
