//! The shared codec surface and the alphabet-driven engine behind it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alphabet::Alphabet;
use crate::base32::Base32;
use crate::base64::Base64;
use crate::bitpack::{BitPacker, SymbolWidth};
use crate::error::{CodecError, CodecResult};

/// Whole-buffer binary-to-text codec.
pub trait Codec: Send + Sync {
    /// Encode `data` without padding characters.
    fn encode(&self, data: &[u8]) -> String;

    /// Decode text produced by [`Codec::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidSymbol`] for the first character outside
    /// the alphabet.
    fn decode(&self, text: &str) -> CodecResult<Vec<u8>>;

    /// The alphabet in use.
    fn alphabet(&self) -> &Alphabet;

    /// Bits carried by one output character.
    fn bits_per_symbol(&self) -> u32 {
        self.alphabet().width().bits()
    }

    /// Output length for `byte_len` input bytes.
    fn encoded_len(&self, byte_len: usize) -> usize {
        self.alphabet().width().encoded_len(byte_len)
    }

    /// Output length for `text_len` input characters.
    fn decoded_len(&self, text_len: usize) -> usize {
        self.alphabet().width().decoded_len(text_len)
    }
}

/// Alphabet plus bit packer; both concrete codecs delegate here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SymbolCodec {
    alphabet: Alphabet,
    packer: BitPacker,
}

impl SymbolCodec {
    pub(crate) fn new(alphabet: Alphabet) -> Self {
        let packer = BitPacker::new(alphabet.width());
        Self { alphabet, packer }
    }

    pub(crate) const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub(crate) fn encode(&self, data: &[u8]) -> String {
        self.alphabet.text_of(&self.packer.pack(data))
    }

    pub(crate) fn decode(&self, text: &str) -> CodecResult<Vec<u8>> {
        let values = self.alphabet.values_of(text).inspect_err(|err| {
            debug!(error = %err, alphabet = %self.alphabet, "decode rejected input");
        })?;
        Ok(self.packer.unpack(&values))
    }
}

/// Selects one of the shared codec instances by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    /// Order-preserving base32 ([`Base32::ordered`]).
    #[default]
    D32,
    /// RFC 4648 lowercase base32 without padding ([`Base32::rfc4648_lower`]).
    Base32,
    /// Compact base64-like codec ([`Base64::standard`]).
    D64,
}

impl CodecKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 3] = [Self::D32, Self::Base32, Self::D64];

    /// The shared codec for this kind.
    #[must_use]
    pub fn codec(self) -> &'static dyn Codec {
        match self {
            Self::D32 => Base32::ordered(),
            Self::Base32 => Base32::rfc4648_lower(),
            Self::D64 => Base64::standard(),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D32 => "d32",
            Self::Base32 => "base32",
            Self::D64 => "d64",
        }
    }

    /// Symbol width of the selected codec.
    #[must_use]
    pub const fn width(self) -> SymbolWidth {
        match self {
            Self::D32 | Self::Base32 => SymbolWidth::Five,
            Self::D64 => SymbolWidth::Six,
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodecKind {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CodecError::InvalidConfiguration(format!(
                    "unknown codec {s:?}, expected one of d32, base32, d64"
                ))
            })
    }
}
