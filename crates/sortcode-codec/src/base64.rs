//! Compact base64-like codec: 6 bits per character, no padding.
//!
//! The alphabet is the 62 ASCII alphanumerics plus two caller-chosen special
//! characters, sorted so that symbol assignment does not depend on the order
//! in which the specials were given.

use std::sync::LazyLock;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::bitpack::SymbolWidth;
use crate::codec::{Codec, SymbolCodec};
use crate::error::{CodecError, CodecResult};

/// The 62 alphanumeric base characters, in no particular order.
pub const D64_BASE: &str = "PYFGCRLAOEUIDHTNSQJKXBMWVZpyfgcrlaoeuidhtnsqjkxbmwvz1234567890";

/// Special characters of the standard instance.
pub const D64_STANDARD_SPECIALS: &str = "._";

/// Base64-like codec over a sorted 64-character alphabet.
///
/// # Example
///
/// ```
/// use sortcode_codec::Base64;
///
/// let d64 = Base64::standard();
/// assert_eq!(d64.encode(b"\x00\x01\x02"), "..31");
/// assert_eq!(d64.decode("..31").unwrap(), b"\x00\x01\x02");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64 {
    inner: SymbolCodec,
}

impl Base64 {
    /// Build a codec from the base alphanumerics plus `specials`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidConfiguration`] unless the combined set is
    /// exactly 64 distinct printable ASCII characters, which in practice means
    /// two non-alphanumeric specials.
    pub fn new(specials: &str) -> CodecResult<Self> {
        let specials_len = specials.chars().count();
        if specials_len != 2 {
            debug!(specials, "rejecting special character set");
            return Err(CodecError::InvalidConfiguration(format!(
                "expected 2 special characters, got {specials_len} in {specials:?}"
            )));
        }

        let mut chars: Vec<char> = D64_BASE.chars().chain(specials.chars()).collect();
        chars.sort_unstable();
        let sorted: String = chars.into_iter().collect();

        let alphabet = Alphabet::new(&sorted, SymbolWidth::Six)?;
        Ok(Self {
            inner: SymbolCodec::new(alphabet),
        })
    }

    /// Shared instance with specials [`D64_STANDARD_SPECIALS`].
    #[must_use]
    pub fn standard() -> &'static Self {
        static STANDARD: LazyLock<Base64> = LazyLock::new(|| {
            Base64::new(D64_STANDARD_SPECIALS).expect("standard specials form a valid alphabet")
        });
        &STANDARD
    }

    /// Encode `data`; the result has `ceil(8 * len / 6)` characters.
    #[must_use]
    pub fn encode(&self, data: &[u8]) -> String {
        self.inner.encode(data)
    }

    /// Decode `text` back into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidSymbol`] naming the first character
    /// outside the alphabet and its position.
    pub fn decode(&self, text: &str) -> CodecResult<Vec<u8>> {
        self.inner.decode(text)
    }
}

impl Codec for Base64 {
    fn encode(&self, data: &[u8]) -> String {
        self.inner.encode(data)
    }

    fn decode(&self, text: &str) -> CodecResult<Vec<u8>> {
        self.inner.decode(text)
    }

    fn alphabet(&self) -> &Alphabet {
        self.inner.alphabet()
    }
}
