//! Unpadded base32 with a configurable alphabet.
//!
//! With an ascending alphabet such as [`D32_ORDERED`], encoded strings sort
//! exactly like the byte strings they encode:
//!
//! ```
//! use sortcode_codec::Base32;
//!
//! let d32 = Base32::ordered();
//! let a = d32.encode(b"apple");
//! let b = d32.encode(b"apples");
//! let c = d32.encode(b"banana");
//! assert!(a < b && b < c);
//! assert_eq!(d32.decode(&b).unwrap(), b"apples");
//! ```

use std::sync::LazyLock;

use crate::alphabet::Alphabet;
use crate::bitpack::SymbolWidth;
use crate::codec::{Codec, SymbolCodec};
use crate::error::CodecResult;

/// Ascending 32-character alphabet; encodings sort like their input.
pub const D32_ORDERED: &str = "234567abcdefghijklmnopqrstuvwxyz";

/// RFC 4648 symbol assignment in lowercase. Not sorted, so not order-preserving.
pub const BASE32_RFC4648_LOWER: &str = "abcdefghijklmnopqrstuvwxyz234567";

/// Base32 codec: 5 bits per character, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base32 {
    inner: SymbolCodec,
}

impl Base32 {
    /// Build a codec over a 32-character alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CodecError::InvalidConfiguration`] unless `alphabet`
    /// holds exactly 32 distinct printable ASCII characters.
    pub fn new(alphabet: &str) -> CodecResult<Self> {
        let alphabet = Alphabet::new(alphabet, SymbolWidth::Five)?;
        Ok(Self {
            inner: SymbolCodec::new(alphabet),
        })
    }

    /// Shared order-preserving codec over [`D32_ORDERED`].
    #[must_use]
    pub fn ordered() -> &'static Self {
        static ORDERED: LazyLock<Base32> = LazyLock::new(|| {
            Base32::new(D32_ORDERED).expect("D32_ORDERED is a valid 32-symbol alphabet")
        });
        &ORDERED
    }

    /// Shared RFC 4648 lowercase codec, without padding.
    #[must_use]
    pub fn rfc4648_lower() -> &'static Self {
        static RFC4648: LazyLock<Base32> = LazyLock::new(|| {
            Base32::new(BASE32_RFC4648_LOWER)
                .expect("BASE32_RFC4648_LOWER is a valid 32-symbol alphabet")
        });
        &RFC4648
    }

    /// Encode `data`; the result has `ceil(8 * len / 5)` characters.
    #[must_use]
    pub fn encode(&self, data: &[u8]) -> String {
        self.inner.encode(data)
    }

    /// Decode `text` back into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CodecError::InvalidSymbol`] naming the first character
    /// outside the alphabet and its position.
    pub fn decode(&self, text: &str) -> CodecResult<Vec<u8>> {
        self.inner.decode(text)
    }

    /// Whether encodings compare like their inputs, i.e. the alphabet is sorted.
    #[must_use]
    pub const fn is_order_preserving(&self) -> bool {
        self.inner.alphabet().is_sorted()
    }
}

impl Codec for Base32 {
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
