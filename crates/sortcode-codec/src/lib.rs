//! Sortcode codecs - unpadded binary-to-text encodings that keep byte order.
//!
//! Two codecs share one bit packer and differ only in symbol width:
//!
//! - [`Base32`] - 5 bits per character. With a sorted alphabet (the default
//!   [`Base32::ordered`] instance) the encoded strings sort exactly like the
//!   raw byte strings, shorter prefixes first.
//! - [`Base64`] - 6 bits per character over the 62 alphanumerics plus two
//!   caller-chosen specials, for when compactness matters more.
//!
//! Neither codec ever emits padding characters: `n` bytes become
//! `ceil(8n / k)` characters, and decoding drops the zero bits that filled
//! the last character.
//!
//! # Modules
//!
//! - [`alphabet`] - symbol value / character bijection
//! - [`bitpack`] - MSB-first byte to symbol packing
//! - [`base32`] - 5-bit codec and its named alphabets
//! - [`base64`] - 6-bit codec with configurable specials
//!
//! # Example
//!
//! ```rust
//! use sortcode_codec::{Base32, CodecError};
//!
//! let d32 = Base32::ordered();
//! assert_eq!(d32.encode(b"\x00"), "22");
//! assert_eq!(d32.decode("22").unwrap(), b"\x00");
//!
//! let err = d32.decode("20").unwrap_err();
//! assert_eq!(err, CodecError::InvalidSymbol { character: '0', position: 1 });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod alphabet;
pub mod base32;
pub mod base64;
pub mod bitpack;
mod codec;
pub mod error;

pub use alphabet::Alphabet;
pub use base32::{BASE32_RFC4648_LOWER, Base32, D32_ORDERED};
pub use base64::{Base64, D64_BASE, D64_STANDARD_SPECIALS};
pub use bitpack::{BitPacker, SymbolWidth};
pub use codec::{Codec, CodecKind};
pub use error::{CodecError, CodecResult};
