//! MSB-first packing of bytes into fixed-width symbols.
//!
//! The input is treated as one long bit string made of the big-endian bits of
//! every byte, cut left to right into groups of [`SymbolWidth::bits`] bits.
//!
//! # Padding Rules
//! - `pack`: a short final group is filled with trailing zero bits. No padding
//!   symbols are ever emitted.
//! - `unpack`: trailing bits that do not make up a whole byte are dropped.
//!
//! # Example
//! ```
//! use sortcode_codec::bitpack::{BitPacker, SymbolWidth};
//!
//! let packer = BitPacker::new(SymbolWidth::Five);
//! // 11111111 -> 11111 111(00)
//! assert_eq!(packer.pack(&[0xFF]), vec![0b11111, 0b11100]);
//! assert_eq!(packer.unpack(&[0b11111, 0b11100]), vec![0xFF]);
//! ```

use serde::{Deserialize, Serialize};

/// Number of bits carried by one output symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolWidth {
    /// 5 bits per symbol, 32-symbol alphabets.
    Five,
    /// 6 bits per symbol, 64-symbol alphabets.
    Six,
}

impl SymbolWidth {
    /// Bits per symbol.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Five => 5,
            Self::Six => 6,
        }
    }

    /// Number of distinct symbol values (the alphabet size).
    #[must_use]
    pub const fn symbol_count(self) -> usize {
        1 << self.bits()
    }

    /// Number of symbols produced for `byte_len` input bytes: `ceil(8 * n / k)`.
    #[must_use]
    pub const fn encoded_len(self, byte_len: usize) -> usize {
        (byte_len * 8).div_ceil(self.bits() as usize)
    }

    /// Number of bytes recovered from `symbol_len` symbols: `floor(k * n / 8)`.
    #[must_use]
    pub const fn decoded_len(self, symbol_len: usize) -> usize {
        symbol_len * self.bits() as usize / 8
    }
}

/// Converts between bytes and symbol values of a fixed width.
///
/// Symbol values are plain integers in `0..width.symbol_count()`; mapping them
/// to characters is the alphabet's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPacker {
    width: SymbolWidth,
}

impl BitPacker {
    /// Create a packer for the given symbol width.
    #[must_use]
    pub const fn new(width: SymbolWidth) -> Self {
        Self { width }
    }

    /// The symbol width this packer works with.
    #[must_use]
    pub const fn width(&self) -> SymbolWidth {
        self.width
    }

    /// Split `bytes` into symbol values, MSB first.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn pack(&self, bytes: &[u8]) -> Vec<u8> {
        let bits = self.width.bits();
        let mask = (1u32 << bits) - 1;
        let mut symbols = Vec::with_capacity(self.width.encoded_len(bytes.len()));

        // Holds fewer than `bits` pending bits between iterations.
        let mut acc: u32 = 0;
        let mut acc_bits: u32 = 0;

        for &byte in bytes {
            acc = (acc << 8) | u32::from(byte);
            acc_bits += 8;

            while acc_bits >= bits {
                acc_bits -= bits;
                symbols.push(((acc >> acc_bits) & mask) as u8);
            }
            acc &= (1u32 << acc_bits) - 1;
        }

        if acc_bits > 0 {
            symbols.push(((acc << (bits - acc_bits)) & mask) as u8);
        }

        symbols
    }

    /// Reassemble bytes from symbol values, MSB first.
    ///
    /// Only the low `width.bits()` bits of each value are used. Trailing bits
    /// that do not complete a byte are discarded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn unpack(&self, symbols: &[u8]) -> Vec<u8> {
        let bits = self.width.bits();
        let mask = (1u32 << bits) - 1;
        let mut bytes = Vec::with_capacity(self.width.decoded_len(symbols.len()));

        let mut acc: u32 = 0;
        let mut acc_bits: u32 = 0;

        for &symbol in symbols {
            acc = (acc << bits) | (u32::from(symbol) & mask);
            acc_bits += bits;

            // k < 8, so one symbol completes at most one byte.
            if acc_bits >= 8 {
                acc_bits -= 8;
                bytes.push((acc >> acc_bits) as u8);
                acc &= (1u32 << acc_bits) - 1;
            }
        }

        bytes
    }
}
