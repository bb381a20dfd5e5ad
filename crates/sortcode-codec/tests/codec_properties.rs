//! Property-based tests for the sortcode codecs.
//!
//! ## Test Categories
//! 1. **Round trip**: `decode(encode(b)) == b` for both codecs
//! 2. **Length**: output is exactly `ceil(8n / k)` characters, no padding
//! 3. **Order preservation**: base32 over a sorted alphabet keeps byte order
//! 4. **Alphabet completeness**: foreign characters are rejected, never skipped

use proptest::prelude::*;
use sortcode_codec::{
    Base32, Base64, BASE32_RFC4648_LOWER, Codec, CodecError, CodecKind, D32_ORDERED,
};
use sortcode_testkit::{
    assert_order_preserved, assert_same_ordering, fixtures, init_test_tracing,
};

// ─────────────────────────────────────────────────────────────────────────────
// Proptest Strategies
// ─────────────────────────────────────────────────────────────────────────────

fn any_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

/// Buffers drawn from a tiny byte set so that shared prefixes are common.
fn prefix_heavy_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![0x00u8, 0x01, 0x7F, 0x80, 0xFF]), 0..12)
}

fn codec_kind() -> impl Strategy<Value = CodecKind> {
    prop::sample::select(CodecKind::ALL.to_vec())
}

// ─────────────────────────────────────────────────────────────────────────────
// Property Tests
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_round_trip(data in any_bytes(), kind in codec_kind()) {
        let codec = kind.codec();
        let text = codec.encode(&data);
        prop_assert_eq!(codec.decode(&text)?, data);
    }

    #[test]
    fn prop_encoded_length_has_no_padding(data in any_bytes(), kind in codec_kind()) {
        let codec = kind.codec();
        let text = codec.encode(&data);
        let k = codec.bits_per_symbol() as usize;
        prop_assert_eq!(text.chars().count(), (8 * data.len()).div_ceil(k));
        prop_assert!(text.chars().all(|c| codec.alphabet().value_of(c).is_ok()));
    }

    #[test]
    fn prop_d32_preserves_order(a in any_bytes(), b in any_bytes()) {
        let d32 = Base32::ordered();
        assert_same_ordering(&a, &b, &d32.encode(&a), &d32.encode(&b));
    }

    #[test]
    fn prop_d32_preserves_order_on_shared_prefixes(
        a in prefix_heavy_bytes(),
        b in prefix_heavy_bytes(),
    ) {
        let d32 = Base32::ordered();
        assert_same_ordering(&a, &b, &d32.encode(&a), &d32.encode(&b));
    }

    #[test]
    fn prop_d64_keeps_order_too(a in prefix_heavy_bytes(), b in prefix_heavy_bytes()) {
        let d64 = Base64::standard();
        assert_same_ordering(&a, &b, &d64.encode(&a), &d64.encode(&b));
    }

    #[test]
    fn prop_decode_never_panics(text in ".{0,64}", kind in codec_kind()) {
        let _ = kind.codec().decode(&text);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sort Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn d32_sorts_a_thousand_random_buffers() {
    init_test_tracing();
    let d32 = Base32::ordered();
    let buffers = fixtures::random_buffers(0xD32, 1000, 1000);

    assert_order_preserved(&buffers, |b| d32.encode(b));

    // Decoding the sorted encodings gives the sorted inputs.
    let mut encoded: Vec<String> = buffers.iter().map(|b| d32.encode(b)).collect();
    encoded.sort();
    let decoded: Vec<Vec<u8>> = encoded.iter().map(|e| d32.decode(e).unwrap()).collect();
    let mut sorted = buffers.clone();
    sorted.sort();
    assert_eq!(decoded, sorted);
}

#[test]
fn d32_sorts_buffers_of_every_length() {
    let buffers = fixtures::buffers_of_every_length(0x5eed, 1000);
    assert_order_preserved(&buffers, |b| Base32::ordered().encode(b));
}

#[test]
fn d64_sorts_buffers_of_every_length() {
    let d64 = Base64::standard();
    let buffers = fixtures::buffers_of_every_length(0x64, 1000);
    for buffer in &buffers {
        assert_eq!(&d64.decode(&d64.encode(buffer)).unwrap(), buffer);
    }
    assert_order_preserved(&buffers, |b| d64.encode(b));
}

#[test]
fn d32_orders_every_boundary_combination() {
    let d32 = Base32::ordered();
    assert_order_preserved(&fixtures::boundary_buffers(3), |b| d32.encode(b));
}

#[test]
fn unsorted_alphabet_breaks_order() {
    // 0x00 -> "aa" and 0xFF -> "74" under the RFC alphabet: digits sort before letters.
    let rfc = Base32::new(BASE32_RFC4648_LOWER).unwrap();
    assert!(rfc.encode(b"\x00") > rfc.encode(b"\xff"));
    assert!(!rfc.is_order_preserving());
}

// ─────────────────────────────────────────────────────────────────────────────
// Length and Literal Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn representative_lengths() {
    for n in fixtures::REPRESENTATIVE_LENGTHS {
        let data = vec![0xA5; n];
        assert_eq!(Base32::ordered().encode(&data).len(), (8 * n).div_ceil(5));
        assert_eq!(Base64::standard().encode(&data).len(), (8 * n).div_ceil(6));
    }
}

#[test]
fn literal_examples() {
    let d32 = Base32::ordered();
    assert_eq!(d32.encode(b""), "");
    assert_eq!(d32.encode(b"\x00"), "22");
    assert_eq!(d32.decode("22").unwrap(), b"\x00");
    assert_eq!(d32.decode("").unwrap(), b"");
}

#[test]
fn boundary_bytes_round_trip() {
    for kind in CodecKind::ALL {
        let codec = kind.codec();
        for buffer in fixtures::boundary_buffers(3) {
            assert_eq!(codec.decode(&codec.encode(&buffer)).unwrap(), buffer, "{kind}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Alphabet Completeness
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decode_rejects_characters_outside_the_alphabet() {
    init_test_tracing();
    let d32 = Base32::new(D32_ORDERED).unwrap();
    let text = format!("{}0", d32.encode(b"abc"));

    let err = d32.decode(&text).unwrap_err();
    assert_eq!(
        err,
        CodecError::InvalidSymbol {
            character: '0',
            position: 5
        }
    );
    assert!(err.is_invalid_symbol());

    for foreign in ['0', '1', '8', '9', 'A', '=', ' ', '\n', 'ß'] {
        let text = format!("22{foreign}2");
        let err = d32.decode(&text).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidSymbol {
                character: foreign,
                position: 2
            }
        );
    }
}

#[test]
fn d64_rejects_base64_only_characters() {
    for foreign in ['+', '/', '=', '-'] {
        let text = format!("..{foreign}");
        assert!(Base64::standard().decode(&text).unwrap_err().is_invalid_symbol());
    }
}
