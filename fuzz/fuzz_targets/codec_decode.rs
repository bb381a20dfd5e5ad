//! Fuzz target for decoding arbitrary text.
//!
//! Decoding must never panic: every input either decodes or is rejected with
//! a symbol error naming a real position in the text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sortcode_codec::{CodecError, CodecKind};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for kind in CodecKind::ALL {
        match kind.codec().decode(text) {
            Ok(bytes) => {
                assert_eq!(bytes.len(), kind.codec().decoded_len(text.chars().count()));
                // Re-encoding yields the canonical form, which decodes to the same bytes.
                let canonical = kind.codec().encode(&bytes);
                assert_eq!(kind.codec().decode(&canonical).as_deref(), Ok(bytes.as_slice()));
            }
            Err(CodecError::InvalidSymbol { position, .. }) => {
                assert!(position < text.chars().count());
            }
            Err(e) => panic!("{kind}: unexpected decode error: {e}"),
        }
    }
});
