//! Deterministic byte-buffer fixtures.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Byte values that exercise shift and mask boundaries.
pub const BOUNDARY_BYTES: [u8; 6] = [0x00, 0x01, 0x7F, 0x80, 0xFE, 0xFF];

/// Lengths whose bit counts hit every remainder modulo 5 and 6.
pub const REPRESENTATIVE_LENGTHS: [usize; 6] = [0, 1, 2, 5, 8, 13];

/// `count` random buffers with lengths in `0..max_len`, reproducible from `seed`.
#[must_use]
pub fn random_buffers(seed: u64, count: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = if max_len == 0 { 0 } else { rng.gen_range(0..max_len) };
            let mut buf = vec![0u8; len];
            rng.fill(buf.as_mut_slice());
            buf
        })
        .collect()
}

/// One random buffer of each length in `0..count`, as the classic sort test uses.
#[must_use]
pub fn buffers_of_every_length(seed: u64, count: usize) -> Vec<Vec<u8>> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..count)
        .map(|len| {
            let mut buf = vec![0u8; len];
            rng.fill(buf.as_mut_slice());
            buf
        })
        .collect()
}

/// Short buffers built only from [`BOUNDARY_BYTES`], every combination up to `max_len`.
#[must_use]
pub fn boundary_buffers(max_len: usize) -> Vec<Vec<u8>> {
    let mut out = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::with_capacity(frontier.len() * BOUNDARY_BYTES.len());
        for prefix in &frontier {
            for &byte in &BOUNDARY_BYTES {
                let mut buf: Vec<u8> = prefix.clone();
                buf.push(byte);
                next.push(buf);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}
