//! Assertion helpers for ordering and timing tests.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Assert that sorting `inputs` and sorting `encode(input)` yield the same permutation.
///
/// # Panics
///
/// Panics at the first index where the two orders disagree.
pub fn assert_order_preserved<T, E, F>(inputs: &[T], encode: F)
where
    T: Ord + Debug,
    E: Ord + Debug,
    F: Fn(&T) -> E,
{
    let encoded: Vec<E> = inputs.iter().map(&encode).collect();

    let mut by_input: Vec<usize> = (0..inputs.len()).collect();
    by_input.sort_by(|&a, &b| inputs[a].cmp(&inputs[b]).then(a.cmp(&b)));

    let mut by_encoding: Vec<usize> = (0..inputs.len()).collect();
    by_encoding.sort_by(|&a, &b| encoded[a].cmp(&encoded[b]).then(a.cmp(&b)));

    for (rank, (&i, &e)) in by_input.iter().zip(&by_encoding).enumerate() {
        assert!(
            i == e || inputs[i] == inputs[e],
            "order diverges at rank {rank}: input order picks {:?}, encoded order picks {:?} ({:?})",
            inputs[i],
            inputs[e],
            encoded[e]
        );
    }
}

/// Assert `compare(a, b) == compare(encode(a), encode(b))` for one pair.
///
/// # Panics
///
/// Panics if the comparisons differ.
pub fn assert_same_ordering<T, E>(a: &T, b: &T, ea: &E, eb: &E)
where
    T: Ord + Debug,
    E: Ord + Debug,
{
    let raw: Ordering = a.cmp(b);
    let enc: Ordering = ea.cmp(eb);
    assert_eq!(
        raw, enc,
        "{a:?} vs {b:?} is {raw:?} but {ea:?} vs {eb:?} is {enc:?}"
    );
}

/// Assert that at least `min` has passed since `start`.
///
/// # Panics
///
/// Panics if less time has elapsed.
pub fn assert_elapsed_at_least(start: Instant, min: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= min,
        "expected at least {min:?} to elapse, only {elapsed:?} did"
    );
}

/// Assert that less than `max` has passed since `start`.
///
/// # Panics
///
/// Panics if more time has elapsed.
pub fn assert_elapsed_below(start: Instant, max: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed < max,
        "expected less than {max:?} to elapse, {elapsed:?} did"
    );
}

/// Assert that consecutive instants are spaced at least `min` apart.
///
/// # Panics
///
/// Panics at the first gap shorter than `min`.
pub fn assert_spacing_at_least(instants: &[Instant], min: Duration) {
    for (idx, pair) in instants.windows(2).enumerate() {
        let gap = pair[1].duration_since(pair[0]);
        assert!(
            gap >= min,
            "grant {} came {gap:?} after grant {idx}, expected at least {min:?}",
            idx + 1
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_preserved_identity() {
        let inputs = vec![vec![3u8], vec![1], vec![2, 0], vec![]];
        assert_order_preserved(&inputs, Vec::clone);
    }

    #[test]
    #[should_panic(expected = "order diverges")]
    fn test_order_preserved_detects_reversal() {
        let inputs = vec![1u8, 2, 3];
        assert_order_preserved(&inputs, |&x| std::cmp::Reverse(x));
    }

    #[test]
    fn test_spacing() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(10);
        let t2 = t1 + Duration::from_millis(10);
        assert_spacing_at_least(&[t0, t1, t2], Duration::from_millis(10));
    }
}
