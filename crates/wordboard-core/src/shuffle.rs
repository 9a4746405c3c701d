#![forbid(unsafe_code)]

//! Uniform random permutation (Fisher–Yates).

use rand::Rng;

/// Return a shuffled copy of `items`; the input is left untouched.
///
/// Walks `i` from `n - 1` down to `1`, swapping slot `i` with a slot drawn
/// uniformly from `0..=i`.
pub fn shuffle<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}
