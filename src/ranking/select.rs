//! Top-N truncation.

/// Keep the first `n` elements of an already sorted sequence.
///
/// Returns `min(n, len)` elements in their original order; `n == 0` yields an
/// empty sequence.
pub fn select<T>(mut sorted: Vec<T>, n: usize) -> Vec<T> {
    sorted.truncate(n);
    sorted
}
