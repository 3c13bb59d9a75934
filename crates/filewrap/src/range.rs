//! Index-pair normalization shared by every ranged operation.
//!
//! Ranges are inclusive and may be given high-first. After ordering, the
//! upper bound is clamped to the last valid position; a lower bound past the
//! end means the whole range is out of bounds.

use std::ops::RangeInclusive;

/// Order an index pair ascending.
#[inline]
pub fn normalize(low: usize, high: usize) -> (usize, usize) {
    if high < low { (high, low) } else { (low, high) }
}

/// Normalize an index pair and clamp it against a container of `len` items.
///
/// Returns `None` when the normalized lower bound is not a valid index
/// (which includes every range over an empty container).
pub fn clamp(low: usize, high: usize, len: usize) -> Option<RangeInclusive<usize>> {
    let (low, high) = normalize(low, high);
    if low >= len {
        return None;
    }
    Some(low..=high.min(len - 1))
}
