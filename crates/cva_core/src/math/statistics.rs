//! Sample statistics over per-date exposure distributions.
//!
//! Callers sort samples once and reuse the sorted slice for every
//! percentile, so results are independent of the order paths were produced in.

/// Returns the `pct`-th percentile of an ascending-sorted sample.
///
/// Uses linear interpolation between closest ranks:
///
/// ```text
/// rank = pct / 100 * (n - 1)
/// q    = x[lo] + (rank - lo) * (x[hi] - x[lo])
/// ```
///
/// Returns `None` for an empty sample or a percentile outside `[0, 100]`.
///
/// # Examples
/// ```
/// use cva_core::math::percentile_sorted;
///
/// let xs = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile_sorted(&xs, 0.0), Some(1.0));
/// assert_eq!(percentile_sorted(&xs, 50.0), Some(2.5));
/// assert_eq!(percentile_sorted(&xs, 100.0), Some(4.0));
/// assert_eq!(percentile_sorted(&[7.0], 95.0), Some(7.0));
/// assert_eq!(percentile_sorted(&[], 50.0), None);
/// ```
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&pct) {
        return None;
    }
    let n = sorted.len();
    if n == 1 {
        return Some(sorted[0]);
    }

    let rank = pct / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = rank - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Arithmetic mean, summed in slice order. `None` for an empty slice.
#[inline]
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        None
    } else {
        Some(xs.iter().sum::<f64>() / xs.len() as f64)
    }
}
