//! Boundary padding for NaN-aware window smoothing.
//!
//! ## Purpose
//!
//! This module implements the symmetric edge padding used by the NaN-aware
//! window smoother. Padding the series before windowing preserves the output
//! length and reduces bias at the start and end of the series.
//!
//! ## Design notes
//!
//! * **Edge means**: Pad values default to the mean of the outer `window`
//!   values (NaN-ignoring), falling back to the first finite value scanning
//!   inward, then to NaN.
//! * **Constant padding**: A fixed `value` may be used instead of edge means.
//! * **Allocation**: Creates a new vector for the padded data.
//!
//! ## Key concepts
//!
//! * **Pad policy**: `PadPolicy::EdgeMean(window)` vs `PadPolicy::Constant(value)`.
//!
//! ## Invariants
//!
//! * The padded length is `n + 2 * pad_len`; the original data is preserved
//!   in the middle of the padded range.
//!
//! ## Non-goals
//!
//! * This module does not window or average the padded data (see
//!   `math::convolve` and `algorithms::drops`).

// External dependencies
use num_traits::Float;

// ============================================================================
// Pad Policy
// ============================================================================

/// Policy for computing the left/right pad values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadPolicy<T> {
    /// Mean of the outer `window` values on each side (NaN-ignoring), with a
    /// first-finite-value fallback when the edge is entirely NaN.
    EdgeMean(usize),

    /// A fixed pad value on both sides.
    Constant(T),
}

impl<T: Float> Default for PadPolicy<T> {
    fn default() -> Self {
        Self::EdgeMean(1)
    }
}

// ============================================================================
// Padding Functions
// ============================================================================

/// Symmetrically pad a series with `pad_len` values per side.
pub fn left_right_pad<T: Float>(data: &[T], pad_len: usize, policy: PadPolicy<T>) -> Vec<T> {
    if pad_len == 0 || data.is_empty() {
        return data.to_vec();
    }
    let (left, right) = match policy {
        PadPolicy::Constant(value) => (value, value),
        PadPolicy::EdgeMean(window) => {
            let window = window.max(1).min(data.len());
            let left = edge_pad_value(data, &data[..window], |x| first_non_nan(x.iter()));
            let right = edge_pad_value(data, &data[data.len() - window..], |x| {
                first_non_nan(x.iter().rev())
            });
            (left, right)
        }
    };
    let mut padded = Vec::with_capacity(data.len() + 2 * pad_len);
    padded.extend(core::iter::repeat(left).take(pad_len));
    padded.extend_from_slice(data);
    padded.extend(core::iter::repeat(right).take(pad_len));
    padded
}

/// NaN-ignoring mean of a window; NaN when the window holds no finite value.
pub fn nan_mean<T: Float>(window: &[T]) -> T {
    let mut sum = T::zero();
    let mut count = 0usize;
    for &value in window {
        if !value.is_nan() {
            sum = sum + value;
            count += 1;
        }
    }
    if count == 0 {
        T::nan()
    } else {
        sum / T::from(count).unwrap()
    }
}

/// First non-NaN value in iteration order, or NaN when none exists.
pub fn first_non_nan<'a, T: Float + 'a>(values: impl Iterator<Item = &'a T>) -> T {
    for &value in values {
        if !value.is_nan() {
            return value;
        }
    }
    T::nan()
}

// Edge pad value: NaN-ignoring mean of the edge window, falling back to the
// first finite value scanning inward.
fn edge_pad_value<T: Float>(data: &[T], edge: &[T], fallback: impl Fn(&[T]) -> T) -> T {
    let mean = nan_mean(edge);
    if mean.is_nan() {
        fallback(data)
    } else {
        mean
    }
}
