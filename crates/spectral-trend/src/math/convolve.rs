//! Moving-average and convolution smoothing kernels.
//!
//! ## Purpose
//!
//! This module provides the window-smoothing primitives of the kernel
//! library: the simple moving average with a shrinking left edge, same-mode
//! kernel convolution, and the flat / triangular window smoothers built on
//! it.
//!
//! ## Design notes
//!
//! * **Bare arrays**: All functions are slice-in/`Vec`-out; coordinate
//!   bookkeeping happens in the lifting adapter, never here.
//! * **Normalization**: Convolution kernels are normalized to sum 1 by
//!   default, making the smoother invariant to uniform kernel scaling.
//! * **Edge behavior**: `simple_moving_average` shrinks its window at the
//!   left edge instead of padding; same-mode convolution implicitly
//!   zero-pads.
//!
//! ## Key concepts
//!
//! * **Same-mode convolution**: Output length equals input length, taking
//!   the centered span of the full convolution.
//!
//! ## Invariants
//!
//! * Output length always equals input length.
//! * `simple_moving_average(x, w)[j] == mean(x[0..=j])` for `j < w`.
//!
//! ## Non-goals
//!
//! * This module is not NaN-aware (see `algorithms::drops` for the NaN-aware
//!   window mean).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::TrendError;

// ============================================================================
// Simple Moving Average
// ============================================================================

/// Simple moving average with a shrinking left edge.
///
/// Leading values average all data available so far: for `j < window`,
/// `out[j]` is the mean of `x[0..=j]`; beyond that a full trailing window of
/// size `window` is used.
pub fn simple_moving_average<T: Float>(data: &[T], window: usize) -> Result<Vec<T>, TrendError> {
    if data.is_empty() {
        return Err(TrendError::EmptyInput);
    }
    if window == 0 {
        return Err(TrendError::InvalidWindow { window, min: 1 });
    }
    let mut out = Vec::with_capacity(data.len());
    let mut sum = T::zero();
    for (j, &value) in data.iter().enumerate() {
        sum = sum + value;
        if j >= window {
            sum = sum - data[j - window];
        }
        let denom = T::from(window.min(j + 1)).unwrap();
        out.push(sum / denom);
    }
    Ok(out)
}

// ============================================================================
// Kernel Convolution
// ============================================================================

/// Smooth data by same-mode convolution with `kernel`.
///
/// When `normalize` is set the kernel is divided by its sum first, so any
/// uniform positive scaling of the kernel yields identical output.
pub fn kernel_smoothing<T: Float>(
    data: &[T],
    kernel: &[T],
    normalize: bool,
) -> Result<Vec<T>, TrendError> {
    if data.is_empty() {
        return Err(TrendError::EmptyInput);
    }
    if kernel.is_empty() {
        return Err(TrendError::InvalidKernel("kernel is empty".to_string()));
    }
    if kernel.len() > data.len() {
        return Err(TrendError::InvalidKernel(format!(
            "kernel length {} exceeds data length {}",
            kernel.len(),
            data.len()
        )));
    }
    let kernel = if normalize {
        let sum = kernel.iter().fold(T::zero(), |acc, &k| acc + k);
        if sum == T::zero() {
            return Err(TrendError::InvalidKernel("kernel sums to zero".to_string()));
        }
        kernel.iter().map(|&k| k / sum).collect::<Vec<T>>()
    } else {
        kernel.to_vec()
    };
    Ok(convolve_same(data, &kernel))
}

/// Smooth data by replacing values with the mean over a window of radius
/// `radius` (flat kernel of size `2 * radius + 1`).
pub fn mean_window_smoothing<T: Float>(data: &[T], radius: usize) -> Result<Vec<T>, TrendError> {
    let kernel = vec![T::one(); 2 * radius + 1];
    kernel_smoothing(data, &kernel, true)
}

/// Smooth data with a triangular window of radius `radius`.
///
/// The kernel rises linearly with `slope`, peaks at the center, and falls
/// symmetrically.
pub fn linear_window_smoothing<T: Float>(
    data: &[T],
    radius: usize,
    slope: T,
) -> Result<Vec<T>, TrendError> {
    let mut kernel = Vec::with_capacity(2 * radius + 1);
    for i in 0..radius {
        kernel.push(slope * T::from(i + 1).unwrap());
    }
    kernel.push(slope * T::from(radius + 1).unwrap());
    for i in (0..radius).rev() {
        kernel.push(slope * T::from(i + 1).unwrap());
    }
    kernel_smoothing(data, &kernel, true)
}

// Same-mode convolution: the centered `n` values of the full convolution.
// Caller guarantees `kernel.len() <= data.len()` and a non-empty kernel.
fn convolve_same<T: Float>(data: &[T], kernel: &[T]) -> Vec<T> {
    let n = data.len();
    let k = kernel.len();
    let start = (k - 1) / 2;
    let mut out = Vec::with_capacity(n);
    for m in start..start + n {
        let mut acc = T::zero();
        // full convolution term: sum_j data[j] * kernel[m - j]
        let j_lo = m.saturating_sub(k - 1);
        let j_hi = m.min(n - 1);
        for j in j_lo..=j_hi {
            acc = acc + data[j] * kernel[m - j];
        }
        out.push(acc);
    }
    out
}

// ============================================================================
// Windowed Replacement
// ============================================================================

/// Replace data with replacement values in windows around `indices`.
///
/// For each index `i`, the inclusive range `[i - radius, i + radius]`,
/// clipped to valid bounds, is overwritten with the corresponding values
/// from `replacement`; overlapping ranges are unioned before substitution.
pub fn replace_windows<T: Float>(
    data: &[T],
    replacement: &[T],
    indices: &[usize],
    radius: usize,
) -> Result<Vec<T>, TrendError> {
    if data.is_empty() {
        return Err(TrendError::EmptyInput);
    }
    if replacement.len() != data.len() {
        return Err(TrendError::MisalignedVariable {
            name: "replacement".to_string(),
            expected: data.len(),
            got: replacement.len(),
        });
    }
    let mut out = data.to_vec();
    let last = data.len() - 1;
    let mut targets: Vec<usize> = indices
        .iter()
        .flat_map(|&i| i.saturating_sub(radius)..=(i + radius).min(last))
        .collect();
    targets.sort_unstable();
    targets.dedup();
    for i in targets {
        out[i] = replacement[i];
    }
    Ok(out)
}
