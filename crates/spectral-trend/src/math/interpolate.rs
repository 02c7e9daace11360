//! NaN gap filling by 1-D interpolation.
//!
//! ## Purpose
//!
//! This module replaces NaN entries of a series by interpolating against the
//! index positions of the non-NaN entries. It is the gap-filling stage run
//! after drop removal, guaranteeing a NaN-free series for the polynomial
//! smoother.
//!
//! ## Design notes
//!
//! * **Index-based**: Interpolation is against integer index positions, not
//!   the date coordinate; the series is assumed to be on a regular grid by
//!   the time gaps are filled (daily resampling runs first).
//! * **Extrapolation**: NaN runs at either end are covered by linear
//!   extrapolation from the two outermost known points by default; with
//!   extrapolation disabled the nearest known value is held instead.
//! * **Methods**: Linear (default) and nearest-neighbor interpolation.
//!
//! ## Key concepts
//!
//! * **Known points**: The (index, value) pairs of non-NaN entries; a series
//!   with none is an `AllNaN` data error.
//!
//! ## Invariants
//!
//! * Output length equals input length and contains no NaN.
//! * Non-NaN input entries pass through unchanged.
//!
//! ## Non-goals
//!
//! * This module does not resample coordinates (see `algorithms::resample`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::TrendError;

// ============================================================================
// Configuration
// ============================================================================

/// Interpolation method for filling NaN entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InterpMethod {
    /// Straight-line interpolation between the surrounding known points.
    #[default]
    Linear,

    /// Value of the nearest known point (ties resolve to the earlier point).
    Nearest,
}

/// Configuration for the gap-filling stage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InterpolateConfig {
    /// Interpolation method.
    pub method: InterpMethod,

    /// Extrapolate past the outermost known points; when disabled the
    /// nearest known value is held instead.
    pub extrapolate: bool,
}

impl Default for InterpolateConfig {
    fn default() -> Self {
        Self {
            method: InterpMethod::Linear,
            extrapolate: true,
        }
    }
}

// ============================================================================
// Interpolation Kernel
// ============================================================================

/// Replace NaN entries of `data` by 1-D interpolation.
pub fn interpolate_na<T: Float>(data: &[T], config: &InterpolateConfig) -> Result<Vec<T>, TrendError> {
    if data.is_empty() {
        return Err(TrendError::EmptyInput);
    }
    let known: Vec<(usize, T)> = data
        .iter()
        .enumerate()
        .filter(|(_, value)| !value.is_nan())
        .map(|(i, &value)| (i, value))
        .collect();
    if known.is_empty() {
        return Err(TrendError::AllNaN);
    }

    let mut out = Vec::with_capacity(data.len());
    // Index into `known` of the last known point at or before the cursor.
    let mut cursor = 0usize;
    for (i, &value) in data.iter().enumerate() {
        if !value.is_nan() {
            out.push(value);
            continue;
        }
        while cursor + 1 < known.len() && known[cursor + 1].0 < i {
            cursor += 1;
        }
        out.push(fill_value(&known, cursor, i, config));
    }
    Ok(out)
}

// Interpolated value at index `i`, given the index `cursor` of the last
// known point before `i` (or 0 when `i` precedes all known points).
fn fill_value<T: Float>(
    known: &[(usize, T)],
    cursor: usize,
    i: usize,
    config: &InterpolateConfig,
) -> T {
    let (lo, hi) = bracket(known, cursor, i);
    let (x0, y0) = known[lo];
    let (x1, y1) = known[hi];
    if x0 == x1 {
        return y0;
    }
    match config.method {
        InterpMethod::Nearest => {
            if i <= x0 {
                y0
            } else if i >= x1 {
                y1
            } else if i - x0 <= x1 - i {
                y0
            } else {
                y1
            }
        }
        InterpMethod::Linear => {
            if !config.extrapolate {
                if i <= x0 {
                    return y0;
                }
                if i >= x1 {
                    return y1;
                }
            }
            let t = (T::from(i).unwrap() - T::from(x0).unwrap())
                / (T::from(x1).unwrap() - T::from(x0).unwrap());
            y0 + t * (y1 - y0)
        }
    }
}

// The pair of known points bracketing index `i`; at the ends, the two
// outermost points on that side (supporting extrapolation).
fn bracket<T: Float>(known: &[(usize, T)], cursor: usize, i: usize) -> (usize, usize) {
    if known.len() == 1 {
        return (0, 0);
    }
    if i < known[0].0 {
        return (0, 1);
    }
    if i > known[known.len() - 1].0 {
        return (known.len() - 2, known.len() - 1);
    }
    (cursor, cursor + 1)
}
