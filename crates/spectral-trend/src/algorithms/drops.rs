//! NaN-aware window smoothing and spurious-dip removal.
//!
//! ## Purpose
//!
//! This module implements the outlier-rejection step of the smoothing
//! pipeline: cloud and shadow contamination shows up in vegetation-index
//! series as sudden drops that bounce back. Points far below a NaN-aware
//! smoothed reference are marked NaN so the interpolation stage can refill
//! them.
//!
//! ## Design notes
//!
//! * **Two passes**: First a NaN-aware window mean builds the reference,
//!   then values with `value / reference < threshold` are replaced by NaN.
//! * **Edge padding**: The series is symmetrically padded before windowing
//!   (see `math::boundary`) so the output length matches the input.
//! * **Idempotence**: A series with no qualifying dips passes through
//!   bit-identical.
//!
//! ## Key concepts
//!
//! * **Drop threshold**: Ratio below which a point counts as a spurious dip.
//!   The default of 0.5 is tuned empirically for indices in the 0-1 range
//!   (NDVI-like) and does not necessarily generalize to other indices.
//!
//! ## Invariants
//!
//! * Output length equals input length.
//! * NaN input entries stay NaN; no new values are invented here.
//!
//! ## Non-goals
//!
//! * This module does not fill the NaN it introduces (see
//!   `math::interpolate`).
//! * Band-combination cloud masks (`nir < red` style pre-filters) are an
//!   external concern, not part of this step.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::boundary::{left_right_pad, nan_mean, PadPolicy};
use crate::primitives::errors::TrendError;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the dip-removal stage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DropConfig {
    /// Points where `value / reference` falls below this ratio become NaN.
    pub drop_threshold: f64,

    /// Radius of the NaN-aware reference smoother.
    pub smoothing_radius: usize,

    /// Edge-mean window for boundary padding; `None` uses `pad_value`.
    pub pad_window: Option<usize>,

    /// Constant pad value used when `pad_window` is `None`.
    pub pad_value: Option<f64>,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            drop_threshold: 0.5,
            smoothing_radius: 16,
            pad_window: Some(1),
            pad_value: None,
        }
    }
}

impl DropConfig {
    /// Validate threshold and padding parameters.
    pub fn validate(&self) -> Result<(), TrendError> {
        if !(self.drop_threshold.is_finite() && self.drop_threshold > 0.0) {
            return Err(TrendError::InvalidThreshold(self.drop_threshold));
        }
        Ok(())
    }

    fn pad_policy<T: Float>(&self) -> PadPolicy<T> {
        match self.pad_window {
            Some(window) => PadPolicy::EdgeMean(window),
            None => PadPolicy::Constant(
                self.pad_value.map(|v| T::from(v).unwrap()).unwrap_or_else(T::nan),
            ),
        }
    }
}

// ============================================================================
// NaN-Aware Window Mean
// ============================================================================

/// Window-mean smoothing that ignores NaN inside each window.
///
/// Edges are padded per `policy` before windowing so the output length
/// matches the input length. A window with no finite values yields NaN.
pub fn nan_mean_window_smoothing<T: Float>(
    data: &[T],
    radius: usize,
    policy: PadPolicy<T>,
) -> Result<Vec<T>, TrendError> {
    if data.is_empty() {
        return Err(TrendError::EmptyInput);
    }
    let window = 2 * radius + 1;
    let padded = left_right_pad(data, radius, policy);
    Ok((0..data.len())
        .map(|i| nan_mean(&padded[i..i + window]))
        .collect())
}

// ============================================================================
// Drop Removal
// ============================================================================

/// Replace spurious dips with NaN.
///
/// A NaN-aware smoothed reference is computed first; any point whose ratio
/// to the reference falls below `drop_threshold` is treated as a
/// contamination artifact and masked for later interpolation.
pub fn remove_drops<T: Float>(data: &[T], config: &DropConfig) -> Result<Vec<T>, TrendError> {
    config.validate()?;
    let reference = nan_mean_window_smoothing(data, config.smoothing_radius, config.pad_policy())?;
    let threshold = T::from(config.drop_threshold).unwrap();
    Ok(data
        .iter()
        .zip(reference.iter())
        .map(|(&value, &reference)| {
            if value / reference < threshold {
                T::nan()
            } else {
                value
            }
        })
        .collect())
}
