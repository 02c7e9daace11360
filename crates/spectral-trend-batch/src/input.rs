//! Input abstractions for sample variables.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction over the containers callers
//! hold band/index values in — slices, `Vec`s, and `ndarray` arrays — so
//! record construction accepts any of them through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy view**: Types expose a contiguous slice view; the record
//!   copies from it exactly once.
//! * **Fail-fast**: Non-contiguous `ndarray` views are rejected before any
//!   processing starts.
//!
//! ## Invariants
//!
//! * Returned slices represent all elements of the input container.
//!
//! ## Non-goals
//!
//! * This module does not validate lengths or values (see `record`).

// External dependencies
use ndarray::{ArrayBase, Data, Ix1};

// Internal dependencies
use crate::errors::BatchError;

/// Trait for containers usable as a sample variable.
pub trait SeriesInput {
    /// Expose the values as a contiguous slice.
    fn as_series_slice(&self) -> Result<&[f64], BatchError>;
}

impl SeriesInput for &[f64] {
    fn as_series_slice(&self) -> Result<&[f64], BatchError> {
        Ok(self)
    }
}

impl SeriesInput for Vec<f64> {
    fn as_series_slice(&self) -> Result<&[f64], BatchError> {
        Ok(self.as_slice())
    }
}

impl<S> SeriesInput for ArrayBase<S, Ix1>
where
    S: Data<Elem = f64>,
{
    fn as_series_slice(&self) -> Result<&[f64], BatchError> {
        self.as_slice().ok_or_else(|| {
            BatchError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })
    }
}
