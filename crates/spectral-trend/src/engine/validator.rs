//! Input validation for pipeline configuration and labeled data.
//!
//! ## Purpose
//!
//! This module centralizes validation checks shared by the feature
//! processors and pipelines: span lists and result-name counts.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Configuration vs data**: Checks here raise configuration errors;
//!   data-shape checks are reported with enough context to identify the
//!   offending variable.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or repair invalid inputs.
//! * Kernel-specific parameter checks live next to their kernels
//!   (`resolve_ewma_params`, `validate_savgol_params`, config `validate`
//!   methods); coordinate checks live on the table type.

// Internal dependencies
use crate::primitives::errors::TrendError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for pipeline configuration and labeled data.
///
/// Provides static methods returning `Result<(), TrendError>`, failing fast
/// on the first violation.
pub struct Validator;

impl Validator {
    /// Validate a MACD span list: exactly 2 or 3 spans, each usable as an
    /// EWMA window.
    pub fn validate_spans(spans: &[usize]) -> Result<(), TrendError> {
        if !(spans.len() == 2 || spans.len() == 3) {
            return Err(TrendError::InvalidSpanCount(spans.len()));
        }
        for &span in spans {
            if span < 2 {
                return Err(TrendError::InvalidSpan(span));
            }
        }
        Ok(())
    }

    /// Validate an explicit result-name count against the number of series a
    /// processor will produce.
    pub fn validate_result_var_count(expected: usize, got: usize) -> Result<(), TrendError> {
        if expected != got {
            return Err(TrendError::InvalidResultVarCount { expected, got });
        }
        Ok(())
    }

}
