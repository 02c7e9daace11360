//! Error types for smoothing and feature-derivation operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while lifting
//! kernels over labeled data, running smoothing sequences, and deriving
//! trend features.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Two families**: Configuration errors (raised immediately, never retried)
//!   and data errors (isolated per sample by the batch layer).
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Configuration errors**: Ambiguous variable selection, mismatched stage
//!    counts, invalid EWMA parameterization, unsupported reindex situations.
//! 2. **Data errors**: Misaligned variable lengths, all-NaN series, empty
//!    season slices, degenerate statistics.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * `is_configuration()` partitions the two families exhaustively.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not convert errors into per-sample records (batch layer).

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for smoothing and feature-derivation operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendError {
    /// Input series is empty.
    EmptyInput,

    /// A table operation requires a `data_var` because more than one variable exists.
    AmbiguousVariable {
        /// Names of the variables present in the table.
        available: Vec<String>,
    },

    /// The requested variable does not exist in the table.
    UnknownVariable {
        /// Requested variable name.
        name: String,
        /// Names of the variables present in the table.
        available: Vec<String>,
    },

    /// A variable's length does not match the coordinate length.
    MisalignedVariable {
        /// Variable name.
        name: String,
        /// Coordinate length.
        expected: usize,
        /// Actual variable length.
        got: usize,
    },

    /// A kernel changed the series length and no reindex policy was given.
    LengthMismatch {
        /// Input length.
        len_in: usize,
        /// Output length.
        len_out: usize,
    },

    /// Number of per-stage result variables does not match the stage count.
    SequenceLengthMismatch {
        /// Number of stages in the sequence.
        stages: usize,
        /// Number of result variables provided.
        result_vars: usize,
    },

    /// Both `alpha` and `span` were supplied to the EWMA kernel.
    EwmaSpanConflict,

    /// Neither `alpha` nor `span` was supplied to the EWMA kernel.
    EwmaSpanMissing,

    /// Effective EWMA span must be at least 2.
    InvalidSpan(usize),

    /// EWMA smoothing factor must be in (0, 1].
    InvalidAlpha(f64),

    /// MACD takes exactly 2 or 3 spans.
    InvalidSpanCount(usize),

    /// Number of result variables does not match the number of computed series.
    InvalidResultVarCount {
        /// Required number of names.
        expected: usize,
        /// Number of names provided.
        got: usize,
    },

    /// Filter window must be at least `min` points wide.
    InvalidWindow {
        /// The window provided.
        window: usize,
        /// Minimum required window.
        min: usize,
    },

    /// Polynomial order must be strictly less than the window length.
    InvalidPolyorder {
        /// The polynomial order provided.
        polyorder: usize,
        /// The window length.
        window: usize,
    },

    /// Filter window is wider than the data.
    WindowExceedsData {
        /// The window length.
        window: usize,
        /// Number of data points.
        n: usize,
    },

    /// Drop-detection threshold must be positive and finite.
    InvalidThreshold(f64),

    /// Convolution kernel is unusable (empty, longer than data, or zero-sum).
    InvalidKernel(String),

    /// Resampling step must be at least one day.
    InvalidDays(usize),

    /// Coordinate values must be sorted in non-decreasing order.
    UnsortedCoordinate {
        /// Index of the first out-of-order coordinate value.
        index: usize,
    },

    /// Operation requires a coordinate axis but received a bare array.
    RequiresCoordinate(&'static str),

    /// Series contains no finite values.
    AllNaN,

    /// A period slice is all-NaN for every requested variable.
    EmptyPeriod {
        /// Label of the offending period.
        period: String,
    },

    /// A statistic is undefined on its input (zero variance or too few points).
    DegenerateStatistic {
        /// Variable the statistic was computed on.
        var: String,
        /// Name of the statistic.
        statistic: &'static str,
    },
}

impl TrendError {
    /// True for configuration errors: raised immediately at construction or
    /// first use and never converted to per-sample error records.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            Self::EmptyInput
                | Self::MisalignedVariable { .. }
                | Self::AllNaN
                | Self::EmptyPeriod { .. }
                | Self::DegenerateStatistic { .. }
                | Self::WindowExceedsData { .. }
        )
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for TrendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input series is empty"),
            Self::AmbiguousVariable { available } => {
                write!(
                    f,
                    "data_var required if multiple variables exist (variables: {available:?})"
                )
            }
            Self::UnknownVariable { name, available } => {
                write!(f, "Unknown variable '{name}' (variables: {available:?})")
            }
            Self::MisalignedVariable {
                name,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Variable '{name}' has {got} values but the coordinate has {expected}"
                )
            }
            Self::LengthMismatch { len_in, len_out } => {
                write!(
                    f,
                    "Kernel changed series length ({len_in} -> {len_out}); \
                     a reindex policy of drop_init or drop_last is required"
                )
            }
            Self::SequenceLengthMismatch {
                stages,
                result_vars,
            } => {
                write!(
                    f,
                    "Number of result variables ({result_vars}) must be 0, 1, \
                     or the number of stages ({stages})"
                )
            }
            Self::EwmaSpanConflict => {
                write!(f, "Must pass span or alpha but not both")
            }
            Self::EwmaSpanMissing => {
                write!(f, "Must pass either span or alpha")
            }
            Self::InvalidSpan(span) => {
                write!(f, "Span [{span}] must be greater than 1")
            }
            Self::InvalidAlpha(alpha) => {
                write!(f, "Invalid alpha: {alpha} (must be > 0 and <= 1)")
            }
            Self::InvalidSpanCount(got) => {
                write!(f, "MACD takes exactly 2 or 3 spans, got {got}")
            }
            Self::InvalidResultVarCount { expected, got } => {
                write!(
                    f,
                    "Expected {expected} result variables, got {got}"
                )
            }
            Self::InvalidWindow { window, min } => {
                write!(f, "Invalid window: {window} (must be at least {min})")
            }
            Self::InvalidPolyorder { polyorder, window } => {
                write!(
                    f,
                    "Invalid polyorder: {polyorder} (must be less than window length {window})"
                )
            }
            Self::WindowExceedsData { window, n } => {
                write!(f, "Window length {window} exceeds data length {n}")
            }
            Self::InvalidThreshold(threshold) => {
                write!(
                    f,
                    "Invalid drop threshold: {threshold} (must be positive and finite)"
                )
            }
            Self::InvalidKernel(msg) => write!(f, "Invalid kernel: {msg}"),
            Self::InvalidDays(days) => {
                write!(f, "Invalid resampling step: {days} (must be at least 1 day)")
            }
            Self::UnsortedCoordinate { index } => {
                write!(f, "Coordinate values out of order at index {index}")
            }
            Self::RequiresCoordinate(op) => {
                write!(f, "'{op}' requires a coordinate axis; got a bare array")
            }
            Self::AllNaN => write!(f, "Series contains no finite values"),
            Self::EmptyPeriod { period } => {
                write!(f, "Period '{period}' is all-NaN for every requested variable")
            }
            Self::DegenerateStatistic { var, statistic } => {
                write!(f, "Statistic '{statistic}' is undefined on variable '{var}'")
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for TrendError {}
