//! Error types for batch sample processing.
//!
//! ## Purpose
//!
//! This module defines the batch layer's error types: the operational
//! [`BatchError`] wrapping core, parsing, serialization, and I/O failures,
//! and the structured per-sample [`SampleError`] record that isolates one
//! corrupt sample from the rest of the batch.
//!
//! ## Design notes
//!
//! * **Boundary conversion**: Kernels and pipelines stay
//!   exception-transparent; the batch runner is the single place where
//!   failures become `SampleError` records.
//! * **Serializable**: `SampleError` derives `Serialize` so error reports
//!   can ride the same line-delimited JSON sink as feature rows.
//!
//! ## Non-goals
//!
//! * This module does not aggregate or report errors (see `runner`).

// External dependencies
use serde::Serialize;
use thiserror::Error;

// Core dependencies
use spectral_trend::prelude::TrendError;

// ============================================================================
// Batch Error
// ============================================================================

/// Operational error for batch sample processing.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Core smoothing/feature error.
    #[error(transparent)]
    Core(#[from] TrendError),

    /// Generic invalid input with a descriptive message.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A record field failed validation; identifies the sample.
    #[error("sample '{sample_id}': {message}")]
    InvalidRecord {
        /// Sample the record belongs to.
        sample_id: String,
        /// What was wrong with it.
        message: String,
    },

    /// A date string could not be parsed as an ISO 8601 date.
    #[error("sample '{sample_id}': invalid date '{value}'")]
    InvalidDate {
        /// Sample the record belongs to.
        sample_id: String,
        /// The offending date string.
        value: String,
    },

    /// Row serialization failed.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Sink write failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Sample Error Record
// ============================================================================

/// Structured per-sample error: one corrupt time series never aborts the
/// batch; it becomes one of these instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("sample '{sample_id}' year {year}: {message}")]
pub struct SampleError {
    /// Sample the failure belongs to.
    pub sample_id: String,

    /// Harvest year of the failed unit of work.
    pub year: i32,

    /// Human-readable failure description (grouping key for the report).
    pub message: String,
}
