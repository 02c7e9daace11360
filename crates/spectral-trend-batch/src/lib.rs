//! # spectral-trend-batch — batch sample processing for spectral-trend
//!
//! The batch/row adaptation layer over the `spectral-trend` core: sample
//! records, record⇄table conversion, a pluggable sequential/threaded mapper,
//! per-sample error isolation, and flat feature rows ready for an
//! append-only line-delimited JSON sink.
//!
//! ## Quick Start
//!
//! ```rust
//! use spectral_trend_batch::prelude::*;
//!
//! // One record per (sample_id, year), dates as ISO strings.
//! let dates: Vec<String> = (1..=10).map(|d| format!("2020-01-{d:02}")).collect();
//! let ndvi = vec![0.10, 0.15, 0.02, 0.20, 0.22, 0.25, f64::NAN, 0.30, 0.32, 0.35];
//! let record = SampleRecord::new("s-001", 2020)
//!     .with_date_strs(&dates)?
//!     .with_variable("ndvi", ndvi)?;
//!
//! // Build the smoothing job from a validated pipeline.
//! let pipeline = SavitzkyGolay::new()
//!     .window_length(5)
//!     .polyorder(2)
//!     .drops(DropConfig {
//!         smoothing_radius: 2,
//!         ..DropConfig::default()
//!     })
//!     .build::<f64>()?;
//! let job = SmoothingJob::new(pipeline);
//!
//! // Run the batch; failures isolate per sample.
//! let report = run_batch(vec![record], MapStrategy::Threaded, &job);
//! assert_eq!(report.rows.len(), 1);
//! assert!(report.is_clean());
//!
//! // Encode for an append-only LDJSON sink.
//! let mut sink = Vec::new();
//! write_ldjson(&mut sink, &report.rows)?;
//! # Result::<(), BatchError>::Ok(())
//! ```
//!
//! ## Error Isolation
//!
//! `run_batch` converts every per-sample failure into a structured
//! [`SampleError`](prelude::SampleError) and keeps going; a run always ends
//! with a results set plus a grouped error summary.

// Batch error types.
mod errors;

// Feature rows and LDJSON encoding.
mod features;

// Input container abstraction.
mod input;

// Sequential/threaded mapping.
mod mapper;

// Sample records and table adaptation.
mod record;

// Jobs, error isolation, batch report.
mod runner;

// Standard prelude, re-exporting the core prelude alongside batch types.
pub mod prelude {
    pub use spectral_trend::prelude::*;

    pub use crate::errors::{BatchError, SampleError};
    pub use crate::features::{append_ldjson, write_ldjson, FeatureRow, FeatureValue};
    pub use crate::input::SeriesInput;
    pub use crate::mapper::{map_records, MapStrategy};
    pub use crate::record::SampleRecord;
    pub use crate::runner::{run_batch, BatchReport, SampleJob, SmoothingJob, StatsJob};
}
