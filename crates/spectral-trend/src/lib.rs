//! # spectral-trend — smoothing and trend features for spectral index series
//!
//! Gap filling, spurious-dip removal, Savitzky-Golay smoothing, and
//! MACD-style trend/momentum features for noisy satellite vegetation-index
//! time series, built around a generic adapter that lets plain numeric
//! kernels operate uniformly over bare arrays, single labeled series, and
//! multi-variable labeled tables.
//!
//! ## Quick Start
//!
//! ### Smoothing a sample series
//!
//! ```rust
//! use chrono::NaiveDate;
//! use spectral_trend::prelude::*;
//!
//! let coord: Vec<NaiveDate> = (1..=10)
//!     .map(|d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap())
//!     .collect();
//! let ndvi = vec![0.10, 0.15, 0.02, 0.20, 0.22, 0.25, f64::NAN, 0.30, 0.32, 0.35];
//!
//! let mut table = Table::new(coord)?;
//! table.insert_var("ndvi", ndvi)?;
//!
//! // Build the pipeline: daily grid -> dip removal -> interpolation -> SG.
//! let pipeline = SavitzkyGolay::new()
//!     .window_length(5)
//!     .polyorder(2)
//!     .drops(DropConfig {
//!         smoothing_radius: 2,
//!         ..DropConfig::default()
//!     })
//!     .build::<f64>()?;
//!
//! let smoothed = pipeline.process_table(&table)?;
//! let sg = smoothed.require_var("sg_ndvi")?;
//! assert_eq!(sg.len(), 10);
//! assert!(sg.iter().all(|v| !v.is_nan()));
//! # Result::<(), TrendError>::Ok(())
//! ```
//!
//! ### Momentum features
//!
//! ```rust
//! use spectral_trend::prelude::*;
//!
//! let x: Vec<f64> = (0..40).map(|i| (i as f64 * 0.3).sin() + 1.5).collect();
//! let macd = Macd::new(vec![5, 10, 4])?;
//! let out = macd.process(&TableData::Bare(x))?;
//! # let _ = out;
//! # Result::<(), TrendError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! Every fallible operation returns `Result<_, TrendError>`. Configuration
//! errors (ambiguous variables, invalid spans, mismatched stage counts) are
//! raised at construction; data errors (all-NaN slices, misaligned
//! variables) surface per call so a batch driver can isolate them per
//! sample.
//!
//! ## Crate Layout
//!
//! * `primitives` — labeled containers and errors
//! * `math` — bare-array kernels (EWMA, interpolation, moving averages,
//!   Savitzky-Golay)
//! * `algorithms` — dip removal, daily resampling
//! * `engine` — kernel lifting and sequencing
//! * `features` — MACD and period statistics
//! * `pipelines` — the Savitzky-Golay pipeline

// Layer 1: Primitives - data model and error types.
mod primitives;

// Layer 2: Math - bare-array numeric kernels.
mod math;

// Layer 3: Algorithms - dip removal and resampling.
mod algorithms;

// Layer 4: Engine - lifting, sequencing, validation.
mod engine;

// Layer 5: Features - momentum and period statistics.
mod features;

// Layer 6: Pipelines - composed smoothing pipelines.
mod pipelines;

// Standard prelude.
pub mod prelude {
    pub use crate::algorithms::drops::DropConfig;
    pub use crate::algorithms::resample::{FillMethod, ResampleConfig};
    pub use crate::engine::lift::{lift, KernelOptions, Reindex, TableKernel};
    pub use crate::engine::sequencer::{ResultVars, Sequence, SequenceOp, Stage};
    pub use crate::features::macd::{Macd, MacdResultVars};
    pub use crate::features::stats::{period_stats, Period, SeasonBounds, StatsConfig, Statistic};
    pub use crate::math::ewma::EwmaInit;
    pub use crate::math::interpolate::{InterpMethod, InterpolateConfig};
    pub use crate::pipelines::savitzky_golay::{SavitzkyGolay, SmoothingPipeline};
    pub use crate::primitives::errors::TrendError;
    pub use crate::primitives::table::{AttrValue, Series, Table, TableData};
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing
// purposes. It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod features {
        pub use crate::features::*;
    }
    pub mod pipelines {
        pub use crate::pipelines::*;
    }
}
