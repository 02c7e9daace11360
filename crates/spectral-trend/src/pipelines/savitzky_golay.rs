//! The gap-filling / Savitzky-Golay smoothing pipeline.
//!
//! ## Purpose
//!
//! This module provides the fixed four-stage smoothing pipeline applied to
//! every sample series:
//!
//! 1. daily resampling (regular grid, gaps marked NaN)
//! 2. drop removal (spurious dips marked NaN)
//! 3. linear interpolation (all NaN filled)
//! 4. Savitzky-Golay polynomial smoothing
//!
//! ## Design notes
//!
//! * **Builder**: Fluent configuration with validated `build()`, yielding a
//!   stateless, reusable [`SmoothingPipeline`].
//! * **Stage contract**: Declare the stage, declare its config, declare
//!   whether its output is named. Stages 1-2 are unnamed intermediates;
//!   stages 3-4 expose the cleaned (`preprocessed_ndvi`) and smoothed
//!   (`sg_ndvi`) series for downstream inspection.
//! * **Skips**: Each of the first three stages can be skipped; input then
//!   passes through unchanged.
//!
//! ## Key concepts
//!
//! * **Per-stage configs**: `ResampleConfig`, `DropConfig`,
//!   `InterpolateConfig` plus the filter's window/polyorder — all validated
//!   at construction, never at call time.
//!
//! ## Invariants
//!
//! * A built pipeline holds no per-sample state; concurrent samples never
//!   share mutable data.
//!
//! ## Non-goals
//!
//! * Feature derivation from the smoothed output (see `features`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::drops::{remove_drops, DropConfig};
use crate::algorithms::resample::ResampleConfig;
use crate::engine::lift::lift;
use crate::engine::sequencer::{ResultVars, Sequence, Stage};
use crate::math::interpolate::{interpolate_na, InterpolateConfig};
use crate::math::savgol::{savgol_filter, validate_savgol_params};
use crate::primitives::errors::TrendError;
use crate::primitives::table::{Table, TableData};

// ============================================================================
// Constants
// ============================================================================

/// Default input variable.
pub const SMOOTHING_DATA_VAR: &str = "ndvi";

/// Default name of the cleaned-but-unsmoothed output.
pub const PREPROCESSED_DATA_VAR: &str = "preprocessed_ndvi";

/// Default name of the fully smoothed output.
pub const SMOOTHED_DATA_VAR: &str = "sg_ndvi";

/// Default Savitzky-Golay window length (days).
pub const DEFAULT_SG_WINDOW_LENGTH: usize = 60;

/// Default Savitzky-Golay polynomial order.
pub const DEFAULT_SG_POLYORDER: usize = 3;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for the four-stage smoothing pipeline.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SavitzkyGolay {
    /// Input variable to smooth.
    pub data_var: Option<String>,

    /// Per-stage result naming.
    pub result_vars: ResultVars,

    /// Savitzky-Golay window length.
    pub window_length: usize,

    /// Savitzky-Golay polynomial order.
    pub polyorder: usize,

    /// Stage 1 config: daily resampling.
    pub resample: ResampleConfig,

    /// Stage 2 config: dip removal.
    pub drops: DropConfig,

    /// Stage 3 config: NaN interpolation.
    pub interpolate: InterpolateConfig,

    /// Skip the resampling stage.
    pub skip_resample: bool,

    /// Skip the dip-removal stage.
    pub skip_drops: bool,

    /// Skip the interpolation stage.
    pub skip_interpolate: bool,
}

impl Default for SavitzkyGolay {
    fn default() -> Self {
        Self {
            data_var: Some(SMOOTHING_DATA_VAR.to_string()),
            result_vars: ResultVars::PerStage(vec![
                None,
                None,
                Some(PREPROCESSED_DATA_VAR.to_string()),
                Some(SMOOTHED_DATA_VAR.to_string()),
            ]),
            window_length: DEFAULT_SG_WINDOW_LENGTH,
            polyorder: DEFAULT_SG_POLYORDER,
            resample: ResampleConfig::default(),
            drops: DropConfig::default(),
            interpolate: InterpolateConfig::default(),
            skip_resample: false,
            skip_drops: false,
            skip_interpolate: false,
        }
    }
}

impl SavitzkyGolay {
    /// Create a builder with the default NDVI configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input variable.
    pub fn data_var(mut self, name: impl Into<String>) -> Self {
        self.data_var = Some(name.into());
        self
    }

    /// Set the per-stage result naming.
    pub fn result_vars(mut self, result_vars: ResultVars) -> Self {
        self.result_vars = result_vars;
        self
    }

    /// Set the filter window length.
    pub fn window_length(mut self, window_length: usize) -> Self {
        self.window_length = window_length;
        self
    }

    /// Set the filter polynomial order.
    pub fn polyorder(mut self, polyorder: usize) -> Self {
        self.polyorder = polyorder;
        self
    }

    /// Set the resampling stage config.
    pub fn resample(mut self, resample: ResampleConfig) -> Self {
        self.resample = resample;
        self
    }

    /// Set the dip-removal stage config.
    pub fn drops(mut self, drops: DropConfig) -> Self {
        self.drops = drops;
        self
    }

    /// Set the interpolation stage config.
    pub fn interpolate(mut self, interpolate: InterpolateConfig) -> Self {
        self.interpolate = interpolate;
        self
    }

    /// Skip the resampling stage.
    pub fn skip_resample(mut self, skip: bool) -> Self {
        self.skip_resample = skip;
        self
    }

    /// Skip the dip-removal stage.
    pub fn skip_drops(mut self, skip: bool) -> Self {
        self.skip_drops = skip;
        self
    }

    /// Skip the interpolation stage.
    pub fn skip_interpolate(mut self, skip: bool) -> Self {
        self.skip_interpolate = skip;
        self
    }

    /// Validate the configuration and build the pipeline.
    pub fn build<T: Float + 'static>(self) -> Result<SmoothingPipeline<T>, TrendError> {
        self.resample.validate()?;
        self.drops.validate()?;
        validate_savgol_params(self.window_length, self.polyorder)?;

        let drops = self.drops;
        let interpolate = self.interpolate;
        let (window_length, polyorder) = (self.window_length, self.polyorder);
        let stages = vec![
            Stage::new(self.resample).skipped(self.skip_resample),
            Stage::new(lift("remove_drops", move |x: &[T]| remove_drops(x, &drops)))
                .skipped(self.skip_drops),
            Stage::new(lift("interpolate_na", move |x: &[T]| {
                interpolate_na(x, &interpolate)
            }))
            .skipped(self.skip_interpolate),
            Stage::new(lift("savgol_filter", move |x: &[T]| {
                savgol_filter(x, window_length, polyorder)
            })),
        ];
        let sequence = Sequence::new(stages, self.data_var, self.result_vars)?;
        Ok(SmoothingPipeline { sequence })
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// A validated, reusable smoothing pipeline.
pub struct SmoothingPipeline<T> {
    sequence: Sequence<T>,
}

impl<T> std::fmt::Debug for SmoothingPipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmoothingPipeline")
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl<T: Float> SmoothingPipeline<T> {
    /// Run the pipeline on any input category.
    pub fn process(&self, data: &TableData<T>) -> Result<TableData<T>, TrendError> {
        self.sequence.run(data)
    }

    /// Run the pipeline on a labeled table.
    pub fn process_table(&self, table: &Table<T>) -> Result<Table<T>, TrendError> {
        self.sequence
            .run(&TableData::Table(table.clone()))?
            .into_table()
    }
}
