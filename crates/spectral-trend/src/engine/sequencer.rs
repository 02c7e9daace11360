//! Ordered kernel sequences with variable-name threading.
//!
//! ## Purpose
//!
//! This module composes lifted kernels (and coordinate-changing table
//! operations) into ordered sequences: each stage's written variable becomes
//! the next stage's input variable, stages can be skipped, and result-naming
//! policies control which intermediate outputs are kept.
//!
//! ## Design notes
//!
//! * **Construction-time validation**: Per-stage result names must match the
//!   stage count; mismatches error before any kernel runs.
//! * **Typed stage configs**: Stage arguments are baked into each stage at
//!   construction (typed config structs, closure capture), replacing the
//!   dynamic per-call argument lists of duck-typed designs; the skip marker
//!   survives as an explicit stage flag.
//! * **Name threading**: Skipped stages pass both the data and the threaded
//!   variable name through unchanged.
//!
//! ## Key concepts
//!
//! * **Result policies**: `Overwrite` (every stage overwrites its input
//!   variable), `Final(name)` (every stage writes the named variable, so
//!   only the final value survives and the input variable is preserved),
//!   `PerStage(names)` (each stage's output kept under its own name; `None`
//!   entries overwrite).
//!
//! ## Invariants
//!
//! * Stage order is fixed and sequential; no stage runs after a failure.
//! * A sequence is stateless and reusable across samples.
//!
//! ## Non-goals
//!
//! * This module does not define concrete smoothing pipelines (see
//!   `pipelines::savitzky_golay`).

// External dependencies
use num_traits::Float;
use std::sync::Arc;

// Internal dependencies
use crate::algorithms::resample::{daily_resample, ResampleConfig};
use crate::engine::lift::{resolve_vars, KernelOptions, Reindex, TableKernel};
use crate::primitives::errors::TrendError;
use crate::primitives::table::TableData;

// ============================================================================
// Sequence Operations
// ============================================================================

/// An operation runnable as a sequence stage.
///
/// Lifted kernels implement this; so do coordinate-changing table operations
/// such as daily resampling.
pub trait SequenceOp<T>: Send + Sync {
    /// Operation name, used for diagnostics.
    fn op_name(&self) -> &str;

    /// Apply the operation, returning the transformed data and the written
    /// variable name (`None` for bare arrays).
    fn apply_named(
        &self,
        data: &TableData<T>,
        opts: &KernelOptions,
    ) -> Result<(TableData<T>, Option<String>), TrendError>;
}

impl<T: Float> SequenceOp<T> for TableKernel<T> {
    fn op_name(&self) -> &str {
        self.name()
    }

    fn apply_named(
        &self,
        data: &TableData<T>,
        opts: &KernelOptions,
    ) -> Result<(TableData<T>, Option<String>), TrendError> {
        TableKernel::apply_named(self, data, opts)
    }
}

/// Daily resampling as a sequence stage: the whole table is regridded, and
/// the threaded variable is (optionally) copied under the result name.
impl<T: Float> SequenceOp<T> for ResampleConfig {
    fn op_name(&self) -> &str {
        "daily_resample"
    }

    fn apply_named(
        &self,
        data: &TableData<T>,
        opts: &KernelOptions,
    ) -> Result<(TableData<T>, Option<String>), TrendError> {
        match data {
            TableData::Bare(_) => Err(TrendError::RequiresCoordinate("daily_resample")),
            TableData::Series(series) => {
                let table = series.clone().into_table();
                let resampled = daily_resample(&table, self)?;
                let name = opts.resolve_result(&series.name);
                let mut result = resampled.to_series(&series.name)?;
                result.name = name.clone();
                Ok((TableData::Series(result), Some(name)))
            }
            TableData::Table(table) => {
                let (data_var, result_var) = resolve_vars(table, opts)?;
                let mut resampled = daily_resample(table, self)?;
                if result_var != data_var {
                    let values = resampled.require_var(&data_var)?.to_vec();
                    resampled.insert_var(result_var.clone(), values)?;
                }
                Ok((TableData::Table(resampled), Some(result_var)))
            }
        }
    }
}

// ============================================================================
// Stages
// ============================================================================

/// One stage of a sequence: an operation plus its reindex policy and skip
/// marker.
#[derive(Clone)]
pub struct Stage<T> {
    op: Arc<dyn SequenceOp<T>>,
    reindex: Reindex,
    skip: bool,
}

impl<T> std::fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("op", &self.op.op_name())
            .field("reindex", &self.reindex)
            .field("skip", &self.skip)
            .finish()
    }
}

impl<T: Float> Stage<T> {
    /// Wrap an operation as a stage.
    pub fn new(op: impl SequenceOp<T> + 'static) -> Self {
        Self {
            op: Arc::new(op),
            reindex: Reindex::default(),
            skip: false,
        }
    }

    /// Set the reindex policy for length-changing kernels.
    pub fn with_reindex(mut self, reindex: Reindex) -> Self {
        self.reindex = reindex;
        self
    }

    /// Mark the stage as skipped: input passes through unchanged.
    pub fn skipped(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Stage operation name.
    pub fn op_name(&self) -> &str {
        self.op.op_name()
    }
}

// ============================================================================
// Result Naming
// ============================================================================

/// Naming policy for sequence outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResultVars {
    /// Every stage overwrites the threaded input variable.
    #[default]
    Overwrite,

    /// Every stage writes the named variable; the original input variable is
    /// preserved and only the final value survives under the name.
    Final(String),

    /// Each stage's output is kept under its own name (`None` entries
    /// overwrite the threaded variable); must have one entry per stage.
    PerStage(Vec<Option<String>>),
}

// ============================================================================
// Sequence
// ============================================================================

/// An ordered, reusable sequence of stages.
pub struct Sequence<T> {
    stages: Vec<Stage<T>>,
    data_var: Option<String>,
    result_vars: ResultVars,
}

impl<T> std::fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("stages", &self.stages)
            .field("data_var", &self.data_var)
            .field("result_vars", &self.result_vars)
            .finish()
    }
}

impl<T: Float> Sequence<T> {
    /// Build a sequence, validating the result-naming policy against the
    /// stage count before anything runs.
    pub fn new(
        stages: Vec<Stage<T>>,
        data_var: Option<String>,
        result_vars: ResultVars,
    ) -> Result<Self, TrendError> {
        if let ResultVars::PerStage(names) = &result_vars {
            if names.len() != stages.len() {
                return Err(TrendError::SequenceLengthMismatch {
                    stages: stages.len(),
                    result_vars: names.len(),
                });
            }
        }
        Ok(Self {
            stages,
            data_var,
            result_vars,
        })
    }

    /// Number of stages (including skipped ones).
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True when the sequence holds no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the stages in order, threading each written variable name into
    /// the next stage.
    pub fn run(&self, data: &TableData<T>) -> Result<TableData<T>, TrendError> {
        let mut current = data.clone();
        let mut input_var = self.data_var.clone();
        for (i, stage) in self.stages.iter().enumerate() {
            if stage.skip {
                continue;
            }
            let result_data_var = match &self.result_vars {
                ResultVars::Overwrite => None,
                ResultVars::Final(name) => Some(name.clone()),
                ResultVars::PerStage(names) => names[i].clone(),
            };
            let opts = KernelOptions {
                data_var: input_var.clone(),
                result_data_var,
                reindex: stage.reindex,
                ..KernelOptions::default()
            };
            let (next, written) = stage.op.apply_named(&current, &opts)?;
            current = next;
            if written.is_some() {
                input_var = written;
            }
        }
        Ok(current)
    }
}
