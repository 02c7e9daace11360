//! Lifting bare-array kernels over labeled series and tables.
//!
//! ## Purpose
//!
//! This module is the generic-array adapter at the heart of the crate: a
//! numeric kernel written for plain slices is lifted into a [`TableKernel`]
//! that transparently operates on bare arrays, single named series, and
//! multi-variable labeled tables, re-attaching the coordinate correctly even
//! when the kernel changes the array length.
//!
//! ## Design notes
//!
//! * **Explicit composition**: `lift(name, kernel)` is an ordinary
//!   higher-order constructor invoked at pipeline-construction sites; there
//!   is no decorator magic and no type testing inside kernels.
//! * **Single dispatch point**: All category handling is one `match` over
//!   the [`TableData`] union.
//! * **Value semantics**: Table writes go through a copy; the caller's table
//!   is never mutated.
//! * **Reindexing**: A kernel that shortens its input truncates a series
//!   coordinate per the [`Reindex`] policy. A table's coordinate is never
//!   truncated; the shortened result is aligned to it and NaN-filled outside
//!   its span, leaving all other variables untouched.
//!
//! ## Key concepts
//!
//! * **Result naming**: By default the selected variable is overwritten;
//!   `result_data_var` names the output explicitly, or `result_prefix` /
//!   `result_suffix` compose a name around the input variable.
//!
//! ## Invariants
//!
//! * `lift(f).apply(Bare(a)) == f(a)` exactly — no coordinate machinery is
//!   engaged for bare arrays.
//! * Length changes without a reindex policy are `LengthMismatch` errors.
//!
//! ## Non-goals
//!
//! * This module does not order kernels into pipelines (see
//!   `engine::sequencer`).

// External dependencies
use chrono::NaiveDate;
use num_traits::Float;
use std::sync::Arc;

// Internal dependencies
use crate::primitives::errors::TrendError;
use crate::primitives::table::{Series, Table, TableData};

// ============================================================================
// Reindex Policy
// ============================================================================

/// How to re-align a coordinate axis when a kernel shortens its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Reindex {
    /// Raise `LengthMismatch` when lengths differ.
    #[default]
    Error,

    /// Drop initial coordinate values; output aligns to the trailing dates.
    DropInit,

    /// Drop trailing coordinate values; output aligns to the leading dates.
    DropLast,
}

// ============================================================================
// Kernel Options
// ============================================================================

/// Reserved configuration for a lifted kernel application.
#[derive(Debug, Clone, Default)]
pub struct KernelOptions {
    /// Which variable to read from a table; required if the table has more
    /// than one variable.
    pub data_var: Option<String>,

    /// Explicit name for the written-back variable; default overwrites
    /// `data_var`.
    pub result_data_var: Option<String>,

    /// Compose the result name as `{prefix}_{data_var}` (ignored when
    /// `result_data_var` is set).
    pub result_prefix: Option<String>,

    /// Compose the result name as `{data_var}_{suffix}` (ignored when
    /// `result_data_var` is set).
    pub result_suffix: Option<String>,

    /// Coordinate policy for length-changing kernels.
    pub reindex: Reindex,
}

impl KernelOptions {
    /// Options reading (and overwriting) the given variable.
    pub fn for_var(data_var: impl Into<String>) -> Self {
        Self {
            data_var: Some(data_var.into()),
            ..Self::default()
        }
    }

    /// Set the explicit result variable name.
    pub fn result_data_var(mut self, name: impl Into<String>) -> Self {
        self.result_data_var = Some(name.into());
        self
    }

    /// Set the result-name prefix.
    pub fn result_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.result_prefix = Some(prefix.into());
        self
    }

    /// Set the result-name suffix.
    pub fn result_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.result_suffix = Some(suffix.into());
        self
    }

    /// Set the reindex policy.
    pub fn reindex(mut self, reindex: Reindex) -> Self {
        self.reindex = reindex;
        self
    }

    /// Resolve the result name for a given input variable name.
    pub(crate) fn resolve_result(&self, data_var: &str) -> String {
        if let Some(name) = &self.result_data_var {
            return name.clone();
        }
        let mut name = data_var.to_string();
        if let Some(prefix) = &self.result_prefix {
            name = format!("{prefix}_{name}");
        }
        if let Some(suffix) = &self.result_suffix {
            name = format!("{name}_{suffix}");
        }
        name
    }
}

// ============================================================================
// Lifted Kernel
// ============================================================================

/// A bare-array kernel lifted over the [`TableData`] union.
#[derive(Clone)]
pub struct TableKernel<T> {
    name: &'static str,
    kernel: Arc<dyn Fn(&[T]) -> Result<Vec<T>, TrendError> + Send + Sync>,
}

impl<T> std::fmt::Debug for TableKernel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableKernel").field("name", &self.name).finish()
    }
}

/// Lift a bare-array kernel into a [`TableKernel`].
pub fn lift<T, F>(name: &'static str, kernel: F) -> TableKernel<T>
where
    T: Float,
    F: Fn(&[T]) -> Result<Vec<T>, TrendError> + Send + Sync + 'static,
{
    TableKernel {
        name,
        kernel: Arc::new(kernel),
    }
}

impl<T: Float> TableKernel<T> {
    /// Kernel name, used for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply the kernel, returning the same category of object.
    pub fn apply(&self, data: &TableData<T>, opts: &KernelOptions) -> Result<TableData<T>, TrendError> {
        self.apply_named(data, opts).map(|(data, _)| data)
    }

    /// Apply the kernel, additionally returning the written variable name
    /// (`None` for bare arrays).
    pub fn apply_named(
        &self,
        data: &TableData<T>,
        opts: &KernelOptions,
    ) -> Result<(TableData<T>, Option<String>), TrendError> {
        match data {
            TableData::Bare(values) => {
                let out = (self.kernel)(values)?;
                Ok((TableData::Bare(out), None))
            }
            TableData::Series(series) => {
                let out = (self.kernel)(&series.values)?;
                let coord = reindex_coord(&series.coord, out.len(), opts.reindex)?;
                let name = opts.resolve_result(&series.name);
                let result = Series {
                    name: name.clone(),
                    coord,
                    values: out,
                    attrs: series.attrs.clone(),
                };
                Ok((TableData::Series(result), Some(name)))
            }
            TableData::Table(table) => {
                let (data_var, result_var) = resolve_vars(table, opts)?;
                let out = (self.kernel)(table.require_var(&data_var)?)?;
                let aligned = align_to_coord(out, table.len(), opts.reindex)?;
                let mut result = table.clone();
                result.insert_var(result_var.clone(), aligned)?;
                Ok((TableData::Table(result), Some(result_var)))
            }
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve the (input, result) variable names for a table application.
pub(crate) fn resolve_vars<T: Float>(
    table: &Table<T>,
    opts: &KernelOptions,
) -> Result<(String, String), TrendError> {
    let data_var = match &opts.data_var {
        Some(name) => {
            table.require_var(name)?;
            name.clone()
        }
        None => {
            if table.num_vars() == 1 {
                table.var_names()[0].to_string()
            } else {
                return Err(TrendError::AmbiguousVariable {
                    available: table.var_names().iter().map(|s| s.to_string()).collect(),
                });
            }
        }
    };
    let result_var = opts.resolve_result(&data_var);
    Ok((data_var, result_var))
}

// Truncate a series coordinate to match a shortened kernel output.
fn reindex_coord(
    coord: &[NaiveDate],
    len_out: usize,
    reindex: Reindex,
) -> Result<Vec<NaiveDate>, TrendError> {
    let len_in = coord.len();
    if len_out == len_in {
        return Ok(coord.to_vec());
    }
    if len_out > len_in {
        return Err(TrendError::LengthMismatch { len_in, len_out });
    }
    match reindex {
        Reindex::DropInit => Ok(coord[len_in - len_out..].to_vec()),
        Reindex::DropLast => Ok(coord[..len_out].to_vec()),
        Reindex::Error => Err(TrendError::LengthMismatch { len_in, len_out }),
    }
}

// Align a (possibly shortened) kernel output to a table coordinate of length
// `len_coord`, NaN-filling outside the aligned span.
fn align_to_coord<T: Float>(
    out: Vec<T>,
    len_coord: usize,
    reindex: Reindex,
) -> Result<Vec<T>, TrendError> {
    let len_out = out.len();
    if len_out == len_coord {
        return Ok(out);
    }
    if len_out > len_coord {
        return Err(TrendError::LengthMismatch {
            len_in: len_coord,
            len_out,
        });
    }
    let pad = len_coord - len_out;
    match reindex {
        Reindex::DropInit => {
            let mut aligned = vec![T::nan(); pad];
            aligned.extend(out);
            Ok(aligned)
        }
        Reindex::DropLast => {
            let mut aligned = out;
            aligned.extend(vec![T::nan(); pad]);
            Ok(aligned)
        }
        Reindex::Error => Err(TrendError::LengthMismatch {
            len_in: len_coord,
            len_out,
        }),
    }
}
