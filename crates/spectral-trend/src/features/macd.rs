//! Moving average convergence/divergence features.
//!
//! ## Purpose
//!
//! This module computes MACD-style momentum features from a smoothed index
//! series: a fast and a slow EWMA, their difference (MACD), and optionally a
//! signal EWMA of the MACD and the divergence from it.
//!
//! ## Design notes
//!
//! * **Span triplet**: Two spans produce `ema_a`, `ema_b`, `macd`; a third
//!   adds `ema_c` and `macd_div = macd - ewma(macd, span_c)`.
//! * **Seeding**: EWMAs use the simple-moving-average seed by default, which
//!   preserves series length; a length-changing seed makes the elementwise
//!   differences ill-defined and errors.
//! * **Naming**: A list of result names keeps every intermediate series; a
//!   single name keeps only the last computed series; the default overwrites
//!   the input variable with the last computed series.
//!
//! ## Key concepts
//!
//! * **Decomposition invariant**: `macd == ewma(x, a) - ewma(x, b)` and
//!   `macd_div == macd - ewma(macd, c)` hold exactly.
//!
//! ## Invariants
//!
//! * Span-count and name-count mismatches are configuration errors raised at
//!   construction.
//!
//! ## Non-goals
//!
//! * This module does not smooth the input (see `pipelines::savitzky_golay`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::math::ewma::{ewma, EwmaInit};
use crate::primitives::errors::TrendError;
use crate::primitives::table::{Series, TableData};

// ============================================================================
// Constants
// ============================================================================

/// Default input variable: the Savitzky-Golay smoothed index.
pub const MACD_DATA_VAR: &str = "sg_ndvi";

/// Default result names for the five computed series.
pub const MACD_RESULT_DATA_VARS: [&str; 5] = ["ema_a", "ema_b", "macd", "ema_c", "macd_div"];

// ============================================================================
// Result Naming
// ============================================================================

/// Naming policy for MACD outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacdResultVars {
    /// Overwrite the input variable with the last computed series.
    Overwrite,

    /// Keep only the last computed series, under the given name.
    Final(String),

    /// Keep every computed series (3 names for two spans, 5 for three).
    All(Vec<String>),
}

impl Default for MacdResultVars {
    fn default() -> Self {
        Self::All(MACD_RESULT_DATA_VARS.iter().map(|s| s.to_string()).collect())
    }
}

// ============================================================================
// Processor
// ============================================================================

/// Validated MACD feature processor.
#[derive(Debug)]
pub struct Macd<T> {
    spans: Vec<usize>,
    data_var: Option<String>,
    result_vars: MacdResultVars,
    init: EwmaInit<T>,
}

impl<T: Float> Macd<T> {
    /// Create a processor for the given span list (2 or 3 spans).
    pub fn new(spans: Vec<usize>) -> Result<Self, TrendError> {
        Validator::validate_spans(&spans)?;
        Ok(Self {
            spans,
            data_var: Some(MACD_DATA_VAR.to_string()),
            result_vars: MacdResultVars::default(),
            init: EwmaInit::default(),
        })
    }

    /// Set the input variable (table inputs with multiple variables).
    pub fn data_var(mut self, name: impl Into<String>) -> Self {
        self.data_var = Some(name.into());
        self
    }

    /// Set the result naming policy, validating the name count.
    pub fn result_vars(mut self, result_vars: MacdResultVars) -> Result<Self, TrendError> {
        if let MacdResultVars::All(names) = &result_vars {
            Validator::validate_result_var_count(self.series_count(), names.len())?;
        }
        self.result_vars = result_vars;
        Ok(self)
    }

    /// Set the EWMA seed policy.
    pub fn init(mut self, init: EwmaInit<T>) -> Self {
        self.init = init;
        self
    }

    /// Number of series this processor produces.
    pub fn series_count(&self) -> usize {
        if self.spans.len() == 3 {
            5
        } else {
            3
        }
    }

    /// Compute MACD features, returning the same category of object as the
    /// input.
    pub fn process(&self, data: &TableData<T>) -> Result<TableData<T>, TrendError> {
        let values = data.values(self.data_var.as_deref())?.to_vec();
        let results = self.compute(&values)?;
        match data {
            TableData::Bare(_) => Ok(TableData::Bare(last_values(&results))),
            TableData::Series(series) => match &self.result_vars {
                MacdResultVars::Overwrite | MacdResultVars::Final(_) => {
                    let name = match &self.result_vars {
                        MacdResultVars::Final(name) => name.clone(),
                        _ => series.name.clone(),
                    };
                    let mut result = Series::new(name, series.coord.clone(), last_values(&results))?;
                    result.attrs = series.attrs.clone();
                    Ok(TableData::Series(result))
                }
                MacdResultVars::All(names) => {
                    // Promote to a table holding every intermediate; retain
                    // the source series when its name is not overwritten.
                    let mut table = series.clone().into_table();
                    for (name, (_, values)) in names.iter().zip(results) {
                        table.insert_var(name.clone(), values)?;
                    }
                    Ok(TableData::Table(table))
                }
            },
            TableData::Table(table) => {
                let mut result = table.clone();
                match &self.result_vars {
                    MacdResultVars::Overwrite => {
                        let name = self.resolved_var(data)?;
                        result.insert_var(name, last_values(&results))?;
                    }
                    MacdResultVars::Final(name) => {
                        result.insert_var(name.clone(), last_values(&results))?;
                    }
                    MacdResultVars::All(names) => {
                        for (name, (_, values)) in names.iter().zip(results) {
                            result.insert_var(name.clone(), values)?;
                        }
                    }
                }
                Ok(TableData::Table(result))
            }
        }
    }

    // Compute the (label, values) list: ema_a, ema_b, macd[, ema_c, macd_div].
    fn compute(&self, values: &[T]) -> Result<Vec<(&'static str, Vec<T>)>, TrendError> {
        let ema_a = ewma(values, None, Some(self.spans[0]), &self.init)?;
        let ema_b = ewma(values, None, Some(self.spans[1]), &self.init)?;
        let macd = difference(&ema_a, &ema_b)?;
        let mut results = vec![("ema_a", ema_a), ("ema_b", ema_b), ("macd", macd.clone())];
        if self.spans.len() == 3 {
            let ema_c = ewma(&macd, None, Some(self.spans[2]), &self.init)?;
            let macd_div = difference(&macd, &ema_c)?;
            results.push(("ema_c", ema_c));
            results.push(("macd_div", macd_div));
        }
        Ok(results)
    }

    // The input variable name a table run resolves to.
    fn resolved_var(&self, data: &TableData<T>) -> Result<String, TrendError> {
        match (data, &self.data_var) {
            (_, Some(name)) => Ok(name.clone()),
            (TableData::Table(table), None) if table.num_vars() == 1 => {
                Ok(table.var_names()[0].to_string())
            }
            (TableData::Table(table), None) => Err(TrendError::AmbiguousVariable {
                available: table.var_names().iter().map(|s| s.to_string()).collect(),
            }),
            _ => Ok(MACD_DATA_VAR.to_string()),
        }
    }
}

// The last computed series; `compute` always yields at least three.
fn last_values<T: Float>(results: &[(&'static str, Vec<T>)]) -> Vec<T> {
    results.last().map(|(_, values)| values.clone()).unwrap_or_default()
}

// Elementwise difference; a length mismatch means a length-changing EWMA
// seed was used and the features are ill-defined.
fn difference<T: Float>(a: &[T], b: &[T]) -> Result<Vec<T>, TrendError> {
    if a.len() != b.len() {
        return Err(TrendError::LengthMismatch {
            len_in: a.len(),
            len_out: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(&x, &y)| x - y).collect())
}
