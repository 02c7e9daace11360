//! Daily resampling and gap marking on labeled tables.
//!
//! ## Purpose
//!
//! This module turns an irregular observation table into a regular n-day
//! grid: duplicate same-day observations are averaged, the coordinate is
//! reindexed onto an evenly spaced date grid, and new slots are filled
//! according to a fill method (NaN by default, marking gaps for the
//! interpolation stage).
//!
//! ## Design notes
//!
//! * **Whole-table**: Resampling regrids the shared coordinate, so every
//!   variable is aggregated and reindexed together; attributes carry over.
//! * **Inclusive grid**: The grid spans `[start_date, end_date]` inclusive,
//!   defaulting to the observed min/max, stepping by `days`.
//! * **Determinism**: An already-daily, gap-free series with the default
//!   fill method is returned unchanged.
//!
//! ## Key concepts
//!
//! * **Fill method**: `NaN` (default), `Nearest`, `Pad` (forward-fill),
//!   `Backfill` — standard reindex fill semantics.
//!
//! ## Invariants
//!
//! * Input coordinate must be sorted (non-decreasing); duplicates are
//!   aggregated by the NaN-aware mean.
//! * Output coordinate is strictly increasing.
//!
//! ## Non-goals
//!
//! * This module does not interpolate values (`math::interpolate` fills the
//!   NaN slots it leaves behind).

// External dependencies
use chrono::{Duration, NaiveDate};
use num_traits::Float;

// Internal dependencies
use crate::math::boundary::nan_mean;
use crate::primitives::errors::TrendError;
use crate::primitives::table::Table;

// ============================================================================
// Configuration
// ============================================================================

/// Fill method for grid slots with no observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FillMethod {
    /// Leave empty slots as NaN (the interpolation stage fills them).
    #[default]
    NaN,

    /// Value of the nearest observed date (ties resolve to the earlier one).
    Nearest,

    /// Forward-fill from the last observed date.
    Pad,

    /// Backward-fill from the next observed date.
    Backfill,
}

/// Configuration for the daily-resampling stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResampleConfig {
    /// Grid spacing in days.
    pub days: usize,

    /// Grid start; defaults to the first observed date.
    pub start_date: Option<NaiveDate>,

    /// Grid end (inclusive); defaults to the last observed date.
    pub end_date: Option<NaiveDate>,

    /// Fill method for unobserved grid slots.
    pub method: FillMethod,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            days: 1,
            start_date: None,
            end_date: None,
            method: FillMethod::NaN,
        }
    }
}

impl ResampleConfig {
    /// Validate the grid spacing.
    pub fn validate(&self) -> Result<(), TrendError> {
        if self.days == 0 {
            return Err(TrendError::InvalidDays(self.days));
        }
        Ok(())
    }
}

// ============================================================================
// Resampling
// ============================================================================

/// Resample a table onto a regular `days`-spaced date grid.
pub fn daily_resample<T: Float>(
    table: &Table<T>,
    config: &ResampleConfig,
) -> Result<Table<T>, TrendError> {
    config.validate()?;
    table.validate_sorted()?;

    // 1. Aggregate duplicate same-day observations (NaN-aware mean per var).
    let (dates, groups) = group_days(table.coord());
    let aggregated: Vec<(String, Vec<T>)> = table
        .var_names()
        .iter()
        .map(|&name| {
            let values = table.var(name).unwrap_or(&[]);
            let means = groups
                .iter()
                .map(|(start, end)| nan_mean(&values[*start..*end]))
                .collect();
            (name.to_string(), means)
        })
        .collect();

    // 2. Build the inclusive grid.
    let start = config.start_date.unwrap_or(dates[0]);
    let end = config.end_date.unwrap_or(dates[dates.len() - 1]);
    let step = Duration::days(config.days as i64);
    let mut grid = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        grid.push(cursor);
        cursor = cursor + step;
    }
    if grid.is_empty() {
        return Err(TrendError::EmptyInput);
    }

    // 3. Reindex every variable onto the grid.
    let vars = aggregated
        .into_iter()
        .map(|(name, values)| {
            let filled = reindex(&dates, &values, &grid, config.method);
            (name, filled)
        })
        .collect();
    Table::rebuilt(grid, vars, table.attrs().to_vec())
}

// Group runs of equal dates; returns the distinct dates and the half-open
// index range of each run.
fn group_days(coord: &[NaiveDate]) -> (Vec<NaiveDate>, Vec<(usize, usize)>) {
    let mut dates = Vec::new();
    let mut groups = Vec::new();
    let mut start = 0usize;
    for i in 1..=coord.len() {
        if i == coord.len() || coord[i] != coord[start] {
            dates.push(coord[start]);
            groups.push((start, i));
            start = i;
        }
    }
    (dates, groups)
}

// Reindex `values` (aligned to the sorted, distinct `dates`) onto `grid`.
fn reindex<T: Float>(
    dates: &[NaiveDate],
    values: &[T],
    grid: &[NaiveDate],
    method: FillMethod,
) -> Vec<T> {
    grid.iter()
        .map(|&date| match dates.binary_search(&date) {
            Ok(i) => values[i],
            Err(insert) => match method {
                FillMethod::NaN => T::nan(),
                FillMethod::Pad => {
                    if insert == 0 {
                        T::nan()
                    } else {
                        values[insert - 1]
                    }
                }
                FillMethod::Backfill => {
                    if insert == dates.len() {
                        T::nan()
                    } else {
                        values[insert]
                    }
                }
                FillMethod::Nearest => nearest(dates, values, date, insert),
            },
        })
        .collect()
}

// Nearest-date fill; ties resolve to the earlier date.
fn nearest<T: Float>(dates: &[NaiveDate], values: &[T], date: NaiveDate, insert: usize) -> T {
    match (insert.checked_sub(1), dates.get(insert)) {
        (None, None) => T::nan(),
        (Some(lo), None) => values[lo],
        (None, Some(_)) => values[insert],
        (Some(lo), Some(&hi)) => {
            let before = date - dates[lo];
            let after = hi - date;
            if before <= after {
                values[lo]
            } else {
                values[insert]
            }
        }
    }
}
