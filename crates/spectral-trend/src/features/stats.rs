//! Period-windowed descriptive statistics.
//!
//! ## Purpose
//!
//! This module computes per-variable descriptive statistics (mean, median,
//! min, max, skew, kurtosis) over coordinate sub-ranges of a labeled table —
//! full year, growing season, off season — naming each output
//! `{var}_{statistic}`.
//!
//! ## Design notes
//!
//! * **NaN-aware**: Statistics are computed over the finite values of each
//!   slice; NaN entries are ignored, not propagated.
//! * **Empty detection**: A period whose slice is all-NaN for every
//!   requested variable is surfaced as an `EmptyPeriod` data error, never as
//!   a silent NaN-filled row.
//! * **Degenerate moments**: Skew and kurtosis on degenerate input (no
//!   finite points, or zero variance) yield NaN, or a `DegenerateStatistic`
//!   error in strict mode — so "no data" is distinguishable from "computed
//!   zero".
//! * **Moment estimators**: Biased (population) skewness `m3 / m2^1.5` and
//!   excess kurtosis `m4 / m2^2 - 3`.
//!
//! ## Key concepts
//!
//! * **Season bounds**: Month-day pairs anchored to a harvest year; the
//!   period runs from `{year-1}-{start}` through `{year}-{end}` inclusive.
//!
//! ## Invariants
//!
//! * Output order is variables in table order, statistics in declaration
//!   order.
//!
//! ## Non-goals
//!
//! * This module does not decide the caller-level policy for empty periods
//!   (skip vs warn — the batch layer's call).

// External dependencies
use chrono::NaiveDate;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::TrendError;
use crate::primitives::table::Table;

// ============================================================================
// Statistics
// ============================================================================

/// A descriptive statistic computed along the coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Statistic {
    /// Arithmetic mean of the finite values.
    Mean,
    /// Median of the finite values.
    Median,
    /// Minimum of the finite values.
    Min,
    /// Maximum of the finite values.
    Max,
    /// Biased sample skewness.
    Skew,
    /// Excess kurtosis.
    Kurtosis,
}

impl Statistic {
    /// All statistics, in emission order.
    pub fn all() -> [Self; 6] {
        [
            Self::Mean,
            Self::Median,
            Self::Min,
            Self::Max,
            Self::Skew,
            Self::Kurtosis,
        ]
    }

    /// Statistic name used in `{var}_{statistic}` feature names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
            Self::Skew => "skew",
            Self::Kurtosis => "kurtosis",
        }
    }

    /// True for moment statistics undefined on degenerate input.
    pub fn is_moment(&self) -> bool {
        matches!(self, Self::Skew | Self::Kurtosis)
    }

    /// Compute the statistic over pre-filtered finite values.
    ///
    /// Returns NaN when the statistic is undefined on the input.
    pub fn compute<T: Float>(&self, finite: &[T]) -> T {
        if finite.is_empty() {
            return T::nan();
        }
        match self {
            Self::Mean => mean(finite),
            Self::Median => median(finite),
            Self::Min => finite.iter().fold(T::infinity(), |acc, &v| acc.min(v)),
            Self::Max => finite.iter().fold(T::neg_infinity(), |acc, &v| acc.max(v)),
            Self::Skew => {
                let (m2, m3, _) = central_moments(finite);
                if m2 <= T::zero() {
                    T::nan()
                } else {
                    m3 / m2.powf(T::from(1.5).unwrap())
                }
            }
            Self::Kurtosis => {
                let (m2, _, m4) = central_moments(finite);
                if m2 <= T::zero() {
                    T::nan()
                } else {
                    m4 / (m2 * m2) - T::from(3.0).unwrap()
                }
            }
        }
    }
}

// ============================================================================
// Periods
// ============================================================================

/// A labeled inclusive date range to slice statistics over.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    /// Period label (e.g. `growing_season`).
    pub label: String,

    /// First date of the period (inclusive).
    pub start: NaiveDate,

    /// Last date of the period (inclusive).
    pub end: NaiveDate,
}

/// Season boundary month-days, anchored to a harvest year.
///
/// The resulting period runs from `{year - 1}-{start}` through
/// `{year}-{end}`, matching how growing and off seasons straddle the
/// calendar-year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonBounds {
    /// Start (month, day), anchored to the preceding year.
    pub start: (u32, u32),

    /// End (month, day), anchored to the harvest year.
    pub end: (u32, u32),
}

impl SeasonBounds {
    /// Build the labeled period for a harvest year.
    pub fn period(&self, label: impl Into<String>, year: i32) -> Result<Period, TrendError> {
        let (start_month, start_day) = self.start;
        let (end_month, end_day) = self.end;
        let start = NaiveDate::from_ymd_opt(year - 1, start_month, start_day);
        let end = NaiveDate::from_ymd_opt(year, end_month, end_day);
        match (start, end) {
            (Some(start), Some(end)) => Ok(Period {
                label: label.into(),
                start,
                end,
            }),
            _ => Err(TrendError::InvalidKernel(format!(
                "invalid season bounds {:?}..{:?} for year {year}",
                self.start, self.end
            ))),
        }
    }
}

// ============================================================================
// Period Statistics
// ============================================================================

/// Configuration for period statistics.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatsConfig {
    /// Variables to compute statistics for; default all table variables.
    pub data_vars: Option<Vec<String>>,

    /// Promote degenerate moment statistics to errors instead of NaN.
    pub strict: bool,
}

/// Compute `{var}_{statistic}` features over a period slice of `table`.
///
/// With `period = None` the full table range is used. Detects the all-NaN
/// case across every requested variable and returns `EmptyPeriod` so the
/// caller can skip or warn — never a silent NaN-filled row.
pub fn period_stats<T: Float>(
    table: &Table<T>,
    period: Option<&Period>,
    config: &StatsConfig,
) -> Result<Vec<(String, T)>, TrendError> {
    let sliced;
    let (view, label) = match period {
        Some(period) => {
            sliced = table.slice_dates(period.start, period.end);
            (&sliced, period.label.as_str())
        }
        None => (table, "full"),
    };

    let names: Vec<String> = match &config.data_vars {
        Some(names) => names.clone(),
        None => view.var_names().iter().map(|s| s.to_string()).collect(),
    };

    let mut features = Vec::with_capacity(names.len() * Statistic::all().len());
    let mut any_finite = false;
    for name in &names {
        let values = view.require_var(name)?;
        let finite: Vec<T> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if !finite.is_empty() {
            any_finite = true;
        }
        for statistic in Statistic::all() {
            let value = statistic.compute(&finite);
            if config.strict && statistic.is_moment() && value.is_nan() {
                return Err(TrendError::DegenerateStatistic {
                    var: name.clone(),
                    statistic: statistic.name(),
                });
            }
            features.push((format!("{name}_{}", statistic.name()), value));
        }
    }
    if !any_finite {
        return Err(TrendError::EmptyPeriod {
            period: label.to_string(),
        });
    }
    Ok(features)
}

// ============================================================================
// Moment Helpers
// ============================================================================

// Arithmetic mean; caller guarantees a non-empty slice.
fn mean<T: Float>(values: &[T]) -> T {
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    sum / T::from(values.len()).unwrap()
}

// Median by sorting a copy; caller guarantees a non-empty slice.
fn median<T: Float>(values: &[T]) -> T {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / T::from(2.0).unwrap()
    }
}

// Central moments (m2, m3, m4) of the values.
fn central_moments<T: Float>(values: &[T]) -> (T, T, T) {
    let mu = mean(values);
    let n = T::from(values.len()).unwrap();
    let mut m2 = T::zero();
    let mut m3 = T::zero();
    let mut m4 = T::zero();
    for &v in values {
        let d = v - mu;
        let d2 = d * d;
        m2 = m2 + d2;
        m3 = m3 + d2 * d;
        m4 = m4 + d2 * d2;
    }
    (m2 / n, m3 / n, m4 / n)
}
