//! Batch jobs, per-sample error isolation, and the batch report.
//!
//! ## Purpose
//!
//! This module runs a job over every sample record and partitions the
//! outcome: feature rows for the samples that succeeded, structured
//! [`SampleError`] records for the ones that did not. One corrupt time
//! series never aborts the batch.
//!
//! ## Design notes
//!
//! * **Error boundary**: Jobs propagate errors freely; `run_batch` is the
//!   single place failures are converted to per-sample records.
//! * **Empty periods**: The stats job treats an all-NaN period as a
//!   data-quality warning — the period's row is skipped and logged, the
//!   sample is not failed.
//! * **Grouped report**: The report counts errors per distinct message so a
//!   run ends with a results set plus a compact failure summary.
//!
//! ## Key concepts
//!
//! * **Jobs**: [`SmoothingJob`] (pipeline + optional MACD, one array row
//!   per sample) and [`StatsJob`] (full/season scalar rows per sample).
//!
//! ## Non-goals
//!
//! * This module does not write rows anywhere (see `features` for the sink
//!   encoding).

// External dependencies
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

// Core dependencies
use spectral_trend::prelude::{
    period_stats, Macd, Period, SeasonBounds, SmoothingPipeline, StatsConfig, Table, TableData,
    TrendError,
};

// Internal dependencies
use crate::errors::{BatchError, SampleError};
use crate::features::{FeatureRow, FeatureValue};
use crate::mapper::{map_records, MapStrategy};
use crate::record::SampleRecord;

// ============================================================================
// Jobs
// ============================================================================

/// A per-sample unit of processing, mapped across the batch.
pub trait SampleJob: Send + Sync {
    /// Process one record into zero or more feature rows.
    fn process(&self, record: &SampleRecord) -> Result<Vec<FeatureRow>, BatchError>;
}

/// Smoothing job: run the Savitzky-Golay pipeline (and optionally MACD) on
/// each record, emitting one array-valued row per sample.
pub struct SmoothingJob {
    pipeline: SmoothingPipeline<f64>,
    macd: Option<Macd<f64>>,
    clip_to_year: bool,
}

impl SmoothingJob {
    /// Create a job around a built pipeline.
    pub fn new(pipeline: SmoothingPipeline<f64>) -> Self {
        Self {
            pipeline,
            macd: None,
            clip_to_year: false,
        }
    }

    /// Also derive MACD features from the smoothed series.
    pub fn with_macd(mut self, macd: Macd<f64>) -> Self {
        self.macd = Some(macd);
        self
    }

    /// Clip the output row to the record's calendar year. Queries typically
    /// pull a buffer around the year so the filter has edge context; the
    /// buffer is dropped from the emitted row.
    pub fn clip_to_year(mut self, clip: bool) -> Self {
        self.clip_to_year = clip;
        self
    }
}

impl SampleJob for SmoothingJob {
    fn process(&self, record: &SampleRecord) -> Result<Vec<FeatureRow>, BatchError> {
        let table = record.to_table()?;
        let mut out = self.pipeline.process_table(&table)?;
        if let Some(macd) = &self.macd {
            out = macd.process(&TableData::Table(out))?.into_table()?;
        }
        if self.clip_to_year {
            let (start, end) = year_bounds(record.year)?;
            out = out.slice_dates(start, end);
            if out.is_empty() {
                return Err(TrendError::EmptyPeriod {
                    period: record.year.to_string(),
                }
                .into());
            }
        }
        Ok(vec![FeatureRow::from_table(
            record.sample_id.clone(),
            record.year,
            &out,
        )])
    }
}

/// Stats job: slice each record's series into full/growing/off-season
/// periods and emit one scalar row per period.
pub struct StatsJob {
    config: StatsConfig,
    seasons: Vec<(String, SeasonBounds)>,
    include_full: bool,
}

impl StatsJob {
    /// Create a job with the given statistics configuration.
    pub fn new(config: StatsConfig) -> Self {
        Self {
            config,
            seasons: Vec::new(),
            include_full: true,
        }
    }

    /// Add a labeled season window (anchored per record year).
    pub fn with_season(mut self, label: impl Into<String>, bounds: SeasonBounds) -> Self {
        self.seasons.push((label.into(), bounds));
        self
    }

    /// Emit (or skip) the full-range row.
    pub fn include_full(mut self, include: bool) -> Self {
        self.include_full = include;
        self
    }

    fn period_row(
        &self,
        record: &SampleRecord,
        table: &Table<f64>,
        period: Option<&Period>,
        label: &str,
    ) -> Result<Option<FeatureRow>, BatchError> {
        match period_stats(table, period, &self.config) {
            Ok(features) => {
                let mut row = FeatureRow::new(record.sample_id.clone(), record.year);
                row.push("period", FeatureValue::Text(label.to_string()));
                for (name, value) in features {
                    row.push(name, FeatureValue::Num(value));
                }
                Ok(Some(row))
            }
            // All-NaN period: a data-quality warning, not a sample failure.
            Err(TrendError::EmptyPeriod { period }) => {
                log::warn!(
                    "sample '{}' year {}: empty period '{}', row skipped",
                    record.sample_id,
                    record.year,
                    period
                );
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }
}

impl SampleJob for StatsJob {
    fn process(&self, record: &SampleRecord) -> Result<Vec<FeatureRow>, BatchError> {
        record.require_unique_dates()?;
        let table = record.to_table()?;
        let mut rows = Vec::new();
        if self.include_full {
            if let Some(row) = self.period_row(record, &table, None, "full")? {
                rows.push(row);
            }
        }
        for (label, bounds) in &self.seasons {
            let period = bounds.period(label.clone(), record.year)?;
            if let Some(row) = self.period_row(record, &table, Some(&period), label)? {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

// ============================================================================
// Batch Execution
// ============================================================================

/// Outcome of a batch run: rows for successful samples, structured errors
/// for the rest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    /// Feature rows from successful samples.
    pub rows: Vec<FeatureRow>,

    /// Per-sample error records.
    pub errors: Vec<SampleError>,
}

impl BatchReport {
    /// True when every sample succeeded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error counts grouped per distinct message, most frequent first.
    pub fn error_summary(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for error in &self.errors {
            match counts.iter_mut().find(|(message, _)| *message == error.message) {
                Some((_, count)) => *count += 1,
                None => counts.push((error.message.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "rows: {}", self.rows.len())?;
        writeln!(f, "errors: {}", self.errors.len())?;
        for (message, count) in self.error_summary() {
            writeln!(f, "  [{count}] {message}")?;
        }
        Ok(())
    }
}

/// Run a job over every record, isolating failures per sample.
///
/// Each record is owned by exactly one task; results come back in input
/// order regardless of strategy.
pub fn run_batch<J: SampleJob>(
    records: Vec<SampleRecord>,
    strategy: MapStrategy,
    job: &J,
) -> BatchReport {
    let total = records.len();
    let outcomes = map_records(records, strategy, |record| {
        job.process(&record).map_err(|error| SampleError {
            sample_id: record.sample_id.clone(),
            year: record.year,
            message: error.to_string(),
        })
    });

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(rows) => report.rows.extend(rows),
            Err(error) => report.errors.push(error),
        }
    }
    log::info!(
        "batch complete: {} samples, {} rows, {} errors",
        total,
        report.rows.len(),
        report.errors.len()
    );
    report
}

// Inclusive calendar-year bounds.
fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), BatchError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(BatchError::InvalidInput(format!("invalid year {year}"))),
    }
}
