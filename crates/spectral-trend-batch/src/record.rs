//! Sample records and record-to-table adaptation.
//!
//! ## Purpose
//!
//! This module defines [`SampleRecord`] — one (sample_id, year) unit of
//! work with its date coordinate, band/index variables, and scalar labels —
//! and the conversion into the core's labeled [`Table`] representation.
//!
//! ## Design notes
//!
//! * **Descriptive rejection**: Misaligned lengths and unparseable dates are
//!   rejected with errors naming the sample.
//! * **Date normalization**: ISO 8601 date and datetime strings are accepted
//!   and floored to day resolution.
//! * **Sorting**: Conversion sorts by date with one stable permutation
//!   applied to every variable; duplicate dates are allowed (the resampling
//!   stage aggregates them) and callers that cannot aggregate reject them
//!   via [`SampleRecord::require_unique_dates`].
//! * **Ownership**: Each record is owned by exactly one processing task; the
//!   conversion builds a fresh table, so concurrent tasks never alias.
//!
//! ## Non-goals
//!
//! * This module does not run pipelines or derive features (see `runner`).

// External dependencies
use chrono::NaiveDate;

// Core dependencies
use spectral_trend::prelude::{AttrValue, Table};

// Internal dependencies
use crate::errors::BatchError;
use crate::input::SeriesInput;

// ============================================================================
// Sample Record
// ============================================================================

/// One sample's time series and labels: the unit of parallel work.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    /// Opaque sample key.
    pub sample_id: String,

    /// Harvest year this record covers.
    pub year: i32,

    dates: Vec<NaiveDate>,
    variables: Vec<(String, Vec<f64>)>,
    attrs: Vec<(String, AttrValue)>,
}

impl SampleRecord {
    /// Create an empty record for a sample/year pair.
    pub fn new(sample_id: impl Into<String>, year: i32) -> Self {
        Self {
            sample_id: sample_id.into(),
            year,
            dates: Vec::new(),
            variables: Vec::new(),
            attrs: Vec::new(),
        }
    }

    /// Attach the date coordinate.
    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.dates = dates;
        self
    }

    /// Attach the date coordinate from ISO 8601 strings (date or datetime),
    /// normalized to day resolution.
    pub fn with_date_strs<S: AsRef<str>>(mut self, dates: &[S]) -> Result<Self, BatchError> {
        let mut parsed = Vec::with_capacity(dates.len());
        for value in dates {
            parsed.push(parse_iso_date(value.as_ref()).ok_or_else(|| {
                BatchError::InvalidDate {
                    sample_id: self.sample_id.clone(),
                    value: value.as_ref().to_string(),
                }
            })?);
        }
        self.dates = parsed;
        Ok(self)
    }

    /// Attach a band/index variable from any supported container.
    pub fn with_variable(
        mut self,
        name: impl Into<String>,
        values: impl SeriesInput,
    ) -> Result<Self, BatchError> {
        let values = values.as_series_slice()?.to_vec();
        self.variables.push((name.into(), values));
        Ok(self)
    }

    /// Attach a scalar label carried through to output rows.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Names of the attached variables.
    pub fn var_names(&self) -> Vec<&str> {
        self.variables.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Validate the record shape: a non-empty coordinate and aligned
    /// variables, with errors naming the sample.
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.dates.is_empty() {
            return Err(BatchError::InvalidRecord {
                sample_id: self.sample_id.clone(),
                message: "record has no dates".to_string(),
            });
        }
        if self.variables.is_empty() {
            return Err(BatchError::InvalidRecord {
                sample_id: self.sample_id.clone(),
                message: "record has no variables".to_string(),
            });
        }
        for (name, values) in &self.variables {
            if values.len() != self.dates.len() {
                return Err(BatchError::InvalidRecord {
                    sample_id: self.sample_id.clone(),
                    message: format!(
                        "variable '{name}' has {} values but {} dates",
                        values.len(),
                        self.dates.len()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Reject duplicate dates, for consumers with no aggregation step.
    pub fn require_unique_dates(&self) -> Result<(), BatchError> {
        let mut sorted = self.dates.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(BatchError::InvalidRecord {
                sample_id: self.sample_id.clone(),
                message: "duplicate dates without aggregation".to_string(),
            });
        }
        Ok(())
    }

    /// Convert into the core labeled-table representation: validated,
    /// sorted by date, with `sample_id`/`year` and extra labels as
    /// attributes.
    pub fn to_table(&self) -> Result<Table<f64>, BatchError> {
        self.validate()?;

        // One stable permutation, applied to the coordinate and every var.
        let mut order: Vec<usize> = (0..self.dates.len()).collect();
        order.sort_by_key(|&i| self.dates[i]);

        let coord: Vec<NaiveDate> = order.iter().map(|&i| self.dates[i]).collect();
        let mut table = Table::new(coord).map_err(|e| BatchError::InvalidRecord {
            sample_id: self.sample_id.clone(),
            message: e.to_string(),
        })?;
        for (name, values) in &self.variables {
            let sorted: Vec<f64> = order.iter().map(|&i| values[i]).collect();
            table
                .insert_var(name.clone(), sorted)
                .map_err(BatchError::from)?;
        }
        table.set_attr("sample_id", self.sample_id.as_str());
        table.set_attr("year", self.year as i64);
        for (key, value) in &self.attrs {
            table.set_attr(key.clone(), value.clone());
        }
        Ok(table)
    }
}

// ============================================================================
// Date Parsing
// ============================================================================

// ISO 8601 date or datetime, floored to day resolution.
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = chrono::NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    None
}
