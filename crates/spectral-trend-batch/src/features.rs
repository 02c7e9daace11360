//! Feature rows and line-delimited JSON encoding.
//!
//! ## Purpose
//!
//! This module defines the flat output contract of the batch layer: one
//! [`FeatureRow`] per sample per granularity, a flat mapping of `sample_id`,
//! `year`, and one value per feature name, encoded one-object-per-line for
//! an append-only JSON sink.
//!
//! ## Design notes
//!
//! * **Flat serialization**: Rows serialize as a single flat JSON object —
//!   identity fields first, then features in insertion order.
//! * **NaN**: Non-finite values encode as `null`, the conventional LDJSON
//!   representation.
//! * **Sink-agnostic**: Encoding targets any `io::Write`; the physical
//!   file/cloud sink is an external collaborator.
//!
//! ## Non-goals
//!
//! * This module does not upload or persist anything itself.

// External dependencies
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::io::Write;

// Core dependencies
use spectral_trend::prelude::{AttrValue, Table};

// Internal dependencies
use crate::errors::BatchError;

// ============================================================================
// Feature Values
// ============================================================================

/// One value of a feature row: scalar, label, or aligned array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Scalar numeric feature.
    Num(f64),

    /// Integer label (e.g. `year`).
    Int(i64),

    /// Text label (e.g. a period name).
    Text(String),

    /// Numeric array feature (a full series).
    Nums(Vec<f64>),

    /// Text array feature (the ISO date coordinate).
    Texts(Vec<String>),
}

impl From<&AttrValue> for FeatureValue {
    fn from(value: &AttrValue) -> Self {
        match value {
            AttrValue::Text(text) => Self::Text(text.clone()),
            AttrValue::Int(int) => Self::Int(*int),
            AttrValue::Num(num) => Self::Num(*num),
        }
    }
}

// ============================================================================
// Feature Rows
// ============================================================================

/// One flat output row per sample per granularity.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Sample the row belongs to.
    pub sample_id: String,

    /// Harvest year of the row.
    pub year: i32,

    /// Feature name → value, in emission order.
    pub features: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    /// Create an empty row for a sample/year pair.
    pub fn new(sample_id: impl Into<String>, year: i32) -> Self {
        Self {
            sample_id: sample_id.into(),
            year,
            features: Vec::new(),
        }
    }

    /// Append a feature value.
    pub fn push(&mut self, name: impl Into<String>, value: FeatureValue) {
        self.features.push((name.into(), value));
    }

    /// Look up a feature by name.
    pub fn feature(&self, name: &str) -> Option<&FeatureValue> {
        self.features
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Flatten a processed table into a row: the date coordinate as ISO
    /// strings, every variable as an array, and non-identity attributes as
    /// labels.
    pub fn from_table(sample_id: impl Into<String>, year: i32, table: &Table<f64>) -> Self {
        let mut row = Self::new(sample_id, year);
        row.push(
            "date",
            FeatureValue::Texts(
                table
                    .coord()
                    .iter()
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .collect(),
            ),
        );
        for name in table.var_names() {
            if let Some(values) = table.var(name) {
                row.push(name, FeatureValue::Nums(values.to_vec()));
            }
        }
        for (key, value) in table.attrs() {
            if key != "sample_id" && key != "year" {
                row.push(key.clone(), FeatureValue::from(value));
            }
        }
        row
    }
}

impl Serialize for FeatureRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.features.len() + 2))?;
        map.serialize_entry("sample_id", &self.sample_id)?;
        map.serialize_entry("year", &self.year)?;
        for (name, value) in &self.features {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Line-Delimited JSON Encoding
// ============================================================================

/// Append one row to a line-delimited JSON sink.
pub fn append_ldjson<W: Write>(writer: &mut W, row: &FeatureRow) -> Result<(), BatchError> {
    serde_json::to_writer(&mut *writer, row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Append a batch of rows to a line-delimited JSON sink.
pub fn write_ldjson<W: Write>(writer: &mut W, rows: &[FeatureRow]) -> Result<(), BatchError> {
    for row in rows {
        append_ldjson(writer, row)?;
    }
    Ok(())
}
