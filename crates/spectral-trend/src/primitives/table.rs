//! Labeled time-series containers: bare arrays, named series, and tables.
//!
//! ## Purpose
//!
//! This module defines the data model that numeric kernels are lifted over: a
//! day-resolution coordinate axis carrying one (`Series`) or many (`Table`)
//! equal-length numeric variables plus scalar attributes, and the closed
//! tagged union `TableData` that the kernel adapter dispatches on.
//!
//! ## Design notes
//!
//! * **Closed union**: Exactly three input categories — `Bare`, `Series`,
//!   `Table` — handled by a single `match` in the adapter, never by scattered
//!   type tests inside kernels.
//! * **Value semantics**: Tables are cheap-enough-to-clone value types; every
//!   adapter write goes through a copy so callers never observe mutation.
//! * **Insertion order**: Variables and attributes keep insertion order so
//!   emitted rows are stable.
//!
//! ## Key concepts
//!
//! * **Coordinate**: An ordered sequence of `NaiveDate` values shared by all
//!   variables of a table.
//! * **Attributes**: Scalar metadata not varying along the coordinate
//!   (`sample_id`, `year`, ...).
//!
//! ## Invariants
//!
//! * Every variable's length equals the coordinate length (enforced on
//!   construction and insertion).
//! * Coordinate sortedness is the caller's responsibility; time-indexed
//!   operations validate it explicitly.
//!
//! ## Non-goals
//!
//! * This module does not run kernels or resolve variable selection (adapter).
//! * This module does not parse dates or rows (batch layer).

// External dependencies
use chrono::NaiveDate;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::TrendError;

// ============================================================================
// Attributes
// ============================================================================

/// Scalar attribute value attached to a series or table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    /// Text attribute (e.g. `sample_id`).
    Text(String),
    /// Integer attribute (e.g. `year`).
    Int(i64),
    /// Numeric attribute.
    Num(f64),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

// ============================================================================
// Series
// ============================================================================

/// A single named variable aligned to a date coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T> {
    /// Variable name.
    pub name: String,

    /// Coordinate values, one per data point.
    pub coord: Vec<NaiveDate>,

    /// Data values aligned to `coord`.
    pub values: Vec<T>,

    /// Scalar attributes (insertion-ordered).
    pub attrs: Vec<(String, AttrValue)>,
}

impl<T: Float> Series<T> {
    /// Create a series, validating coordinate/value alignment.
    pub fn new(
        name: impl Into<String>,
        coord: Vec<NaiveDate>,
        values: Vec<T>,
    ) -> Result<Self, TrendError> {
        let name = name.into();
        if coord.is_empty() {
            return Err(TrendError::EmptyInput);
        }
        if values.len() != coord.len() {
            return Err(TrendError::MisalignedVariable {
                name,
                expected: coord.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            name,
            coord,
            values,
            attrs: Vec::new(),
        })
    }

    /// Number of data points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series holds no data points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Promote to a single-variable table, carrying attributes over.
    pub fn into_table(self) -> Table<T> {
        Table {
            coord: self.coord,
            vars: vec![(self.name, self.values)],
            attrs: self.attrs,
        }
    }
}

// ============================================================================
// Table
// ============================================================================

/// A date coordinate carrying one or more equal-length numeric variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    /// Coordinate values, one per row.
    coord: Vec<NaiveDate>,

    /// Variables as (name, values) pairs, insertion-ordered.
    vars: Vec<(String, Vec<T>)>,

    /// Scalar attributes (insertion-ordered).
    attrs: Vec<(String, AttrValue)>,
}

impl<T: Float> Table<T> {
    /// Create an empty table over the given coordinate.
    pub fn new(coord: Vec<NaiveDate>) -> Result<Self, TrendError> {
        if coord.is_empty() {
            return Err(TrendError::EmptyInput);
        }
        Ok(Self {
            coord,
            vars: Vec::new(),
            attrs: Vec::new(),
        })
    }

    /// Number of rows (coordinate length).
    pub fn len(&self) -> usize {
        self.coord.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.coord.is_empty()
    }

    /// The coordinate axis.
    pub fn coord(&self) -> &[NaiveDate] {
        &self.coord
    }

    /// Names of the variables, in insertion order.
    pub fn var_names(&self) -> Vec<&str> {
        self.vars.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Values of a variable, if present.
    pub fn var(&self, name: &str) -> Option<&[T]> {
        self.vars
            .iter()
            .find(|(var, _)| var == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Values of a variable, or an `UnknownVariable` error.
    pub fn require_var(&self, name: &str) -> Result<&[T], TrendError> {
        self.var(name).ok_or_else(|| TrendError::UnknownVariable {
            name: name.to_string(),
            available: self.var_names().iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Insert or overwrite a variable, validating its length.
    pub fn insert_var(
        &mut self,
        name: impl Into<String>,
        values: Vec<T>,
    ) -> Result<(), TrendError> {
        let name = name.into();
        if values.len() != self.coord.len() {
            return Err(TrendError::MisalignedVariable {
                name,
                expected: self.coord.len(),
                got: values.len(),
            });
        }
        match self.vars.iter_mut().find(|(var, _)| *var == name) {
            Some((_, slot)) => *slot = values,
            None => self.vars.push((name, values)),
        }
        Ok(())
    }

    /// Remove a variable, returning its values if it existed.
    pub fn remove_var(&mut self, name: &str) -> Option<Vec<T>> {
        let idx = self.vars.iter().position(|(var, _)| var == name)?;
        Some(self.vars.remove(idx).1)
    }

    /// Rename a variable in place.
    pub fn rename_var(&mut self, from: &str, to: impl Into<String>) -> Result<(), TrendError> {
        match self.vars.iter_mut().find(|(var, _)| var == from) {
            Some((name, _)) => {
                *name = to.into();
                Ok(())
            }
            None => Err(TrendError::UnknownVariable {
                name: from.to_string(),
                available: self.var_names().iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    /// Scalar attributes, in insertion order.
    pub fn attrs(&self) -> &[(String, AttrValue)] {
        &self.attrs
    }

    /// Look up an attribute by key.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Insert or overwrite an attribute.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Replace the attribute set wholesale.
    pub fn set_attrs(&mut self, attrs: Vec<(String, AttrValue)>) {
        self.attrs = attrs;
    }

    /// Validate that the coordinate is sorted in non-decreasing order.
    pub fn validate_sorted(&self) -> Result<(), TrendError> {
        for (index, pair) in self.coord.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(TrendError::UnsortedCoordinate { index: index + 1 });
            }
        }
        Ok(())
    }

    /// Extract the rows whose coordinate falls in `[start, end]` (inclusive).
    ///
    /// Attributes are carried over. The slice may be empty; callers decide
    /// whether an empty slice is an error.
    pub fn slice_dates(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let keep: Vec<usize> = self
            .coord
            .iter()
            .enumerate()
            .filter(|(_, date)| **date >= start && **date <= end)
            .map(|(i, _)| i)
            .collect();
        Self {
            coord: keep.iter().map(|&i| self.coord[i]).collect(),
            vars: self
                .vars
                .iter()
                .map(|(name, values)| {
                    (name.clone(), keep.iter().map(|&i| values[i]).collect())
                })
                .collect(),
            attrs: self.attrs.clone(),
        }
    }

    /// Extract a single variable as a `Series`, carrying attributes over.
    pub fn to_series(&self, name: &str) -> Result<Series<T>, TrendError> {
        let values = self.require_var(name)?.to_vec();
        Ok(Series {
            name: name.to_string(),
            coord: self.coord.clone(),
            values,
            attrs: self.attrs.clone(),
        })
    }

    /// Rebuild the table on a new coordinate with entirely new variables.
    ///
    /// Used by coordinate-changing operations (resampling); validates each
    /// variable against the new coordinate.
    pub fn rebuilt(
        coord: Vec<NaiveDate>,
        vars: Vec<(String, Vec<T>)>,
        attrs: Vec<(String, AttrValue)>,
    ) -> Result<Self, TrendError> {
        let mut table = Self::new(coord)?;
        for (name, values) in vars {
            table.insert_var(name, values)?;
        }
        table.attrs = attrs;
        Ok(table)
    }
}

// ============================================================================
// Tagged Union
// ============================================================================

/// The three input categories kernels can be lifted over.
///
/// Kernels are written against the `Bare` case only; all category handling
/// lives in the adapter (`engine::lift`).
#[derive(Debug, Clone, PartialEq)]
pub enum TableData<T> {
    /// A bare numeric array: no coordinate, no name, no attributes.
    Bare(Vec<T>),

    /// A single named series with a coordinate.
    Series(Series<T>),

    /// A multi-variable labeled table.
    Table(Table<T>),
}

impl<T: Float> TableData<T> {
    /// The table form, if this is a table.
    pub fn as_table(&self) -> Option<&Table<T>> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Consume into the table form, promoting a series if needed.
    pub fn into_table(self) -> Result<Table<T>, TrendError> {
        match self {
            Self::Bare(_) => Err(TrendError::RequiresCoordinate("into_table")),
            Self::Series(series) => Ok(series.into_table()),
            Self::Table(table) => Ok(table),
        }
    }

    /// Raw values of the selected (or sole) variable.
    pub fn values(&self, data_var: Option<&str>) -> Result<&[T], TrendError> {
        match self {
            Self::Bare(values) => Ok(values),
            Self::Series(series) => Ok(&series.values),
            Self::Table(table) => match data_var {
                Some(name) => table.require_var(name),
                None => {
                    if table.num_vars() == 1 {
                        Ok(&table.vars[0].1)
                    } else {
                        Err(TrendError::AmbiguousVariable {
                            available: table
                                .var_names()
                                .iter()
                                .map(|s| s.to_string())
                                .collect(),
                        })
                    }
                }
            },
        }
    }
}

impl<T: Float> From<Vec<T>> for TableData<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Bare(values)
    }
}

impl<T: Float> From<Series<T>> for TableData<T> {
    fn from(series: Series<T>) -> Self {
        Self::Series(series)
    }
}

impl<T: Float> From<Table<T>> for TableData<T> {
    fn from(table: Table<T>) -> Self {
        Self::Table(table)
    }
}
