#![cfg(feature = "dev")]
//! Tests for kernel lifting over the bare/series/table union.
//!
//! These tests verify:
//! - Bare arrays round-trip with no coordinate machinery engaged
//! - Series coordinates truncate correctly under each reindex policy
//! - Table dispatch: variable resolution, result naming, value semantics
//!
//! ## Test Organization
//!
//! 1. **Bare Arrays** - round-trip equality
//! 2. **Series** - reindex policies and naming
//! 3. **Tables** - resolution, naming, immutability, NaN alignment

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use spectral_trend::prelude::{
    lift, KernelOptions, Reindex, Series, Table, TableData, TrendError,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
}

fn coord(n: u32) -> Vec<NaiveDate> {
    (1..=n).map(date).collect()
}

/// A kernel adding 1 to every element.
fn plus_one(x: &[f64]) -> Result<Vec<f64>, TrendError> {
    Ok(x.iter().map(|v| v + 1.0).collect())
}

/// A kernel dropping the first two elements.
fn drop_two(x: &[f64]) -> Result<Vec<f64>, TrendError> {
    Ok(x[2..].to_vec())
}

// ============================================================================
// Bare Array Tests
// ============================================================================

/// `lift(f).apply(Bare(a)) == f(a)` exactly.
#[test]
fn test_bare_round_trip() {
    let x = vec![0.1, 0.2, 0.3];
    let kernel = lift("plus_one", plus_one);
    let out = kernel
        .apply(&TableData::Bare(x.clone()), &KernelOptions::default())
        .unwrap();
    assert_eq!(out, TableData::Bare(plus_one(&x).unwrap()));
}

/// Bare applications report no written variable.
#[test]
fn test_bare_no_written_var() {
    let kernel = lift("plus_one", plus_one);
    let (_, written) = kernel
        .apply_named(&TableData::Bare(vec![1.0]), &KernelOptions::default())
        .unwrap();
    assert_eq!(written, None);
}

// ============================================================================
// Series Tests
// ============================================================================

/// drop_init keeps the trailing coordinates of a shortened series.
#[test]
fn test_series_reindex_drop_init() {
    let series = Series::new("ndvi", coord(5), vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let kernel = lift("drop_two", drop_two);
    let opts = KernelOptions::default().reindex(Reindex::DropInit);
    let out = kernel.apply(&TableData::Series(series), &opts).unwrap();
    match out {
        TableData::Series(series) => {
            assert_eq!(series.coord, coord(5)[2..].to_vec());
            assert_eq!(series.values, vec![3.0, 4.0, 5.0]);
        }
        _ => panic!("expected a series"),
    }
}

/// drop_last keeps the leading coordinates of a shortened series.
#[test]
fn test_series_reindex_drop_last() {
    let series = Series::new("ndvi", coord(5), vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let kernel = lift("drop_two", drop_two);
    let opts = KernelOptions::default().reindex(Reindex::DropLast);
    let out = kernel.apply(&TableData::Series(series), &opts).unwrap();
    match out {
        TableData::Series(series) => assert_eq!(series.coord, coord(5)[..3].to_vec()),
        _ => panic!("expected a series"),
    }
}

/// A length change without a reindex policy is an error.
#[test]
fn test_series_length_mismatch_without_policy() {
    let series = Series::new("ndvi", coord(5), vec![1.0; 5]).unwrap();
    let kernel = lift("drop_two", drop_two);
    let err = kernel
        .apply(&TableData::Series(series), &KernelOptions::default())
        .unwrap_err();
    assert_eq!(err, TrendError::LengthMismatch { len_in: 5, len_out: 3 });
}

/// Series naming composes prefix and suffix around the input name.
#[test]
fn test_series_result_naming() {
    let series = Series::new("ndvi", coord(3), vec![1.0, 2.0, 3.0]).unwrap();
    let kernel = lift("plus_one", plus_one);
    let opts = KernelOptions::default().result_prefix("sg").result_suffix("v1");
    let (_, written) = kernel.apply_named(&TableData::Series(series), &opts).unwrap();
    assert_eq!(written.as_deref(), Some("sg_ndvi_v1"));
}

// ============================================================================
// Table Tests
// ============================================================================

fn two_var_table() -> Table<f64> {
    let mut table = Table::new(coord(4)).unwrap();
    table.insert_var("ndvi", vec![0.25, 0.5, 0.75, 1.0]).unwrap();
    table.insert_var("evi", vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    table.set_attr("sample_id", "s-1");
    table
}

/// Omitting data_var on a multi-variable table is a configuration error.
#[test]
fn test_table_ambiguous_variable() {
    let kernel = lift("plus_one", plus_one);
    let err = kernel
        .apply(&TableData::Table(two_var_table()), &KernelOptions::default())
        .unwrap_err();
    assert!(matches!(err, TrendError::AmbiguousVariable { .. }));
    assert!(err.is_configuration());
}

/// A sole variable resolves implicitly.
#[test]
fn test_table_sole_variable_resolves() {
    let mut table = Table::new(coord(3)).unwrap();
    table.insert_var("ndvi", vec![1.0, 2.0, 3.0]).unwrap();
    let kernel = lift("plus_one", plus_one);
    let (out, written) = kernel
        .apply_named(&TableData::Table(table), &KernelOptions::default())
        .unwrap();
    assert_eq!(written.as_deref(), Some("ndvi"));
    let table = out.into_table().unwrap();
    assert_eq!(table.var("ndvi").unwrap(), &[2.0, 3.0, 4.0]);
}

/// Other variables and attributes are untouched; the caller's table is a
/// value copy, never mutated.
#[test]
fn test_table_write_isolation() {
    let table = two_var_table();
    let input = TableData::Table(table.clone());
    let kernel = lift("plus_one", plus_one);
    let opts = KernelOptions::for_var("ndvi").result_data_var("ndvi_plus");
    let out = kernel.apply(&input, &opts).unwrap().into_table().unwrap();

    // New variable written; source and sibling unchanged.
    assert_eq!(out.var("ndvi_plus").unwrap(), &[1.25, 1.5, 1.75, 2.0]);
    assert_eq!(out.var("ndvi").unwrap(), table.var("ndvi").unwrap());
    assert_eq!(out.var("evi").unwrap(), table.var("evi").unwrap());
    assert_eq!(out.attrs(), table.attrs());

    // Caller's table is untouched.
    match &input {
        TableData::Table(original) => assert_eq!(original, &table),
        _ => unreachable!(),
    }
}

/// A shortened table result aligns to the coordinate and NaN-fills the rest;
/// the table coordinate is never truncated.
#[test]
fn test_table_shortened_result_nan_aligned() {
    let mut table = Table::new(coord(5)).unwrap();
    table.insert_var("ndvi", vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let kernel = lift("drop_two", drop_two);
    let opts = KernelOptions::for_var("ndvi")
        .result_data_var("short")
        .reindex(Reindex::DropInit);
    let out = kernel
        .apply(&TableData::Table(table), &opts)
        .unwrap()
        .into_table()
        .unwrap();
    assert_eq!(out.len(), 5);
    let short = out.var("short").unwrap();
    assert!(short[0].is_nan());
    assert!(short[1].is_nan());
    assert_abs_diff_eq!(short[2], 3.0);
    assert_abs_diff_eq!(short[4], 5.0);
}

/// Unknown data_var names the available variables in the error.
#[test]
fn test_table_unknown_variable() {
    let kernel = lift("plus_one", plus_one);
    let opts = KernelOptions::for_var("missing");
    let err = kernel
        .apply(&TableData::Table(two_var_table()), &opts)
        .unwrap_err();
    assert!(matches!(err, TrendError::UnknownVariable { .. }));
}
