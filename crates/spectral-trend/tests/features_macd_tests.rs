#![cfg(feature = "dev")]
//! Tests for MACD momentum features.
//!
//! These tests verify:
//! - The exact decomposition `macd == ema_a - ema_b` and
//!   `macd_div == macd - ewma(macd, span_c)`
//! - Span-count and name-count validation
//! - Naming behavior over bare, series, and table inputs

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use spectral_trend::internals::math::ewma::{ewma, EwmaInit};
use spectral_trend::prelude::{Macd, MacdResultVars, Series, Table, TableData, TrendError};

fn signal() -> Vec<f64> {
    (0..60).map(|i| (i as f64 * 0.2).sin() + 2.0).collect()
}

fn series() -> Series<f64> {
    let coord: Vec<NaiveDate> = (0..60)
        .map(|i| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(i))
        .collect();
    Series::new("sg_ndvi", coord, signal()).unwrap()
}

// ============================================================================
// Decomposition Tests
// ============================================================================

/// With three spans, every exposed series satisfies the MACD decomposition
/// exactly.
#[test]
fn test_macd_decomposition() {
    let x = signal();
    let spans = [6usize, 12, 5];
    let macd = Macd::new(spans.to_vec()).unwrap();
    let out = macd
        .process(&TableData::Series(series()))
        .unwrap()
        .into_table()
        .unwrap();

    let init = EwmaInit::Sma;
    let ema_a = ewma(&x, None, Some(spans[0]), &init).unwrap();
    let ema_b = ewma(&x, None, Some(spans[1]), &init).unwrap();
    let expected_macd: Vec<f64> = ema_a.iter().zip(ema_b.iter()).map(|(a, b)| a - b).collect();
    let ema_c = ewma(&expected_macd, None, Some(spans[2]), &init).unwrap();

    let got_macd = out.var("macd").unwrap();
    let got_div = out.var("macd_div").unwrap();
    for i in 0..x.len() {
        assert_abs_diff_eq!(got_macd[i], expected_macd[i], epsilon = 1e-12);
        assert_abs_diff_eq!(got_div[i], expected_macd[i] - ema_c[i], epsilon = 1e-12);
    }
}

/// With two spans, only the first three series are computed.
#[test]
fn test_macd_two_spans() {
    let macd = Macd::new(vec![6, 12])
        .unwrap()
        .result_vars(MacdResultVars::All(vec![
            "fast".to_string(),
            "slow".to_string(),
            "macd".to_string(),
        ]))
        .unwrap();
    let out = macd
        .process(&TableData::Series(series()))
        .unwrap()
        .into_table()
        .unwrap();
    assert!(out.var("macd").is_some());
    assert!(out.var("fast").is_some());
    assert_eq!(out.num_vars(), 4); // source + 3 outputs
}

// ============================================================================
// Naming Tests
// ============================================================================

/// Bare input returns the last computed series as a bare array.
#[test]
fn test_macd_bare_returns_last() {
    let x = signal();
    let macd = Macd::new(vec![6, 12, 5]).unwrap();
    let out = macd.process(&TableData::Bare(x.clone())).unwrap();
    match out {
        TableData::Bare(values) => assert_eq!(values.len(), x.len()),
        _ => panic!("expected a bare array"),
    }
}

/// List naming on a series promotes it to a table retaining the source.
#[test]
fn test_macd_series_promoted_to_table() {
    let macd = Macd::new(vec![6, 12, 5]).unwrap();
    let out = macd
        .process(&TableData::Series(series()))
        .unwrap()
        .into_table()
        .unwrap();
    assert!(out.var("sg_ndvi").is_some());
    for name in ["ema_a", "ema_b", "macd", "ema_c", "macd_div"] {
        assert!(out.var(name).is_some(), "missing {name}");
    }
}

/// A single name keeps only the final series.
#[test]
fn test_macd_single_name() {
    let mut table = Table::new(series().coord).unwrap();
    table.insert_var("sg_ndvi", signal()).unwrap();
    let macd = Macd::new(vec![6, 12, 5])
        .unwrap()
        .result_vars(MacdResultVars::Final("momentum".to_string()))
        .unwrap();
    let out = macd
        .process(&TableData::Table(table))
        .unwrap()
        .into_table()
        .unwrap();
    assert_eq!(out.num_vars(), 2); // sg_ndvi + momentum
    assert!(out.var("momentum").is_some());
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Span lists must have exactly 2 or 3 entries, each at least 2.
#[test]
fn test_macd_span_validation() {
    assert_eq!(
        Macd::<f64>::new(vec![6]).unwrap_err(),
        TrendError::InvalidSpanCount(1)
    );
    assert_eq!(
        Macd::<f64>::new(vec![6, 12, 5, 3]).unwrap_err(),
        TrendError::InvalidSpanCount(4)
    );
    assert_eq!(
        Macd::<f64>::new(vec![6, 1]).unwrap_err(),
        TrendError::InvalidSpan(1)
    );
}

/// The name count must match the number of computed series.
#[test]
fn test_macd_name_count_validation() {
    let err = Macd::<f64>::new(vec![6, 12, 5])
        .unwrap()
        .result_vars(MacdResultVars::All(vec!["a".to_string(), "b".to_string()]))
        .unwrap_err();
    assert_eq!(
        err,
        TrendError::InvalidResultVarCount {
            expected: 5,
            got: 2
        }
    );
}
