#![cfg(feature = "dev")]
//! Tests for period-windowed descriptive statistics.
//!
//! These tests verify:
//! - `{var}_{statistic}` naming and value correctness
//! - NaN-aware computation
//! - Empty-period detection (never silent NaN rows)
//! - Strict promotion of degenerate moment statistics
//! - Season-bound anchoring across the year boundary

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use spectral_trend::prelude::{
    period_stats, SeasonBounds, StatsConfig, Table, TrendError,
};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, month, day).unwrap()
}

fn table(values: Vec<f64>) -> Table<f64> {
    let coord = (1..=values.len() as u32).map(|d| date(1, d)).collect();
    let mut table = Table::new(coord).unwrap();
    table.insert_var("ndvi", values).unwrap();
    table
}

// ============================================================================
// Naming and Value Tests
// ============================================================================

/// Features are named `{var}_{statistic}` in a stable order.
#[test]
fn test_feature_names() {
    let features = period_stats(
        &table(vec![1.0, 2.0, 3.0]),
        None,
        &StatsConfig::default(),
    )
    .unwrap();
    let names: Vec<&str> = features.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ndvi_mean",
            "ndvi_median",
            "ndvi_min",
            "ndvi_max",
            "ndvi_skew",
            "ndvi_kurtosis"
        ]
    );
}

/// Mean, median, min, and max over known data.
#[test]
fn test_basic_statistics() {
    let features = period_stats(
        &table(vec![2.0, 4.0, 6.0, 8.0]),
        None,
        &StatsConfig::default(),
    )
    .unwrap();
    let get = |name: &str| {
        features
            .iter()
            .find(|(n, _)| n == &format!("ndvi_{name}"))
            .map(|(_, v)| *v)
            .unwrap()
    };
    assert_abs_diff_eq!(get("mean"), 5.0);
    assert_abs_diff_eq!(get("median"), 5.0);
    assert_abs_diff_eq!(get("min"), 2.0);
    assert_abs_diff_eq!(get("max"), 8.0);
    // Symmetric data has zero skewness.
    assert_abs_diff_eq!(get("skew"), 0.0, epsilon = 1e-12);
}

/// NaN entries are ignored, not propagated.
#[test]
fn test_nan_aware() {
    let with_nan = period_stats(
        &table(vec![2.0, f64::NAN, 4.0, 6.0, f64::NAN, 8.0]),
        None,
        &StatsConfig::default(),
    )
    .unwrap();
    let without = period_stats(
        &table(vec![2.0, 4.0, 6.0, 8.0]),
        None,
        &StatsConfig::default(),
    )
    .unwrap();
    for ((_, a), (_, b)) in with_nan.iter().zip(without.iter()) {
        if a.is_nan() {
            assert!(b.is_nan());
        } else {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }
}

// ============================================================================
// Period Tests
// ============================================================================

/// Period slicing is inclusive on both bounds.
#[test]
fn test_period_slice_inclusive() {
    let bounds = SeasonBounds {
        start: (1, 2),
        end: (1, 4),
    };
    // Anchor so the whole period lands in 2020: year 2021 start -> 2020-01-02.
    let period = bounds.period("window", 2021).unwrap();
    assert_eq!(period.start, date(1, 2));

    let table = table(vec![1.0, 10.0, 20.0, 30.0, 100.0]);
    let period = spectral_trend::prelude::Period {
        label: "window".to_string(),
        start: date(1, 2),
        end: date(1, 4),
    };
    let features = period_stats(&table, Some(&period), &StatsConfig::default()).unwrap();
    let mean = features
        .iter()
        .find(|(n, _)| n == "ndvi_mean")
        .map(|(_, v)| *v)
        .unwrap();
    assert_abs_diff_eq!(mean, 20.0);
}

/// Season bounds straddle the year boundary: start anchors to `year - 1`.
#[test]
fn test_season_bounds_anchoring() {
    let bounds = SeasonBounds {
        start: (11, 1),
        end: (3, 1),
    };
    let period = bounds.period("off_season", 2020).unwrap();
    assert_eq!(period.start, NaiveDate::from_ymd_opt(2019, 11, 1).unwrap());
    assert_eq!(period.end, NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
    assert_eq!(period.label, "off_season");
}

// ============================================================================
// Degenerate Input Tests
// ============================================================================

/// An all-NaN period is an `EmptyPeriod` error, not a NaN-filled row.
#[test]
fn test_empty_period_detected() {
    let err = period_stats(
        &table(vec![f64::NAN, f64::NAN, f64::NAN]),
        None,
        &StatsConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TrendError::EmptyPeriod { .. }));
    assert!(!err.is_configuration());
}

/// A period with no rows at all is also empty.
#[test]
fn test_out_of_range_period_empty() {
    let period = spectral_trend::prelude::Period {
        label: "march".to_string(),
        start: date(3, 1),
        end: date(3, 31),
    };
    let err = period_stats(
        &table(vec![1.0, 2.0, 3.0]),
        Some(&period),
        &StatsConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        TrendError::EmptyPeriod {
            period: "march".to_string()
        }
    );
}

/// Strict mode promotes degenerate moments to errors; default yields NaN.
#[test]
fn test_strict_degenerate_moments() {
    // Zero variance: skew/kurtosis undefined.
    let constant = table(vec![3.0, 3.0, 3.0, 3.0]);

    let relaxed = period_stats(&constant, None, &StatsConfig::default()).unwrap();
    let skew = relaxed
        .iter()
        .find(|(n, _)| n == "ndvi_skew")
        .map(|(_, v)| *v)
        .unwrap();
    assert!(skew.is_nan());

    let err = period_stats(
        &constant,
        None,
        &StatsConfig {
            strict: true,
            ..StatsConfig::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, TrendError::DegenerateStatistic { .. }));
}

/// Variable selection restricts and orders the output.
#[test]
fn test_data_var_selection() {
    let mut t = table(vec![1.0, 2.0, 3.0]);
    t.insert_var("evi", vec![4.0, 5.0, 6.0]).unwrap();
    let features = period_stats(
        &t,
        None,
        &StatsConfig {
            data_vars: Some(vec!["evi".to_string()]),
            ..StatsConfig::default()
        },
    )
    .unwrap();
    assert!(features.iter().all(|(n, _)| n.starts_with("evi_")));
}
