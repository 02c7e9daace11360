#![cfg(feature = "dev")]
//! End-to-end tests for the gap-filling / Savitzky-Golay pipeline.
//!
//! These tests verify the full dip scenario: a contamination artifact is
//! marked NaN, refilled by interpolation, and the final smoothed series is
//! same-length and NaN-free — plus builder validation, skip markers, and
//! series inputs.

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use spectral_trend::prelude::{
    DropConfig, ResultVars, SavitzkyGolay, Series, Table, TableData, TrendError,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
}

fn dip_table() -> Table<f64> {
    let mut table = Table::new((1..=10).map(date).collect()).unwrap();
    table
        .insert_var(
            "ndvi",
            vec![0.10, 0.15, 0.02, 0.20, 0.22, 0.25, f64::NAN, 0.30, 0.32, 0.35],
        )
        .unwrap();
    table.set_attr("sample_id", "s-17");
    table
}

fn dip_pipeline() -> SavitzkyGolay {
    SavitzkyGolay::new()
        .window_length(5)
        .polyorder(2)
        .drops(DropConfig {
            drop_threshold: 0.5,
            smoothing_radius: 2,
            ..DropConfig::default()
        })
}

// ============================================================================
// Scenario Tests
// ============================================================================

/// The dip at index 2 becomes NaN, is refilled between its neighbors, and
/// the smoothed output is same-length and NaN-free.
#[test]
fn test_dip_scenario_end_to_end() {
    let pipeline = dip_pipeline().build::<f64>().unwrap();
    let out = pipeline.process_table(&dip_table()).unwrap();

    // Cleaned series: dip replaced by a value between its neighbors.
    let preprocessed = out.require_var("preprocessed_ndvi").unwrap();
    assert_eq!(preprocessed.len(), 10);
    assert!(preprocessed.iter().all(|v| !v.is_nan()));
    assert!(preprocessed[2] > 0.15 && preprocessed[2] < 0.20);
    // The observation gap at index 6 is also filled.
    assert!(preprocessed[6] > 0.25 && preprocessed[6] < 0.30);

    // Smoothed series: same length, no NaN.
    let sg = out.require_var("sg_ndvi").unwrap();
    assert_eq!(sg.len(), 10);
    assert!(sg.iter().all(|v| !v.is_nan()));

    // Intermediate stages overwrote the input variable (dip marked NaN).
    assert!(out.require_var("ndvi").unwrap()[2].is_nan());

    // Attributes survive the whole pipeline.
    assert_eq!(out.attr("sample_id").map(|a| a.clone()), dip_table().attr("sample_id").cloned());
}

/// Series inputs run the same pipeline, ending under the final stage name.
#[test]
fn test_series_input() {
    let table = dip_table();
    let series = table.to_series("ndvi").unwrap();
    let pipeline = dip_pipeline().build::<f64>().unwrap();
    let out = pipeline.process(&TableData::Series(series)).unwrap();
    match out {
        TableData::Series(series) => {
            assert_eq!(series.name, "sg_ndvi");
            assert_eq!(series.values.len(), 10);
            assert!(series.values.iter().all(|v| !v.is_nan()));
        }
        _ => panic!("expected a series"),
    }
}

// ============================================================================
// Skip Tests
// ============================================================================

/// Skipping drop removal leaves the dip in the cleaned series.
#[test]
fn test_skip_drops_keeps_dip() {
    let pipeline = dip_pipeline().skip_drops(true).build::<f64>().unwrap();
    let out = pipeline.process_table(&dip_table()).unwrap();
    let preprocessed = out.require_var("preprocessed_ndvi").unwrap();
    assert_abs_diff_eq!(preprocessed[2], 0.02, epsilon = 1e-12);
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Builder validation catches bad filter parameters before any data flows.
#[test]
fn test_builder_validation() {
    let err = SavitzkyGolay::new()
        .window_length(3)
        .polyorder(3)
        .build::<f64>()
        .unwrap_err();
    assert!(matches!(err, TrendError::InvalidPolyorder { .. }));
}

/// A per-stage name list must match the four stages.
#[test]
fn test_result_vars_count_checked() {
    let err = SavitzkyGolay::new()
        .result_vars(ResultVars::PerStage(vec![None, None]))
        .build::<f64>()
        .unwrap_err();
    assert!(matches!(err, TrendError::SequenceLengthMismatch { .. }));
}

/// Windows wider than the series surface as per-sample data errors at run
/// time, not at build time.
#[test]
fn test_window_exceeds_data_at_run_time() {
    let pipeline = SavitzkyGolay::new()
        .window_length(60)
        .polyorder(3)
        .drops(DropConfig {
            smoothing_radius: 2,
            ..DropConfig::default()
        })
        .build::<f64>()
        .unwrap();
    let err = pipeline.process_table(&dip_table()).unwrap_err();
    assert!(matches!(err, TrendError::WindowExceedsData { .. }));
    assert!(!err.is_configuration());
}

/// A pipeline is reusable across samples (stateless).
#[test]
fn test_pipeline_reusable() {
    let pipeline = dip_pipeline().build::<f64>().unwrap();
    let a = pipeline.process_table(&dip_table()).unwrap();
    let b = pipeline.process_table(&dip_table()).unwrap();
    assert_eq!(
        a.require_var("sg_ndvi").unwrap(),
        b.require_var("sg_ndvi").unwrap()
    );
}

/// Bare arrays cannot be daily-resampled.
#[test]
fn test_bare_input_requires_coordinate() {
    let pipeline = dip_pipeline().build::<f64>().unwrap();
    let err = pipeline.process(&TableData::Bare(vec![0.1; 10])).unwrap_err();
    assert_eq!(err, TrendError::RequiresCoordinate("daily_resample"));
}

/// A clean, daily, linear series survives the whole pipeline unchanged.
#[test]
fn test_series_round_trip_identity_when_clean() {
    // Resampling is an identity here, no dips qualify, nothing to
    // interpolate, and the quadratic filter reproduces linear data.
    let coord: Vec<NaiveDate> = (1..=10).map(date).collect();
    let values: Vec<f64> = (0..10).map(|i| 0.1 + 0.02 * i as f64).collect();
    let series = Series::new("ndvi", coord, values.clone()).unwrap();
    let pipeline = dip_pipeline().build::<f64>().unwrap();
    let out = pipeline.process(&TableData::Series(series)).unwrap();
    match out {
        TableData::Series(series) => {
            // Linear data is reproduced by the quadratic filter.
            for (u, v) in values.iter().zip(series.values.iter()) {
                assert_abs_diff_eq!(*u, *v, epsilon = 1e-9);
            }
        }
        _ => panic!("expected a series"),
    }
}
