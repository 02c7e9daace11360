//! spectral-trend-batch Smoothing Examples
//!
//! This example demonstrates features specific to the batch layer:
//! - Parallel execution using `rayon`
//! - Sequential fallback
//! - Per-sample error isolation
//! - MACD and season statistics jobs
//! - Line-delimited JSON encoding

use std::time::Instant;

use spectral_trend_batch::prelude::*;

fn main() -> Result<(), BatchError> {
    env_logger::init();

    println!("{}", "=".repeat(80));
    println!("spectral-trend-batch Smoothing Examples");
    println!("{}", "=".repeat(80));
    println!();

    example_1_parallel_smoothing()?;
    example_2_error_isolation()?;
    example_3_stats_job()?;

    Ok(())
}

/// Synthetic NDVI-like record: a seasonal curve with dips and gaps.
fn synthetic_record(sample_id: &str, year: i32) -> Result<SampleRecord, BatchError> {
    let jan1 = chrono::NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let dates: Vec<String> = (0..200)
        .map(|i| {
            let date = jan1 + chrono::Duration::days(2 * i as i64);
            date.format("%Y-%m-%d").to_string()
        })
        .collect();
    let ndvi: Vec<f64> = (0..200)
        .map(|i| {
            let t = i as f64 / 200.0;
            let seasonal = 0.2 + 0.5 * (std::f64::consts::PI * t).sin();
            match i % 37 {
                0 => seasonal * 0.3, // cloud-contamination dip
                5 => f64::NAN,       // missing observation
                _ => seasonal,
            }
        })
        .collect();
    SampleRecord::new(sample_id, year)
        .with_date_strs(&dates)?
        .with_variable("ndvi", ndvi)
}

fn smoothing_job() -> Result<SmoothingJob, BatchError> {
    let pipeline = SavitzkyGolay::new()
        .window_length(60)
        .polyorder(3)
        .build::<f64>()?;
    Ok(SmoothingJob::new(pipeline).with_macd(Macd::new(vec![10, 20, 7])?))
}

/// Example 1: Parallel Smoothing
/// Smooths a batch of samples on the rayon thread pool.
fn example_1_parallel_smoothing() -> Result<(), BatchError> {
    println!("Example 1: Parallel Smoothing");
    println!("{}", "-".repeat(80));

    let records: Vec<SampleRecord> = (0..64)
        .map(|i| synthetic_record(&format!("s-{i:03}"), 2020))
        .collect::<Result<_, _>>()?;
    let job = smoothing_job()?;

    let start = Instant::now();
    let report = run_batch(records.clone(), MapStrategy::Threaded, &job);
    println!("threaded:   {} rows in {:?}", report.rows.len(), start.elapsed());

    let start = Instant::now();
    let report = run_batch(records, MapStrategy::Sequential, &job);
    println!("sequential: {} rows in {:?}", report.rows.len(), start.elapsed());
    println!();
    Ok(())
}

/// Example 2: Error Isolation
/// One malformed record never aborts the batch.
fn example_2_error_isolation() -> Result<(), BatchError> {
    println!("Example 2: Error Isolation");
    println!("{}", "-".repeat(80));

    let broken = SampleRecord::new("s-broken", 2020)
        .with_date_strs(&["2020-01-01", "2020-01-02", "2020-01-03"])?
        .with_variable("ndvi", vec![0.2, 0.3])?; // misaligned on purpose

    let records = vec![
        synthetic_record("s-000", 2020)?,
        broken,
        synthetic_record("s-001", 2020)?,
    ];
    let report = run_batch(records, MapStrategy::Threaded, &smoothing_job()?);
    print!("{report}");

    let mut sink = Vec::new();
    write_ldjson(&mut sink, &report.rows)?;
    println!("ldjson bytes: {}", sink.len());
    println!();
    Ok(())
}

/// Example 3: Season Statistics
/// Scalar rows for the full range, growing season, and off season.
fn example_3_stats_job() -> Result<(), BatchError> {
    println!("Example 3: Season Statistics");
    println!("{}", "-".repeat(80));

    let job = StatsJob::new(StatsConfig::default())
        .with_season(
            "growing_season",
            SeasonBounds {
                start: (4, 15),
                end: (10, 15),
            },
        )
        .with_season(
            "off_season",
            SeasonBounds {
                start: (11, 1),
                end: (3, 1),
            },
        );
    let report = run_batch(
        vec![synthetic_record("s-000", 2020)?],
        MapStrategy::Sequential,
        &job,
    );
    for row in &report.rows {
        let period = row.feature("period");
        println!("- {:?}: {} features", period, row.features.len());
    }
    println!();
    Ok(())
}
