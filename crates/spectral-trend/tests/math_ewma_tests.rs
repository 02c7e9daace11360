#![cfg(feature = "dev")]
//! Tests for the exponentially weighted moving average kernel.
//!
//! These tests verify:
//! - The defining recurrence `y[i] = alpha*x[i] + (1-alpha)*y[i-1]`
//! - Parameter validation (alpha/span exclusivity, span bounds)
//! - Seed-term behavior and its effect on output length
//!
//! ## Test Organization
//!
//! 1. **Recurrence** - unseeded EWMA reproduces the recurrence exactly
//! 2. **Parameters** - conflicting/missing/invalid parameterizations
//! 3. **Seeding** - sma/mean/value/prefix seeds and output lengths

use approx::assert_abs_diff_eq;

use spectral_trend::internals::math::ewma::{ewma, resolve_ewma_params, EwmaInit};
use spectral_trend::prelude::TrendError;

// ============================================================================
// Recurrence Tests
// ============================================================================

/// Unseeded EWMA satisfies the standard recurrence exactly.
#[test]
fn test_ewma_recurrence_unseeded() {
    let x = vec![0.3, 0.9, 0.1, 0.7, 0.5, 0.2, 0.8];
    let alpha = 0.25;
    let y = ewma(&x, Some(alpha), None, &EwmaInit::Off).unwrap();

    assert_eq!(y.len(), x.len());
    assert_abs_diff_eq!(y[0], x[0]);
    for i in 1..x.len() {
        assert_abs_diff_eq!(y[i], alpha * x[i] + (1.0 - alpha) * y[i - 1], epsilon = 1e-12);
    }
}

/// Span and alpha parameterizations agree when `alpha = 2 / (span + 1)`.
#[test]
fn test_ewma_span_alpha_equivalence() {
    let x: Vec<f64> = (0..20).map(|i| (i as f64 * 0.4).cos()).collect();
    let span = 5usize;
    let alpha = 2.0 / (span as f64 + 1.0);

    let by_span = ewma(&x, None, Some(span), &EwmaInit::Off).unwrap();
    let by_alpha = ewma(&x, Some(alpha), None, &EwmaInit::Off).unwrap();
    for (a, b) in by_span.iter().zip(by_alpha.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
}

// ============================================================================
// Parameter Tests
// ============================================================================

/// Supplying both span and alpha is a configuration error.
#[test]
fn test_ewma_both_params_rejected() {
    let err = resolve_ewma_params(Some(0.5), Some(5)).unwrap_err();
    assert_eq!(err, TrendError::EwmaSpanConflict);
    assert!(err.is_configuration());
}

/// Supplying neither span nor alpha is a configuration error.
#[test]
fn test_ewma_missing_params_rejected() {
    let err = resolve_ewma_params::<f64>(None, None).unwrap_err();
    assert_eq!(err, TrendError::EwmaSpanMissing);
}

/// Spans below 2 are rejected, including via alpha conversion.
#[test]
fn test_ewma_span_bounds() {
    assert_eq!(
        resolve_ewma_params::<f64>(None, Some(1)).unwrap_err(),
        TrendError::InvalidSpan(1)
    );
    // alpha = 0.9 resolves to span 1.
    assert_eq!(
        resolve_ewma_params(Some(0.9), None).unwrap_err(),
        TrendError::InvalidSpan(1)
    );
    // alpha out of (0, 1].
    assert!(matches!(
        resolve_ewma_params(Some(1.5), None).unwrap_err(),
        TrendError::InvalidAlpha(_)
    ));
    // alpha = 0.8 is the largest usable smoothing factor (span 2).
    assert_eq!(resolve_ewma_params(Some(0.8), None).unwrap(), (0.8, 2));
}

// ============================================================================
// Seeding Tests
// ============================================================================

/// A constant series with the sma seed stays constant, full length.
#[test]
fn test_ewma_sma_seed_constant_series() {
    let x = vec![10.0, 10.0, 10.0, 10.0];
    let y = ewma(&x, None, Some(3), &EwmaInit::Sma).unwrap();
    assert_eq!(y.len(), 4);
    for v in y {
        assert_abs_diff_eq!(v, 10.0, epsilon = 1e-12);
    }
}

/// The sma seed preserves the input length and passes the shrinking-window
/// averages through as the leading output values.
#[test]
fn test_ewma_sma_seed_prefix_passthrough() {
    let x = vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0];
    let y = ewma(&x, None, Some(3), &EwmaInit::Sma).unwrap();
    assert_eq!(y.len(), x.len());
    // Leading terms: mean(x[0..=0]), mean(x[0..=1]).
    assert_abs_diff_eq!(y[0], 2.0);
    assert_abs_diff_eq!(y[1], 3.0);
    // Term 2 is the seed: mean of the first 3 points.
    assert_abs_diff_eq!(y[2], 4.0);
    // Remaining terms follow the recurrence from the seed.
    let alpha = 2.0 / 4.0;
    assert_abs_diff_eq!(y[3], alpha * x[3] + (1.0 - alpha) * y[2], epsilon = 1e-12);
}

/// The mean seed shortens the output by `span - 1`.
#[test]
fn test_ewma_mean_seed_shortens() {
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let y = ewma(&x, None, Some(3), &EwmaInit::Mean).unwrap();
    assert_eq!(y.len(), x.len() - 2);
    assert_abs_diff_eq!(y[0], 2.0); // mean of the first 3 points
}

/// A literal seed value becomes term 0.
#[test]
fn test_ewma_value_seed() {
    let x = vec![1.0, 1.0, 1.0, 1.0, 1.0];
    let y = ewma(&x, None, Some(2), &EwmaInit::Value(7.0)).unwrap();
    assert_abs_diff_eq!(y[0], 7.0);
    let alpha = 2.0 / 3.0;
    assert_abs_diff_eq!(y[1], alpha * 1.0 + (1.0 - alpha) * 7.0, epsilon = 1e-12);
}

/// A precomputed prefix passes its leading values through unchanged.
#[test]
fn test_ewma_prefix_seed() {
    let x = vec![5.0, 5.0, 5.0, 5.0, 5.0];
    let y = ewma(&x, None, Some(2), &EwmaInit::Prefix(vec![0.1, 0.2, 5.0])).unwrap();
    assert_abs_diff_eq!(y[0], 0.1);
    assert_abs_diff_eq!(y[1], 0.2);
    assert_abs_diff_eq!(y[2], 5.0);
    assert_eq!(y.len(), 2 + 1 + (x.len() - 2));
}

/// Empty input is rejected.
#[test]
fn test_ewma_empty_input() {
    let err = ewma::<f64>(&[], None, Some(3), &EwmaInit::Sma).unwrap_err();
    assert_eq!(err, TrendError::EmptyInput);
}
