//! Exponentially weighted moving average.
//!
//! ## Purpose
//!
//! This module implements the EWMA kernel underpinning the MACD momentum
//! features: the standard recurrence `y[i] = alpha * x[i] + (1 - alpha) *
//! y[i-1]`, with a configurable seed term.
//!
//! ## Design notes
//!
//! * **Parameterization**: Exactly one of `alpha` in (0, 0.8] or `span` > 1;
//!   `alpha = 2 / (span + 1)`. Supplying both or neither is a configuration
//!   error, as is an effective span below 2.
//! * **Seeding**: The seed controls the 0-th term. A simple-moving-average
//!   seed preserves the output length; a scalar seed shortens the output by
//!   `span - 1` (resolved by reindexing at the table layer).
//! * **Recurrence**: Computed directly. The closed-form geometric cumulative
//!   sum is algebraically equivalent but overflows `(1 - alpha)^(-i)` for
//!   long series.
//!
//! ## Key concepts
//!
//! * **Seed prefix**: The seed produces a prefix whose last element becomes
//!   term 0; preceding elements are passed through to the output unchanged.
//!
//! ## Invariants
//!
//! * With seeding disabled, `y[0] == x[0]` and the recurrence holds exactly
//!   for every subsequent term; output length equals input length.
//!
//! ## Non-goals
//!
//! * This module does not handle NaN gaps (interpolate first).
//! * This module does not attach coordinates (see `engine::lift`).

// External dependencies
use num_traits::Float;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

// Internal dependencies
use crate::math::convolve::simple_moving_average;
use crate::primitives::errors::TrendError;

// ============================================================================
// Seed Term
// ============================================================================

/// Seed for the 0-th term of the EWMA recurrence.
#[derive(Clone, Default)]
pub enum EwmaInit<T> {
    /// Simple moving average (window `span`) of the first `span` points;
    /// keeps the output length equal to the input length.
    #[default]
    Sma,

    /// Arithmetic mean of the first `span` points.
    Mean,

    /// A literal seed value.
    Value(T),

    /// A precomputed seed prefix; the last element becomes term 0.
    Prefix(Vec<T>),

    /// A callable producing the seed prefix from the first `span` points.
    Custom(Arc<dyn Fn(&[T]) -> Vec<T> + Send + Sync>),

    /// No seeding: term 0 is `x[0]` and the output length is unchanged.
    Off,
}

impl<T: Debug> Debug for EwmaInit<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sma => write!(f, "Sma"),
            Self::Mean => write!(f, "Mean"),
            Self::Value(value) => write!(f, "Value({value:?})"),
            Self::Prefix(prefix) => write!(f, "Prefix({prefix:?})"),
            Self::Custom(_) => write!(f, "Custom(..)"),
            Self::Off => write!(f, "Off"),
        }
    }
}

// ============================================================================
// Parameter Resolution
// ============================================================================

/// Resolve the (alpha, span) pair from the mutually exclusive parameters.
pub fn resolve_ewma_params<T: Float>(
    alpha: Option<T>,
    span: Option<usize>,
) -> Result<(T, usize), TrendError> {
    let (alpha, span) = match (alpha, span) {
        (Some(_), Some(_)) => return Err(TrendError::EwmaSpanConflict),
        (None, None) => return Err(TrendError::EwmaSpanMissing),
        (None, Some(span)) => {
            let denom = T::from(span + 1).unwrap();
            (T::from(2.0).unwrap() / denom, span)
        }
        (Some(alpha), None) => {
            let a = alpha.to_f64().unwrap_or(f64::NAN);
            if !(a > 0.0 && a <= 1.0) {
                return Err(TrendError::InvalidAlpha(a));
            }
            let span = (2.0 / a - 1.0).round() as usize;
            (alpha, span)
        }
    };
    if span < 2 {
        return Err(TrendError::InvalidSpan(span));
    }
    Ok((alpha, span))
}

// ============================================================================
// EWMA Kernel
// ============================================================================

/// Exponentially weighted moving average of `data`.
///
/// Exactly one of `alpha` or `span` must be supplied. The seed term is
/// controlled by `init`; see [`EwmaInit`] for the length implications of
/// each variant.
pub fn ewma<T: Float>(
    data: &[T],
    alpha: Option<T>,
    span: Option<usize>,
    init: &EwmaInit<T>,
) -> Result<Vec<T>, TrendError> {
    if data.is_empty() {
        return Err(TrendError::EmptyInput);
    }
    let (alpha, span) = resolve_ewma_params(alpha, span)?;

    let (prefix, tail_start) = match init {
        EwmaInit::Off => (Vec::new(), 0),
        seeded => {
            let head = &data[..span.min(data.len())];
            let prefix = match seeded {
                EwmaInit::Sma => simple_moving_average(head, span)?,
                EwmaInit::Mean => vec![mean(head)],
                EwmaInit::Value(value) => vec![*value],
                EwmaInit::Prefix(values) => values.clone(),
                EwmaInit::Custom(f) => f(head),
                EwmaInit::Off => unreachable!(),
            };
            if prefix.is_empty() {
                return Err(TrendError::EmptyInput);
            }
            (prefix, span.min(data.len()))
        }
    };

    let (passthrough, first_term) = match prefix.split_last() {
        Some((&seed, rest)) => (rest.to_vec(), seed),
        None => (Vec::new(), data[0]),
    };

    let mut out = passthrough;
    let mut current = first_term;
    out.push(current);
    let start = if tail_start == 0 { 1 } else { tail_start };
    for &value in &data[start.min(data.len())..] {
        current = alpha * value + (T::one() - alpha) * current;
        out.push(current);
    }
    Ok(out)
}

// Arithmetic mean; caller guarantees a non-empty slice.
fn mean<T: Float>(values: &[T]) -> T {
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    sum / T::from(values.len()).unwrap()
}
