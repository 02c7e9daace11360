//! Savitzky-Golay polynomial smoothing.
//!
//! ## Purpose
//!
//! This module implements the Savitzky-Golay filter: least-squares fitting
//! of a low-order polynomial over a sliding window, evaluated at the window
//! center. Interior points reduce to a fixed convolution; edge points are
//! fitted explicitly so the output covers the full series.
//!
//! ## Design notes
//!
//! * **Interior coefficients**: The center value of a least-squares
//!   polynomial fit is linear in the window values, so one coefficient
//!   vector (derived from the inverse Gram matrix) serves every interior
//!   point.
//! * **Edges**: A polynomial of the same order is fitted to the first/last
//!   `window_length` points and evaluated at the uncovered positions,
//!   matching the interpolating edge mode of common implementations.
//! * **Solver**: Normal equations solved by Gaussian elimination with
//!   partial pivoting; systems are `(polyorder + 1)`-dimensional.
//!
//! ## Key concepts
//!
//! * **Gram matrix**: `G[j][l] = sum_k offset_k^(j + l)` over window offsets.
//!
//! ## Invariants
//!
//! * Output length equals input length.
//! * Polynomials of degree `<= polyorder` are reproduced exactly (up to
//!   floating-point error).
//!
//! ## Non-goals
//!
//! * This module does not handle NaN input (interpolate first).
//! * Derivative estimation is not provided; only smoothing.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::TrendError;

// ============================================================================
// Validation
// ============================================================================

/// Validate a (window_length, polyorder) pair independent of data.
pub fn validate_savgol_params(window_length: usize, polyorder: usize) -> Result<(), TrendError> {
    if window_length < 2 {
        return Err(TrendError::InvalidWindow {
            window: window_length,
            min: 2,
        });
    }
    if polyorder >= window_length {
        return Err(TrendError::InvalidPolyorder {
            polyorder,
            window: window_length,
        });
    }
    Ok(())
}

// ============================================================================
// Filter
// ============================================================================

/// Apply a Savitzky-Golay filter with the given window and polynomial order.
pub fn savgol_filter<T: Float>(
    data: &[T],
    window_length: usize,
    polyorder: usize,
) -> Result<Vec<T>, TrendError> {
    if data.is_empty() {
        return Err(TrendError::EmptyInput);
    }
    validate_savgol_params(window_length, polyorder)?;
    let n = data.len();
    if window_length > n {
        return Err(TrendError::WindowExceedsData {
            window: window_length,
            n,
        });
    }

    let left = window_length / 2;
    let right = window_length - 1 - left;
    let coeffs = center_coefficients::<T>(window_length, left, polyorder)?;

    let mut out = vec![T::zero(); n];
    // Interior: fixed convolution with the center coefficients.
    for i in left..n - right {
        let mut acc = T::zero();
        for (k, &c) in coeffs.iter().enumerate() {
            acc = acc + c * data[i - left + k];
        }
        out[i] = acc;
    }
    // Edges: explicit polynomial fits over the first/last window.
    let head = polyfit(&data[..window_length], polyorder)?;
    for (i, slot) in out.iter_mut().enumerate().take(left) {
        *slot = eval_poly(&head, T::from(i).unwrap());
    }
    let tail = polyfit(&data[n - window_length..], polyorder)?;
    for offset in 0..right {
        let i = n - right + offset;
        let local = T::from(window_length - right + offset).unwrap();
        out[i] = eval_poly(&tail, local);
    }
    Ok(out)
}

// Convolution coefficients for the window-center estimate.
//
// With offsets `k - center`, the fitted value at the center is `beta_0`,
// i.e. `sum_k h_k * y_k` with `h_k = P_z(offset_k)` where `z` solves
// `G z = e_0` for the Gram matrix `G`.
fn center_coefficients<T: Float>(
    window_length: usize,
    center: usize,
    polyorder: usize,
) -> Result<Vec<T>, TrendError> {
    let m = polyorder + 1;
    let offsets: Vec<T> = (0..window_length)
        .map(|k| T::from(k).unwrap() - T::from(center).unwrap())
        .collect();
    let mut gram = vec![vec![T::zero(); m]; m];
    for (j, row) in gram.iter_mut().enumerate() {
        for (l, slot) in row.iter_mut().enumerate() {
            let mut acc = T::zero();
            for &off in &offsets {
                acc = acc + off.powi((j + l) as i32);
            }
            *slot = acc;
        }
    }
    let mut rhs = vec![T::zero(); m];
    rhs[0] = T::one();
    let z = solve(gram, rhs)?;
    Ok(offsets.iter().map(|&off| eval_poly(&z, off)).collect())
}

// Least-squares polynomial fit over positions 0..window.len().
fn polyfit<T: Float>(window: &[T], polyorder: usize) -> Result<Vec<T>, TrendError> {
    let m = polyorder + 1;
    let mut gram = vec![vec![T::zero(); m]; m];
    let mut rhs = vec![T::zero(); m];
    for (k, &y) in window.iter().enumerate() {
        let x = T::from(k).unwrap();
        for j in 0..m {
            let xj = x.powi(j as i32);
            rhs[j] = rhs[j] + xj * y;
            for (l, slot) in gram[j].iter_mut().enumerate() {
                *slot = *slot + xj * x.powi(l as i32);
            }
        }
    }
    solve(gram, rhs)
}

// Horner evaluation of `coeffs[0] + coeffs[1] x + ...` at `x`.
fn eval_poly<T: Float>(coeffs: &[T], x: T) -> T {
    let mut acc = T::zero();
    for &c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

// Gaussian elimination with partial pivoting on a small dense system.
fn solve<T: Float>(mut a: Vec<Vec<T>>, mut b: Vec<T>) -> Result<Vec<T>, TrendError> {
    let m = b.len();
    for col in 0..m {
        let pivot = (col..m)
            .max_by(|&p, &q| {
                a[p][col]
                    .abs()
                    .partial_cmp(&a[q][col].abs())
                    .unwrap_or(core::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot][col].abs() <= T::epsilon() {
            return Err(TrendError::InvalidKernel(
                "singular polynomial design matrix".to_string(),
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..m {
            let factor = a[row][col] / a[col][col];
            for k in col..m {
                let update = a[col][k];
                a[row][k] = a[row][k] - factor * update;
            }
            b[row] = b[row] - factor * b[col];
        }
    }
    let mut x = vec![T::zero(); m];
    for col in (0..m).rev() {
        let mut acc = b[col];
        for k in col + 1..m {
            acc = acc - a[col][k] * x[k];
        }
        x[col] = acc / a[col][col];
    }
    Ok(x)
}
