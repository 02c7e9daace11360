//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the bare-array numeric kernels of the smoothing
//! library:
//! - Moving averages and window convolution
//! - Exponentially weighted moving average
//! - NaN gap interpolation
//! - Savitzky-Golay polynomial smoothing
//! - Edge padding utilities
//!
//! Kernels are slice-in/`Vec`-out; coordinate handling lives in the engine.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: Pipelines
//!   ↓
//! Layer 5: Features
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Symmetric edge padding for window smoothing.
pub mod boundary;

/// Moving averages, kernel convolution, and windowed replacement.
pub mod convolve;

/// Exponentially weighted moving average.
pub mod ewma;

/// NaN gap filling by 1-D interpolation.
pub mod interpolate;

/// Savitzky-Golay polynomial smoothing.
pub mod savgol;
