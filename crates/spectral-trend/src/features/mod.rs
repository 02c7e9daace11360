//! Layer 5: Features
//!
//! # Purpose
//!
//! This layer derives scalar and array features from (smoothed) index
//! series:
//! - MACD-style momentum features from the EWMA kernel
//! - Period-windowed descriptive statistics over growing/off seasons
//!
//! # Architecture
//!
//! ```text
//! Layer 6: Pipelines
//!   ↓
//! Layer 5: Features ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Moving average convergence/divergence features.
pub mod macd;

/// Period-windowed descriptive statistics.
pub mod stats;
