//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the domain algorithms built on the math kernels:
//! - NaN-aware window smoothing and spurious-dip removal
//! - Daily resampling / gap marking on labeled tables
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// NaN-aware window smoothing and dip removal.
pub mod drops;

/// Daily resampling and gap marking.
pub mod resample;
