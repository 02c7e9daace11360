//! Layer 6: Pipelines
//!
//! # Purpose
//!
//! This layer provides the named smoothing pipelines composed from the
//! engine's sequencer: currently the four-stage gap-filling /
//! Savitzky-Golay pipeline.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: Pipelines ← You are here
//!   ↓
//! Layer 5: Features
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// The gap-filling / Savitzky-Golay smoothing pipeline.
pub mod savitzky_golay;
