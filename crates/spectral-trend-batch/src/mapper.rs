//! Pluggable mapping over independent sample records.
//!
//! ## Purpose
//!
//! This module provides the concurrency primitive the batch layer runs on:
//! map a per-sample function over a record list either sequentially
//! (deterministic order, easiest to debug) or on a work-stealing thread
//! pool.
//!
//! ## Design notes
//!
//! * **Embarrassingly parallel**: Samples are independent; no shared mutable
//!   state, no locks, no cross-task ordering guarantees needed.
//! * **Rayon**: The threaded strategy covers both I/O-bound fan-out and
//!   CPU-bound smoothing volume with one work-stealing pool.
//! * **Stable results**: Both strategies return outputs in input order, even
//!   though threaded completion order is arbitrary.
//!
//! ## Non-goals
//!
//! * This module does not handle per-sample errors (the mapped function's
//!   return type does; see `runner`).

// External dependencies
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Strategy
// ============================================================================

/// How to distribute per-sample work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapStrategy {
    /// Single-threaded, in input order.
    Sequential,

    /// Rayon work-stealing thread pool.
    #[default]
    Threaded,
}

// ============================================================================
// Mapping
// ============================================================================

/// Map `f` over `items` per the chosen strategy.
pub fn map_records<I, O, F>(items: Vec<I>, strategy: MapStrategy, f: F) -> Vec<O>
where
    I: Send,
    O: Send,
    F: Fn(I) -> O + Send + Sync,
{
    match strategy {
        MapStrategy::Sequential => items.into_iter().map(f).collect(),
        MapStrategy::Threaded => items.into_par_iter().map(f).collect(),
    }
}
