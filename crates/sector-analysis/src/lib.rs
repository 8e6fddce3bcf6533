//! Sector classification and sector-relative score adjustment.
//!
//! Classification is a prioritized rule list: explicit financial-institution
//! mapping first, then name-substring heuristics, then a generic default.
//! Adjustment rescales a composite score against sector norms; it never
//! replaces the penalty or disqualification layers.

pub mod adjust;
pub mod benchmarks;
pub mod classify;

pub use adjust::*;
pub use benchmarks::*;
pub use classify::*;
