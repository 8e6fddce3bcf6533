//! Risk screening: named penalty fractions and hard disqualification rules.
//!
//! Penalties discount the composite score (capped at 60% total by the
//! scoring layer); disqualification removes a row from the ranking
//! entirely. Both are sector-aware. Only the disqualification gate
//! consults `DqMode`; penalty magnitudes do not depend on it.

pub mod disqualify;
pub mod penalties;

pub use disqualify::*;
pub use penalties::*;
