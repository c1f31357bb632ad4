//! Phase calendar and the per-day numbers derived from it.

pub mod metrics;
pub mod phase;
