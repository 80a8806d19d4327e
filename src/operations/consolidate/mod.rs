//! Greedy, pass-based consolidation of overlapping footprints.
//!
//! A [`ReducePass`] resolves each overlapping pair it meets at most once;
//! [`Consolidate`] repeats passes until the footprint count is stable.

mod driver;
mod params;
mod reduce;
mod run;
mod score;

pub use driver::Consolidate;
pub use params::{
    ConsolidationParams, OverlapPolicy, ScoringMode, DEFAULT_MAX_PASSES, DEFAULT_THRESHOLD,
};
pub use reduce::{PassOutput, ReducePass};
pub use run::{Consolidation, ConsolidationRun, RunState};
pub use score::{OverlapScore, OverlapScorer};
