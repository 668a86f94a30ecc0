//! Curated surface for the CLI and other drivers (UNSTABLE).
//!
//! Prefer these re-exports for consistency across callers; internal module
//! paths may move.

// Fixed-point boundary
pub use crate::units::{normalize, to_real, to_units, CandidateSet, FixedScale, DEFAULT_SCALE};
// Bound and pool
pub use crate::bounds::PrefixSums;
pub use crate::pool::{Solution, SolutionPool};
// Search
pub use crate::search::{
    search, solve, to_real_solution, InvalidInput, RealSolution, SearchCfg, SearchOutcome,
    SearchParams, SearchStats, StackReport, StackRequest, MAX_BLOCKS_LIMIT,
};
