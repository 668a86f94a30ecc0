//! Gauge block stack search.
//!
//! Given a set of distinct block sizes and a target length, find up to K
//! combinations (each block used at most once) whose total best approximates
//! the target, ranked by absolute error and then by block count.
//!
//! Module map
//! - `units`: fixed-point boundary (real sizes → canonical candidate set).
//! - `bounds`: prefix sums and the admissible reach bound.
//! - `pool`: bounded, deduplicated top-K solutions.
//! - `search`: time-budgeted branch-and-bound and the validating `solve` entry.
//!
//! API Policy
//! - The crate is consumed by the workspace CLI. Breaking changes are fine
//!   when they improve clarity; prefer the `api` re-exports in callers.

pub mod api;
pub mod bounds;
pub mod pool;
pub mod search;
pub mod units;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use search::{solve, SearchCfg, StackReport, StackRequest};
pub use units::FixedScale;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::pool::{Solution, SolutionPool};
    pub use crate::search::{
        search, solve, InvalidInput, RealSolution, SearchCfg, SearchParams, SearchStats,
        StackReport, StackRequest,
    };
    pub use crate::units::{normalize, CandidateSet, FixedScale};
}
