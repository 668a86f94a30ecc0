//! Block stack search: branch-and-bound over distinct block sizes.
//!
//! Purpose
//! - Find up to K distinct combinations of blocks (each used at most once,
//!   at most `max_blocks` per stack) whose total best approximates a target,
//!   ranked by absolute error and then by block count.
//!
//! Why this design
//! - Candidates are sorted descending so a prefix-sum window gives an O(1)
//!   admissible bound (`crate::bounds`), and the pool's worst retained error
//!   acts as the incumbent.
//! - All arithmetic inside the traversal is integer fixed point; real values
//!   appear only in `solve` at the boundary.
//! - The wall-clock budget is a soft deadline: expiry returns the pool as it
//!   stands and is reported through `SearchStats::timed_out`, never as an error.
//!
//! Determinism
//! - Without a deadline (or when it is not hit) the result depends only on the
//!   inputs. A run cut short by the budget depends on how far it got.
//!
//! Layout: `types.rs` (request/config/result types), `dfs.rs` (traversal),
//! and `solve.rs` (validation and real-unit conversion).

mod dfs;
mod solve;
mod types;

pub use dfs::search;
pub use solve::{solve, to_real_solution};
pub use types::{
    InvalidInput, RealSolution, SearchCfg, SearchOutcome, SearchParams, SearchStats,
    StackReport, StackRequest, MAX_BLOCKS_LIMIT,
};

#[cfg(test)]
mod tests;
