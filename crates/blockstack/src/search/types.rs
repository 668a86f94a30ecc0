//! Request, configuration, and result types for the stack search.
//!
//! Kept small and explicit to make `dfs` and `solve` easy to read.

use std::fmt;
use std::time::Duration;

use crate::pool::{Solution, SolutionPool};
use crate::units::FixedScale;

/// Upper limit on blocks per stack accepted by [`super::solve`].
pub const MAX_BLOCKS_LIMIT: usize = 20;

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchCfg {
    /// Soft deadline; `None` searches exhaustively.
    pub time_budget: Option<Duration>,
    /// Nodes between deadline checks. Rounded up to a power of two.
    pub check_interval: u32,
    /// A stack within this many units of the target is not extended further.
    pub exact_tolerance: u64,
    /// How far (real units) a total may exceed the target before the
    /// extension is discarded.
    pub overshoot_margin: f64,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            time_budget: Some(Duration::from_millis(2_000)),
            check_interval: 1024,
            exact_tolerance: 1,
            overshoot_margin: 0.5,
        }
    }
}

impl SearchCfg {
    /// Same configuration without a deadline (reproducible runs).
    pub fn unbounded() -> Self {
        Self {
            time_budget: None,
            ..Self::default()
        }
    }
}

/// Fixed-point search parameters, derived from [`SearchCfg`] for a given scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub max_blocks: usize,
    pub result_limit: usize,
    pub overshoot_margin: u64,
    pub exact_tolerance: u64,
    pub time_budget: Option<Duration>,
    pub check_interval: u32,
}

impl SearchParams {
    /// Convert a configuration to units. Fails on a negative or non-finite margin.
    pub fn from_cfg(
        cfg: &SearchCfg,
        scale: FixedScale,
        max_blocks: usize,
        result_limit: usize,
    ) -> Result<Self, InvalidInput> {
        let margin = cfg.overshoot_margin;
        if !margin.is_finite() || margin < 0.0 {
            return Err(InvalidInput::OvershootMargin(margin));
        }
        let overshoot_margin = (margin * scale.get() as f64).round();
        if overshoot_margin > u64::MAX as f64 {
            return Err(InvalidInput::OvershootMargin(margin));
        }
        Ok(Self {
            max_blocks,
            result_limit,
            overshoot_margin: overshoot_margin as u64,
            exact_tolerance: cfg.exact_tolerance,
            time_budget: cfg.time_budget,
            check_interval: cfg.check_interval,
        })
    }
}

/// Traversal counters reported with every outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    /// Nodes cut by the prefix-sum bound.
    pub pruned: u64,
    /// Extensions skipped by the overshoot cap or the incumbent.
    pub skipped: u64,
    pub elapsed: Duration,
    /// The deadline hit before the traversal finished; the pool may be non-exhaustive.
    pub timed_out: bool,
}

/// Fixed-point result of one search.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub pool: SolutionPool,
    pub stats: SearchStats,
}

/// A caller request in real units.
#[derive(Clone, Debug, PartialEq)]
pub struct StackRequest {
    pub candidates: Vec<f64>,
    pub target: f64,
    pub max_blocks: usize,
    pub result_limit: usize,
    pub scale: FixedScale,
}

/// One solution converted back to real units.
#[derive(Clone, Debug, PartialEq)]
pub struct RealSolution {
    pub total: f64,
    pub error: f64,
    /// Block values, largest first.
    pub blocks: Vec<f64>,
    /// The exact fixed-point solution this was derived from.
    pub units: Solution,
}

/// Result of [`super::solve`]: best first, possibly empty.
#[derive(Clone, Debug)]
pub struct StackReport {
    pub solutions: Vec<RealSolution>,
    pub target_units: u64,
    pub candidate_count: usize,
    pub stats: SearchStats,
}

/// Rejected request; the search did not run.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidInput {
    /// Target is non-finite or not positive.
    Target(f64),
    /// Target is positive but rounds to zero units, or exceeds the unit range, at this scale.
    TargetUnrepresentable { target: f64, scale: FixedScale },
    /// No usable candidate survived normalization.
    NoCandidates,
    MaxBlocks(usize),
    ResultLimit,
    OvershootMargin(f64),
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target(t) => write!(f, "target must be a positive finite length, got {t}"),
            Self::TargetUnrepresentable { target, scale } => write!(
                f,
                "target {target} is not representable at scale {scale}"
            ),
            Self::NoCandidates => write!(f, "no usable block sizes (need positive finite values)"),
            Self::MaxBlocks(n) => write!(
                f,
                "max blocks must be in 1..={MAX_BLOCKS_LIMIT}, got {n}"
            ),
            Self::ResultLimit => write!(f, "result limit must be at least 1"),
            Self::OvershootMargin(m) => {
                write!(f, "overshoot margin must be finite and non-negative, got {m}")
            }
        }
    }
}

impl std::error::Error for InvalidInput {}
