//! Request validation and conversion back to real units.

use crate::pool::Solution;
use crate::units::{normalize, to_real, to_units, CandidateSet, FixedScale};

use super::dfs::search;
use super::types::{
    InvalidInput, RealSolution, SearchCfg, SearchParams, StackReport, StackRequest,
    MAX_BLOCKS_LIMIT,
};

/// Validate, normalize, search, and convert.
///
/// Returns `Err` only for rejected input; an empty or timed-out search is `Ok`.
pub fn solve(req: &StackRequest, cfg: SearchCfg) -> Result<StackReport, InvalidInput> {
    let (candidates, target_units, params) = prepare(req, &cfg)?;
    let outcome = search(&candidates, target_units, params);
    let solutions = outcome
        .pool
        .into_solutions()
        .into_iter()
        .map(|s| to_real_solution(s, req.scale))
        .collect();
    Ok(StackReport {
        solutions,
        target_units,
        candidate_count: candidates.len(),
        stats: outcome.stats,
    })
}

fn prepare(
    req: &StackRequest,
    cfg: &SearchCfg,
) -> Result<(CandidateSet, u64, SearchParams), InvalidInput> {
    if !req.target.is_finite() || req.target <= 0.0 {
        return Err(InvalidInput::Target(req.target));
    }
    if req.max_blocks == 0 || req.max_blocks > MAX_BLOCKS_LIMIT {
        return Err(InvalidInput::MaxBlocks(req.max_blocks));
    }
    if req.result_limit == 0 {
        return Err(InvalidInput::ResultLimit);
    }
    let target_units =
        to_units(req.target, req.scale).ok_or(InvalidInput::TargetUnrepresentable {
            target: req.target,
            scale: req.scale,
        })?;
    let candidates = normalize(&req.candidates, req.scale);
    if candidates.is_empty() {
        return Err(InvalidInput::NoCandidates);
    }
    let params = SearchParams::from_cfg(cfg, req.scale, req.max_blocks, req.result_limit)?;
    Ok((candidates, target_units, params))
}

/// Convert one fixed-point solution; blocks are listed largest first.
pub fn to_real_solution(s: Solution, scale: FixedScale) -> RealSolution {
    let mut sorted = s.blocks.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    RealSolution {
        total: to_real(s.total, scale),
        error: to_real(s.error, scale),
        blocks: sorted.into_iter().map(|b| to_real(b, scale)).collect(),
        units: s,
    }
}
