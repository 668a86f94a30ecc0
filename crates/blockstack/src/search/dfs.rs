//! Depth-first branch-and-bound over the descending candidate list.

use std::time::{Duration, Instant};

use crate::bounds::PrefixSums;
use crate::pool::SolutionPool;
use crate::units::CandidateSet;

use super::types::{SearchOutcome, SearchParams, SearchStats};

/// Run the search in the fixed-point domain.
///
/// Never fails: an expired budget returns the pool as it stands and sets
/// `stats.timed_out`. `max_blocks == 0`, `result_limit == 0`, or an empty set
/// yields an empty pool without visiting any node.
pub fn search(candidates: &CandidateSet, target: u64, params: SearchParams) -> SearchOutcome {
    StackRunner::new(candidates.as_slice(), target, params).run()
}

/// Wall-clock deadline polled every `mask + 1` nodes.
#[derive(Clone, Copy, Debug)]
struct SearchBudget {
    start: Instant,
    limit: Option<Duration>,
    mask: u64,
}

impl SearchBudget {
    fn new(limit: Option<Duration>, check_interval: u32) -> Self {
        let interval = u64::from(check_interval.max(1)).next_power_of_two();
        Self {
            start: Instant::now(),
            limit,
            mask: interval - 1,
        }
    }

    #[inline]
    fn due(&self, nodes: u64) -> bool {
        nodes & self.mask == 0
    }

    #[inline]
    fn expired(&self) -> bool {
        self.limit
            .is_some_and(|limit| self.start.elapsed() >= limit)
    }
}

/// Runner carrying shared context and accumulators.
struct StackRunner<'a> {
    cands: &'a [u64],
    sums: PrefixSums,
    target: u64,
    /// `target + overshoot_margin`, saturated.
    ceiling: u64,
    params: SearchParams,
    pool: SolutionPool,
    stack: Vec<u64>,
    budget: SearchBudget,
    stats: SearchStats,
}

impl<'a> StackRunner<'a> {
    fn new(cands: &'a [u64], target: u64, params: SearchParams) -> Self {
        Self {
            cands,
            sums: PrefixSums::new(cands),
            target,
            ceiling: target.saturating_add(params.overshoot_margin),
            params,
            pool: SolutionPool::new(params.result_limit),
            stack: Vec::with_capacity(params.max_blocks),
            budget: SearchBudget::new(params.time_budget, params.check_interval),
            stats: SearchStats::default(),
        }
    }

    fn run(mut self) -> SearchOutcome {
        if self.params.max_blocks > 0 && self.params.result_limit > 0 && !self.cands.is_empty() {
            self.recur(0, 0);
        }
        self.stats.elapsed = self.budget.start.elapsed();
        SearchOutcome {
            pool: self.pool,
            stats: self.stats,
        }
    }

    fn recur(&mut self, start: usize, total: u64) {
        self.stats.nodes += 1;
        if self.budget.due(self.stats.nodes) && self.budget.expired() {
            self.stats.timed_out = true;
        }
        if self.stats.timed_out {
            return;
        }

        if !self.stack.is_empty() {
            let error = total.abs_diff(self.target);
            self.pool.offer(&self.stack, total, error);
            if error <= self.params.exact_tolerance {
                // Saturated: more (positive) blocks only move away.
                return;
            }
        }

        let len = self.stack.len();
        if len >= self.params.max_blocks || start >= self.cands.len() {
            return;
        }

        let remaining = self.params.max_blocks - len;
        let max_reach = total.saturating_add(self.sums.max_additional(start, remaining));
        // Every descendant falls short by at least the gap and holds at least
        // `len + 1` blocks, so it cannot outrank the worst retained entry.
        if self.target > max_reach {
            if let Some(worst) = self.pool.worst_rank() {
                if (self.target - max_reach, len + 1) >= worst {
                    self.stats.pruned += 1;
                    return;
                }
            }
        }

        for i in start..self.cands.len() {
            let next = total.saturating_add(self.cands[i]);
            if next > self.ceiling {
                self.stats.skipped += 1;
                continue;
            }
            if next >= self.target {
                // At or past the target the error only grows with more blocks.
                if let Some(worst) = self.pool.worst_rank() {
                    if (next - self.target, len + 1) >= worst {
                        self.stats.skipped += 1;
                        continue;
                    }
                }
            }
            self.stack.push(self.cands[i]);
            self.recur(i + 1, next);
            self.stack.pop();
            if self.stats.timed_out {
                return;
            }
        }
    }
}
