//! Bounded top-K pool of distinct solutions.
//!
//! Invariants
//! - At most `limit` entries.
//! - Ordered by `(error, blocks.len())` ascending; equal keys keep discovery order.
//! - No two entries share a composition (sorted multiset of block values).

use std::collections::HashSet;

/// A finalized stack in the fixed-point domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Block values in selection order.
    pub blocks: Vec<u64>,
    pub total: u64,
    /// `|total - target|`.
    pub error: u64,
}

impl Solution {
    /// Composition key: the block values sorted ascending.
    pub fn composition_key(&self) -> Vec<u64> {
        composition_key(&self.blocks)
    }

    #[inline]
    fn rank(&self) -> (u64, usize) {
        (self.error, self.blocks.len())
    }
}

fn composition_key(blocks: &[u64]) -> Vec<u64> {
    let mut key = blocks.to_vec();
    key.sort_unstable();
    key
}

#[derive(Clone, Debug)]
pub struct SolutionPool {
    limit: usize,
    entries: Vec<Solution>,
    keys: HashSet<Vec<u64>>,
}

impl SolutionPool {
    /// A zero `limit` is treated as 1. `search` never offers into a pool for a
    /// zero limit and `solve` rejects it, so the clamp is not observable there.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            entries: Vec::with_capacity(limit + 1),
            keys: HashSet::with_capacity(limit + 1),
        }
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    /// Error of the worst retained entry when at capacity; `None` means unbounded.
    #[inline]
    pub fn worst_error(&self) -> Option<u64> {
        if self.is_full() {
            self.entries.last().map(|s| s.error)
        } else {
            None
        }
    }

    /// `(error, block count)` of the worst retained entry when at capacity.
    ///
    /// An offer ranking at or above this is rejected, so a branch whose every
    /// stack ranks at least this high can be cut.
    #[inline]
    pub fn worst_rank(&self) -> Option<(u64, usize)> {
        if self.is_full() {
            self.entries.last().map(Solution::rank)
        } else {
            None
        }
    }

    /// Best entry, if any.
    #[inline]
    pub fn best(&self) -> Option<&Solution> {
        self.entries.first()
    }

    /// Offer a stack. Returns `true` if the pool changed.
    ///
    /// Re-offering a known composition is a no-op.
    pub fn offer(&mut self, stack: &[u64], total: u64, error: u64) -> bool {
        let rank = (error, stack.len());
        if self.is_full() {
            if let Some(last) = self.entries.last() {
                if rank >= last.rank() {
                    return false;
                }
            }
        }
        let key = composition_key(stack);
        if self.keys.contains(&key) {
            return false;
        }
        // First position whose rank is strictly worse keeps ties in discovery order.
        let pos = self.entries.partition_point(|s| s.rank() <= rank);
        self.entries.insert(
            pos,
            Solution {
                blocks: stack.to_vec(),
                total,
                error,
            },
        );
        self.keys.insert(key);
        if self.entries.len() > self.limit {
            if let Some(evicted) = self.entries.pop() {
                self.keys.remove(&evicted.composition_key());
            }
        }
        true
    }

    #[inline]
    pub fn solutions(&self) -> &[Solution] {
        &self.entries
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.entries
    }
}
