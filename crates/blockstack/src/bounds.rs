//! Prefix sums over the descending candidate list.
//!
//! Because candidates are sorted descending, the largest total reachable with
//! `r` more picks from index `i` onward is the sum of the next `r` candidates.
//! That value is the admissible bound used for pruning.

/// `sums[i]` = sum of the first `i` candidates. Length `n + 1`, non-decreasing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixSums {
    sums: Vec<u64>,
}

impl PrefixSums {
    /// One pass, O(n). Saturates instead of wrapping on overflow.
    pub fn new(candidates: &[u64]) -> Self {
        let mut sums = Vec::with_capacity(candidates.len() + 1);
        let mut acc = 0u64;
        sums.push(acc);
        for &c in candidates {
            acc = acc.saturating_add(c);
            sums.push(acc);
        }
        Self { sums }
    }

    /// Number of candidates covered.
    #[inline]
    pub fn candidate_count(&self) -> usize {
        self.sums.len() - 1
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.sums
    }

    /// Maximum sum from at most `remaining` picks starting at `start`.
    /// Zero when `remaining == 0` or `start` is out of range.
    #[inline]
    pub fn max_additional(&self, start: usize, remaining: usize) -> u64 {
        let n = self.candidate_count();
        if remaining == 0 || start >= n {
            return 0;
        }
        let end = n.min(start.saturating_add(remaining));
        self.sums[end] - self.sums[start]
    }
}
