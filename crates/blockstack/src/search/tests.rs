use super::*;
use crate::pool::Solution;
use crate::units::{CandidateSet, FixedScale};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;

fn request(candidates: &[f64], target: f64, max_blocks: usize, limit: usize) -> StackRequest {
    StackRequest {
        candidates: candidates.to_vec(),
        target,
        max_blocks,
        result_limit: limit,
        scale: FixedScale::default(),
    }
}

fn params(max_blocks: usize, limit: usize, margin: u64, tolerance: u64) -> SearchParams {
    SearchParams {
        max_blocks,
        result_limit: limit,
        overshoot_margin: margin,
        exact_tolerance: tolerance,
        time_budget: None,
        check_interval: 1024,
    }
}

/// `(error, block count)` of every stack reachable by brute force (subsets of
/// size 1..=max within the ceiling), sorted.
fn brute_force_ranks(
    cands: &[u64],
    target: u64,
    max_blocks: usize,
    margin: u64,
) -> Vec<(u64, usize)> {
    let n = cands.len();
    let mut ranks = Vec::new();
    for mask in 1u32..(1u32 << n) {
        let len = mask.count_ones() as usize;
        if len > max_blocks {
            continue;
        }
        let total: u64 = (0..n)
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| cands[i])
            .sum();
        if total <= target + margin {
            ranks.push((total.abs_diff(target), len));
        }
    }
    ranks.sort_unstable();
    ranks
}

fn ranks(solutions: &[Solution]) -> Vec<(u64, usize)> {
    solutions.iter().map(|s| (s.error, s.blocks.len())).collect()
}

fn assert_well_formed(solutions: &[Solution], target: u64, max_blocks: usize, limit: usize) {
    assert!(solutions.len() <= limit);
    let mut keys = HashSet::new();
    for s in solutions {
        assert!(!s.blocks.is_empty() && s.blocks.len() <= max_blocks);
        let distinct: HashSet<u64> = s.blocks.iter().copied().collect();
        assert_eq!(distinct.len(), s.blocks.len(), "block reused in {:?}", s.blocks);
        assert_eq!(s.total, s.blocks.iter().sum::<u64>());
        assert_eq!(s.error, s.total.abs_diff(target));
        assert!(keys.insert(s.composition_key()), "duplicate composition");
    }
    for pair in solutions.windows(2) {
        let a = (pair[0].error, pair[0].blocks.len());
        let b = (pair[1].error, pair[1].blocks.len());
        assert!(a <= b, "unsorted: {a:?} > {b:?}");
    }
}

fn inch_81() -> Vec<f64> {
    let mut v = Vec::new();
    v.extend((1..=9).map(|i| 0.1 + i as f64 * 0.0001));
    v.extend((101..=149).map(|i| i as f64 * 0.001));
    v.extend((1..=19).map(|i| i as f64 * 0.05));
    v.extend([1.0, 2.0, 3.0, 4.0]);
    v
}

#[test]
fn exact_chain_of_all_blocks() {
    let report = solve(
        &request(&[1.0, 0.5, 0.1, 0.01], 1.61, 4, 5),
        SearchCfg::unbounded(),
    )
    .unwrap();
    let best = &report.solutions[0];
    assert_eq!(best.units.error, 0);
    assert_eq!(best.blocks, vec![1.0, 0.5, 0.1, 0.01]);
    assert!((best.total - 1.61).abs() < 1e-12);
    assert_eq!(best.error, 0.0);
}

#[test]
fn least_bad_option_when_nothing_fits() {
    let report = solve(&request(&[1.0, 0.5], 0.3, 3, 5), SearchCfg::unbounded()).unwrap();
    // 1.0 overshoots the 0.5 margin, so {0.5} is the only stack.
    assert_eq!(report.solutions.len(), 1);
    let best = &report.solutions[0];
    assert_eq!(best.blocks, vec![0.5]);
    assert!((best.error - 0.2).abs() < 1e-12);
}

#[test]
fn single_block_limit_picks_closest() {
    let report = solve(
        &request(&[2.0, 1.0, 0.5, 0.25], 3.75, 1, 3),
        SearchCfg::unbounded(),
    )
    .unwrap();
    let best = &report.solutions[0];
    assert_eq!(best.blocks, vec![2.0]);
    assert!((best.error - 1.75).abs() < 1e-12);
    assert!(report.solutions.iter().all(|s| s.blocks.len() == 1));
}

#[test]
fn pool_keeps_three_lowest_distinct() {
    // 101..=114 with target 333 has many exact three-block stacks.
    let cands = CandidateSet::from_units(101..=114);
    let out = search(&cands, 333, params(3, 3, 50, 0));
    let sols = out.pool.solutions();
    assert_eq!(sols.len(), 3);
    assert_well_formed(sols, 333, 3, 3);
    assert!(sols.iter().all(|s| s.error == 0));

    // Even blocks, odd target: no exact stack, so the full ranking must match.
    let cands = CandidateSet::from_units([96, 88, 82, 70, 62, 54, 46, 40, 36, 28, 22, 18]);
    let target = 203;
    let out = search(&cands, target, params(4, 3, 30, 0));
    let expected = brute_force_ranks(cands.as_slice(), target, 4, 30);
    assert!(expected[0].0 > 0);
    assert_eq!(ranks(out.pool.solutions()), expected[..3].to_vec());
}

#[test]
fn shorter_stack_with_equal_error_is_kept() {
    // 54+30+12+2 = 98 is found first; 52+30+22 = 104 ties on error with one block fewer.
    let cands = CandidateSet::from_units([54, 52, 30, 22, 12, 2, 1]);
    let out = search(&cands, 101, params(4, 1, 20, 0));
    let best = out.pool.best().unwrap();
    assert_eq!((best.error, best.blocks.len()), (3, 3));
    assert_eq!(best.composition_key(), vec![22, 30, 52]);

    let out = search(&cands, 101, params(4, 2, 20, 0));
    assert_eq!(ranks(out.pool.solutions()), vec![(3, 3), (3, 4)]);
}

#[test]
fn zero_result_limit_returns_nothing() {
    let cands = CandidateSet::from_units([5, 3, 2]);
    let out = search(&cands, 8, params(3, 0, 5, 0));
    assert!(out.pool.is_empty());
    assert_eq!(out.stats.nodes, 0);
}

#[test]
fn rejects_invalid_requests() {
    let cfg = SearchCfg::unbounded();
    assert_eq!(
        solve(&request(&[1.0], -1.0, 2, 1), cfg).unwrap_err(),
        InvalidInput::Target(-1.0)
    );
    assert!(matches!(
        solve(&request(&[1.0], f64::NAN, 2, 1), cfg),
        Err(InvalidInput::Target(_))
    ));
    assert_eq!(
        solve(&request(&[1.0], 1.0, 0, 1), cfg).unwrap_err(),
        InvalidInput::MaxBlocks(0)
    );
    assert_eq!(
        solve(&request(&[1.0], 1.0, 21, 1), cfg).unwrap_err(),
        InvalidInput::MaxBlocks(21)
    );
    assert_eq!(
        solve(&request(&[1.0], 1.0, 2, 0), cfg).unwrap_err(),
        InvalidInput::ResultLimit
    );
    assert_eq!(
        solve(&request(&[-1.0, f64::NAN], 1.0, 2, 1), cfg).unwrap_err(),
        InvalidInput::NoCandidates
    );
    assert!(matches!(
        solve(&request(&[1.0], 1e-9, 2, 1), cfg),
        Err(InvalidInput::TargetUnrepresentable { .. })
    ));
    let bad_margin = SearchCfg {
        overshoot_margin: -0.1,
        ..cfg
    };
    assert_eq!(
        solve(&request(&[1.0], 1.0, 2, 1), bad_margin).unwrap_err(),
        InvalidInput::OvershootMargin(-0.1)
    );
    assert!(InvalidInput::MaxBlocks(21).to_string().contains("1..=20"));
}

#[test]
fn nothing_within_margin_is_an_empty_result() {
    let cfg = SearchCfg {
        overshoot_margin: 0.1,
        ..SearchCfg::unbounded()
    };
    let report = solve(&request(&[1.0, 2.0], 0.3, 2, 3), cfg).unwrap();
    assert!(report.solutions.is_empty());
    assert!(!report.stats.timed_out);
    assert!(report.stats.skipped > 0);
}

#[test]
fn expired_budget_returns_partial_result() {
    let cands = CandidateSet::from_units(1..=40);
    let mut p = params(10, 5, 1_000, 0);
    p.time_budget = Some(Duration::ZERO);
    p.check_interval = 1;
    let out = search(&cands, 123, p);
    assert!(out.stats.timed_out);
    assert!(out.pool.is_empty());

    // Below one check interval the deadline is never polled.
    let small = CandidateSet::from_units([5, 3]);
    let mut p = params(2, 5, 10, 0);
    p.time_budget = Some(Duration::ZERO);
    let out = search(&small, 8, p);
    assert!(!out.stats.timed_out);
    assert_eq!(out.pool.best().map(|s| s.error), Some(0));
}

#[test]
fn saturated_branch_is_not_extended() {
    let cands = CandidateSet::from_units([10, 1]);
    let out = search(&cands, 10, params(2, 5, 5, 0));
    let sols = out.pool.solutions();
    // {10} is exact, so {10, 1} is never visited.
    assert!(sols.iter().all(|s| s.blocks != vec![10, 1]));
    assert_eq!(sols[0].blocks, vec![10]);
}

#[test]
fn bound_prunes_on_realistic_set() {
    let cfg = SearchCfg {
        time_budget: Some(Duration::from_secs(10)),
        ..SearchCfg::default()
    };
    let report = solve(&request(&inch_81(), 3.1416, 5, 5), cfg).unwrap();
    assert_eq!(report.candidate_count, 81);
    assert!(report.stats.pruned + report.stats.skipped > 0);
    let best = &report.solutions[0];
    assert!(best.error < 1e-4, "best error {}", best.error);
    assert!(best.blocks.len() <= 5);
}

#[test]
fn seeded_random_sets_match_brute_force_best() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let n = rng.gen_range(1..=12);
        let cands = CandidateSet::from_units((0..n).map(|_| rng.gen_range(1..=300u64)));
        let target = rng.gen_range(1..=900u64);
        let max_blocks = rng.gen_range(1..=5);
        let out = search(&cands, target, params(max_blocks, 4, 40, 0));
        let expected = brute_force_ranks(cands.as_slice(), target, max_blocks, 40);
        let best = out.pool.best().map(|s| (s.error, s.blocks.len()));
        assert_eq!(best, expected.first().copied());
    }
}

fn case() -> impl Strategy<Value = (Vec<u64>, u64, usize, usize, u64)> {
    (
        prop::collection::vec(1u64..=200, 1..=12),
        1u64..=600,
        1usize..=5,
        1usize..=5,
        0u64..=100,
    )
}

proptest! {
    #[test]
    fn results_are_well_formed((raw, target, max_blocks, limit, margin) in case()) {
        let cands = CandidateSet::from_units(raw);
        let out = search(&cands, target, params(max_blocks, limit, margin, 0));
        assert_well_formed(out.pool.solutions(), target, max_blocks, limit);
        for s in out.pool.solutions() {
            prop_assert!(s.total <= target + margin);
        }
    }

    #[test]
    fn matches_brute_force_ranking((raw, target, max_blocks, limit, margin) in case()) {
        let cands = CandidateSet::from_units(raw);
        let out = search(&cands, target, params(max_blocks, limit, margin, 0));
        let got = ranks(out.pool.solutions());
        let expected = brute_force_ranks(cands.as_slice(), target, max_blocks, margin);
        prop_assert_eq!(got.first().copied(), expected.first().copied());
        // With an exact stack present, saturation stops extending it, so only the head is comparable.
        if expected.first().is_some_and(|&(e, _)| e > 0) {
            let k = limit.min(expected.len());
            prop_assert_eq!(got, expected[..k].to_vec());
        }
    }

    #[test]
    fn repeated_runs_are_identical((raw, target, max_blocks, limit, margin) in case()) {
        let cands = CandidateSet::from_units(raw);
        let p = params(max_blocks, limit, margin, 1);
        let a = search(&cands, target, p);
        let b = search(&cands, target, p);
        prop_assert_eq!(a.pool.solutions(), b.pool.solutions());
        prop_assert_eq!(a.stats.nodes, b.stats.nodes);
    }

    #[test]
    fn more_blocks_never_worsen_best((raw, target, max_blocks, limit, margin) in case()) {
        let cands = CandidateSet::from_units(raw);
        let best = |m: usize| {
            search(&cands, target, params(m, limit, margin, 0))
                .pool
                .best()
                .map(|s| s.error)
                .unwrap_or(u64::MAX)
        };
        prop_assert!(best(max_blocks + 1) <= best(max_blocks));
    }
}
