//! Stack a 3.1416" target from the 81-piece inch set and time it.
//!
//! Purpose
//! - Provide a reproducible, code-backed data point for "how long does a
//!   realistic five-block search take, and does it hit the budget?"
//!
//! Code: crates/blockstack/src/search/dfs.rs::search

use std::time::Instant;

use blockstack::{solve, FixedScale, SearchCfg, StackRequest};

fn main() {
    let req = StackRequest {
        candidates: inch_81(),
        target: 3.1416,
        max_blocks: 5,
        result_limit: 5,
        scale: FixedScale::default(),
    };
    let start = Instant::now();
    let report = solve(&req, SearchCfg::default()).expect("valid request");
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    println!(
        "candidates={} target_units={} nodes={} pruned={} skipped={} timed_out={}",
        report.candidate_count,
        report.target_units,
        report.stats.nodes,
        report.stats.pruned,
        report.stats.skipped,
        report.stats.timed_out
    );
    for (rank, s) in report.solutions.iter().enumerate() {
        println!(
            "#{} total={:.5} error={:.5} blocks={:?}",
            rank + 1,
            s.total,
            s.error,
            s.blocks
        );
    }
    println!("search_time_ms={elapsed_ms:.3}");
}

fn inch_81() -> Vec<f64> {
    let mut v: Vec<f64> = (1..=9).map(|i| 0.1 + i as f64 * 0.0001).collect();
    v.extend((101..=149).map(|i| i as f64 * 0.001));
    v.extend((1..=19).map(|i| i as f64 * 0.05));
    v.extend([1.0, 2.0, 3.0, 4.0]);
    v
}
