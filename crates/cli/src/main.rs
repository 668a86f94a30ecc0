use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use blockstack::api::{solve, StackReport, StackRequest};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;

mod catalog;
mod config;
mod display;
mod export;
mod provenance;
mod units;

use config::SolveConfig;
use export::ResultRow;
use provenance::Payload;
use units::LengthUnit;

#[derive(Parser)]
#[command(name = "blockstack-cli")]
#[command(about = "Find gauge block stacks that best approximate a target length")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Search for block stacks matching a target length
    Solve(SolveArgs),
    /// List built-in gauge block sets, or the blocks of one set
    Catalog {
        #[arg(long)]
        name: Option<String>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
struct SolveArgs {
    /// Target length, in `--unit`
    #[arg(long)]
    target: f64,
    #[arg(long, value_enum, default_value_t = LengthUnit::Inch)]
    unit: LengthUnit,
    /// Built-in set name (see `catalog`); default depends on `--unit`
    #[arg(long, conflicts_with_all = ["blocks", "blocks_file"])]
    set: Option<String>,
    /// Comma-separated block sizes, in `--unit`
    #[arg(long, value_delimiter = ',', conflicts_with = "blocks_file")]
    blocks: Option<Vec<f64>>,
    /// CSV file whose first column lists block sizes, in `--unit`
    #[arg(long)]
    blocks_file: Option<PathBuf>,
    #[arg(long)]
    max_blocks: Option<usize>,
    #[arg(long)]
    limit: Option<usize>,
    #[arg(long)]
    scale: Option<u64>,
    #[arg(long, conflicts_with = "no_budget")]
    budget_ms: Option<u64>,
    /// Search exhaustively (reproducible, may be slow)
    #[arg(long)]
    no_budget: bool,
    /// Overshoot margin, in `--unit`
    #[arg(long)]
    margin: Option<f64>,
    /// JSON config file; explicit flags win
    #[arg(long)]
    config: Option<PathBuf>,
    /// Export results (.csv or .parquet) with a provenance sidecar
    #[arg(long)]
    out: Option<PathBuf>,
    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl SolveArgs {
    fn resolve_config(&self) -> Result<SolveConfig> {
        let mut cfg = match &self.config {
            Some(path) => SolveConfig::load(path)?,
            None => SolveConfig::default(),
        };
        if let Some(v) = self.max_blocks {
            cfg.max_blocks = v;
        }
        if let Some(v) = self.limit {
            cfg.limit = v;
        }
        if let Some(v) = self.scale {
            cfg.scale = v;
        }
        if let Some(v) = self.budget_ms {
            cfg.budget_ms = Some(v);
        }
        if self.no_budget {
            cfg.budget_ms = None;
        }
        if let Some(v) = self.margin {
            cfg.margin = v;
        }
        Ok(cfg)
    }

    /// Candidate sizes in the target unit, plus a label for logs and provenance.
    fn resolve_candidates(&self) -> Result<(String, Vec<f64>)> {
        if let Some(blocks) = &self.blocks {
            return Ok(("custom".to_string(), blocks.clone()));
        }
        if let Some(path) = &self.blocks_file {
            return Ok((path.display().to_string(), export::read_blocks(path)?));
        }
        let set = match &self.set {
            Some(name) => match catalog::find(name) {
                Some(set) => set,
                None => bail!("unknown set {name:?}; run `blockstack-cli catalog` for the list"),
            },
            None => catalog::default_for(self.unit),
        };
        Ok((set.name.to_string(), set.blocks_in(self.unit)))
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve(args) => run_solve(args),
        Action::Catalog { name } => list_catalog(name),
        Action::Report => report(),
    }
}

fn run_solve(args: SolveArgs) -> Result<()> {
    let cfg = args.resolve_config()?;
    let (source, candidates) = args.resolve_candidates()?;
    let req = StackRequest {
        candidates,
        target: args.target,
        max_blocks: cfg.max_blocks,
        result_limit: cfg.limit,
        scale: cfg.fixed_scale()?,
    };
    tracing::info!(
        target = args.target,
        unit = %args.unit,
        source,
        candidates = req.candidates.len(),
        max_blocks = cfg.max_blocks,
        limit = cfg.limit,
        scale = cfg.scale,
        budget_ms = ?cfg.budget_ms,
        "solve"
    );
    let report = solve(&req, cfg.search_cfg())
        .with_context(|| format!("search not run for target {} {}", args.target, args.unit))?;
    log_stats(&report, &cfg);

    let rows = ResultRow::from_report(&report, args.unit);
    if args.json {
        let doc = json!({
            "target": args.target,
            "unit": args.unit,
            "source": source,
            "timed_out": report.stats.timed_out,
            "solutions": rows,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!(
            "{}",
            display::render_table(args.target, args.unit, cfg.max_blocks, &rows)
        );
    }

    if let Some(out) = &args.out {
        export::write_results(out, &rows)?;
        let params = json!({
            "target": args.target,
            "unit": args.unit,
            "source": source,
            "config": cfg,
        });
        let stats = json!({
            "nodes": report.stats.nodes,
            "pruned": report.stats.pruned,
            "skipped": report.stats.skipped,
            "elapsed_ms": report.stats.elapsed.as_secs_f64() * 1e3,
            "timed_out": report.stats.timed_out,
        });
        let prov = provenance::write_sidecar(out, Payload::new(params).with_stats(stats))?;
        tracing::info!(out = %out.display(), provenance = %prov.display(), rows = rows.len(), "export");
    }
    Ok(())
}

fn log_stats(report: &StackReport, cfg: &SolveConfig) {
    let stats = report.stats;
    tracing::info!(
        nodes = stats.nodes,
        pruned = stats.pruned,
        skipped = stats.skipped,
        elapsed_ms = stats.elapsed.as_secs_f64() * 1e3,
        found = report.solutions.len(),
        "search_done"
    );
    if stats.timed_out {
        tracing::warn!(
            budget_ms = ?cfg.budget_ms,
            "time budget expired; results may not be the best possible"
        );
    }
}

fn list_catalog(name: Option<String>) -> Result<()> {
    match name {
        None => {
            for set in catalog::SETS {
                println!("{:<10} {:<3} {}", set.name, set.unit.symbol(), set.description);
            }
        }
        Some(name) => {
            let Some(set) = catalog::find(&name) else {
                bail!("unknown set {name:?}");
            };
            tracing::info!(set = set.name, "catalog");
            for b in set.blocks() {
                println!("{}", set.unit.format(b));
            }
        }
    }
    Ok(())
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::header())?);
    Ok(())
}
