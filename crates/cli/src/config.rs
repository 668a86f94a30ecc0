//! Solve configuration: defaults, optional JSON file, then CLI overrides.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use blockstack::api::{FixedScale, SearchCfg, DEFAULT_SCALE};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolveConfig {
    pub max_blocks: usize,
    pub limit: usize,
    /// Fixed-point factor (units per working unit).
    pub scale: u64,
    /// Soft deadline in milliseconds; `null` searches exhaustively.
    pub budget_ms: Option<u64>,
    /// Overshoot margin in the target's unit.
    pub margin: f64,
    /// Near-exact tolerance in fixed-point units.
    pub exact_tolerance: u64,
    pub check_interval: u32,
}

impl Default for SolveConfig {
    fn default() -> Self {
        let search = SearchCfg::default();
        Self {
            max_blocks: 5,
            limit: 5,
            scale: DEFAULT_SCALE,
            budget_ms: search.time_budget.map(|d| d.as_millis() as u64),
            margin: search.overshoot_margin,
            exact_tolerance: search.exact_tolerance,
            check_interval: search.check_interval,
        }
    }
}

impl SolveConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn fixed_scale(&self) -> Result<FixedScale> {
        FixedScale::new(self.scale).ok_or_else(|| anyhow!("scale must be a positive integer"))
    }

    pub fn search_cfg(&self) -> SearchCfg {
        SearchCfg {
            time_budget: self.budget_ms.map(Duration::from_millis),
            check_interval: self.check_interval,
            exact_tolerance: self.exact_tolerance,
            overshoot_margin: self.margin,
        }
    }
}
