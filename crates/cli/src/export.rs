//! Result rows and tabular I/O (CSV / Parquet export, CSV block lists).

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use blockstack::api::StackReport;
use polars::prelude::*;
use serde::Serialize;

use crate::units::LengthUnit;

/// One ranked solution in display units.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultRow {
    pub rank: u32,
    pub unit: LengthUnit,
    pub total: f64,
    pub error: f64,
    /// `total` expressed in the other unit.
    pub total_alt: f64,
    /// Block sizes, largest first.
    pub blocks: Vec<f64>,
}

impl ResultRow {
    pub fn from_report(report: &StackReport, unit: LengthUnit) -> Vec<Self> {
        report
            .solutions
            .iter()
            .enumerate()
            .map(|(i, s)| Self {
                rank: i as u32 + 1,
                unit,
                total: s.total,
                error: s.error,
                total_alt: unit.convert(s.total, unit.other()),
                blocks: s.blocks.clone(),
            })
            .collect()
    }

    /// Blocks joined as `a;b;c` with unit precision.
    pub fn blocks_joined(&self) -> String {
        self.blocks
            .iter()
            .map(|&b| self.unit.format(b))
            .collect::<Vec<_>>()
            .join(";")
    }
}

pub fn results_frame(rows: &[ResultRow]) -> PolarsResult<DataFrame> {
    let alt_name = rows
        .first()
        .map(|r| format!("total_{}", r.unit.other()))
        .unwrap_or_else(|| "total_alt".to_string());
    let df = df!(
        "rank" => rows.iter().map(|r| r.rank).collect::<Vec<u32>>(),
        "unit" => rows.iter().map(|r| r.unit.to_string()).collect::<Vec<String>>(),
        "total" => rows.iter().map(|r| r.total).collect::<Vec<f64>>(),
        "error" => rows.iter().map(|r| r.error).collect::<Vec<f64>>(),
        "count" => rows.iter().map(|r| r.blocks.len() as u32).collect::<Vec<u32>>(),
        "blocks" => rows.iter().map(ResultRow::blocks_joined).collect::<Vec<String>>(),
        alt_name.as_str() => rows.iter().map(|r| r.total_alt).collect::<Vec<f64>>()
    )?;
    Ok(df)
}

/// Write rows as CSV or Parquet, chosen by the file extension.
pub fn write_results(path: &Path, rows: &[ResultRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut df = results_frame(rows)?;
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .with_context(|| format!("writing {}", path.display()))?,
        Some("parquet") => {
            ParquetWriter::new(&mut file)
                .finish(&mut df)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        _ => bail!(
            "unsupported output extension for {} (use .csv or .parquet)",
            path.display()
        ),
    }
    Ok(())
}

/// Read block sizes from the first column of a CSV file with a header row.
pub fn read_blocks(path: &Path) -> Result<Vec<f64>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading blocks from {}", path.display()))?;
    let Some(first) = df.get_columns().first() else {
        bail!("{} has no columns", path.display());
    };
    let values = first
        .cast(&DataType::Float64)
        .with_context(|| format!("column {} is not numeric", first.name()))?;
    let blocks: Vec<f64> = values.f64()?.into_iter().flatten().collect();
    tracing::info!(path = %path.display(), rows = df.height(), blocks = blocks.len(), "read_blocks");
    Ok(blocks)
}
