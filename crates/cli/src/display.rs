//! Plain-text ranking with both units side by side.

use std::fmt::Write;

use crate::export::ResultRow;
use crate::units::LengthUnit;

pub fn render_table(target: f64, unit: LengthUnit, max_blocks: usize, rows: &[ResultRow]) -> String {
    let alt = unit.other();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "target {} {unit} ({} {alt})",
        unit.format(target),
        alt.format(unit.convert(target, alt))
    );
    if rows.is_empty() {
        let _ = writeln!(out, "no combination found within {max_blocks} blocks");
        return out;
    }
    for r in rows {
        let blocks = r
            .blocks
            .iter()
            .map(|&b| unit.format(b))
            .collect::<Vec<_>>()
            .join(" + ");
        let _ = writeln!(
            out,
            "#{:<2} total {} {unit} ({} {alt})  error {} {unit}  [{}] {}",
            r.rank,
            unit.format(r.total),
            alt.format(r.total_alt),
            unit.format(r.error),
            r.blocks.len(),
            blocks
        );
    }
    out
}
