//! Built-in gauge block sets.
//!
//! Sizes are generated from integer ladders so every block is the nearest
//! `f64` to its nominal value (no accumulated stepping error).

use crate::units::LengthUnit;

/// A named set of blocks in its native unit.
#[derive(Clone, Copy, Debug)]
pub struct GaugeSet {
    pub name: &'static str,
    pub unit: LengthUnit,
    pub description: &'static str,
    build: fn() -> Vec<f64>,
}

impl GaugeSet {
    /// Block sizes in the set's native unit, in catalog order.
    pub fn blocks(&self) -> Vec<f64> {
        (self.build)()
    }

    /// Block sizes converted to `unit`.
    pub fn blocks_in(&self, unit: LengthUnit) -> Vec<f64> {
        self.blocks()
            .into_iter()
            .map(|b| self.unit.convert(b, unit))
            .collect()
    }
}

pub const SETS: &[GaugeSet] = &[
    GaugeSet {
        name: "inch-81",
        unit: LengthUnit::Inch,
        description: "81-piece inch set: .1001-.1009, .101-.149, .050-.950, 1-4",
        build: inch_81,
    },
    GaugeSet {
        name: "metric-87",
        unit: LengthUnit::Millimeter,
        description: "87-piece metric set: 1.001-1.009, 1.01-1.49, 0.5-9.5, 10-100",
        build: metric_87,
    },
    GaugeSet {
        name: "metric-46",
        unit: LengthUnit::Millimeter,
        description: "46-piece metric set: 1.001-1.009, 1.01-1.09, 1.1-1.9, 1-9, 10-100",
        build: metric_46,
    },
];

pub fn find(name: &str) -> Option<&'static GaugeSet> {
    SETS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// Default set for a target unit.
pub fn default_for(unit: LengthUnit) -> &'static GaugeSet {
    match unit {
        LengthUnit::Inch => &SETS[0],
        LengthUnit::Millimeter => &SETS[1],
    }
}

/// `lo..=hi` stepping by `step`, each divided by `denom`.
fn ladder(lo: u32, hi: u32, step: usize, denom: f64) -> impl Iterator<Item = f64> {
    (lo..=hi).step_by(step).map(move |i| f64::from(i) / denom)
}

fn inch_81() -> Vec<f64> {
    ladder(1001, 1009, 1, 10_000.0)
        .chain(ladder(101, 149, 1, 1_000.0))
        .chain(ladder(50, 950, 50, 1_000.0))
        .chain(ladder(1, 4, 1, 1.0))
        .collect()
}

fn metric_87() -> Vec<f64> {
    ladder(1001, 1009, 1, 1_000.0)
        .chain(ladder(101, 149, 1, 100.0))
        .chain(ladder(5, 95, 5, 10.0))
        .chain(ladder(10, 100, 10, 1.0))
        .collect()
}

fn metric_46() -> Vec<f64> {
    ladder(1001, 1009, 1, 1_000.0)
        .chain(ladder(101, 109, 1, 100.0))
        .chain(ladder(11, 19, 1, 10.0))
        .chain(ladder(1, 9, 1, 1.0))
        .chain(ladder(10, 100, 10, 1.0))
        .collect()
}
