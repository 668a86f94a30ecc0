//! Length units for display and catalog conversion (1 in = 25.4 mm exactly).

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const MM_PER_INCH: f64 = 25.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum LengthUnit {
    #[value(name = "in")]
    #[serde(rename = "in")]
    Inch,
    #[value(name = "mm")]
    #[serde(rename = "mm")]
    Millimeter,
}

impl LengthUnit {
    /// The unit shown next to this one in dual-unit output.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Self::Inch => Self::Millimeter,
            Self::Millimeter => Self::Inch,
        }
    }

    /// Convert `value` expressed in `self` into `to`.
    #[inline]
    pub fn convert(self, value: f64, to: Self) -> f64 {
        match (self, to) {
            (Self::Inch, Self::Millimeter) => value * MM_PER_INCH,
            (Self::Millimeter, Self::Inch) => value / MM_PER_INCH,
            _ => value,
        }
    }

    /// Decimals customary for gauge work: 0.0001 in, 0.001 mm (one extra digit shown).
    #[inline]
    pub fn decimals(self) -> usize {
        match self {
            Self::Inch => 5,
            Self::Millimeter => 4,
        }
    }

    pub fn format(self, value: f64) -> String {
        format!("{:.*}", self.decimals(), value)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Inch => "in",
            Self::Millimeter => "mm",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
