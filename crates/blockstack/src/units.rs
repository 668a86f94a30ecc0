//! Fixed-point boundary: real block sizes → canonical integer candidates.
//!
//! Purpose
//! - All search-internal totals and comparisons are integer arithmetic on
//!   `u64` "units". Floating point is touched only here, when converting
//!   caller values in and pool entries back out.
//!
//! Conventions
//! - Rounding uses `f64::round` (ties away from zero). Inputs are positive, so
//!   this is round-half-up on the magnitudes we accept.
//! - Values above `MAX_UNITS` are rejected so that sums of up to twenty blocks
//!   stay exact when converted back to `f64`.

use std::fmt;

/// Largest accepted candidate in units (2^53, the exact-integer range of `f64`).
pub const MAX_UNITS: u64 = 1 << 53;

/// Default scale: five decimal places of the working unit.
pub const DEFAULT_SCALE: u64 = 100_000;

/// Integer factor mapping a real length to units (`units = round(value × scale)`).
///
/// Invariant: non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedScale(u64);

impl FixedScale {
    /// Returns `None` for a zero factor.
    #[inline]
    pub fn new(factor: u64) -> Option<Self> {
        (factor > 0).then_some(Self(factor))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for FixedScale {
    fn default() -> Self {
        Self(DEFAULT_SCALE)
    }
}

impl fmt::Display for FixedScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical candidate list: unique, strictly positive, sorted descending.
///
/// Only constructed through [`normalize`] or [`CandidateSet::from_units`], both
/// of which establish the invariant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateSet {
    values: Vec<u64>,
}

impl CandidateSet {
    /// Build from raw unit values (zeros and values above `MAX_UNITS` dropped).
    pub fn from_units<I: IntoIterator<Item = u64>>(units: I) -> Self {
        let mut values: Vec<u64> = units
            .into_iter()
            .filter(|&u| u > 0 && u <= MAX_UNITS)
            .collect();
        values.sort_unstable_by(|a, b| b.cmp(a));
        values.dedup();
        Self { values }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Convert one real value to units; `None` if non-finite, non-positive,
/// rounds to zero, or exceeds `MAX_UNITS`.
pub fn to_units(value: f64, scale: FixedScale) -> Option<u64> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let scaled = (value * scale.get() as f64).round();
    if !scaled.is_finite() || scaled < 1.0 || scaled > MAX_UNITS as f64 {
        return None;
    }
    Some(scaled as u64)
}

/// Convert units back to a real value.
#[inline]
pub fn to_real(units: u64, scale: FixedScale) -> f64 {
    units as f64 / scale.get() as f64
}

/// Canonicalize arbitrary candidate magnitudes. Unusable entries are omitted.
pub fn normalize(values: &[f64], scale: FixedScale) -> CandidateSet {
    CandidateSet::from_units(values.iter().filter_map(|&v| to_units(v, scale)))
}
