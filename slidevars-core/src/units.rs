//! Unit range table — baseline slider ranges per CSS unit token.
//!
//! The built-in table is a process-wide constant. Callers never mutate it;
//! per-call overrides produce a new table via [`UnitRangeTable::with_overrides`].
//!
//! Unit tokens are case-sensitive: `Q`, `Hz` and `kHz` are looked up verbatim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Baseline range for one unit token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitRange {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl UnitRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step: Some(step),
        }
    }
}

// ── Built-in ranges ──────────────────────────────────────────────────

/// `(unit, min, max, step)` rows of the built-in table.
const BUILTIN_RANGES: &[(&str, f64, f64, f64)] = &[
    // Unit-less numbers (line-height: 1.4, opacity: 0.8)
    ("", 0.0, 5.0, 0.1),
    // Absolute lengths
    ("px", 0.0, 500.0, 1.0),
    ("cm", 0.0, 50.0, 0.1),
    ("mm", 0.0, 500.0, 1.0),
    ("in", 0.0, 20.0, 0.1),
    ("pt", 0.0, 100.0, 1.0),
    ("pc", 0.0, 50.0, 1.0),
    ("Q", 0.0, 1000.0, 1.0),
    // Font-relative lengths
    ("em", 0.0, 10.0, 0.1),
    ("rem", 0.0, 10.0, 0.1),
    ("ex", 0.0, 100.0, 1.0),
    ("rex", 0.0, 100.0, 1.0),
    ("cap", 0.0, 100.0, 1.0),
    ("rcap", 0.0, 100.0, 1.0),
    ("ch", 0.0, 100.0, 1.0),
    ("rch", 0.0, 100.0, 1.0),
    ("ic", 0.0, 100.0, 1.0),
    ("ric", 0.0, 100.0, 1.0),
    ("lh", 0.0, 10.0, 0.1),
    ("rlh", 0.0, 10.0, 0.1),
    // Viewport-percentage lengths
    ("vw", 0.0, 100.0, 1.0),
    ("vh", 0.0, 100.0, 1.0),
    ("vi", 0.0, 100.0, 1.0),
    ("vb", 0.0, 100.0, 1.0),
    ("vmin", 0.0, 100.0, 1.0),
    ("vmax", 0.0, 100.0, 1.0),
    ("svw", 0.0, 100.0, 1.0),
    ("svh", 0.0, 100.0, 1.0),
    ("svi", 0.0, 100.0, 1.0),
    ("svb", 0.0, 100.0, 1.0),
    ("svmin", 0.0, 100.0, 1.0),
    ("svmax", 0.0, 100.0, 1.0),
    ("lvw", 0.0, 100.0, 1.0),
    ("lvh", 0.0, 100.0, 1.0),
    ("lvi", 0.0, 100.0, 1.0),
    ("lvb", 0.0, 100.0, 1.0),
    ("lvmin", 0.0, 100.0, 1.0),
    ("lvmax", 0.0, 100.0, 1.0),
    ("dvw", 0.0, 100.0, 1.0),
    ("dvh", 0.0, 100.0, 1.0),
    ("dvi", 0.0, 100.0, 1.0),
    ("dvb", 0.0, 100.0, 1.0),
    ("dvmin", 0.0, 100.0, 1.0),
    ("dvmax", 0.0, 100.0, 1.0),
    // Container query lengths
    ("cqw", 0.0, 100.0, 1.0),
    ("cqh", 0.0, 100.0, 1.0),
    ("cqi", 0.0, 100.0, 1.0),
    ("cqb", 0.0, 100.0, 1.0),
    ("cqmin", 0.0, 100.0, 1.0),
    ("cqmax", 0.0, 100.0, 1.0),
    // Angles
    ("deg", 0.0, 360.0, 1.0),
    ("grad", 0.0, 400.0, 1.0),
    ("rad", 0.0, 6.28, 0.01),
    ("turn", 0.0, 1.0, 0.01),
    // Time
    ("s", 0.0, 10.0, 0.1),
    ("ms", 0.0, 5000.0, 50.0),
    // Frequency
    ("Hz", 0.0, 20000.0, 10.0),
    ("kHz", 0.0, 20.0, 0.1),
    // Resolution
    ("dpi", 72.0, 600.0, 1.0),
    ("dpcm", 28.0, 236.0, 1.0),
    ("dppx", 1.0, 4.0, 0.1),
    // Percentage
    ("%", 0.0, 100.0, 1.0),
    // Grid fractions
    ("fr", 0.0, 10.0, 0.1),
];

static BUILTIN: LazyLock<UnitRangeTable> = LazyLock::new(|| UnitRangeTable {
    ranges: BUILTIN_RANGES
        .iter()
        .map(|&(unit, min, max, step)| (unit.to_string(), UnitRange::new(min, max, step)))
        .collect(),
});

// ── Table ────────────────────────────────────────────────────────────

/// Mapping from unit token (empty string for unit-less) to its baseline range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitRangeTable {
    ranges: BTreeMap<String, UnitRange>,
}

impl UnitRangeTable {
    /// The shared built-in table.
    pub fn builtin() -> &'static UnitRangeTable {
        &BUILTIN
    }

    /// An empty table, useful as an override set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return a new table with `overrides` layered on top of `self`.
    ///
    /// Override entries replace matching keys wholesale; `self` is untouched.
    pub fn with_overrides(&self, overrides: &UnitRangeTable) -> UnitRangeTable {
        let mut ranges = self.ranges.clone();
        for (unit, range) in &overrides.ranges {
            ranges.insert(unit.clone(), *range);
        }
        UnitRangeTable { ranges }
    }

    /// Built-in table with optional overrides applied.
    pub fn resolve(overrides: Option<&UnitRangeTable>) -> UnitRangeTable {
        match overrides {
            Some(o) => Self::builtin().with_overrides(o),
            None => Self::builtin().clone(),
        }
    }

    pub fn get(&self, unit: &str) -> Option<&UnitRange> {
        self.ranges.get(unit)
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.ranges.contains_key(unit)
    }

    pub fn insert(&mut self, unit: impl Into<String>, range: UnitRange) {
        self.ranges.insert(unit.into(), range);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitRange)> {
        self.ranges.iter().map(|(u, r)| (u.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
