//! Value classifier — decides what kind of control a raw custom property value wants.
//!
//! Priority order:
//! 1. Color (hex, `rgb[a](`, `hsl[a](`, named colors)
//! 2. Unit-less number (`1.4`, `-2`, `.5`)
//! 3. Number immediately followed by a unit present in the range table (`12px`, `50%`)
//!
//! Anything else (keywords, shorthands, `calc()`, `var()`, scientific notation)
//! is undetected and yields `None`.

use crate::colors::is_color;
use crate::units::UnitRangeTable;
use regex::Regex;
use std::sync::LazyLock;

static UNITLESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d*\.?\d+$").expect("unit-less number regex"));

static WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d*\.?\d+)([a-zA-Z%]+)$").expect("number-with-unit regex")
});

/// Outcome of classifying a single value.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A color literal, kept exactly as written.
    Color(String),
    /// A number with its unit token (empty for unit-less).
    Numeric { value: f64, unit: String },
}

/// Classify a raw serialized value against the unit table in effect.
///
/// Surrounding whitespace is ignored; an empty value never classifies.
pub fn classify(raw: &str, table: &UnitRangeTable) -> Option<Classification> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if is_color(value) {
        return Some(Classification::Color(value.to_string()));
    }

    if UNITLESS.is_match(value) {
        return parse_number(value).map(|value| Classification::Numeric {
            value,
            unit: String::new(),
        });
    }

    let caps = WITH_UNIT.captures(value)?;
    let unit = &caps[2];
    if !table.contains(unit) {
        return None;
    }
    parse_number(&caps[1]).map(|value| Classification::Numeric {
        value,
        unit: unit.to_string(),
    })
}

/// Overlong digit strings overflow to infinity; those are not sliders.
fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
