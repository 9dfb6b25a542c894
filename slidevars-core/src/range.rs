//! Range inference — turns an observed number and its unit into slider bounds.
//!
//! Rules:
//! - `min` is always 0 (negative observations are clamped away).
//! - Nonzero observations rescale: `max = ceil(|value| * 10)`.
//! - A zero observation keeps the table's baseline `max`.
//! - `step` comes from the table entry, falling back to 0.1 (unit-less) or 1.
//! - `default` is the observation clamped into `[min, max]`.
//! - An observation whose rescaled `max` overflows is not a slider.

use crate::units::{UnitRange, UnitRangeTable};

/// Baseline used when the unit-less row is missing from the table in effect.
pub const UNITLESS_FALLBACK: UnitRange = UnitRange::new(0.0, 5.0, 0.1);

pub const UNITLESS_FALLBACK_STEP: f64 = 0.1;
pub const UNIT_FALLBACK_STEP: f64 = 1.0;

/// Headroom multiplier applied to nonzero observations.
pub const HEADROOM: f64 = 10.0;

/// Slider bounds inferred for one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferredRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

/// Infer slider bounds for `value` in `unit`.
///
/// Returns `None` when a non-empty unit has no entry in `table`, or when the
/// rescaled bound no longer fits in an `f64`.
pub fn infer_range(unit: &str, value: f64, table: &UnitRangeTable) -> Option<InferredRange> {
    let baseline = match table.get(unit) {
        Some(range) => *range,
        None if unit.is_empty() => UNITLESS_FALLBACK,
        None => return None,
    };

    let min = 0.0;
    let max = if value != 0.0 {
        (value.abs() * HEADROOM).ceil()
    } else {
        baseline.max
    };
    if !max.is_finite() {
        return None;
    }
    let step = baseline.step.unwrap_or(if unit.is_empty() {
        UNITLESS_FALLBACK_STEP
    } else {
        UNIT_FALLBACK_STEP
    });

    Some(InferredRange {
        min,
        max,
        step,
        default: clamp(value, min, max),
    })
}

/// Clamp without panicking on an inverted range, normalizing `-0` to `0`.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let clamped = value.max(min).min(max);
    if clamped == 0.0 {
        0.0
    } else {
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin(unit: &str, value: f64) -> InferredRange {
        infer_range(unit, value, UnitRangeTable::builtin()).unwrap()
    }

    #[test]
    fn px_rescales_to_ten_times_observation() {
        let r = builtin("px", 45.0);
        assert_eq!(r.min, 0.0);
        assert_eq!(r.max, 450.0);
        assert_eq!(r.default, 45.0);
        assert_eq!(r.step, 1.0);
    }

    #[test]
    fn zero_keeps_table_max() {
        let r = builtin("px", 0.0);
        assert_eq!(r.max, 500.0);
        assert_eq!(r.default, 0.0);

        let r = builtin("", 0.0);
        assert_eq!(r.max, 5.0);
        assert_eq!(r.step, 0.1);
    }

    #[test]
    fn observations_above_table_max_still_rescale() {
        let r = builtin("deg", 400.0);
        assert_eq!(r.max, 4000.0);
        assert_eq!(r.default, 400.0);
    }

    #[test]
    fn fractional_observations_round_up() {
        let r = builtin("rem", 0.125);
        assert_eq!(r.max, 2.0);
        assert_eq!(r.default, 0.125);
        assert_eq!(r.step, 0.1);
    }

    #[test]
    fn negative_observations_clamp_to_zero() {
        let r = builtin("px", -8.0);
        assert_eq!(r.min, 0.0);
        assert_eq!(r.max, 80.0);
        assert_eq!(r.default, 0.0);
        assert!(r.default.is_sign_positive());
    }

    #[test]
    fn negative_zero_normalizes() {
        let r = builtin("", -0.0);
        assert_eq!(r.max, 5.0);
        assert!(r.default.is_sign_positive());
    }

    #[test]
    fn table_minimum_is_ignored() {
        // dpi's baseline minimum is 72; the slider still starts at 0.
        let r = builtin("dpi", 0.0);
        assert_eq!(r.min, 0.0);
        assert_eq!(r.max, 600.0);
    }

    #[test]
    fn missing_step_falls_back() {
        let mut table = UnitRangeTable::empty();
        table.insert(
            "px",
            UnitRange {
                min: 0.0,
                max: 100.0,
                step: None,
            },
        );
        table.insert(
            "",
            UnitRange {
                min: 0.0,
                max: 3.0,
                step: None,
            },
        );
        assert_eq!(infer_range("px", 0.0, &table).unwrap().step, 1.0);
        assert_eq!(infer_range("", 0.0, &table).unwrap().step, 0.1);
        assert_eq!(infer_range("", 0.0, &table).unwrap().max, 3.0);
    }

    #[test]
    fn unitless_falls_back_when_row_missing() {
        let r = infer_range("", 0.0, &UnitRangeTable::empty()).unwrap();
        assert_eq!(r.max, 5.0);
        assert_eq!(r.step, 0.1);
    }

    #[test]
    fn rescale_overflow_has_no_range() {
        assert_eq!(infer_range("px", 2e307, UnitRangeTable::builtin()), None);
        assert_eq!(infer_range("", -f64::MAX, UnitRangeTable::builtin()), None);
        assert!(infer_range("px", 1e307, UnitRangeTable::builtin()).is_some());
    }

    #[test]
    fn unknown_unit_has_no_range() {
        assert_eq!(infer_range("parsec", 1.0, UnitRangeTable::builtin()), None);
    }
}
