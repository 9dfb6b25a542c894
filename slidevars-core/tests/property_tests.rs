//! Property tests for detection invariants.
//!
//! Uses proptest to verify:
//! 1. Color literals always classify as colors
//! 2. Range inference: min is 0, max follows the headroom rule, default in range
//! 3. Merge: explicit entries win field-for-field, merge is repeatable
//! 4. Scan is deterministic over an unchanged page

use proptest::prelude::*;
use slidevars_core::colors::NAMED_COLORS;
use slidevars_core::{
    classify, detect, infer_range, merge, scan, Classification, ColorDescriptor,
    ControlDescriptor, SliderDescriptor, StyleSnapshot, UnitRangeTable, VarConfig, ROOT_SCOPE,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_hex_color() -> impl Strategy<Value = String> {
    prop_oneof![
        "#[0-9a-fA-F]{3}",
        "#[0-9a-fA-F]{6}",
        "#[0-9a-fA-F]{8}",
    ]
}

fn arb_function_color() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["rgb(", "RGBA(", "hsl(", "Hsla("]),
        0u8..=255,
        0u8..=255,
        0u8..=255,
    )
        .prop_map(|(f, a, b, c)| format!("{f}{a}, {b}, {c})"))
}

fn arb_named_color() -> impl Strategy<Value = String> {
    (prop::sample::select(NAMED_COLORS.to_vec()), any::<bool>())
        .prop_map(|(name, upper)| if upper { name.to_uppercase() } else { name.to_string() })
}

fn arb_known_unit() -> impl Strategy<Value = String> {
    let units: Vec<String> = UnitRangeTable::builtin()
        .iter()
        .map(|(u, _)| u.to_string())
        .collect();
    prop::sample::select(units)
}

fn arb_observation() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        (-10_000i32..10_000).prop_map(|n| n as f64),
        (-10_000i32..10_000).prop_map(|n| n as f64 / 100.0),
    ]
}

fn arb_descriptor() -> impl Strategy<Value = ControlDescriptor> {
    prop_oneof![
        arb_hex_color().prop_map(|c| ColorDescriptor::new(c).into()),
        (0u32..100, 1u32..100, arb_known_unit()).prop_map(|(min, span, unit)| {
            SliderDescriptor::new(min as f64, (min + span) as f64, unit).into()
        }),
    ]
}

fn arb_config() -> impl Strategy<Value = VarConfig> {
    prop::collection::btree_map("--[a-e]{1,2}", arb_descriptor(), 0..8)
}

// ── 1. Classification ────────────────────────────────────────────────

proptest! {
    #[test]
    fn color_literals_classify_as_colors(
        color in prop_oneof![arb_hex_color(), arb_function_color(), arb_named_color()],
    ) {
        let result = classify(&color, UnitRangeTable::builtin());
        prop_assert_eq!(result, Some(Classification::Color(color.clone())));
    }

    #[test]
    fn numbers_with_known_units_are_numeric(
        n in -100_000i32..100_000,
        unit in arb_known_unit(),
    ) {
        let raw = format!("{n}{unit}");
        let result = classify(&raw, UnitRangeTable::builtin());
        prop_assert_eq!(
            result,
            Some(Classification::Numeric { value: n as f64, unit: unit.clone() })
        );
    }

    /// Arbitrary text never panics and never yields a numeric with an unknown unit.
    #[test]
    fn classification_is_total(raw in ".{0,24}") {
        let table = UnitRangeTable::builtin();
        if let Some(Classification::Numeric { unit, .. }) = classify(&raw, table) {
            prop_assert!(table.contains(&unit) || unit.is_empty());
        }
    }
}

// ── 2. Range inference ───────────────────────────────────────────────

proptest! {
    #[test]
    fn headroom_rule(value in arb_observation(), unit in arb_known_unit()) {
        let table = UnitRangeTable::builtin();
        let baseline = *table.get(&unit).unwrap();
        let r = infer_range(&unit, value, table).unwrap();

        prop_assert_eq!(r.min, 0.0);
        if value == 0.0 {
            prop_assert_eq!(r.max, baseline.max);
        } else {
            prop_assert_eq!(r.max, (value.abs() * 10.0).ceil());
        }
        prop_assert!(r.min <= r.default && r.default <= r.max);
        if value > 0.0 {
            prop_assert_eq!(r.default, value);
        }
    }

    #[test]
    fn detected_sliders_satisfy_descriptor_invariants(
        value in arb_observation(),
        unit in arb_known_unit(),
    ) {
        let raw = format!("{value}{unit}");
        if let Some(descriptor) = detect(&raw, UnitRangeTable::builtin()) {
            prop_assert!(descriptor.validate().is_ok(), "{:?}", descriptor);
        }
    }
}

// ── 3. Merge ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn explicit_entries_win(auto in arb_config(), explicit in arb_config()) {
        let merged = merge(auto.clone(), &explicit);

        for (name, descriptor) in &explicit {
            prop_assert_eq!(&merged[name], descriptor);
        }
        for (name, descriptor) in &auto {
            if !explicit.contains_key(name) {
                prop_assert_eq!(&merged[name], descriptor);
            }
        }
        prop_assert!(merged.keys().all(|k| auto.contains_key(k) || explicit.contains_key(k)));
    }

    #[test]
    fn merge_is_repeatable(auto in arb_config(), explicit in arb_config()) {
        let once = merge(auto.clone(), &explicit);
        let twice = merge(auto.clone(), &explicit);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(merge(once.clone(), &explicit), once);
    }
}

// ── 4. Scan determinism ──────────────────────────────────────────────

proptest! {
    #[test]
    fn scan_is_deterministic(
        props in prop::collection::btree_map(
            "--[a-z]{1,6}",
            prop_oneof![
                arb_hex_color(),
                arb_named_color(),
                (0u16..2000, arb_known_unit()).prop_map(|(n, u)| format!("{n}{u}")),
                Just("auto".to_string()),
            ],
            0..12,
        ),
    ) {
        let page = props
            .iter()
            .fold(StyleSnapshot::new(), |page, (n, v)| page.with_root_property(n, v));

        let first = scan(&page, ROOT_SCOPE, None);
        let second = scan(&page, ROOT_SCOPE, None);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.len() <= props.len());
        prop_assert!(first.values().all(|d| d.scope().is_none()));
    }
}
