//! Config merge — explicit descriptors win over auto-detected ones.

use crate::descriptor::VarConfig;

/// Shallow union of `auto` and `explicit`.
///
/// A key present in both takes the explicit descriptor whole; fields are never
/// combined across the two.
pub fn merge(auto: VarConfig, explicit: &VarConfig) -> VarConfig {
    let mut merged = auto;
    merged.extend(explicit.iter().map(|(name, d)| (name.clone(), d.clone())));
    merged
}

/// Auto-detection runs when forced or when nothing was configured explicitly.
pub fn should_auto_detect(explicit: &VarConfig, force: bool) -> bool {
    force || explicit.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ColorDescriptor, ControlDescriptor, SliderDescriptor};

    #[test]
    fn explicit_entry_replaces_auto_entry_whole() {
        let mut auto = VarConfig::new();
        auto.insert(
            "--bg".into(),
            ColorDescriptor::new("#667eea").with_scope("#demo").into(),
        );
        auto.insert(
            "--radius".into(),
            SliderDescriptor::new(0.0, 120.0, "px").with_default(12.0).into(),
        );

        let mut explicit = VarConfig::new();
        explicit.insert("--bg".into(), ColorDescriptor::new("#000").into());

        let merged = merge(auto.clone(), &explicit);
        assert_eq!(merged.len(), 2);
        // No scope carried over from the auto-detected entry.
        assert_eq!(merged["--bg"], explicit["--bg"]);
        assert_eq!(merged["--radius"], auto["--radius"]);
    }

    #[test]
    fn explicit_may_change_control_kind() {
        let mut auto = VarConfig::new();
        auto.insert("--size".into(), ColorDescriptor::new("red").into());
        let mut explicit = VarConfig::new();
        explicit.insert(
            "--size".into(),
            SliderDescriptor::new(0.0, 10.0, "rem").into(),
        );
        let merged = merge(auto, &explicit);
        assert!(matches!(merged["--size"], ControlDescriptor::Slider(_)));
    }

    #[test]
    fn empty_sides() {
        let mut auto = VarConfig::new();
        auto.insert("--a".into(), ColorDescriptor::new("red").into());
        assert_eq!(merge(auto.clone(), &VarConfig::new()), auto);
        assert_eq!(merge(VarConfig::new(), &auto), auto);
    }

    #[test]
    fn auto_detect_trigger() {
        let mut explicit = VarConfig::new();
        assert!(should_auto_detect(&explicit, false));
        explicit.insert("--a".into(), ColorDescriptor::new("red").into());
        assert!(!should_auto_detect(&explicit, false));
        assert!(should_auto_detect(&explicit, true));
    }
}
