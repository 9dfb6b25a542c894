//! Auto-detect scan — builds a [`VarConfig`] from an element's computed style.
//!
//! Every custom property visible on the scope element is trimmed, classified,
//! and turned into a descriptor. Undetected values are skipped without error.
//! A scope that matches nothing yields an empty mapping and a host warning.

use crate::classify::{classify, Classification};
use crate::descriptor::{
    is_custom_property, ColorDescriptor, ControlDescriptor, SliderDescriptor, VarConfig,
};
use crate::host::{ComputedStyle, Diagnostics};
use crate::range::infer_range;
use crate::units::UnitRangeTable;

/// The document root scope; descriptors detected here carry no explicit scope.
pub const ROOT_SCOPE: &str = ":root";

/// Outcome of a scan, including what was left out and why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    pub scope: String,
    /// False when the scope selector matched no element.
    pub scope_found: bool,
    pub config: VarConfig,
    /// Properties whose values could not be classified, with their trimmed values.
    pub skipped: Vec<(String, String)>,
}

/// Scan `scope` and return the detected descriptors.
///
/// `overrides` are layered on top of the built-in unit table for this call only.
pub fn scan<H>(host: &H, scope: &str, overrides: Option<&UnitRangeTable>) -> VarConfig
where
    H: ComputedStyle + Diagnostics + ?Sized,
{
    scan_report(host, scope, overrides).config
}

/// Like [`scan`], but also reports skipped properties and scope resolution.
pub fn scan_report<H>(host: &H, scope: &str, overrides: Option<&UnitRangeTable>) -> ScanReport
where
    H: ComputedStyle + Diagnostics + ?Sized,
{
    let mut report = ScanReport {
        scope: scope.to_string(),
        ..ScanReport::default()
    };

    let Some(element) = host.query(scope) else {
        host.warn(&format!("could not find element matching \"{scope}\""));
        return report;
    };
    report.scope_found = true;

    let table = UnitRangeTable::resolve(overrides);
    let descriptor_scope = (scope != ROOT_SCOPE).then(|| scope.to_string());

    for name in host.custom_property_names(&element) {
        if !is_custom_property(&name) {
            continue;
        }
        let Some(raw) = host.property_value(&element, &name) else {
            continue;
        };
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }

        match detect(value, &table) {
            Some(descriptor) => {
                report
                    .config
                    .insert(name, descriptor.with_scope(descriptor_scope.clone()));
            }
            None => {
                tracing::debug!(
                    target: "slidevars",
                    property = %name,
                    value,
                    "undetected value skipped"
                );
                report.skipped.push((name, value.to_string()));
            }
        }
    }

    tracing::debug!(
        target: "slidevars",
        scope,
        detected = report.config.len(),
        skipped = report.skipped.len(),
        "scan complete"
    );
    report
}

/// Build an unscoped descriptor for one value, or `None` if undetected.
pub fn detect(value: &str, table: &UnitRangeTable) -> Option<ControlDescriptor> {
    match classify(value, table)? {
        Classification::Color(literal) => Some(ColorDescriptor::new(literal).into()),
        Classification::Numeric { value, unit } => {
            let range = infer_range(&unit, value, table)?;
            Some(
                SliderDescriptor {
                    min: range.min,
                    max: range.max,
                    default: range.default,
                    unit,
                    step: range.step,
                    scope: None,
                }
                .into(),
            )
        }
    }
}
