//! Control descriptors — what kind of control drives each custom property.
//!
//! Serialized with an internal `type` tag so hand-written config reads naturally:
//!
//! ```toml
//! [vars."--radius"]
//! type = "slider"
//! min = 0
//! max = 200
//! unit = "px"
//!
//! [vars."--bg"]
//! type = "color"
//! default = "#667eea"
//!
//! [vars."--accent"]
//! type = "color"
//! color_space = "modern"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Every custom property name starts with this marker.
pub const CUSTOM_PROPERTY_PREFIX: &str = "--";

/// Color written when a color descriptor is declared without a default.
pub const DEFAULT_COLOR: &str = "#ff0000";

/// Fallback for a `modern` color descriptor declared without a default.
pub const DEFAULT_MODERN_COLOR: &str = "oklch(75% 0.1 180)";

/// Step used when a slider descriptor is declared without one.
pub const DEFAULT_STEP: f64 = 1.0;

/// Custom property name → control descriptor.
pub type VarConfig = BTreeMap<String, ControlDescriptor>;

pub fn is_custom_property(name: &str) -> bool {
    name.len() > CUSTOM_PROPERTY_PREFIX.len() && name.starts_with(CUSTOM_PROPERTY_PREFIX)
}

// ── Descriptor ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlDescriptor {
    Slider(SliderDescriptor),
    Color(ColorDescriptor),
}

/// Which control a descriptor renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Slider,
    Color,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Slider => write!(f, "slider"),
            ControlKind::Color => write!(f, "color"),
        }
    }
}

impl ControlDescriptor {
    pub fn kind(&self) -> ControlKind {
        match self {
            ControlDescriptor::Slider(_) => ControlKind::Slider,
            ControlDescriptor::Color(_) => ControlKind::Color,
        }
    }

    /// Selector of the element that receives writes; `None` means the document root.
    pub fn scope(&self) -> Option<&str> {
        match self {
            ControlDescriptor::Slider(s) => s.scope.as_deref(),
            ControlDescriptor::Color(c) => c.scope.as_deref(),
        }
    }

    pub fn with_scope(self, scope: Option<String>) -> Self {
        match self {
            ControlDescriptor::Slider(s) => SliderDescriptor { scope, ..s }.into(),
            ControlDescriptor::Color(c) => ColorDescriptor { scope, ..c }.into(),
        }
    }

    /// The value written to the page before any user interaction.
    pub fn initial_value(&self) -> String {
        match self {
            ControlDescriptor::Slider(s) => s.format_value(s.default),
            ControlDescriptor::Color(c) => c.default.clone(),
        }
    }

    /// Check the descriptor's internal consistency.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ControlDescriptor::Slider(s) => s.validate(),
            ControlDescriptor::Color(c) => c.validate(),
        }
    }
}

impl From<SliderDescriptor> for ControlDescriptor {
    fn from(s: SliderDescriptor) -> Self {
        ControlDescriptor::Slider(s)
    }
}

impl From<ColorDescriptor> for ControlDescriptor {
    fn from(c: ColorDescriptor) -> Self {
        ControlDescriptor::Color(c)
    }
}

// ── Slider ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SliderFields")]
pub struct SliderDescriptor {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub unit: String,
    pub step: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Slider as written in config files, where `default`, `step` and `unit` are optional.
#[derive(Deserialize)]
struct SliderFields {
    min: f64,
    max: f64,
    default: Option<f64>,
    #[serde(default)]
    unit: String,
    step: Option<f64>,
    scope: Option<String>,
}

impl From<SliderFields> for SliderDescriptor {
    fn from(f: SliderFields) -> Self {
        Self {
            min: f.min,
            max: f.max,
            default: f.default.unwrap_or((f.min + f.max) / 2.0),
            unit: f.unit,
            step: f.step.unwrap_or(DEFAULT_STEP),
            scope: f.scope,
        }
    }
}

impl SliderDescriptor {
    /// Slider with `default` at the midpoint and a step of 1.
    pub fn new(min: f64, max: f64, unit: impl Into<String>) -> Self {
        Self {
            min,
            max,
            default: (min + max) / 2.0,
            unit: unit.into(),
            step: DEFAULT_STEP,
            scope: None,
        }
    }

    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Render `value` the way it is written to the page, e.g. `12px` or `1.4`.
    pub fn format_value(&self, value: f64) -> String {
        format!("{value}{}", self.unit)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.min.is_finite() && self.max.is_finite() && self.default.is_finite()) {
            return Err("slider bounds must be finite numbers".into());
        }
        if self.min > self.max {
            return Err(format!("min ({}) exceeds max ({})", self.min, self.max));
        }
        if !self.contains(self.default) {
            return Err(format!(
                "default ({}) outside [{}, {}]",
                self.default, self.min, self.max
            ));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(format!("step must be positive, got {}", self.step));
        }
        Ok(())
    }
}

// ── Color ────────────────────────────────────────────────────────────

/// Which picker a color control needs.
///
/// `Modern` values (`oklch(...)`, `lab(...)`) need a picker beyond the native
/// sRGB input; `Standard` values are hex, `rgb()`, `hsl()` or named colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    #[default]
    Standard,
    Modern,
}

impl ColorSpace {
    /// Value written when a descriptor in this space omits its default.
    pub fn fallback_color(self) -> &'static str {
        match self {
            ColorSpace::Standard => DEFAULT_COLOR,
            ColorSpace::Modern => DEFAULT_MODERN_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorFields")]
pub struct ColorDescriptor {
    pub default: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_space: Option<ColorSpace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Color as written in config files, where `default` may be omitted or empty.
#[derive(Deserialize)]
struct ColorFields {
    default: Option<String>,
    color_space: Option<ColorSpace>,
    scope: Option<String>,
}

impl From<ColorFields> for ColorDescriptor {
    fn from(f: ColorFields) -> Self {
        let space = f.color_space.unwrap_or_default();
        let default = f
            .default
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| space.fallback_color().to_string());
        Self {
            default,
            color_space: f.color_space,
            scope: f.scope,
        }
    }
}

impl ColorDescriptor {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            color_space: None,
            scope: None,
        }
    }

    /// Descriptor in `space` with that space's fallback color as its default.
    pub fn fallback(space: ColorSpace) -> Self {
        Self {
            default: space.fallback_color().to_string(),
            color_space: Some(space),
            scope: None,
        }
    }

    pub fn with_color_space(mut self, space: ColorSpace) -> Self {
        self.color_space = Some(space);
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Whether the control needs a picker that handles wide-gamut color functions.
    pub fn is_modern(&self) -> bool {
        self.color_space == Some(ColorSpace::Modern)
    }

    fn validate(&self) -> Result<(), String> {
        if self.default.trim().is_empty() {
            return Err("color default must not be empty".into());
        }
        Ok(())
    }
}
