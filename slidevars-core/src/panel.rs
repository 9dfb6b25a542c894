//! Panel controller — the initialization entry point and live control state.
//!
//! [`SlideVars::init`] builds the final [`VarConfig`] (auto-detected, then
//! overlaid by explicit descriptors), writes every initial value to the page,
//! and replaces any previous panel state. Control input (`set_slider`,
//! `set_color`) is formatted and written back through the host.
//!
//! Drawing the panel is the rendering layer's job; this module only tracks
//! what it should show.

use crate::descriptor::{ControlDescriptor, ControlKind, VarConfig};
use crate::host::StyleHost;
use crate::merge::{merge, should_auto_detect};
use crate::scan::{scan, ROOT_SCOPE};
use crate::units::UnitRangeTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    #[error("panel is not initialized")]
    NotInitialized,

    #[error("no control for '{0}'")]
    UnknownVariable(String),

    #[error("'{name}' is a {actual} control, not a {expected}")]
    KindMismatch {
        name: String,
        expected: ControlKind,
        actual: ControlKind,
    },

    #[error("invalid value for '{name}': {value}")]
    InvalidValue { name: String, value: String },
}

/// Options recognized by [`SlideVars::init`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitOptions {
    /// Auto-detect even when explicit descriptors were supplied.
    pub auto: bool,
    /// Element whose custom properties are scanned; the document root when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Whether the panel starts open.
    pub default_open: bool,
    /// Per-unit range overrides for this initialization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider_ranges: Option<UnitRangeTable>,
}

impl InitOptions {
    pub fn scope(&self) -> &str {
        self.scope.as_deref().unwrap_or(ROOT_SCOPE)
    }
}

/// State of one initialized panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    config: VarConfig,
    values: BTreeMap<String, String>,
    open: bool,
}

impl Panel {
    pub fn config(&self) -> &VarConfig {
        &self.config
    }

    /// Current written value of `name`, e.g. `"12px"`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True when there is nothing to control; the renderer shows a notice instead.
    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }
}

/// Owns the host and the current panel.
pub struct SlideVars<H: StyleHost> {
    host: H,
    panel: Option<Panel>,
}

impl<H: StyleHost> SlideVars<H> {
    pub fn new(host: H) -> Self {
        Self { host, panel: None }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    /// Build the final config, write initial values, and replace the current panel.
    pub fn init(&mut self, explicit: VarConfig, options: &InitOptions) -> &Panel {
        let config = if should_auto_detect(&explicit, options.auto) {
            let detected = scan(&self.host, options.scope(), options.slider_ranges.as_ref());
            merge(detected, &explicit)
        } else {
            explicit
        };

        let mut values = BTreeMap::new();
        for (name, descriptor) in &config {
            let value = descriptor.initial_value();
            self.write(name, &value, descriptor.scope());
            values.insert(name.clone(), value);
        }

        tracing::debug!(
            target: "slidevars",
            controls = config.len(),
            open = options.default_open,
            "panel initialized"
        );
        self.panel.insert(Panel {
            config,
            values,
            open: options.default_open,
        })
    }

    /// Drop the current panel. Values already written stay on the page.
    pub fn destroy(&mut self) -> Option<Panel> {
        self.panel.take()
    }

    pub fn open(&mut self) {
        if let Some(panel) = &mut self.panel {
            panel.open = true;
        }
    }

    pub fn close(&mut self) {
        if let Some(panel) = &mut self.panel {
            panel.open = false;
        }
    }

    pub fn toggle(&mut self) {
        if let Some(panel) = &mut self.panel {
            panel.open = !panel.open;
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel.as_ref().is_some_and(|p| p.open)
    }

    /// Handle slider input; the value is clamped into the slider's range.
    ///
    /// Returns the written value, e.g. `"24px"`.
    pub fn set_slider(&mut self, name: &str, value: f64) -> Result<String, PanelError> {
        if !value.is_finite() {
            return Err(PanelError::InvalidValue {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        let (formatted, scope) = match self.descriptor(name)? {
            ControlDescriptor::Slider(s) => {
                let clamped = value.max(s.min).min(s.max);
                (s.format_value(clamped), s.scope.clone())
            }
            ControlDescriptor::Color(_) => {
                return Err(PanelError::KindMismatch {
                    name: name.to_string(),
                    expected: ControlKind::Slider,
                    actual: ControlKind::Color,
                })
            }
        };
        self.apply(name, &formatted, scope.as_deref());
        Ok(formatted)
    }

    /// Handle color input; the value is written verbatim.
    pub fn set_color(&mut self, name: &str, value: &str) -> Result<(), PanelError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(PanelError::InvalidValue {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        let scope = match self.descriptor(name)? {
            ControlDescriptor::Color(c) => c.scope.clone(),
            ControlDescriptor::Slider(_) => {
                return Err(PanelError::KindMismatch {
                    name: name.to_string(),
                    expected: ControlKind::Color,
                    actual: ControlKind::Slider,
                })
            }
        };
        self.apply(name, value, scope.as_deref());
        Ok(())
    }

    fn descriptor(&self, name: &str) -> Result<&ControlDescriptor, PanelError> {
        self.panel
            .as_ref()
            .ok_or(PanelError::NotInitialized)?
            .config
            .get(name)
            .ok_or_else(|| PanelError::UnknownVariable(name.to_string()))
    }

    fn apply(&mut self, name: &str, value: &str, scope: Option<&str>) {
        self.write(name, value, scope);
        if let Some(panel) = &mut self.panel {
            panel.values.insert(name.to_string(), value.to_string());
        }
    }

    /// Write to the scope element, or the document root when unscoped.
    fn write(&mut self, name: &str, value: &str, scope: Option<&str>) {
        let target = match scope {
            None => self.host.document_root(),
            Some(selector) => match self.host.query(selector) {
                Some(element) => element,
                None => {
                    self.host.warn(&format!(
                        "could not find element matching \"{selector}\"; {name} not written"
                    ));
                    return;
                }
            },
        };
        self.host.set_property(&target, name, value);
    }
}
