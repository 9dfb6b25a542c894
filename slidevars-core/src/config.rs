//! Panel config files — explicit descriptors plus initialization options.
//!
//! ```toml
//! [options]
//! auto = true
//! scope = "#manual-demo"
//! default_open = true
//!
//! [slider_ranges]
//! px = { min = 0, max = 1200, step = 2 }
//!
//! [vars."--width"]
//! type = "slider"
//! min = 50
//! max = 400
//! default = 100
//! unit = "px"
//! ```

use crate::descriptor::{is_custom_property, VarConfig};
use crate::panel::InitOptions;
use crate::units::UnitRangeTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{0}' is not a custom property name (names start with --)")]
    InvalidName(String),

    #[error("invalid descriptor for '{name}': {reason}")]
    InvalidDescriptor { name: String, reason: String },

    #[error("invalid slider range for unit '{unit}': {reason}")]
    InvalidRange { unit: String, reason: String },
}

/// Range overrides may sit at the top level (`[slider_ranges]`) or under
/// `[options.slider_ranges]`; both end up in `options.slider_ranges`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PanelConfigFields")]
pub struct PanelConfig {
    pub options: InitOptions,
    pub vars: VarConfig,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct PanelConfigFields {
    options: InitOptions,
    slider_ranges: Option<UnitRangeTable>,
    vars: VarConfig,
}

impl From<PanelConfigFields> for PanelConfig {
    fn from(f: PanelConfigFields) -> Self {
        let mut options = f.options;
        // Top-level entries win over the nested table, unit by unit.
        options.slider_ranges = match (options.slider_ranges.take(), f.slider_ranges) {
            (Some(nested), Some(top)) => Some(nested.with_overrides(&top)),
            (nested, top) => top.or(nested),
        };
        Self {
            options,
            vars: f.vars,
        }
    }
}

impl PanelConfig {
    /// Load a config file, choosing the format by extension (`.json`, otherwise TOML).
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, descriptor) in &self.vars {
            if !is_custom_property(name) {
                return Err(ConfigError::InvalidName(name.clone()));
            }
            descriptor
                .validate()
                .map_err(|reason| ConfigError::InvalidDescriptor {
                    name: name.clone(),
                    reason,
                })?;
        }

        let ranges = self.options.slider_ranges.iter().flat_map(|t| t.iter());
        for (unit, range) in ranges {
            let reason = if !(range.min.is_finite() && range.max.is_finite()) {
                Some("bounds must be finite numbers".to_string())
            } else if range.min > range.max {
                Some(format!("min ({}) exceeds max ({})", range.min, range.max))
            } else if range.step.is_some_and(|s| !(s.is_finite() && s > 0.0)) {
                Some("step must be positive".to_string())
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidRange {
                    unit: unit.to_string(),
                    reason,
                });
            }
        }
        Ok(())
    }

    pub fn into_parts(self) -> (VarConfig, InitOptions) {
        (self.vars, self.options)
    }
}
