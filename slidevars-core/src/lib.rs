//! SlideVars Core — turns a page's custom properties into live slider and color controls.
//!
//! This crate contains everything except drawing the panel:
//! - Unit range table with per-call overrides
//! - Value classifier (color / unit-less number / number with unit)
//! - Range inference with the 10× headroom rule
//! - Auto-detect scan over a host's computed style
//! - Config merge (explicit descriptors win)
//! - Panel controller: initialization, live writes, visibility
//! - Host capability traits and an in-memory snapshot host

pub mod classify;
pub mod colors;
pub mod config;
pub mod descriptor;
pub mod host;
pub mod merge;
pub mod panel;
pub mod range;
pub mod scan;
pub mod snapshot;
pub mod units;

pub use classify::{classify, Classification};
pub use config::{ConfigError, PanelConfig};
pub use descriptor::{
    ColorDescriptor, ColorSpace, ControlDescriptor, ControlKind, SliderDescriptor, VarConfig,
    CUSTOM_PROPERTY_PREFIX,
};
pub use host::{ComputedStyle, Diagnostics, ElementQuery, StyleHost, StyleWriter};
pub use merge::merge;
pub use panel::{InitOptions, Panel, PanelError, SlideVars};
pub use range::{infer_range, InferredRange};
pub use scan::{detect, scan, scan_report, ScanReport, ROOT_SCOPE};
pub use snapshot::{SnapshotError, StyleSnapshot, StyleWrite};
pub use units::{UnitRange, UnitRangeTable};
