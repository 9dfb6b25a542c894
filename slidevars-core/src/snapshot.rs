//! In-memory style host backed by a snapshot file.
//!
//! A snapshot describes the document root and any number of scoped elements,
//! each with custom property declarations:
//!
//! ```toml
//! [root]
//! "--radius" = "12px"
//! "--bg" = "#667eea"
//!
//! [elements."#manual-demo"]
//! parent = ":root"
//! properties = { "--width" = "100px" }
//! ```
//!
//! Computed style follows inheritance: an element sees its ancestors' custom
//! properties, its own declarations shadow them, and inline writes made through
//! [`StyleWriter`] shadow both. Every write is recorded for inspection.

use crate::descriptor::is_custom_property;
use crate::host::{emit_warning, ComputedStyle, Diagnostics, ElementQuery, StyleWriter};
use crate::scan::ROOT_SCOPE;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Selector that also resolves to the document root.
const ROOT_ELEMENT: &str = "html";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse snapshot TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("parse snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("element '{element}' names unknown parent '{parent}'")]
    UnknownParent { element: String, parent: String },

    #[error("element '{element}' is its own ancestor")]
    ParentCycle { element: String },

    #[error("'{name}' on '{element}' is not a custom property (names start with --)")]
    InvalidPropertyName { element: String, name: String },
}

/// Declared custom properties of one scoped element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Selector of the element this one inherits from; the root when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// One custom property write, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleWrite {
    pub target: String,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StyleSnapshot {
    #[serde(default)]
    root: BTreeMap<String, String>,
    #[serde(default)]
    elements: BTreeMap<String, ElementStyle>,
    #[serde(skip)]
    inline: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(skip)]
    writes: Vec<StyleWrite>,
    #[serde(skip)]
    warnings: RefCell<Vec<String>>,
}

impl StyleSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot, choosing the format by extension (`.json`, otherwise TOML).
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = toml::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_json(content: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    // ── Builders ──

    pub fn with_root_property(mut self, name: &str, value: &str) -> Self {
        self.root.insert(name.to_string(), value.to_string());
        self
    }

    /// Add a scoped element inheriting from `parent` (the root when `None`).
    pub fn with_element(
        mut self,
        selector: &str,
        parent: Option<&str>,
        properties: &[(&str, &str)],
    ) -> Self {
        self.elements.insert(
            selector.to_string(),
            ElementStyle {
                parent: parent.map(str::to_string),
                properties: properties
                    .iter()
                    .map(|(n, v)| (n.to_string(), v.to_string()))
                    .collect(),
            },
        );
        self
    }

    // ── Inspection ──

    /// Every write made through [`StyleWriter`], oldest first.
    pub fn writes(&self) -> &[StyleWrite] {
        &self.writes
    }

    /// Inline value last written to `name` on `selector`, if any.
    pub fn inline_value(&self, selector: &str, name: &str) -> Option<&str> {
        self.inline
            .get(self.canonical(selector)?)
            .and_then(|props| props.get(name))
            .map(String::as_str)
    }

    /// Warnings reported through [`Diagnostics`].
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    // ── Internals ──

    fn validate(&self) -> Result<(), SnapshotError> {
        for name in self.root.keys() {
            check_name(ROOT_SCOPE, name)?;
        }
        for (selector, style) in &self.elements {
            for name in style.properties.keys() {
                check_name(selector, name)?;
            }
            if let Some(parent) = &style.parent {
                if self.canonical(parent).is_none() {
                    return Err(SnapshotError::UnknownParent {
                        element: selector.clone(),
                        parent: parent.clone(),
                    });
                }
            }
            self.ancestry(selector).ok_or_else(|| SnapshotError::ParentCycle {
                element: selector.clone(),
            })?;
        }
        Ok(())
    }

    /// Map a selector to the key it is stored under.
    fn canonical<'a>(&'a self, selector: &'a str) -> Option<&'a str> {
        if selector == ROOT_SCOPE || selector == ROOT_ELEMENT {
            return Some(ROOT_SCOPE);
        }
        self.elements
            .get_key_value(selector)
            .map(|(key, _)| key.as_str())
    }

    /// Chain from `selector` up to (excluding) the root, nearest first.
    /// `None` on a parent cycle or a dangling parent.
    fn ancestry<'a>(&'a self, selector: &'a str) -> Option<Vec<&'a str>> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut current = self.canonical(selector)?;
        while current != ROOT_SCOPE {
            if !seen.insert(current) {
                return None;
            }
            chain.push(current);
            let parent = self.elements.get(current)?.parent.as_deref();
            let parent = parent.unwrap_or(ROOT_SCOPE);
            current = self.canonical(parent)?;
        }
        Some(chain)
    }

    fn declared(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        if key == ROOT_SCOPE {
            Some(&self.root)
        } else {
            self.elements.get(key).map(|e| &e.properties)
        }
    }

    /// Resolved custom properties of `key`, root first, nearest element last.
    fn resolve(&self, key: &str) -> BTreeMap<String, String> {
        let mut chain = self.ancestry(key).unwrap_or_default();
        chain.push(ROOT_SCOPE);
        chain.reverse();

        let mut resolved = BTreeMap::new();
        for level in chain {
            let layers = [self.declared(level), self.inline.get(level)];
            for props in layers.into_iter().flatten() {
                resolved.extend(props.iter().map(|(n, v)| (n.clone(), v.clone())));
            }
        }
        resolved
    }
}

fn check_name(element: &str, name: &str) -> Result<(), SnapshotError> {
    if is_custom_property(name) {
        Ok(())
    } else {
        Err(SnapshotError::InvalidPropertyName {
            element: element.to_string(),
            name: name.to_string(),
        })
    }
}

// ── Host capabilities ────────────────────────────────────────────────

impl ElementQuery for StyleSnapshot {
    type Element = String;

    fn query(&self, selector: &str) -> Option<String> {
        self.canonical(selector).map(str::to_string)
    }

    fn document_root(&self) -> String {
        ROOT_SCOPE.to_string()
    }
}

impl ComputedStyle for StyleSnapshot {
    fn custom_property_names(&self, element: &String) -> Vec<String> {
        self.resolve(element).into_keys().collect()
    }

    fn property_value(&self, element: &String, name: &str) -> Option<String> {
        self.resolve(element).remove(name)
    }
}

impl StyleWriter for StyleSnapshot {
    fn set_property(&mut self, element: &String, name: &str, value: &str) {
        self.inline
            .entry(element.clone())
            .or_default()
            .insert(name.to_string(), value.to_string());
        self.writes.push(StyleWrite {
            target: element.clone(),
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}

impl Diagnostics for StyleSnapshot {
    fn warn(&self, message: &str) {
        emit_warning(message);
        self.warnings.borrow_mut().push(message.to_string());
    }
}
