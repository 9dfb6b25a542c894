//! Host capabilities the core consumes.
//!
//! The core never touches a page directly. A host (a browser binding, a test
//! double, or [`crate::snapshot::StyleSnapshot`]) supplies:
//! - element lookup by selector ([`ElementQuery`])
//! - computed custom properties of an element ([`ComputedStyle`])
//! - live custom property writes ([`StyleWriter`])
//! - a channel for recoverable warnings ([`Diagnostics`])

/// Resolve selectors to element handles.
pub trait ElementQuery {
    type Element: Clone;

    /// Resolve `selector` to at most one element.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// The document root, the implicit target of unscoped writes.
    fn document_root(&self) -> Self::Element;
}

/// Read resolved custom properties of an element.
pub trait ComputedStyle: ElementQuery {
    /// Names of every custom property visible on `element`, in host order.
    fn custom_property_names(&self, element: &Self::Element) -> Vec<String>;

    /// Serialized value of `name` on `element`, untrimmed.
    fn property_value(&self, element: &Self::Element, name: &str) -> Option<String>;
}

/// Write custom properties so the page reflects them immediately.
pub trait StyleWriter: ElementQuery {
    fn set_property(&mut self, element: &Self::Element, name: &str, value: &str);
}

/// Recoverable warnings surfaced to whoever is watching the host.
pub trait Diagnostics {
    fn warn(&self, message: &str) {
        emit_warning(message);
    }
}

/// Everything the panel controller needs from its host.
pub trait StyleHost: ComputedStyle + StyleWriter + Diagnostics {}

impl<T: ComputedStyle + StyleWriter + Diagnostics> StyleHost for T {}

pub(crate) fn emit_warning(message: &str) {
    tracing::warn!(target: "slidevars", "{message}");
}
