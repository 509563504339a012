//! Custom element definitions.
//!
//! A custom element supplies a shadow template and lifecycle hooks. The
//! document attaches the template when an element with the defined tag is
//! inserted, then calls [`CustomElement::connected`]; removing the element
//! calls [`CustomElement::disconnected`].

use std::error::Error;

use crate::document::Document;
use crate::element::Element;
use crate::types::Stylesheet;

/// Shadow tree contents produced by a custom element.
#[derive(Debug, Clone, Default)]
pub struct ShadowTemplate {
    pub children: Vec<Element>,
    pub stylesheet: Stylesheet,
}

impl ShadowTemplate {
    pub fn new(children: Vec<Element>, stylesheet: Stylesheet) -> Self {
        Self {
            children,
            stylesheet,
        }
    }
}

pub trait CustomElement {
    /// The shadow tree to attach to each new host.
    fn template(&self) -> ShadowTemplate;

    /// The host (with its shadow tree attached) was inserted into the
    /// document. An error leaves the element inert.
    fn connected(&mut self, doc: &mut Document, host: &str) -> Result<(), Box<dyn Error>>;

    /// The host was removed from the document.
    fn disconnected(&mut self, doc: &mut Document, host: &str);
}

pub type Constructor = fn() -> Box<dyn CustomElement>;

/// Custom element registration entry for inventory.
pub struct ElementDefinition {
    /// Tag name the element is registered under.
    pub tag: &'static str,
    /// Creates a fresh instance for each host element.
    pub constructor: Constructor,
}

impl ElementDefinition {
    pub const fn new(tag: &'static str, constructor: Constructor) -> Self {
        Self { tag, constructor }
    }
}

inventory::collect!(ElementDefinition);

/// All custom elements registered through inventory.
pub fn registered_elements() -> impl Iterator<Item = &'static ElementDefinition> {
    inventory::iter::<ElementDefinition>.into_iter()
}
