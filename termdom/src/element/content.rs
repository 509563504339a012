use super::Element;
use crate::types::Stylesheet;

#[derive(Debug, Clone, Default)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<Element>),
    /// Insertion point for the shadow host's light children.
    Slot,
}

impl Content {
    pub fn children(&self) -> &[Element] {
        match self {
            Content::Children(children) => children,
            _ => &[],
        }
    }
}

/// A shadow tree attached to a custom element host.
///
/// Its stylesheet applies only to the elements of the shadow tree; slotted
/// light children keep the styles of the tree they come from.
#[derive(Debug, Clone, Default)]
pub struct ShadowRoot {
    pub children: Vec<Element>,
    pub stylesheet: Stylesheet,
}
