use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Content, ShadowRoot};
use crate::types::{Length, Overflow, Position, Rgb, Size, StyleProps};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Separator between a shadow host's id and the local id of an element
/// inside its shadow tree.
pub const SCOPE_SEPARATOR: &str = "::";

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    /// Unique within the document. Shadow tree elements are scoped as
    /// `"{host}::{local}"`.
    pub id: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// Inline style, applied after stylesheet rules.
    pub style: StyleProps,
    pub content: Content,
    pub shadow: Option<ShadowRoot>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: StyleProps::default(),
            content: Content::None,
            shadow: None,
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Content::Text(content.into()),
            ..Self::new("span")
        }
    }

    pub fn slot() -> Self {
        Self {
            content: Content::Slot,
            ..Self::new("slot")
        }
    }

    /// The id without its shadow scope prefix.
    pub fn local_id(&self) -> &str {
        self.id
            .rsplit_once(SCOPE_SEPARATOR)
            .map_or(self.id.as_str(), |(_, local)| local)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space separated class list, as the `class` attribute reads.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Light-tree children (empty for text and slot content).
    pub fn light_children(&self) -> &[Element] {
        self.content.children()
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    // Inline style
    pub fn style(mut self, style: StyleProps) -> Self {
        self.style = style;
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.style.position = Some(position);
        self
    }

    pub fn width(mut self, width: Size) -> Self {
        self.style.width = Some(width);
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.style.height = Some(height);
        self
    }

    pub fn top(mut self, top: Length) -> Self {
        self.style.top = Some(top);
        self
    }

    pub fn left(mut self, left: Length) -> Self {
        self.style.left = Some(left);
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.style.overflow = Some(overflow);
        self
    }

    pub fn background(mut self, color: Rgb) -> Self {
        self.style.background = Some(color);
        self
    }

    pub fn foreground(mut self, color: Rgb) -> Self {
        self.style.foreground = Some(color);
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }
}
