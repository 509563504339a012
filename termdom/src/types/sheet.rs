use super::StyleProps;
use crate::element::Element;

/// A simple selector. Compound and descendant forms cover what component
/// templates need without a full CSS selector engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Matches elements by tag name, e.g. `div`.
    Tag(String),
    /// Matches elements carrying a class, e.g. `.simplebar-track`.
    Class(String),
    /// Matches by the element's local (unscoped) id, e.g. `#simplebar-scrollbar`.
    Id(String),
    /// Matches when every selector matches the same element.
    All(Vec<Selector>),
    /// Matches `subject` when some ancestor matches `ancestor`.
    Descendant {
        ancestor: Box<Selector>,
        subject: Box<Selector>,
    },
}

impl Selector {
    pub fn tag(name: impl Into<String>) -> Self {
        Selector::Tag(name.into())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Selector::Class(name.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }

    pub fn and(self, other: Selector) -> Self {
        match self {
            Selector::All(mut parts) => {
                parts.push(other);
                Selector::All(parts)
            }
            first => Selector::All(vec![first, other]),
        }
    }

    pub fn descendant(ancestor: Selector, subject: Selector) -> Self {
        Selector::Descendant {
            ancestor: Box::new(ancestor),
            subject: Box::new(subject),
        }
    }

    /// Check `element` against this selector. `ancestors` lists the
    /// element's ancestors from the root down to its parent.
    pub fn matches(&self, element: &Element, ancestors: &[&Element]) -> bool {
        match self {
            Selector::Tag(tag) => element.tag == *tag,
            Selector::Class(class) => element.has_class(class),
            Selector::Id(id) => element.local_id() == id,
            Selector::All(parts) => parts.iter().all(|p| p.matches(element, ancestors)),
            Selector::Descendant { ancestor, subject } => {
                subject.matches(element, ancestors)
                    && (0..ancestors.len())
                        .rev()
                        .any(|i| ancestor.matches(ancestors[i], &ancestors[..i]))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: Selector,
    pub declarations: StyleProps,
}

/// An ordered list of rules. Later rules win over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, selector: Selector, declarations: StyleProps) -> Self {
        self.rules.push(Rule {
            selector,
            declarations,
        });
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Layer every matching rule, in order, onto `props`.
    pub fn cascade_into(&self, element: &Element, ancestors: &[&Element], props: &mut StyleProps) {
        for rule in &self.rules {
            if rule.selector.matches(element, ancestors) {
                props.apply(&rule.declarations);
            }
        }
    }
}
