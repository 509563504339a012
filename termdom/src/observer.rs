//! Mutation observation.
//!
//! Observers register interest in an element (and optionally its whole
//! subtree). Mutations are queued as records and delivered in batches when
//! the document is flushed, so several quick changes reach the callback as a
//! single notification.

use std::fmt;
use std::rc::Rc;

use crate::document::Document;

/// What an observer wants to hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutationObserverInit {
    pub attributes: bool,
    pub child_list: bool,
    pub subtree: bool,
}

impl MutationObserverInit {
    /// Attributes and child list changes anywhere in the subtree.
    pub const fn all() -> Self {
        Self {
            attributes: true,
            child_list: true,
            subtree: true,
        }
    }

    pub fn wants(&self, record: &MutationRecord) -> bool {
        match record {
            MutationRecord::Attributes { .. } => self.attributes,
            MutationRecord::ChildList { .. } => self.child_list,
        }
    }
}

/// A single change to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    Attributes {
        target: String,
        name: String,
    },
    ChildList {
        target: String,
        added: Vec<String>,
        removed: Vec<String>,
    },
}

impl MutationRecord {
    pub fn target(&self) -> &str {
        match self {
            MutationRecord::Attributes { target, .. } | MutationRecord::ChildList { target, .. } => {
                target
            }
        }
    }
}

/// Called with the batch of records queued since the last delivery.
pub type MutationCallback = Rc<dyn Fn(&mut Document, &[MutationRecord])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

pub(crate) struct Observer {
    pub id: ObserverId,
    pub target: String,
    pub init: MutationObserverInit,
    pub callback: MutationCallback,
    pub pending: Vec<MutationRecord>,
}

impl Observer {
    /// Queue `record` if it concerns this observer. `ancestors` are the ids
    /// of the record target's ancestors within its own tree.
    pub fn consider(&mut self, record: &MutationRecord, ancestors: &[String]) {
        if !self.init.wants(record) {
            return;
        }
        let target = record.target();
        let in_scope =
            target == self.target || (self.init.subtree && ancestors.iter().any(|a| *a == self.target));
        if in_scope {
            self.pending.push(record.clone());
        }
    }
}
