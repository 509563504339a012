use std::fmt;
use std::rc::Rc;

use crate::document::Document;

/// Events dispatched on the window rather than on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEvent {
    /// The viewport changed size.
    Resize,
    /// The document finished loading.
    Load,
}

/// Event callback. Stored by value so the same callback can later be
/// recognised when it is added again.
pub type Listener = Rc<dyn Fn(&mut Document)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

pub(crate) struct Registration {
    pub id: ListenerId,
    pub event: WindowEvent,
    pub listener: Listener,
}

/// Window-level listener registry.
#[derive(Default)]
pub(crate) struct Window {
    registrations: Vec<Registration>,
    next_id: u64,
}

impl Window {
    /// Adding the same listener twice for one event is a no-op that returns
    /// the existing registration.
    pub fn add(&mut self, event: WindowEvent, listener: Listener) -> ListenerId {
        if let Some(existing) = self
            .registrations
            .iter()
            .find(|r| r.event == event && Rc::ptr_eq(&r.listener, &listener))
        {
            return existing.id;
        }

        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.registrations.push(Registration {
            id,
            event,
            listener,
        });
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    pub fn count(&self, event: WindowEvent) -> usize {
        self.registrations.iter().filter(|r| r.event == event).count()
    }

    /// Snapshot of the listeners for `event`, in registration order.
    pub fn listeners(&self, event: WindowEvent) -> Vec<(ListenerId, Listener)> {
        self.registrations
            .iter()
            .filter(|r| r.event == event)
            .map(|r| (r.id, r.listener.clone()))
            .collect()
    }
}
