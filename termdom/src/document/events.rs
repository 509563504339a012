//! Scrolling, window events, mutation observers and the flush loop.

use std::mem;

use super::Document;
use crate::error::DomError;
use crate::observer::{MutationCallback, MutationObserverInit, MutationRecord, Observer, ObserverId};
use crate::window::{Listener, ListenerId, WindowEvent};

impl Document {
    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    /// Current scroll offset of an element, `0.0` when it never scrolled.
    pub fn scroll_top(&self, id: &str) -> f32 {
        self.scroll_offsets.get(id).copied().unwrap_or(0.0)
    }

    /// Largest valid scroll offset of an element.
    pub fn max_scroll_top(&mut self, id: &str) -> Option<f32> {
        self.ensure_layout();
        self.layout.get(id).map(|b| b.max_scroll_top())
    }

    /// Scroll an element to `value`, clamped to `[0, max_scroll_top]`.
    ///
    /// Returns whether the offset changed. A change queues a scroll event
    /// for the element, dispatched on the next [`flush`](Self::flush).
    pub fn set_scroll_top(&mut self, id: &str, value: f32) -> Result<bool, DomError> {
        let max = self
            .max_scroll_top(id)
            .ok_or_else(|| DomError::ElementNotFound(id.to_string()))?;
        let value = if value.is_finite() { value.clamp(0.0, max) } else { 0.0 };

        if (value - self.scroll_top(id)).abs() < f32::EPSILON {
            return Ok(false);
        }

        log::trace!("scroll {id} to {value}");
        self.scroll_offsets.insert(id.to_string(), value);
        self.layout_dirty = true;
        if !self.pending_scroll.iter().any(|p| p == id) {
            self.pending_scroll.push(id.to_string());
        }
        Ok(true)
    }

    pub fn scroll_by(&mut self, id: &str, delta: f32) -> Result<bool, DomError> {
        let current = self.scroll_top(id);
        self.set_scroll_top(id, current + delta)
    }

    /// Scroll the innermost scroll container under the point `(x, y)`.
    /// Returns the id of the container that moved.
    pub fn scroll_at(&mut self, x: f32, y: f32, delta: f32) -> Option<String> {
        self.ensure_layout();
        let id = self.layout.scroll_container_at(x, y)?.to_string();
        match self.scroll_by(&id, delta) {
            Ok(true) => Some(id),
            _ => None,
        }
    }

    /// Install or clear the scroll handler of an element. Each element has
    /// at most one; setting a new one replaces the old.
    pub fn set_onscroll(&mut self, id: &str, handler: Option<Listener>) -> Result<(), DomError> {
        if !self.contains(id) {
            return Err(DomError::ElementNotFound(id.to_string()));
        }
        match handler {
            Some(handler) => {
                self.scroll_handlers.insert(id.to_string(), handler);
            }
            None => {
                self.scroll_handlers.remove(id);
            }
        }
        Ok(())
    }

    pub fn has_onscroll(&self, id: &str) -> bool {
        self.scroll_handlers.contains_key(id)
    }

    /// Invoke the scroll handler of an element directly. Returns whether a
    /// handler was installed.
    pub fn dispatch_scroll(&mut self, id: &str) -> bool {
        let Some(handler) = self.scroll_handlers.get(id).cloned() else {
            return false;
        };
        handler(self);
        true
    }

    // -------------------------------------------------------------------------
    // Window
    // -------------------------------------------------------------------------

    pub fn add_window_listener(&mut self, event: WindowEvent, listener: Listener) -> ListenerId {
        self.window.add(event, listener)
    }

    pub fn remove_window_listener(&mut self, id: ListenerId) -> bool {
        self.window.remove(id)
    }

    pub fn window_listener_count(&self, event: WindowEvent) -> usize {
        self.window.count(event)
    }

    /// Viewport size in CSS pixels.
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// Resize the viewport and notify `Resize` listeners when it changed.
    pub fn resize(&mut self, width: f32, height: f32) {
        let size = (width.max(0.0), height.max(0.0));
        if size == self.viewport {
            return;
        }
        log::debug!("viewport resized to {}x{}", size.0, size.1);
        self.viewport = size;
        self.layout_dirty = true;
        self.dispatch_window_event(WindowEvent::Resize);
    }

    /// Signal that the document finished loading. Only the first call
    /// dispatches `Load`.
    pub fn load(&mut self) {
        if mem::replace(&mut self.loaded, true) {
            return;
        }
        self.dispatch_window_event(WindowEvent::Load);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn dispatch_window_event(&mut self, event: WindowEvent) {
        for (id, listener) in self.window.listeners(event) {
            // An earlier listener may have removed this one.
            if self.window.contains(id) {
                listener(self);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Mutation observers
    // -------------------------------------------------------------------------

    /// Observe mutations of `target` (and its subtree when requested).
    pub fn observe(
        &mut self,
        target: &str,
        init: MutationObserverInit,
        callback: MutationCallback,
    ) -> Result<ObserverId, DomError> {
        if !self.contains(target) {
            return Err(DomError::ElementNotFound(target.to_string()));
        }
        self.next_observer += 1;
        let id = ObserverId(self.next_observer);
        self.observers.push(Observer {
            id,
            target: target.to_string(),
            init,
            callback,
            pending: Vec::new(),
        });
        log::trace!("{id} observing {target}");
        Ok(id)
    }

    /// Stop an observer. Its undelivered records are dropped.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    /// Take the records queued for an observer without delivering them.
    pub fn take_records(&mut self, id: ObserverId) -> Vec<MutationRecord> {
        self.observers
            .iter_mut()
            .find(|o| o.id == id)
            .map(|o| mem::take(&mut o.pending))
            .unwrap_or_default()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // -------------------------------------------------------------------------
    // Flush
    // -------------------------------------------------------------------------

    /// Deliver queued observer records, bring layout up to date and
    /// dispatch queued scroll events, repeating while callbacks cause more
    /// work. Returns the number of callbacks invoked.
    pub fn flush(&mut self) -> usize {
        let mut invoked = 0;

        for _ in 0..self.config.max_flush_rounds {
            let batches: Vec<(ObserverId, MutationCallback, Vec<MutationRecord>)> = self
                .observers
                .iter_mut()
                .filter(|o| !o.pending.is_empty())
                .map(|o| (o.id, o.callback.clone(), mem::take(&mut o.pending)))
                .collect();

            for (id, callback, records) in batches {
                // Skip observers disconnected by an earlier callback.
                if self.observers.iter().any(|o| o.id == id) {
                    log::trace!("delivering {} record(s) to {id}", records.len());
                    callback(self, &records);
                    invoked += 1;
                }
            }

            self.ensure_layout();

            for id in mem::take(&mut self.pending_scroll) {
                if self.dispatch_scroll(&id) {
                    invoked += 1;
                }
            }

            let settled = self.pending_scroll.is_empty()
                && self.observers.iter().all(|o| o.pending.is_empty());
            if settled {
                self.ensure_layout();
                return invoked;
            }
        }

        log::warn!(
            "flush did not settle after {} rounds",
            self.config.max_flush_rounds
        );
        self.ensure_layout();
        invoked
    }
}
