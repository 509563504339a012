//! The document: element tree ownership and mutation.
//!
//! All mutation goes through [`Document`] so it can queue mutation records,
//! invalidate layout, and run custom element lifecycle hooks. Callbacks
//! receive `&mut Document` and run to completion before the next one.

mod config;
mod events;

use std::collections::{HashMap, HashSet};
use std::mem;
use std::time::Instant;

pub use config::DocumentConfig;

use crate::animation::AnimationState;
use crate::buffer::Buffer;
use crate::element::{
    collect_ids, find_element, find_element_mut, scope_ids, take_element, tree_ancestor_ids, walk,
    Content, Element, ShadowRoot, SCOPE_SEPARATOR,
};
use crate::error::DomError;
use crate::layout::{layout, LayoutContext, LayoutResult, RectF};
use crate::observer::{MutationRecord, Observer};
use crate::registry::{registered_elements, Constructor, CustomElement};
use crate::types::{Size, StyleProps, Stylesheet};
use crate::window::{Listener, Window};

/// Id of the document's root element.
pub const ROOT_ID: &str = "document";

pub struct Document {
    config: DocumentConfig,
    viewport: (f32, f32),
    root: Element,
    stylesheet: Stylesheet,

    layout: LayoutResult,
    layout_dirty: bool,
    animation: AnimationState,

    scroll_offsets: HashMap<String, f32>,
    scroll_handlers: HashMap<String, Listener>,
    pending_scroll: Vec<String>,

    observers: Vec<Observer>,
    next_observer: u64,
    window: Window,
    loaded: bool,

    definitions: HashMap<String, Constructor>,
    instances: HashMap<String, Box<dyn CustomElement>>,
    connected: HashSet<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentConfig::default())
    }
}

impl Document {
    /// Create an empty document. Custom elements registered through
    /// inventory are defined up front.
    pub fn new(config: DocumentConfig) -> Self {
        let definitions = registered_elements()
            .map(|def| (def.tag.to_string(), def.constructor))
            .collect();

        Self {
            config,
            viewport: config.viewport,
            root: Element::div().id(ROOT_ID).width(Size::Fill).height(Size::Fill),
            stylesheet: Stylesheet::new(),
            layout: LayoutResult::default(),
            layout_dirty: true,
            animation: AnimationState::new(),
            scroll_offsets: HashMap::new(),
            scroll_handlers: HashMap::new(),
            pending_scroll: Vec::new(),
            observers: Vec::new(),
            next_observer: 0,
            window: Window::default(),
            loaded: false,
            definitions,
            instances: HashMap::new(),
            connected: HashSet::new(),
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_id(&self) -> &'static str {
        ROOT_ID
    }

    /// Replace the document-level stylesheet.
    pub fn set_stylesheet(&mut self, stylesheet: Stylesheet) {
        self.stylesheet = stylesheet;
        self.layout_dirty = true;
    }

    /// Find an element anywhere in the document, shadow trees included.
    pub fn element(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    /// Resolve the document id of the element with `local_id` inside the
    /// shadow tree of `host`.
    pub fn shadow_element_id(&self, host: &str, local_id: &str) -> Option<String> {
        let host_element = self.element(host)?;
        let shadow = host_element.shadow.as_ref()?;
        let id = format!("{host}{SCOPE_SEPARATOR}{local_id}");
        shadow
            .children
            .iter()
            .any(|child| find_element(child, &id).is_some())
            .then_some(id)
    }

    // -------------------------------------------------------------------------
    // Custom elements
    // -------------------------------------------------------------------------

    /// Define a custom element. Elements with this tag already in the
    /// document are upgraded immediately.
    pub fn define(&mut self, tag: &str, constructor: Constructor) -> Result<(), DomError> {
        if self.definitions.contains_key(tag) {
            return Err(DomError::AlreadyDefined(tag.to_string()));
        }
        self.definitions.insert(tag.to_string(), constructor);
        log::debug!("defined <{tag}>");

        for host in self.pending_hosts(ROOT_ID) {
            self.connect_host(&host);
        }
        Ok(())
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.contains_key(tag)
    }

    /// Whether the custom element at `host` is currently connected.
    pub fn is_connected(&self, host: &str) -> bool {
        self.connected.contains(host)
    }

    /// Defined hosts in the subtree of `id` that are not connected yet.
    fn pending_hosts(&self, id: &str) -> Vec<String> {
        let Some(element) = self.element(id) else {
            return Vec::new();
        };
        let mut hosts = Vec::new();
        walk(element, &mut |e| {
            if self.definitions.contains_key(&e.tag) && !self.connected.contains(&e.id) {
                hosts.push(e.id.clone());
            }
        });
        hosts
    }

    fn connect_host(&mut self, host: &str) {
        if self.connected.contains(host) {
            return;
        }
        let Some(element) = self.element(host) else {
            return;
        };
        let tag = element.tag.clone();
        let needs_shadow = element.shadow.is_none();

        let mut instance = match self.instances.remove(host) {
            Some(instance) if !needs_shadow => instance,
            _ => {
                let Some(constructor) = self.definitions.get(&tag) else {
                    return;
                };
                constructor()
            }
        };

        if needs_shadow {
            let template = instance.template();
            let mut children = template.children;
            scope_ids(&mut children, host);
            if let Some(element) = find_element_mut(&mut self.root, host) {
                element.shadow = Some(ShadowRoot {
                    children,
                    stylesheet: template.stylesheet,
                });
            }
            self.layout_dirty = true;
        }

        log::debug!("connecting <{tag}> {host}");
        self.connected.insert(host.to_string());
        if let Err(err) = instance.connected(self, host) {
            log::error!("<{tag}> {host} failed to connect: {err}");
        }
        self.instances.insert(host.to_string(), instance);

        // Hosts nested in the freshly attached shadow tree.
        for nested in self.pending_hosts(host) {
            self.connect_host(&nested);
        }
    }

    fn disconnect_subtree(&mut self, detached: &Element) {
        let mut hosts = Vec::new();
        walk(detached, &mut |e| {
            if self.connected.contains(&e.id) {
                hosts.push((e.id.clone(), e.tag.clone()));
            }
        });

        for (host, tag) in hosts {
            self.connected.remove(&host);
            if let Some(mut instance) = self.instances.remove(&host) {
                log::debug!("disconnecting <{tag}> {host}");
                instance.disconnected(self, &host);
                self.instances.insert(host, instance);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Tree mutation
    // -------------------------------------------------------------------------

    /// Append `child` (and its subtree) under `parent`. Returns the child's id.
    pub fn append_child(&mut self, parent: &str, child: Element) -> Result<String, DomError> {
        if let Some(duplicate) = collect_ids(&child).into_iter().find(|id| self.contains(id)) {
            return Err(DomError::DuplicateId(duplicate));
        }

        let parent_element = find_element_mut(&mut self.root, parent)
            .ok_or_else(|| DomError::ElementNotFound(parent.to_string()))?;
        let child_id = child.id.clone();
        match &mut parent_element.content {
            Content::Children(children) => children.push(child),
            content => *content = Content::Children(vec![child]),
        }

        self.layout_dirty = true;
        self.queue_record(MutationRecord::ChildList {
            target: parent.to_string(),
            added: vec![child_id.clone()],
            removed: Vec::new(),
        });

        for host in self.pending_hosts(&child_id) {
            self.connect_host(&host);
        }
        Ok(child_id)
    }

    /// Detach the element with `id` and return it.
    pub fn remove_child(&mut self, id: &str) -> Result<Element, DomError> {
        if id == ROOT_ID {
            return Err(DomError::RemoveRoot);
        }
        let (parent, element) = take_element(&mut self.root, id)
            .ok_or_else(|| DomError::ElementNotFound(id.to_string()))?;

        self.layout_dirty = true;
        self.queue_record(MutationRecord::ChildList {
            target: parent,
            added: Vec::new(),
            removed: vec![id.to_string()],
        });
        self.forget(&element);
        Ok(element)
    }

    /// Replace the content of `id` with text.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> Result<(), DomError> {
        let text = text.into();
        let element = find_element_mut(&mut self.root, id)
            .ok_or_else(|| DomError::ElementNotFound(id.to_string()))?;
        if matches!(&element.content, Content::Text(current) if *current == text) {
            return Ok(());
        }

        let old = mem::replace(&mut element.content, Content::Text(text));
        let removed: Vec<String> = old.children().iter().map(|c| c.id.clone()).collect();

        self.layout_dirty = true;
        self.queue_record(MutationRecord::ChildList {
            target: id.to_string(),
            added: Vec::new(),
            removed,
        });
        for child in old.children() {
            self.forget(child);
        }
        Ok(())
    }

    /// Set an attribute. `class` and `style` update the class list and the
    /// inline style; `id` cannot be changed.
    pub fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<(), DomError> {
        match name {
            "id" => Err(DomError::ReadOnlyAttribute(name.to_string())),
            "class" => self.set_class_name(id, value),
            "style" => {
                let style = StyleProps::parse(value)?;
                let element = self.element_mut(id)?;
                if element.style != style {
                    element.style = style;
                    self.attribute_changed(id, "style");
                }
                Ok(())
            }
            _ => {
                let element = self.element_mut(id)?;
                if element.get_attribute(name) != Some(value) {
                    element.attributes.insert(name.to_string(), value.to_string());
                    self.attribute_changed(id, name);
                }
                Ok(())
            }
        }
    }

    /// Remove an attribute. Returns `true` when it was present.
    pub fn remove_attribute(&mut self, id: &str, name: &str) -> Result<bool, DomError> {
        let element = self.element_mut(id)?;
        let removed = match name {
            "id" => return Err(DomError::ReadOnlyAttribute(name.to_string())),
            "class" => !mem::take(&mut element.classes).is_empty(),
            "style" => mem::take(&mut element.style) != StyleProps::default(),
            _ => element.attributes.remove(name).is_some(),
        };
        if removed {
            self.attribute_changed(id, name);
        }
        Ok(removed)
    }

    /// Replace the class list with the whitespace separated `class_name`.
    pub fn set_class_name(&mut self, id: &str, class_name: &str) -> Result<(), DomError> {
        let classes: Vec<String> = class_name.split_whitespace().map(str::to_string).collect();
        let element = self.element_mut(id)?;
        if element.classes != classes {
            element.classes = classes;
            self.attribute_changed(id, "class");
        }
        Ok(())
    }

    /// Set one inline style property, e.g. `("height", "25%")`.
    pub fn set_style_property(&mut self, id: &str, name: &str, value: &str) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        if element.style.set_property(name, value)? {
            self.attribute_changed(id, "style");
        }
        Ok(())
    }

    /// Unset one inline style property so it falls back to the stylesheet.
    pub fn remove_style_property(&mut self, id: &str, name: &str) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        if element.style.remove_property(name)? {
            self.attribute_changed(id, "style");
        }
        Ok(())
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut Element, DomError> {
        find_element_mut(&mut self.root, id).ok_or_else(|| DomError::ElementNotFound(id.to_string()))
    }

    fn attribute_changed(&mut self, id: &str, name: &str) {
        self.layout_dirty = true;
        self.queue_record(MutationRecord::Attributes {
            target: id.to_string(),
            name: name.to_string(),
        });
    }

    fn queue_record(&mut self, record: MutationRecord) {
        if self.observers.is_empty() {
            return;
        }
        let ancestors = tree_ancestor_ids(&self.root, record.target()).unwrap_or_default();
        for observer in &mut self.observers {
            observer.consider(&record, &ancestors);
        }
    }

    /// Run disconnect hooks for a detached subtree and drop per-element state.
    fn forget(&mut self, detached: &Element) {
        self.disconnect_subtree(detached);
        for id in collect_ids(detached) {
            self.scroll_handlers.remove(&id);
            self.scroll_offsets.remove(&id);
            self.pending_scroll.retain(|pending| *pending != id);
        }
    }

    // -------------------------------------------------------------------------
    // Layout and measurement
    // -------------------------------------------------------------------------

    fn ensure_layout(&mut self) {
        if !self.layout_dirty {
            return;
        }

        let viewport = RectF::from_size(self.viewport.0, self.viewport.1);
        // A second pass runs only when clamping scroll offsets moved content.
        for _ in 0..2 {
            let cx = LayoutContext {
                viewport,
                line_height: self.config.line_height,
                native_scrollbar_width: self.config.native_scrollbar_width,
                scroll_offsets: &self.scroll_offsets,
                stylesheet: &self.stylesheet,
            };
            self.layout = layout(&self.root, &cx);

            let mut clamped = false;
            for (id, offset) in self.scroll_offsets.iter_mut() {
                let Some(layout_box) = self.layout.get(id) else {
                    continue;
                };
                let max = layout_box.max_scroll_top();
                if *offset > max {
                    log::trace!("clamping scroll offset of {id} to {max}");
                    *offset = max;
                    clamped = true;
                    if !self.pending_scroll.contains(id) {
                        self.pending_scroll.push(id.clone());
                    }
                }
            }
            if !clamped {
                break;
            }
        }
        self.layout_dirty = false;

        let now = Instant::now();
        for (id, layout_box) in self.layout.iter() {
            self.animation
                .update(id, layout_box.style.opacity, layout_box.style.transition, now);
        }
        let live: HashSet<&str> = self.layout.iter().map(|(id, _)| id).collect();
        self.animation.prune(&live, now);
    }

    /// Current layout, recomputed if anything changed since the last pass.
    pub fn layout(&mut self) -> &LayoutResult {
        self.ensure_layout();
        &self.layout
    }

    /// Laid-out border box of an element.
    pub fn bounding_rect(&mut self, id: &str) -> Option<RectF> {
        self.ensure_layout();
        self.layout.get(id).map(|b| b.rect)
    }

    /// Full height of an element's content, at least its own height.
    pub fn scroll_height(&mut self, id: &str) -> Option<f32> {
        self.ensure_layout();
        self.layout.get(id).map(|b| b.scroll_height)
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.animation.set_reduced_motion(enabled);
    }

    /// Paint the document into `buf`, sampling transitions at `now`.
    pub fn render(&mut self, buf: &mut Buffer, now: Instant) {
        self.ensure_layout();
        crate::render::render_to_buffer(&self.layout, &self.animation, buf, now);
    }
}
