//! The `custom-scrollbar` element.
//!
//! The overlay keeps a thumb in sync with the scroll state of its viewport.
//! It recomputes from live measurements whenever the window resizes or
//! loads, or anything in the host's light tree changes. Each recomputation
//! reads fresh metrics, so coalesced notifications and repeated calls are
//! harmless.

use std::error::Error;
use std::rc::Rc;

use termdom::{
    CustomElement, Document, DomError, ElementDefinition, Listener, ListenerId,
    MutationObserverInit, MutationRecord, ObserverId, ShadowTemplate, WindowEvent,
};

use crate::error::ScrollbarError;
use crate::geometry::{ThumbGeometry, ViewportMetrics, Visibility};
use crate::template::{self, GUTTER_WIDTH, OFFSET_ID, THUMB_ID, VIEWPORT_ID};

/// Tag name the overlay is registered under.
pub const TAG_NAME: &str = "custom-scrollbar";

/// Document ids of the shadow elements the overlay drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRefs {
    pub viewport: String,
    pub thumb: String,
    pub offset: String,
}

impl ElementRefs {
    /// Look the elements up in the shadow tree of `host`.
    pub fn resolve(doc: &Document, host: &str) -> Result<Self, ScrollbarError> {
        let find = |local: &str| {
            doc.shadow_element_id(host, local)
                .ok_or_else(|| ScrollbarError::MissingElement {
                    id: local.to_string(),
                })
        };
        Ok(Self {
            viewport: find(VIEWPORT_ID)?,
            thumb: find(THUMB_ID)?,
            offset: find(OFFSET_ID)?,
        })
    }
}

/// What a recomputation left on the thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbState {
    /// Height written to the thumb, `None` when the viewport could not be
    /// measured and the height was left alone.
    pub height_percent: Option<f32>,
    /// Offset written to the thumb. Only set while visible.
    pub top_percent: Option<f32>,
    pub visibility: Visibility,
    /// Gutter reserved on the offset layer.
    pub gutter: Option<f32>,
}

/// Recompute thumb size, visibility and gutter from the viewport's current
/// metrics.
pub fn update_scrollbar(doc: &mut Document, refs: &ElementRefs) -> Result<ThumbState, ScrollbarError> {
    let missing = || ScrollbarError::MissingElement {
        id: refs.viewport.clone(),
    };
    let visible_height = doc.bounding_rect(&refs.viewport).ok_or_else(missing)?.height;
    let content_height = doc.scroll_height(&refs.viewport).ok_or_else(missing)?;
    let metrics = ViewportMetrics::new(visible_height, content_height);

    let Some(height_percent) = metrics.height_percent() else {
        log::warn!(
            "{} has no measurable content ({visible_height}/{content_height}), hiding thumb",
            refs.viewport
        );
        hide(doc, refs)?;
        return Ok(ThumbState {
            height_percent: None,
            top_percent: None,
            visibility: Visibility::Invisible,
            gutter: None,
        });
    };

    doc.set_style_property(&refs.thumb, "height", &format!("{height_percent}%"))?;

    let visibility = metrics.visibility();
    let top_percent = match visibility {
        Visibility::Invisible => {
            hide(doc, refs)?;
            None
        }
        Visibility::Visible => show(doc, refs, metrics)?,
    };

    let state = ThumbState {
        height_percent: Some(height_percent),
        top_percent,
        visibility,
        gutter: visibility.gutter(),
    };
    log::debug!("{} updated: {state:?}", refs.thumb);
    Ok(state)
}

fn hide(doc: &mut Document, refs: &ElementRefs) -> Result<(), DomError> {
    doc.set_onscroll(&refs.viewport, None)?;
    doc.set_class_name(&refs.thumb, Visibility::Invisible.class_name())?;
    doc.remove_style_property(&refs.offset, "right")?;
    Ok(())
}

/// Install the scroll handler, sync the thumb offset once and reserve the
/// gutter. Returns the offset written.
///
/// The handler keeps the metrics of this recomputation; the next one
/// replaces it.
fn show(
    doc: &mut Document,
    refs: &ElementRefs,
    metrics: ViewportMetrics,
) -> Result<Option<f32>, DomError> {
    let viewport = refs.viewport.clone();
    let thumb = refs.thumb.clone();
    let on_scroll: Listener = Rc::new(move |doc: &mut Document| {
        if let Err(err) = sync_thumb_top(doc, &viewport, &thumb, metrics) {
            log::warn!("scroll sync of {thumb} failed: {err}");
        }
    });
    doc.set_onscroll(&refs.viewport, Some(on_scroll))?;

    let top = sync_thumb_top(doc, &refs.viewport, &refs.thumb, metrics)?;
    doc.set_class_name(&refs.thumb, Visibility::Visible.class_name())?;
    doc.set_style_property(&refs.offset, "right", &format!("{}px", -GUTTER_WIDTH))?;
    Ok(top)
}

fn sync_thumb_top(
    doc: &mut Document,
    viewport: &str,
    thumb: &str,
    metrics: ViewportMetrics,
) -> Result<Option<f32>, DomError> {
    let Some(geometry) = ThumbGeometry::new(metrics, doc.scroll_top(viewport)) else {
        return Ok(None);
    };
    log::trace!("{thumb} top at {}%", geometry.top_percent);
    doc.set_style_property(thumb, "top", &format!("{}%", geometry.top_percent))?;
    Ok(Some(geometry.top_percent))
}

/// Registrations that tie one overlay instance to the document.
#[derive(Debug, Default)]
struct Subscriptions {
    resize: Option<ListenerId>,
    load: Option<ListenerId>,
    observer: Option<ObserverId>,
}

/// The custom element behind `<custom-scrollbar>`.
#[derive(Default)]
pub struct ScrollbarOverlay {
    refs: Option<ElementRefs>,
    /// Recompute callback, created once so every registration shares it.
    update: Option<Listener>,
    subscriptions: Subscriptions,
}

impl ScrollbarOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolved element ids, once connected.
    pub fn refs(&self) -> Option<&ElementRefs> {
        self.refs.as_ref()
    }

    fn update_callback(&mut self, refs: &ElementRefs) -> Listener {
        self.update
            .get_or_insert_with(|| {
                let refs = refs.clone();
                let update: Listener = Rc::new(move |doc: &mut Document| {
                    if let Err(err) = update_scrollbar(doc, &refs) {
                        log::warn!("scrollbar update failed: {err}");
                    }
                });
                update
            })
            .clone()
    }

    fn release(&mut self, doc: &mut Document) {
        let subs = std::mem::take(&mut self.subscriptions);
        for id in [subs.resize, subs.load].into_iter().flatten() {
            doc.remove_window_listener(id);
        }
        if let Some(observer) = subs.observer {
            doc.disconnect(observer);
        }
    }
}

impl CustomElement for ScrollbarOverlay {
    fn template(&self) -> ShadowTemplate {
        template::template()
    }

    fn connected(&mut self, doc: &mut Document, host: &str) -> Result<(), Box<dyn Error>> {
        let refs = ElementRefs::resolve(doc, host)?;
        let update = self.update_callback(&refs);

        // A reattached host may still hold registrations from a failed teardown.
        self.release(doc);
        self.subscriptions.resize = Some(doc.add_window_listener(WindowEvent::Resize, update.clone()));
        self.subscriptions.load = Some(doc.add_window_listener(WindowEvent::Load, update.clone()));
        self.subscriptions.observer = Some(doc.observe(
            host,
            MutationObserverInit::all(),
            Rc::new(move |doc: &mut Document, _records: &[MutationRecord]| update(doc)),
        )?);

        let state = update_scrollbar(doc, &refs)?;
        log::debug!("{TAG_NAME} {host} connected: {:?}", state.visibility);
        self.refs = Some(refs);
        Ok(())
    }

    /// The host is already out of the tree here; removing it purged the
    /// viewport's scroll handler along with the rest of the subtree.
    fn disconnected(&mut self, doc: &mut Document, host: &str) {
        self.release(doc);
        log::debug!("{TAG_NAME} {host} disconnected");
    }
}

fn construct() -> Box<dyn CustomElement> {
    Box::new(ScrollbarOverlay::new())
}

inventory::submit! {
    ElementDefinition::new(TAG_NAME, construct)
}

/// Define `<custom-scrollbar>` on `doc` unless it is already defined.
pub fn register(doc: &mut Document) -> Result<(), DomError> {
    if doc.is_defined(TAG_NAME) {
        return Ok(());
    }
    doc.define(TAG_NAME, construct)
}
