//! Shadow tree skeleton and styles of the scrollbar overlay.
//!
//! ```text
//! div.data-simplebar
//!  ├─ div.simplebar-mask
//!  │   └─ div#simplebar-offset.simplebar-offset
//!  │       └─ div#simplebar-content-wrapper        (viewport)
//!  │           └─ div.simplebar-content
//!  │               └─ slot
//!  └─ div.simplebar-track.simplebar-vertical
//!      └─ div#simplebar-scrollbar                  (thumb)
//!          └─ div.simplebar-scrollbar-before       (indicator)
//! ```

use std::time::Duration;

use termdom::{
    Easing, Element, Length, Overflow, Position, Rgb, Selector, ShadowTemplate, Size, StyleProps,
    Stylesheet, TransitionConfig,
};

/// Id of the scrollable viewport that hosts the slotted content.
pub const VIEWPORT_ID: &str = "simplebar-content-wrapper";
/// Id of the thumb.
pub const THUMB_ID: &str = "simplebar-scrollbar";
/// Id of the layer that is widened to push the native scrollbar out of view.
pub const OFFSET_ID: &str = "simplebar-offset";

pub const VISIBLE_CLASS: &str = "simplebar-visible";
pub const INVISIBLE_CLASS: &str = "simplebar-invisible";

const ROOT_CLASS: &str = "data-simplebar";
const MASK_CLASS: &str = "simplebar-mask";
const OFFSET_CLASS: &str = "simplebar-offset";
const CONTENT_CLASS: &str = "simplebar-content";
const TRACK_CLASS: &str = "simplebar-track";
const VERTICAL_CLASS: &str = "simplebar-vertical";
const INDICATOR_CLASS: &str = "simplebar-scrollbar-before";

pub const TRACK_WIDTH: f32 = 11.0;
pub const THUMB_WIDTH: f32 = 7.0;
pub const THUMB_RIGHT_INSET: f32 = 2.0;
pub const THUMB_MIN_HEIGHT: f32 = 10.0;
pub const THUMB_RADIUS: f32 = 7.0;
/// Vertical inset of the indicator inside the thumb.
pub const INDICATOR_INSET: f32 = 2.0;
/// Width of the native scrollbar hidden behind the mask.
pub const GUTTER_WIDTH: f32 = 17.0;

/// Indicator opacity while the thumb is visible.
pub const VISIBLE_OPACITY: f32 = 0.5;
/// Fade used when the indicator opacity changes outside the visibility classes.
pub const FADE_DURATION: Duration = Duration::from_millis(200);

pub fn template() -> ShadowTemplate {
    ShadowTemplate::new(vec![skeleton()], stylesheet())
}

pub fn skeleton() -> Element {
    let viewport = Element::div().id(VIEWPORT_ID).child(
        Element::div()
            .class(CONTENT_CLASS)
            .child(Element::slot()),
    );

    let mask = Element::div().class(MASK_CLASS).child(
        Element::div()
            .id(OFFSET_ID)
            .class(OFFSET_CLASS)
            .child(viewport),
    );

    let thumb = Element::div()
        .id(THUMB_ID)
        .top(Length::Px(0.0))
        .child(Element::div().class(INDICATOR_CLASS));

    let track = Element::div()
        .class(TRACK_CLASS)
        .class(VERTICAL_CLASS)
        .child(thumb);

    Element::div().class(ROOT_CLASS).child(mask).child(track)
}

fn class(name: &str) -> Selector {
    Selector::class(name)
}

pub fn stylesheet() -> Stylesheet {
    let zero = Length::Px(0.0);
    let thumb_indicator = |state: &str| {
        Selector::descendant(
            class(TRACK_CLASS),
            Selector::descendant(
                Selector::id(THUMB_ID).and(class(state)),
                class(INDICATOR_CLASS),
            ),
        )
    };

    Stylesheet::new()
        .rule(
            class(ROOT_CLASS),
            StyleProps::new()
                .position(Position::Relative)
                .width(Size::percent(100.0))
                .height(Size::percent(100.0)),
        )
        .rule(
            class(MASK_CLASS),
            StyleProps::new()
                .position(Position::Absolute)
                .overflow(Overflow::Hidden)
                .inset(zero),
        )
        .rule(
            class(OFFSET_CLASS),
            StyleProps::new().position(Position::Absolute).inset(zero),
        )
        .rule(
            Selector::id(VIEWPORT_ID),
            StyleProps::new()
                .height(Size::percent(100.0))
                .overflow(Overflow::Auto),
        )
        .rule(
            class(TRACK_CLASS).and(class(VERTICAL_CLASS)),
            StyleProps::new()
                .top(zero)
                .width(Size::px(TRACK_WIDTH)),
        )
        .rule(
            class(TRACK_CLASS),
            StyleProps::new()
                .position(Position::Absolute)
                .right(zero)
                .bottom(zero)
                .overflow(Overflow::Hidden),
        )
        .rule(
            Selector::id(THUMB_ID),
            StyleProps::new()
                .position(Position::Absolute)
                .right(Length::Px(THUMB_RIGHT_INSET))
                .width(Size::px(THUMB_WIDTH))
                .min_height(Length::Px(THUMB_MIN_HEIGHT)),
        )
        .rule(
            class(INDICATOR_CLASS),
            StyleProps::new()
                .position(Position::Absolute)
                .background(Rgb::BLACK)
                .border_radius(THUMB_RADIUS)
                .left(zero)
                .right(zero)
                .opacity(0.0)
                .transition(TransitionConfig::new(FADE_DURATION, Easing::Linear)),
        )
        .rule(
            Selector::descendant(
                class(TRACK_CLASS).and(class(VERTICAL_CLASS)),
                class(INDICATOR_CLASS),
            ),
            StyleProps::new()
                .top(Length::Px(INDICATOR_INSET))
                .bottom(Length::Px(INDICATOR_INSET)),
        )
        .rule(
            thumb_indicator(VISIBLE_CLASS),
            StyleProps::new()
                .opacity(VISIBLE_OPACITY)
                .transition(TransitionConfig::instant()),
        )
        .rule(
            thumb_indicator(INVISIBLE_CLASS),
            StyleProps::new()
                .opacity(0.0)
                .transition(TransitionConfig::instant()),
        )
}
