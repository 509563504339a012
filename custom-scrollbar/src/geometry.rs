//! Thumb geometry derived from viewport scroll metrics.
//!
//! Every value here is recomputed from live measurements; nothing is
//! carried between updates.

use crate::template::GUTTER_WIDTH;

/// Below this many pixels of scrollable overflow the thumb is hidden.
pub const VISIBILITY_THRESHOLD: f32 = 1.0;

/// Snapshot of the viewport's size and content size, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Laid-out height of the viewport.
    pub visible_height: f32,
    /// Full scrollable height of the viewport's content.
    pub content_height: f32,
}

impl ViewportMetrics {
    pub fn new(visible_height: f32, content_height: f32) -> Self {
        Self {
            visible_height,
            content_height,
        }
    }

    pub fn max_scroll_top(&self) -> f32 {
        self.content_height - self.visible_height
    }

    /// Thumb height as a percentage of the track.
    ///
    /// `None` while the content has no measurable height, so callers never
    /// write a non-finite or negative length.
    pub fn height_percent(&self) -> Option<f32> {
        if self.content_height <= 0.0 || self.visible_height < 0.0 {
            return None;
        }
        let percent = 100.0 * self.visible_height / self.content_height;
        percent.is_finite().then_some(percent)
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::from_max_scroll_top(self.max_scroll_top())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Visible,
    #[default]
    Invisible,
}

impl Visibility {
    /// `Invisible` when there is less than one pixel to scroll.
    pub fn from_max_scroll_top(max_scroll_top: f32) -> Self {
        if max_scroll_top >= VISIBILITY_THRESHOLD {
            Visibility::Visible
        } else {
            // NaN also ends up here
            Visibility::Invisible
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }

    /// Class applied to the thumb for this state.
    pub fn class_name(self) -> &'static str {
        match self {
            Visibility::Visible => crate::template::VISIBLE_CLASS,
            Visibility::Invisible => crate::template::INVISIBLE_CLASS,
        }
    }

    /// Gutter width reserved on the right of the viewport in this state.
    pub fn gutter(self) -> Option<f32> {
        self.is_visible().then_some(GUTTER_WIDTH)
    }
}

/// Thumb height and offset, both as percentages of the track height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbGeometry {
    pub height_percent: f32,
    pub top_percent: f32,
}

impl ThumbGeometry {
    pub fn new(metrics: ViewportMetrics, scroll_top: f32) -> Option<Self> {
        let height_percent = metrics.height_percent()?;
        let ratio = scroll_percentage(scroll_top, metrics.max_scroll_top());
        Some(Self {
            height_percent,
            top_percent: top_percent(height_percent, ratio),
        })
    }
}

/// Fraction of the scroll range covered, in `[0, 1]`.
pub fn scroll_percentage(scroll_top: f32, max_scroll_top: f32) -> f32 {
    if max_scroll_top <= 0.0 || !max_scroll_top.is_finite() {
        return 0.0;
    }
    let ratio = scroll_top / max_scroll_top;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Thumb offset so that it reaches the bottom of the track at full scroll.
pub fn top_percent(height_percent: f32, scroll_percentage: f32) -> f32 {
    ((100.0 - height_percent) * scroll_percentage).max(0.0)
}
