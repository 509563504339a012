use std::collections::HashMap;

use super::RectF;
use crate::element::{Content, Element};
use crate::types::{ComputedStyle, Length, Overflow, Position, Rgb, Size, StyleProps, Stylesheet};

/// Layout output for a single element.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// Border box in document coordinates, after scroll offsets.
    pub rect: RectF,
    /// Area this element may paint into, from ancestors that clip.
    pub clip: Option<RectF>,
    /// Height of the scrollable content, never less than the box height.
    pub scroll_height: f32,
    /// Scroll offset applied to this element's flow children.
    pub scroll_top: f32,
    /// Native scrollbar shown by scroll containers whose content overflows.
    pub native_scrollbar: Option<NativeScrollbar>,
    pub style: ComputedStyle,
    pub parent: Option<String>,
    pub text: Option<String>,
}

impl LayoutBox {
    pub fn max_scroll_top(&self) -> f32 {
        (self.scroll_height - self.rect.height).max(0.0)
    }

    pub fn is_scroll_container(&self) -> bool {
        self.style.overflow == Overflow::Auto
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeScrollbar {
    pub track: RectF,
    pub thumb: RectF,
}

/// Boxes keyed by element id, plus the order to paint them in.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    boxes: HashMap<String, LayoutBox>,
    order: Vec<String>,
}

impl LayoutResult {
    pub fn get(&self, id: &str) -> Option<&LayoutBox> {
        self.boxes.get(id)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Boxes in paint order (parents before children, tree order otherwise).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayoutBox)> {
        self.order
            .iter()
            .filter_map(|id| self.boxes.get(id).map(|b| (id.as_str(), b)))
    }

    /// Innermost scroll container under the point that can actually scroll.
    pub fn scroll_container_at(&self, x: f32, y: f32) -> Option<&str> {
        self.iter()
            .filter(|(_, b)| {
                b.is_scroll_container()
                    && b.max_scroll_top() > 0.0
                    && b.rect.contains(x, y)
                    && b.clip.map_or(true, |clip| clip.contains(x, y))
            })
            .last()
            .map(|(id, _)| id)
    }
}

/// Inputs of a layout pass that do not live in the element tree.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub viewport: RectF,
    pub line_height: f32,
    pub native_scrollbar_width: f32,
    pub scroll_offsets: &'a HashMap<String, f32>,
    pub stylesheet: &'a Stylesheet,
}

pub fn layout(root: &Element, cx: &LayoutContext) -> LayoutResult {
    let mut engine = Engine {
        cx,
        out: LayoutResult::default(),
    };
    let scope = Scope {
        sheet: cx.stylesheet,
        slotted: &[],
        outer: None,
    };
    let containing = Containing {
        rect: cx.viewport,
        definite_height: Some(cx.viewport.height),
    };
    engine.layout_element(
        root,
        &mut Vec::new(),
        scope,
        None,
        cx.viewport.y,
        containing,
        Rgb::WHITE,
        None,
    );
    engine.out
}

/// Style scope: the stylesheet in effect and, inside a shadow tree, the
/// host's light children that a slot projects.
#[derive(Clone, Copy)]
struct Scope<'a, 'p> {
    sheet: &'a Stylesheet,
    slotted: &'a [Element],
    outer: Option<&'p Scope<'a, 'p>>,
}

#[derive(Clone, Copy)]
struct Containing {
    rect: RectF,
    /// `None` while the containing box's height depends on its content,
    /// in which case percentage heights behave as `auto`.
    definite_height: Option<f32>,
}

struct Engine<'c, 'a> {
    cx: &'c LayoutContext<'a>,
    out: LayoutResult,
}

impl Engine<'_, '_> {
    /// Lay out `element` and its subtree. Returns the height it occupies in
    /// its parent's flow (zero for absolutely positioned elements).
    #[allow(clippy::too_many_arguments)]
    fn layout_element<'a>(
        &mut self,
        element: &'a Element,
        ancestors: &mut Vec<&'a Element>,
        scope: Scope<'a, '_>,
        parent: Option<&str>,
        flow_y: f32,
        containing: Containing,
        inherited_fg: Rgb,
        clip: Option<RectF>,
    ) -> f32 {
        let mut props = StyleProps::default();
        scope.sheet.cascade_into(element, ancestors, &mut props);
        props.apply(&element.style);
        let style = ComputedStyle::resolve(&props, inherited_fg);

        self.out.order.push(element.id.clone());

        let c = containing.rect;
        let absolute = style.position == Position::Absolute;
        let (x, width) = if absolute {
            horizontal_absolute(&style, c)
        } else {
            let width = match style.width {
                Size::Auto | Size::Fill => c.width,
                Size::Length(len) => len.resolve(c.width),
            };
            let shift = relative_shift(&style, &style.left, &style.right, c.width);
            (c.x + shift, width.max(0.0))
        };

        let fixed_height = fixed_height(&style, containing, absolute);
        let top = style.top.map(|t| t.resolve(c.height));
        let y = match (absolute, top) {
            (true, Some(top)) => c.y + top,
            (true, None) => match (style.bottom, fixed_height) {
                (Some(bottom), Some(h)) => c.bottom() - bottom.resolve(c.height) - h,
                _ => c.y,
            },
            (false, _) => flow_y + relative_shift(&style, &style.top, &style.bottom, c.height),
        };

        let scroll_offset = if style.overflow == Overflow::Auto {
            self.cx
                .scroll_offsets
                .get(&element.id)
                .copied()
                .unwrap_or(0.0)
        } else {
            0.0
        };

        // Children clip to this box; while the height is still unknown only
        // the horizontal extent is constrained.
        let provisional = RectF::new(x, y, width, fixed_height.unwrap_or(f32::MAX / 4.0));
        let child_clip = if style.overflow.clips() {
            Some(clip.map_or(provisional, |c| c.intersect(&provisional)))
        } else {
            clip
        };

        let mark = self.out.order.len();
        let mut content_width = width;
        let mut content_height = self.layout_flow(
            element,
            ancestors,
            scope,
            &style,
            (x, y - scroll_offset, content_width),
            fixed_height,
            child_clip,
        );

        let mut height = fixed_height.unwrap_or(content_height);
        if let Some(min) = style.min_height {
            height = height.max(min.resolve(c.height));
        }

        let overflows = content_height > height + 0.5;
        let mut native_width = 0.0;
        if style.overflow == Overflow::Auto && overflows && self.cx.native_scrollbar_width > 0.0 {
            native_width = self.cx.native_scrollbar_width.min(width);
            content_width = width - native_width;
            self.out.order.truncate(mark);
            content_height = self.layout_flow(
                element,
                ancestors,
                scope,
                &style,
                (x, y - scroll_offset, content_width),
                fixed_height,
                child_clip,
            );
        }

        let rect = RectF::new(x, y, width, height);
        let scroll_height = content_height.max(height);
        let max_scroll = scroll_height - height;
        let native_scrollbar = (native_width > 0.0).then(|| {
            let track = RectF::new(rect.right() - native_width, rect.y, native_width, rect.height);
            let thumb_height = (rect.height * rect.height / scroll_height).max(native_width);
            let ratio = if max_scroll > 0.0 {
                (scroll_offset / max_scroll).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let thumb = RectF::new(
                track.x,
                track.y + (track.height - thumb_height) * ratio,
                native_width,
                thumb_height,
            );
            NativeScrollbar { track, thumb }
        });

        // Absolutely positioned children use the final box.
        let final_clip = if style.overflow.clips() {
            Some(clip.map_or(rect, |c| c.intersect(&rect)))
        } else {
            clip
        };
        self.layout_absolute(element, ancestors, scope, &style, rect, final_clip);

        let text = match &element.content {
            Content::Text(text) => Some(text.clone()),
            _ => None,
        };

        self.out.boxes.insert(
            element.id.clone(),
            LayoutBox {
                rect,
                clip,
                scroll_height,
                scroll_top: scroll_offset.min(max_scroll).max(0.0),
                native_scrollbar,
                style,
                parent: parent.map(str::to_string),
                text,
            },
        );

        if absolute {
            0.0
        } else {
            height
        }
    }

    /// Stack the flow children (or text lines) of `element` starting at
    /// `origin`. Returns the content height.
    #[allow(clippy::too_many_arguments)]
    fn layout_flow<'a>(
        &mut self,
        element: &'a Element,
        ancestors: &mut Vec<&'a Element>,
        scope: Scope<'a, '_>,
        style: &ComputedStyle,
        origin: (f32, f32, f32),
        fixed_height: Option<f32>,
        clip: Option<RectF>,
    ) -> f32 {
        let (x, y, width) = origin;
        let containing = Containing {
            rect: RectF::new(x, y, width, fixed_height.unwrap_or(0.0)),
            definite_height: fixed_height,
        };

        if let Content::Text(text) = &element.content {
            let lines = crate::text::line_count(text) as f32;
            return lines * self.cx.line_height;
        }

        ancestors.push(element);
        let mut cursor = y;

        if let Some(shadow) = &element.shadow {
            let inner = Scope {
                sheet: &shadow.stylesheet,
                slotted: element.light_children(),
                outer: Some(&scope),
            };
            let flow: Vec<&Element> = shadow
                .children
                .iter()
                .filter(|c| !is_absolute(inner, c, ancestors))
                .collect();
            for child in flow {
                cursor += self.layout_element(
                    child,
                    ancestors,
                    inner,
                    Some(element.id.as_str()),
                    cursor,
                    containing,
                    style.foreground,
                    clip,
                );
            }
        } else if matches!(element.content, Content::Slot) {
            if let Some(outer) = scope.outer {
                for child in scope.slotted {
                    cursor += self.layout_element(
                        child,
                        ancestors,
                        *outer,
                        Some(element.id.as_str()),
                        cursor,
                        containing,
                        style.foreground,
                        clip,
                    );
                }
            }
        } else {
            let flow: Vec<&Element> = element
                .light_children()
                .iter()
                .filter(|c| !is_absolute(scope, c, ancestors))
                .collect();
            for child in flow {
                cursor += self.layout_element(
                    child,
                    ancestors,
                    scope,
                    Some(element.id.as_str()),
                    cursor,
                    containing,
                    style.foreground,
                    clip,
                );
            }
        }

        ancestors.pop();
        cursor - y
    }

    fn layout_absolute<'a>(
        &mut self,
        element: &'a Element,
        ancestors: &mut Vec<&'a Element>,
        scope: Scope<'a, '_>,
        style: &ComputedStyle,
        rect: RectF,
        clip: Option<RectF>,
    ) {
        let containing = Containing {
            rect,
            definite_height: Some(rect.height),
        };

        ancestors.push(element);
        if let Some(shadow) = &element.shadow {
            let inner = Scope {
                sheet: &shadow.stylesheet,
                slotted: element.light_children(),
                outer: Some(&scope),
            };
            let positioned: Vec<&Element> = shadow
                .children
                .iter()
                .filter(|c| is_absolute(inner, c, ancestors))
                .collect();
            for child in positioned {
                self.layout_element(
                    child,
                    ancestors,
                    inner,
                    Some(element.id.as_str()),
                    rect.y,
                    containing,
                    style.foreground,
                    clip,
                );
            }
        } else {
            let positioned: Vec<&Element> = element
                .light_children()
                .iter()
                .filter(|c| is_absolute(scope, c, ancestors))
                .collect();
            for child in positioned {
                self.layout_element(
                    child,
                    ancestors,
                    scope,
                    Some(element.id.as_str()),
                    rect.y,
                    containing,
                    style.foreground,
                    clip,
                );
            }
        }
        ancestors.pop();
    }
}

fn fixed_height(style: &ComputedStyle, containing: Containing, absolute: bool) -> Option<f32> {
    let c = containing.rect;
    match style.height {
        Size::Length(Length::Px(px)) => Some(px.max(0.0)),
        Size::Length(Length::Percent(p)) => containing
            .definite_height
            .map(|h| (h * p / 100.0).max(0.0)),
        Size::Fill => containing.definite_height,
        Size::Auto if absolute => match (style.top, style.bottom) {
            (Some(top), Some(bottom)) => {
                Some((c.height - top.resolve(c.height) - bottom.resolve(c.height)).max(0.0))
            }
            _ => None,
        },
        Size::Auto => None,
    }
}

fn is_absolute(scope: Scope, element: &Element, ancestors: &[&Element]) -> bool {
    let position = element.style.position.or_else(|| {
        let mut props = StyleProps::default();
        scope.sheet.cascade_into(element, ancestors, &mut props);
        props.position
    });
    position == Some(Position::Absolute)
}

fn horizontal_absolute(style: &ComputedStyle, c: RectF) -> (f32, f32) {
    let left = style.left.map(|l| l.resolve(c.width));
    let right = style.right.map(|r| r.resolve(c.width));
    match style.width {
        Size::Length(len) => {
            let width = len.resolve(c.width).max(0.0);
            let x = match (left, right) {
                (Some(left), _) => c.x + left,
                (None, Some(right)) => c.right() - right - width,
                (None, None) => c.x,
            };
            (x, width)
        }
        Size::Fill => (c.x, c.width),
        Size::Auto => {
            let left = left.unwrap_or(0.0);
            let right = right.unwrap_or(0.0);
            (c.x + left, (c.width - left - right).max(0.0))
        }
    }
}

/// Offset of a relatively positioned element from its flow position.
fn relative_shift(
    style: &ComputedStyle,
    start: &Option<Length>,
    end: &Option<Length>,
    reference: f32,
) -> f32 {
    if style.position != Position::Relative {
        return 0.0;
    }
    match (start, end) {
        (Some(start), _) => start.resolve(reference),
        (None, Some(end)) => -end.resolve(reference),
        (None, None) => 0.0,
    }
}
