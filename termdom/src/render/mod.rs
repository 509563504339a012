//! Rasterise a layout into terminal cells.
//!
//! Layout works in CSS pixels; each cell covers [`CELL_WIDTH_PX`] by
//! [`CELL_HEIGHT_PX`]. Anything with a non-empty box covers at least one
//! cell so thin elements stay visible.

use std::collections::HashMap;
use std::time::Instant;

use crate::animation::AnimationState;
use crate::buffer::{Buffer, CellArea};
use crate::layout::{LayoutBox, LayoutResult, RectF};
use crate::text::glyphs;
use crate::types::Rgb;

pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

const NATIVE_TRACK: Rgb = Rgb::new(48, 48, 48);
const NATIVE_THUMB: Rgb = Rgb::new(128, 128, 128);

/// Cells covered by `rect`. Anything with a non-empty box covers at least
/// one cell.
fn cell_area(rect: RectF) -> Option<CellArea> {
    if rect.is_empty() {
        return None;
    }
    let to_col = |px: f32| (px / CELL_WIDTH_PX).round().clamp(0.0, u16::MAX as f32) as u16;
    let to_row = |px: f32| (px / CELL_HEIGHT_PX).round().clamp(0.0, u16::MAX as f32) as u16;

    let x0 = to_col(rect.x);
    let y0 = to_row(rect.y);
    Some(CellArea {
        x0,
        y0,
        x1: to_col(rect.right()).max(x0.saturating_add(1)),
        y1: to_row(rect.bottom()).max(y0.saturating_add(1)),
    })
}

/// Paint every box in `layout` into `buf`, sampling opacity transitions at
/// `now`. Opacity multiplies down the tree like CSS group opacity.
pub fn render_to_buffer(
    layout: &LayoutResult,
    animation: &AnimationState,
    buf: &mut Buffer,
    now: Instant,
) {
    let mut opacities: HashMap<&str, f32> = HashMap::with_capacity(layout.len());

    for (id, layout_box) in layout.iter() {
        let own = animation.value(id, now).unwrap_or(layout_box.style.opacity);
        let inherited = layout_box
            .parent
            .as_deref()
            .and_then(|parent| opacities.get(parent))
            .copied()
            .unwrap_or(1.0);
        let opacity = own * inherited;
        opacities.insert(id, opacity);

        if opacity <= 0.0 {
            continue;
        }
        render_box(layout_box, opacity, buf);
    }
}

fn render_box(layout_box: &LayoutBox, opacity: f32, buf: &mut Buffer) {
    let visible = match layout_box.clip {
        Some(clip) => layout_box.rect.intersect(&clip),
        None => layout_box.rect,
    };
    let Some(area) = cell_area(visible) else {
        return;
    };

    if let Some(bg) = layout_box.style.background {
        if layout_box.style.border_radius > 0.0 {
            buf.fill_rounded(area, bg, opacity);
        } else {
            buf.fill(area, bg, opacity);
        }
    }

    if let Some(text) = &layout_box.text {
        let origin = (
            (layout_box.rect.x / CELL_WIDTH_PX).round() as i32,
            (layout_box.rect.y / CELL_HEIGHT_PX).round() as i32,
        );
        render_text(buf, origin, area, text, layout_box.style.foreground, opacity);
    }

    if let Some(native) = layout_box.native_scrollbar {
        let clip = layout_box.clip.unwrap_or(native.track);
        if let Some(track) = cell_area(native.track.intersect(&clip)) {
            buf.fill(track, NATIVE_TRACK, opacity);
        }
        if let Some(thumb) = cell_area(native.thumb.intersect(&clip)) {
            buf.fill(thumb, NATIVE_THUMB, opacity);
        }
    }
}

/// Draw `text` with its first line at cell `origin`, keeping only what falls
/// inside `area`.
fn render_text(
    buf: &mut Buffer,
    origin: (i32, i32),
    area: CellArea,
    text: &str,
    fg: Rgb,
    opacity: f32,
) {
    let rows = i32::from(area.y0)..i32::from(area.y1);
    let cols = i32::from(area.x0)..i32::from(area.x1);

    for (line_index, line) in text.split('\n').enumerate() {
        let row = origin.1 + line_index as i32;
        if row >= rows.end {
            break;
        }
        if !rows.contains(&row) {
            continue;
        }
        let row = row as u16;

        for (column, ch, width) in glyphs(line) {
            let x = origin.0 + column as i32;
            let width = width as i32;
            if x + width > cols.end {
                break;
            }
            if x < cols.start {
                continue;
            }
            buf.put_glyph(x as u16, row, ch, width as u16, fg, opacity);
        }
    }
}
