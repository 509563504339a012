use std::time::{Duration, Instant};

use termdom::{Buffer, CellArea, Document, Element, Length, Position, Rgb, Size, StyleProps};

fn render(doc: &mut Document) -> Buffer {
    let mut buf = Buffer::new(80, 24);
    doc.render(&mut buf, Instant::now());
    buf
}

fn doc_with(child: Element) -> Document {
    let mut doc = Document::default();
    doc.append_child(doc.root_id(), child).unwrap();
    doc
}

const RED: Rgb = Rgb::new(255, 0, 0);

// ============================================================================
// Background Tests
// ============================================================================

#[test]
fn test_background_fills_covered_cells() {
    let mut doc = doc_with(
        Element::div()
            .width(Size::px(80.0))
            .height(Size::px(32.0))
            .background(RED),
    );
    let buf = render(&mut doc);

    assert_eq!(buf.get(0, 0).unwrap().bg, RED);
    assert_eq!(buf.get(9, 1).unwrap().bg, RED);
    assert_eq!(buf.get(10, 0).unwrap().bg, Rgb::BLACK);
    assert_eq!(buf.get(0, 2).unwrap().bg, Rgb::BLACK);
}

#[test]
fn test_thin_box_still_covers_a_cell() {
    let mut doc = doc_with(
        Element::div()
            .style(
                StyleProps::new()
                    .position(Position::Absolute)
                    .left(Length::Px(16.0))
                    .width(Size::px(3.0))
                    .height(Size::px(16.0)),
            )
            .background(RED),
    );
    let buf = render(&mut doc);

    assert_eq!(buf.get(2, 0).unwrap().bg, RED);
}

#[test]
fn test_half_opacity_blends_with_backdrop() {
    let mut doc = doc_with(
        Element::div()
            .style(StyleProps::new().height(Size::px(16.0)).opacity(0.5))
            .background(Rgb::WHITE),
    );
    let buf = render(&mut doc);

    let bg = buf.get(0, 0).unwrap().bg;
    assert_ne!(bg, Rgb::WHITE);
    assert_ne!(bg, Rgb::BLACK);
    assert_eq!(bg.r, bg.g);
}

#[test]
fn test_zero_opacity_hides_subtree() {
    let mut doc = doc_with(
        Element::div()
            .style(StyleProps::new().opacity(0.0))
            .child(
                Element::div()
                    .height(Size::px(16.0))
                    .background(RED),
            ),
    );
    let buf = render(&mut doc);

    assert_eq!(buf.get(0, 0).unwrap().bg, Rgb::BLACK);
}

#[test]
fn test_rounded_box_uses_half_blocks() {
    let mut doc = doc_with(
        Element::div()
            .style(
                StyleProps::new()
                    .width(Size::px(8.0))
                    .height(Size::px(64.0))
                    .border_radius(7.0),
            )
            .background(RED),
    );
    let buf = render(&mut doc);

    assert_eq!(buf.get(0, 0).unwrap().char, '▄');
    assert_eq!(buf.get(0, 0).unwrap().fg, RED);
    assert_eq!(buf.get(0, 1).unwrap().bg, RED);
    assert_eq!(buf.get(0, 3).unwrap().char, '▀');
}

// ============================================================================
// Text Tests
// ============================================================================

#[test]
fn test_text_lines_render_on_rows() {
    let mut doc = doc_with(Element::text("hello\nworld"));
    let buf = render(&mut doc);

    assert!(buf.row_text(0).starts_with("hello"));
    assert!(buf.row_text(1).starts_with("world"));
}

#[test]
fn test_text_clips_to_box_width() {
    let mut doc = doc_with(Element::text("abcdefgh").width(Size::px(32.0)));
    let buf = render(&mut doc);

    assert!(buf.row_text(0).starts_with("abcd "));
}

#[test]
fn test_wide_characters_take_two_cells() {
    let mut doc = doc_with(Element::text("日本"));
    let buf = render(&mut doc);

    assert_eq!(buf.get(0, 0).unwrap().char, '日');
    assert!(buf.get(1, 0).unwrap().wide_continuation);
    assert_eq!(buf.get(2, 0).unwrap().char, '本');
}

#[test]
fn test_text_is_clipped_by_scroll_container() {
    let mut doc = doc_with(
        Element::div()
            .id("box")
            .height(Size::px(32.0))
            .overflow(termdom::Overflow::Auto)
            .child(Element::text("one\ntwo\nthree\nfour")),
    );
    doc.set_scroll_top("box", 16.0).unwrap();
    let buf = render(&mut doc);

    assert!(buf.row_text(0).starts_with("two"));
    assert!(buf.row_text(1).starts_with("three"));
    assert!(buf.row_text(2).trim().is_empty());
}

// ============================================================================
// Transition Tests
// ============================================================================

#[test]
fn test_opacity_change_fades_with_transition() {
    let mut doc = doc_with(
        Element::div()
            .id("fader")
            .style(
                StyleProps::new()
                    .height(Size::px(16.0))
                    .opacity(0.0)
                    .transition(termdom::TransitionConfig::new(
                        Duration::from_secs(60),
                        termdom::Easing::Linear,
                    )),
            )
            .background(Rgb::WHITE),
    );
    doc.layout();

    doc.set_style_property("fader", "opacity", "1").unwrap();
    doc.layout();

    let now = Instant::now();
    assert!(doc.animation().has_active_transitions(now));
    let value = doc.animation().value("fader", now).unwrap();
    assert!(value < 0.5, "fade has barely started: {value}");
}

// ============================================================================
// Buffer Tests
// ============================================================================

fn area(x0: u16, y0: u16, x1: u16, y1: u16) -> CellArea {
    CellArea { x0, y0, x1, y1 }
}

#[test]
fn test_fill_composites_over_existing_cells() {
    let mut buf = Buffer::new(4, 2);
    buf.fill(area(0, 0, 2, 2), RED, 1.0);
    buf.fill(area(1, 0, 3, 1), Rgb::WHITE, 0.5);

    assert_eq!(buf.get(0, 0).unwrap().bg, RED);
    let blended = buf.get(1, 0).unwrap().bg;
    assert_ne!(blended, RED);
    assert_ne!(blended, Rgb::WHITE);
    assert_eq!(buf.get(1, 1).unwrap().bg, RED);
    assert_eq!(buf.get(3, 0).unwrap().bg, Rgb::BLACK);
}

#[test]
fn test_fill_outside_buffer_is_ignored() {
    let mut buf = Buffer::new(2, 2);
    buf.fill(area(1, 1, 10, 10), RED, 1.0);

    assert_eq!(buf.get(1, 1).unwrap().bg, RED);
    assert_eq!(buf.get(0, 0).unwrap().bg, Rgb::BLACK);
    assert!(buf.get(2, 2).is_none());
}

#[test]
fn test_fill_rounded_single_row_stays_square() {
    let mut buf = Buffer::new(2, 1);
    buf.fill_rounded(area(0, 0, 2, 1), RED, 1.0);

    assert_eq!(buf.get(0, 0).unwrap().char, ' ');
    assert_eq!(buf.get(0, 0).unwrap().bg, RED);
}

#[test]
fn test_put_glyph_keeps_background() {
    let mut buf = Buffer::new(4, 1);
    buf.fill(area(0, 0, 4, 1), RED, 1.0);
    buf.put_glyph(0, 0, '日', 2, Rgb::WHITE, 1.0);

    let cell = buf.get(0, 0).unwrap();
    assert_eq!(cell.char, '日');
    assert_eq!(cell.fg, Rgb::WHITE);
    assert_eq!(cell.bg, RED);
    assert!(buf.get(1, 0).unwrap().wide_continuation);
    assert_eq!(buf.row_text(0), "日  ");
}

#[test]
fn test_diff_and_reset() {
    let previous = Buffer::new(3, 2);
    let mut current = Buffer::new(3, 2);
    current.put_glyph(2, 1, 'x', 1, Rgb::WHITE, 1.0);

    let changed: Vec<_> = current.diff(&previous).map(|(x, y, c)| (x, y, c.char)).collect();
    assert_eq!(changed, vec![(2, 1, 'x')]);

    current.reset();
    assert_eq!(current.diff(&previous).count(), 0);
}
