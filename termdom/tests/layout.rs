use std::collections::HashMap;

use termdom::layout::{layout, LayoutContext};
use termdom::{Element, LayoutResult, Length, Overflow, Position, RectF, Size, StyleProps, Stylesheet};

fn run_layout(root: &Element) -> LayoutResult {
    run_layout_with(root, &HashMap::new(), &Stylesheet::new())
}

fn run_layout_with(
    root: &Element,
    offsets: &HashMap<String, f32>,
    stylesheet: &Stylesheet,
) -> LayoutResult {
    let cx = LayoutContext {
        viewport: RectF::from_size(640.0, 384.0),
        line_height: 16.0,
        native_scrollbar_width: 17.0,
        scroll_offsets: offsets,
        stylesheet,
    };
    layout(root, &cx)
}

fn rect(result: &LayoutResult, id: &str) -> RectF {
    result
        .get(id)
        .unwrap_or_else(|| panic!("no layout box for {id}"))
        .rect
}

fn root() -> Element {
    Element::div().id("root").width(Size::Fill).height(Size::Fill)
}

// ============================================================================
// Block Flow Tests
// ============================================================================

#[test]
fn test_root_fills_viewport() {
    let result = run_layout(&root());
    assert_eq!(rect(&result, "root"), RectF::new(0.0, 0.0, 640.0, 384.0));
}

#[test]
fn test_children_stack_vertically() {
    let tree = root()
        .child(Element::text("one").id("a"))
        .child(Element::text("two\nthree").id("b"))
        .child(Element::div().id("c").height(Size::px(40.0)));

    let result = run_layout(&tree);

    assert_eq!(rect(&result, "a"), RectF::new(0.0, 0.0, 640.0, 16.0));
    assert_eq!(rect(&result, "b"), RectF::new(0.0, 16.0, 640.0, 32.0));
    assert_eq!(rect(&result, "c"), RectF::new(0.0, 48.0, 640.0, 40.0));
}

#[test]
fn test_auto_height_wraps_content() {
    let tree = root().child(
        Element::div()
            .id("wrapper")
            .child(Element::text("a\nb\nc").id("text")),
    );

    let result = run_layout(&tree);
    assert_eq!(rect(&result, "wrapper").height, 48.0);
}

#[test]
fn test_percent_height_of_definite_parent() {
    let tree = root().child(
        Element::div()
            .id("parent")
            .height(Size::px(200.0))
            .child(Element::div().id("child").height(Size::percent(25.0))),
    );

    let result = run_layout(&tree);
    assert_eq!(rect(&result, "child").height, 50.0);
}

#[test]
fn test_percent_height_of_auto_parent_is_auto() {
    let tree = root().child(
        Element::div().id("parent").child(
            Element::div()
                .id("child")
                .height(Size::percent(50.0))
                .child(Element::text("x")),
        ),
    );

    let result = run_layout(&tree);
    assert_eq!(rect(&result, "child").height, 16.0);
}

#[test]
fn test_relative_position_shifts_without_affecting_flow() {
    let tree = root()
        .child(
            Element::div()
                .id("moved")
                .position(Position::Relative)
                .top(Length::Px(5.0))
                .left(Length::Px(3.0))
                .height(Size::px(10.0)),
        )
        .child(Element::div().id("next").height(Size::px(10.0)));

    let result = run_layout(&tree);
    assert_eq!(rect(&result, "moved"), RectF::new(3.0, 5.0, 640.0, 10.0));
    assert_eq!(rect(&result, "next").y, 10.0);
}

// ============================================================================
// Absolute Positioning Tests
// ============================================================================

#[test]
fn test_absolute_insets() {
    let tree = root().child(
        Element::div()
            .id("parent")
            .width(Size::px(300.0))
            .height(Size::px(200.0))
            .child(
                Element::div().id("abs").style(
                    StyleProps::new()
                        .position(Position::Absolute)
                        .top(Length::Px(10.0))
                        .bottom(Length::Px(20.0))
                        .left(Length::Px(5.0))
                        .right(Length::Px(15.0)),
                ),
            ),
    );

    let result = run_layout(&tree);
    assert_eq!(rect(&result, "abs"), RectF::new(5.0, 10.0, 280.0, 170.0));
}

#[test]
fn test_negative_right_inset_widens_box() {
    let tree = root().child(
        Element::div()
            .id("parent")
            .width(Size::px(300.0))
            .height(Size::px(200.0))
            .child(
                Element::div().id("abs").style(
                    StyleProps::new()
                        .position(Position::Absolute)
                        .inset(Length::Px(0.0))
                        .right(Length::Px(-17.0)),
                ),
            ),
    );

    let result = run_layout(&tree);
    assert_eq!(rect(&result, "abs"), RectF::new(0.0, 0.0, 317.0, 200.0));
}

#[test]
fn test_absolute_does_not_take_flow_space() {
    let tree = root()
        .child(
            Element::div()
                .id("abs")
                .position(Position::Absolute)
                .height(Size::px(50.0)),
        )
        .child(Element::div().id("flow").height(Size::px(10.0)));

    let result = run_layout(&tree);
    assert_eq!(rect(&result, "flow").y, 0.0);
}

#[test]
fn test_absolute_right_aligned_fixed_width() {
    let tree = root().child(
        Element::div()
            .id("parent")
            .width(Size::px(300.0))
            .height(Size::px(200.0))
            .child(
                Element::div().id("track").style(
                    StyleProps::new()
                        .position(Position::Absolute)
                        .top(Length::Px(0.0))
                        .right(Length::Px(0.0))
                        .bottom(Length::Px(0.0))
                        .width(Size::px(11.0)),
                ),
            ),
    );

    let result = run_layout(&tree);
    assert_eq!(rect(&result, "track"), RectF::new(289.0, 0.0, 11.0, 200.0));
}

#[test]
fn test_percent_top_and_min_height() {
    let tree = root().child(
        Element::div()
            .id("track")
            .height(Size::px(200.0))
            .child(
                Element::div().id("thumb").style(
                    StyleProps::new()
                        .position(Position::Absolute)
                        .top(Length::Percent(25.0))
                        .height(Size::percent(1.0))
                        .min_height(Length::Px(10.0)),
                ),
            ),
    );

    let result = run_layout(&tree);
    let thumb = rect(&result, "thumb");
    assert_eq!(thumb.y, 50.0);
    assert_eq!(thumb.height, 10.0);
}

// ============================================================================
// Scroll Container Tests
// ============================================================================

fn scroll_box(lines: usize) -> Element {
    let text = vec!["line"; lines].join("\n");
    root().child(
        Element::div()
            .id("box")
            .width(Size::px(300.0))
            .height(Size::px(100.0))
            .overflow(Overflow::Auto)
            .child(Element::text(text).id("text")),
    )
}

#[test]
fn test_scroll_height_of_overflowing_content() {
    let result = run_layout(&scroll_box(10));
    let scroller = result.get("box").unwrap();

    assert_eq!(scroller.rect.height, 100.0);
    assert_eq!(scroller.scroll_height, 160.0);
    assert_eq!(scroller.max_scroll_top(), 60.0);
}

#[test]
fn test_scroll_height_never_below_box_height() {
    let result = run_layout(&scroll_box(2));
    let scroller = result.get("box").unwrap();

    assert_eq!(scroller.scroll_height, 100.0);
    assert_eq!(scroller.max_scroll_top(), 0.0);
    assert!(scroller.native_scrollbar.is_none());
    assert_eq!(rect(&result, "text").width, 300.0);
}

#[test]
fn test_overflow_reserves_native_scrollbar() {
    let result = run_layout(&scroll_box(10));
    let scroller = result.get("box").unwrap();

    let native = scroller.native_scrollbar.expect("overflowing box shows a scrollbar");
    assert_eq!(native.track, RectF::new(283.0, 0.0, 17.0, 100.0));
    assert_eq!(rect(&result, "text").width, 283.0);
}

#[test]
fn test_scroll_offset_moves_children() {
    let offsets = HashMap::from([("box".to_string(), 30.0)]);
    let result = run_layout_with(&scroll_box(10), &offsets, &Stylesheet::new());

    assert_eq!(rect(&result, "text").y, -30.0);
    assert_eq!(result.get("box").unwrap().scroll_top, 30.0);

    let native = result.get("box").unwrap().native_scrollbar.unwrap();
    assert_eq!(native.thumb.height, 62.5);
    assert_eq!(native.thumb.y, 18.75);
}

#[test]
fn test_children_clip_to_scroll_container() {
    let result = run_layout(&scroll_box(10));
    let clip = result.get("text").unwrap().clip.expect("text is clipped");
    assert_eq!(clip, RectF::new(0.0, 0.0, 300.0, 100.0));
}

#[test]
fn test_scroll_container_at_point() {
    let result = run_layout(&scroll_box(10));
    assert_eq!(result.scroll_container_at(10.0, 10.0), Some("box"));
    assert_eq!(result.scroll_container_at(10.0, 150.0), None);

    let short = run_layout(&scroll_box(2));
    assert_eq!(short.scroll_container_at(10.0, 10.0), None);
}

// ============================================================================
// Stylesheet Tests
// ============================================================================

#[test]
fn test_stylesheet_rules_apply_before_inline_style() {
    let sheet = Stylesheet::new().rule(
        termdom::Selector::class("tall"),
        StyleProps::new().height(Size::px(80.0)),
    );
    let tree = root()
        .child(Element::div().id("a").class("tall"))
        .child(Element::div().id("b").class("tall").height(Size::px(20.0)));

    let result = run_layout_with(&tree, &HashMap::new(), &sheet);
    assert_eq!(rect(&result, "a").height, 80.0);
    assert_eq!(rect(&result, "b").height, 20.0);
}

#[test]
fn test_paint_order_parents_first() {
    let tree = root().child(Element::div().id("a").child(Element::div().id("b")));
    let result = run_layout(&tree);
    let order: Vec<&str> = result.iter().map(|(id, _)| id).collect();
    assert_eq!(order, vec!["root", "a", "b"]);
}
