use termdom::{
    parse_length, Document, DocumentConfig, DomError, Easing, Element, Length, Overflow, Position, Rgb, Selector, Size,
    StyleProps, Stylesheet, TransitionConfig, ROOT_ID,
};

// ============================================================================
// Declaration Parsing Tests
// ============================================================================

#[test]
fn test_parse_declaration_block() {
    let props = StyleProps::parse("position: absolute; top: 0; right: -17px; height: 25%").unwrap();

    assert_eq!(props.position, Some(Position::Absolute));
    assert_eq!(props.top, Some(Length::Px(0.0)));
    assert_eq!(props.right, Some(Length::Px(-17.0)));
    assert_eq!(props.height, Some(Size::percent(25.0)));
}

#[test]
fn test_parse_rejects_malformed_declaration() {
    let err = StyleProps::parse("height 10px").unwrap_err();
    assert_eq!(err, DomError::InvalidDeclaration("height 10px".into()));
}

#[test]
fn test_unitless_lengths_only_for_zero() {
    assert_eq!(parse_length("0"), Some(Length::Px(0.0)));
    assert_eq!(parse_length("5"), None);
    assert_eq!(parse_length("33.5%"), Some(Length::Percent(33.5)));
    assert_eq!(parse_length("inf%"), None);
}

#[test]
fn test_set_property_reports_change() {
    let mut props = StyleProps::new();
    assert!(props.set_property("overflow", "auto").unwrap());
    assert!(!props.set_property("overflow", "scroll").unwrap());
    assert_eq!(props.overflow, Some(Overflow::Auto));

    assert!(props.remove_property("overflow").unwrap());
    assert!(!props.remove_property("overflow").unwrap());
}

#[test]
fn test_unknown_property_is_an_error() {
    let mut props = StyleProps::new();
    assert_eq!(
        props.set_property("float", "left").unwrap_err(),
        DomError::UnknownStyleProperty("float".into())
    );
}

#[test]
fn test_opacity_is_clamped() {
    let props = StyleProps::parse("opacity: 1.5").unwrap();
    assert_eq!(props.opacity, Some(1.0));
}

#[test]
fn test_colors() {
    assert_eq!(Rgb::parse("#ff0000"), Some(Rgb::new(255, 0, 0)));
    assert_eq!(Rgb::parse("#0f0"), Some(Rgb::new(0, 255, 0)));
    assert_eq!(Rgb::parse("black"), Some(Rgb::BLACK));
    assert_eq!(Rgb::parse("nonsense"), None);
}

#[test]
fn test_color_compositing() {
    assert_eq!(Rgb::WHITE.over(Rgb::BLACK, 1.0), Rgb::WHITE);
    assert_eq!(Rgb::WHITE.over(Rgb::BLACK, 0.0), Rgb::BLACK);

    let half = Rgb::WHITE.over(Rgb::BLACK, 0.5);
    // Mixed in linear light, so brighter than the sRGB midpoint
    assert!(half.r > 128);
}

// ============================================================================
// Transition Parsing Tests
// ============================================================================

#[test]
fn test_parse_transition() {
    let config = TransitionConfig::parse("opacity 0.2s linear").unwrap();
    assert!((config.duration.as_secs_f32() - 0.2).abs() < 1e-6);
    assert_eq!(config.easing, Easing::Linear);

    assert!(TransitionConfig::parse("opacity 0s linear").unwrap().is_instant());
    assert_eq!(
        TransitionConfig::parse("150ms ease-out").unwrap().easing,
        Easing::EaseOut
    );
    assert_eq!(TransitionConfig::parse("width 1s"), None);
}

#[test]
fn test_transition_rejects_unrepresentable_durations() {
    assert_eq!(TransitionConfig::parse("opacity infs linear"), None);
    assert_eq!(TransitionConfig::parse("opacity NaNs linear"), None);
    assert_eq!(TransitionConfig::parse("opacity 1e30s linear"), None);
    assert_eq!(TransitionConfig::parse("opacity infms linear"), None);
    assert_eq!(TransitionConfig::parse("opacity -1s linear"), None);
}

#[test]
fn test_document_rejects_infinite_transition() {
    let mut doc = Document::new(DocumentConfig::new());
    doc.append_child(ROOT_ID, Element::div().id("x")).unwrap();

    let err = doc
        .set_style_property("x", "transition", "opacity infs linear")
        .unwrap_err();
    assert_eq!(
        err,
        DomError::InvalidStyleValue {
            property: "transition".into(),
            value: "opacity infs linear".into(),
        }
    );
    assert!(doc.set_attribute("x", "style", "transition: opacity 1e30s linear").is_err());
}

// ============================================================================
// Selector Tests
// ============================================================================

#[test]
fn test_selectors_match_local_ids() {
    let element = Element::div().id("host::simplebar-scrollbar").class("simplebar-visible");

    assert!(Selector::id("simplebar-scrollbar").matches(&element, &[]));
    assert!(Selector::id("simplebar-scrollbar")
        .and(Selector::class("simplebar-visible"))
        .matches(&element, &[]));
    assert!(!Selector::class("simplebar-invisible").matches(&element, &[]));
}

#[test]
fn test_descendant_selector() {
    let track = Element::div().class("track");
    let thumb = Element::div().id("thumb");
    let before = Element::div().class("before");

    let selector = Selector::descendant(Selector::class("track"), Selector::class("before"));
    assert!(selector.matches(&before, &[&track, &thumb]));
    assert!(!selector.matches(&before, &[&thumb]));
}

#[test]
fn test_later_rules_win() {
    let sheet = Stylesheet::new()
        .rule(Selector::tag("div"), StyleProps::new().opacity(0.0))
        .rule(Selector::class("shown"), StyleProps::new().opacity(0.5));

    let mut props = StyleProps::new();
    sheet.cascade_into(&Element::div().class("shown"), &[], &mut props);
    assert_eq!(props.opacity, Some(0.5));
}
