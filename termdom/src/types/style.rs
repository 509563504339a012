use super::{Length, Overflow, Position, Rgb, Size};
use crate::error::DomError;
use crate::transitions::TransitionConfig;

/// A set of style declarations.
///
/// Used both for inline styles and for stylesheet rules. Every field is
/// optional so declarations can be layered: later layers override earlier
/// ones field by field, and a field left `None` falls through to whatever
/// lies beneath (ultimately the defaults in [`ComputedStyle`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleProps {
    pub position: Option<Position>,
    pub width: Option<Size>,
    pub height: Option<Size>,
    pub min_height: Option<Length>,
    pub top: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub left: Option<Length>,
    pub overflow: Option<Overflow>,
    pub background: Option<Rgb>,
    pub foreground: Option<Rgb>,
    pub opacity: Option<f32>,
    pub border_radius: Option<f32>,
    pub transition: Option<TransitionConfig>,
}

impl StyleProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration block such as `position: absolute; top: 0; right: -17px`.
    pub fn parse(block: &str) -> Result<Self, DomError> {
        let mut props = Self::default();
        for declaration in block.split(';') {
            let declaration = declaration.trim();
            if declaration.is_empty() {
                continue;
            }
            let Some((name, value)) = declaration.split_once(':') else {
                return Err(DomError::InvalidDeclaration(declaration.to_string()));
            };
            props.set_property(name.trim(), value.trim())?;
        }
        Ok(props)
    }

    /// Set a single property from its textual value.
    ///
    /// Returns `true` when the stored value changed.
    pub fn set_property(&mut self, name: &str, value: &str) -> Result<bool, DomError> {
        let invalid = || DomError::InvalidStyleValue {
            property: name.to_string(),
            value: value.to_string(),
        };
        let before = self.clone();

        match name {
            "position" => {
                self.position = Some(match value {
                    "static" => Position::Static,
                    "relative" => Position::Relative,
                    "absolute" => Position::Absolute,
                    _ => return Err(invalid()),
                })
            }
            "width" => self.width = Some(parse_size(value).ok_or_else(invalid)?),
            "height" => self.height = Some(parse_size(value).ok_or_else(invalid)?),
            "min-height" => self.min_height = Some(parse_length(value).ok_or_else(invalid)?),
            "top" => self.top = Some(parse_length(value).ok_or_else(invalid)?),
            "right" => self.right = Some(parse_length(value).ok_or_else(invalid)?),
            "bottom" => self.bottom = Some(parse_length(value).ok_or_else(invalid)?),
            "left" => self.left = Some(parse_length(value).ok_or_else(invalid)?),
            "overflow" | "overflow-y" => {
                self.overflow = Some(match value {
                    "visible" => Overflow::Visible,
                    "hidden" => Overflow::Hidden,
                    "auto" | "scroll" => Overflow::Auto,
                    _ => return Err(invalid()),
                })
            }
            "background" | "background-color" => {
                self.background = Some(Rgb::parse(value).ok_or_else(invalid)?)
            }
            "color" => self.foreground = Some(Rgb::parse(value).ok_or_else(invalid)?),
            "opacity" => {
                let opacity: f32 = value.parse().map_err(|_| invalid())?;
                if !opacity.is_finite() {
                    return Err(invalid());
                }
                self.opacity = Some(opacity.clamp(0.0, 1.0));
            }
            "border-radius" => match parse_length(value) {
                Some(Length::Px(px)) if px >= 0.0 => self.border_radius = Some(px),
                _ => return Err(invalid()),
            },
            "transition" => {
                self.transition = Some(TransitionConfig::parse(value).ok_or_else(invalid)?)
            }
            _ => return Err(DomError::UnknownStyleProperty(name.to_string())),
        }

        Ok(*self != before)
    }

    /// Unset a single property. Returns `true` when a value was removed.
    pub fn remove_property(&mut self, name: &str) -> Result<bool, DomError> {
        let removed = match name {
            "position" => self.position.take().is_some(),
            "width" => self.width.take().is_some(),
            "height" => self.height.take().is_some(),
            "min-height" => self.min_height.take().is_some(),
            "top" => self.top.take().is_some(),
            "right" => self.right.take().is_some(),
            "bottom" => self.bottom.take().is_some(),
            "left" => self.left.take().is_some(),
            "overflow" | "overflow-y" => self.overflow.take().is_some(),
            "background" | "background-color" => self.background.take().is_some(),
            "color" => self.foreground.take().is_some(),
            "opacity" => self.opacity.take().is_some(),
            "border-radius" => self.border_radius.take().is_some(),
            "transition" => self.transition.take().is_some(),
            _ => return Err(DomError::UnknownStyleProperty(name.to_string())),
        };
        Ok(removed)
    }

    /// Overlay every declared field of `other` onto `self`.
    pub fn apply(&mut self, other: &StyleProps) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        overlay!(
            position,
            width,
            height,
            min_height,
            top,
            right,
            bottom,
            left,
            overflow,
            background,
            foreground,
            opacity,
            border_radius,
            transition
        );
    }

    // Builder helpers

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn width(mut self, width: Size) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.height = Some(height);
        self
    }

    pub fn min_height(mut self, min_height: Length) -> Self {
        self.min_height = Some(min_height);
        self
    }

    pub fn top(mut self, top: Length) -> Self {
        self.top = Some(top);
        self
    }

    pub fn right(mut self, right: Length) -> Self {
        self.right = Some(right);
        self
    }

    pub fn bottom(mut self, bottom: Length) -> Self {
        self.bottom = Some(bottom);
        self
    }

    pub fn left(mut self, left: Length) -> Self {
        self.left = Some(left);
        self
    }

    /// Set all four insets to the same length.
    pub fn inset(self, inset: Length) -> Self {
        self.top(inset).right(inset).bottom(inset).left(inset)
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    pub fn foreground(mut self, color: Rgb) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn border_radius(mut self, radius: f32) -> Self {
        self.border_radius = Some(radius);
        self
    }

    pub fn transition(mut self, transition: TransitionConfig) -> Self {
        self.transition = Some(transition);
        self
    }
}

/// Fully resolved style of an element after the cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub position: Position,
    pub width: Size,
    pub height: Size,
    pub min_height: Option<Length>,
    pub top: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub left: Option<Length>,
    pub overflow: Overflow,
    pub background: Option<Rgb>,
    pub foreground: Rgb,
    pub opacity: f32,
    pub border_radius: f32,
    pub transition: TransitionConfig,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            position: Position::Static,
            width: Size::Auto,
            height: Size::Auto,
            min_height: None,
            top: None,
            right: None,
            bottom: None,
            left: None,
            overflow: Overflow::Visible,
            background: None,
            foreground: Rgb::WHITE,
            opacity: 1.0,
            border_radius: 0.0,
            transition: TransitionConfig::instant(),
        }
    }
}

impl ComputedStyle {
    /// Resolve declarations on top of the defaults. `inherited_foreground`
    /// is the parent's text color, which is the only inherited property.
    pub fn resolve(props: &StyleProps, inherited_foreground: Rgb) -> Self {
        let defaults = Self::default();
        Self {
            position: props.position.unwrap_or(defaults.position),
            width: props.width.unwrap_or(defaults.width),
            height: props.height.unwrap_or(defaults.height),
            min_height: props.min_height,
            top: props.top,
            right: props.right,
            bottom: props.bottom,
            left: props.left,
            overflow: props.overflow.unwrap_or(defaults.overflow),
            background: props.background,
            foreground: props.foreground.unwrap_or(inherited_foreground),
            opacity: props.opacity.unwrap_or(defaults.opacity),
            border_radius: props.border_radius.unwrap_or(defaults.border_radius),
            transition: props.transition.unwrap_or(defaults.transition),
        }
    }
}

pub fn parse_length(value: &str) -> Option<Length> {
    let value = value.trim();
    let length = if let Some(p) = value.strip_suffix('%') {
        Length::Percent(p.trim().parse().ok()?)
    } else if let Some(px) = value.strip_suffix("px") {
        Length::Px(px.trim().parse().ok()?)
    } else {
        // unitless lengths are only valid for zero
        let px: f32 = value.parse().ok()?;
        if px != 0.0 {
            return None;
        }
        Length::Px(0.0)
    };

    let finite = match length {
        Length::Px(v) | Length::Percent(v) => v.is_finite(),
    };
    finite.then_some(length)
}

pub fn parse_size(value: &str) -> Option<Size> {
    match value.trim() {
        "auto" => Some(Size::Auto),
        "fill" => Some(Size::Fill),
        other => parse_length(other).map(Size::Length),
    }
}
