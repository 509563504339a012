use std::fmt;

/// A CSS-pixel or percentage length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    /// Resolve against the size of the reference box.
    pub fn resolve(self, reference: f32) -> f32 {
        match self {
            Length::Px(px) => px,
            Length::Percent(p) => reference * p / 100.0,
        }
    }

    pub fn is_percent(self) -> bool {
        matches!(self, Length::Percent(_))
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Px(0.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{px}px"),
            Length::Percent(p) => write!(f, "{p}%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Size {
    #[default]
    Auto,
    /// Takes the full extent of the containing box.
    Fill,
    Length(Length),
}

impl Size {
    pub const fn px(px: f32) -> Self {
        Size::Length(Length::Px(px))
    }

    pub const fn percent(p: f32) -> Self {
        Size::Length(Length::Percent(p))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Auto => write!(f, "auto"),
            Size::Fill => write!(f, "fill"),
            Size::Length(len) => len.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    /// Clips and scrolls; shows the native scrollbar only while content overflows.
    Auto,
}

impl Overflow {
    pub fn clips(self) -> bool {
        self != Overflow::Visible
    }
}
