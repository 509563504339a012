use crate::types::Rgb;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    /// Second column of a wide character; never written to the terminal.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            wide_continuation: false,
        }
    }
}

impl Cell {
    /// Composite a background layer over this cell. Glyphs already drawn
    /// here are tinted too, the way an overlapping translucent box covers
    /// text beneath it.
    pub(crate) fn tint(&mut self, color: Rgb, opacity: f32) {
        self.bg = color.over(self.bg, opacity);
        self.fg = color.over(self.fg, opacity);
    }

    /// Draw a glyph in `fg` over the current background.
    pub(crate) fn draw(&mut self, ch: char, fg: Rgb, opacity: f32) {
        self.char = ch;
        self.fg = fg.over(self.bg, opacity);
        self.wide_continuation = false;
    }

    /// Mark the cell as covered by the wide glyph to its left.
    pub(crate) fn cover(&mut self) {
        self.char = ' ';
        self.wide_continuation = true;
    }
}
