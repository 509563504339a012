//! Text measurement in terminal columns.

use unicode_width::UnicodeWidthChar;

/// Columns `c` occupies; control and zero-width characters take none.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Number of rendered lines. Every `\n` starts a new one, so an empty
/// string is still one (empty) line.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Visible characters of one line with the column each starts at,
/// relative to the start of the line.
pub fn glyphs(line: &str) -> impl Iterator<Item = (usize, char, usize)> + '_ {
    line.chars()
        .map(|ch| (ch, char_width(ch)))
        .filter(|&(_, width)| width > 0)
        .scan(0, |column, (ch, width)| {
            let start = *column;
            *column += width;
            Some((start, ch, width))
        })
}
