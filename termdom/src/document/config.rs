//! Document configuration.

/// Host environment settings for a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentConfig {
    /// Initial viewport size in CSS pixels.
    pub viewport: (f32, f32),
    /// Width reserved by a scroll container's native scrollbar.
    pub native_scrollbar_width: f32,
    /// Height of one line of text.
    pub line_height: f32,
    /// Upper bound on observer delivery rounds in a single flush.
    pub max_flush_rounds: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            // 80x24 cells at 8x16 px
            viewport: (640.0, 384.0),
            native_scrollbar_width: 17.0,
            line_height: 16.0,
            max_flush_rounds: 32,
        }
    }
}

impl DocumentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = (width.max(0.0), height.max(0.0));
        self
    }

    pub fn native_scrollbar_width(mut self, width: f32) -> Self {
        self.native_scrollbar_width = width.max(0.0);
        self
    }

    pub fn line_height(mut self, height: f32) -> Self {
        self.line_height = height.max(0.0);
        self
    }

    pub fn max_flush_rounds(mut self, rounds: usize) -> Self {
        self.max_flush_rounds = rounds.max(1);
        self
    }
}
