//! Glyphs for Unicode and ASCII terminals.

use forky_layout::{CursorHint, ResizeAxis};

/// Glyph mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Standard Unicode box drawing and symbols.
    #[default]
    Unicode,
    /// ASCII-only fallback (also used with `NO_COLOR`).
    Ascii,
}

/// Glyph set based on configured mode.
#[derive(Debug, Clone)]
pub struct IconSet {
    mode: IconMode,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl IconSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> IconMode {
        self.mode
    }

    pub fn dot(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "●",
            IconMode::Ascii => "*",
        }
    }

    pub fn separator(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => " │ ",
            IconMode::Ascii => " | ",
        }
    }

    pub fn arrow_right(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "→",
            IconMode::Ascii => "->",
        }
    }

    /// Grip drawn on a resize handle while it is being dragged.
    pub fn grip(&self, axis: ResizeAxis) -> &'static str {
        match (self.mode, axis) {
            (IconMode::Unicode, ResizeAxis::Columns) => "┃",
            (IconMode::Unicode, ResizeAxis::Rows) => "━",
            (IconMode::Ascii, ResizeAxis::Columns) => "|",
            (IconMode::Ascii, ResizeAxis::Rows) => "=",
        }
    }

    /// Stand-in for the pointer cursor the terminal cannot change.
    pub fn cursor(&self, cursor: CursorHint) -> &'static str {
        match (self.mode, cursor) {
            (_, CursorHint::Default) => "",
            (IconMode::Unicode, CursorHint::ColResize) => "⇔",
            (IconMode::Unicode, CursorHint::RowResize) => "⇕",
            (IconMode::Ascii, CursorHint::ColResize) => "<->",
            (IconMode::Ascii, CursorHint::RowResize) => "^v",
        }
    }
}
