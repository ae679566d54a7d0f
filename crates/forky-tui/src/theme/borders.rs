//! Border sets for Unicode and ASCII fallback.
//!
//! Supports `NO_COLOR` environment variable by using ASCII borders.

use ratatui::symbols::border;

use super::icons::IconMode;

const ASCII: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

const ASCII_ACTIVE: border::Set = border::Set {
    top_left: "#",
    top_right: "#",
    bottom_left: "#",
    bottom_right: "#",
    vertical_left: "#",
    vertical_right: "#",
    horizontal_top: "=",
    horizontal_bottom: "=",
};

/// Border set based on icon mode.
#[derive(Debug, Clone, Default)]
pub struct BorderSet {
    mode: IconMode,
}

impl BorderSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Borders of a pane at rest.
    pub fn normal(&self) -> border::Set {
        match self.mode {
            IconMode::Unicode => border::ROUNDED,
            IconMode::Ascii => ASCII,
        }
    }

    /// Borders of the pane whose handle is being dragged.
    pub fn active(&self) -> border::Set {
        match self.mode {
            IconMode::Unicode => border::THICK,
            IconMode::Ascii => ASCII_ACTIVE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_borders() {
        let borders = BorderSet::new(IconMode::Unicode);
        assert_eq!(borders.normal().top_left, "╭");
        assert_eq!(borders.active().top_left, "┏");
    }

    #[test]
    fn test_ascii_borders_are_ascii() {
        let borders = BorderSet::new(IconMode::Ascii);
        assert_eq!(borders.normal().top_left, "+");
        assert_eq!(borders.active().vertical_left, "#");
        assert!(borders.normal().horizontal_top.is_ascii());
    }
}
