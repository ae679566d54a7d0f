//! Bordered panel widget.
//!
//! The pane whose handle is being dragged switches to the active border set.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::{BorderSet, Theme};

/// Bordered panel with a title and a few lines of body text.
pub struct Pane<'a> {
    title: Option<&'a str>,
    active: bool,
    lines: Vec<String>,
    theme: &'a Theme,
    borders: &'a BorderSet,
}

impl<'a> Pane<'a> {
    pub fn new(theme: &'a Theme, borders: &'a BorderSet) -> Self {
        Self {
            title: None,
            active: false,
            lines: Vec::new(),
            theme,
            borders,
        }
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Mark the pane as being resized.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Append a body line.
    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

impl Widget for Pane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (border_set, border_style, title_style) = if self.active {
            (
                self.borders.active(),
                Style::default().fg(self.theme.border_focused),
                Style::default().fg(self.theme.primary),
            )
        } else {
            (
                self.borders.normal(),
                Style::default().fg(self.theme.border),
                Style::default().fg(self.theme.subtext),
            )
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_set(border_set)
            .border_style(border_style);
        if let Some(title) = self.title {
            block = block.title(title).title_style(title_style);
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let text: Vec<Line<'_>> = self.lines.into_iter().map(Line::from).collect();
        Paragraph::new(text)
            .style(Style::default().fg(self.theme.subtext))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::IconMode;

    #[test]
    fn test_pane_builder() {
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Unicode);

        let pane = Pane::new(&theme, &borders)
            .title(" Branches ")
            .active(true)
            .line("260 px");

        assert_eq!(pane.title, Some(" Branches "));
        assert!(pane.active);
        assert_eq!(pane.lines, vec!["260 px".to_string()]);
    }

    #[test]
    fn test_active_pane_uses_active_borders() {
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Ascii);
        let area = Rect::new(0, 0, 10, 4);

        let mut buf = Buffer::empty(area);
        Pane::new(&theme, &borders).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "+");

        let mut buf = Buffer::empty(area);
        Pane::new(&theme, &borders)
            .active(true)
            .render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "#");
    }
}
