//! Status bar widget for the top of the TUI.
//!
//! Format: `● forky │ sidebar 260px │ commit 50% │ diff 300px │ → resizing sidebar`

use forky_layout::{Panel, PanelSizes};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{IconSet, Theme};

/// Status bar content.
#[derive(Debug, Clone, Default)]
pub struct StatusBarContent {
    pub title: String,
    /// Live sizes; omitted while the terminal is too small.
    pub sizes: Option<PanelSizes>,
    /// Panel being resized.
    pub dragging: Option<Panel>,
    pub hint: Option<String>,
}

impl StatusBarContent {
    pub fn new(sizes: PanelSizes, dragging: Option<Panel>) -> Self {
        Self {
            title: "forky".into(),
            sizes: Some(sizes),
            dragging,
            hint: None,
        }
    }

    /// Create a "terminal too small" warning.
    pub fn too_small() -> Self {
        Self {
            title: "Terminal too small".into(),
            sizes: None,
            dragging: None,
            hint: Some("Resize to at least 40x12".into()),
        }
    }
}

/// Status bar widget.
pub struct StatusBar<'a> {
    content: &'a StatusBarContent,
    theme: &'a Theme,
    icons: &'a IconSet,
}

impl<'a> StatusBar<'a> {
    pub fn new(content: &'a StatusBarContent, theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            content,
            theme,
            icons,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let muted = Style::default().fg(self.theme.muted);
        let separator = Span::styled(self.icons.separator(), muted);
        let dim = Style::default().fg(self.theme.subtext);

        let mut spans = vec![
            Span::styled(
                format!("{} ", self.icons.dot()),
                Style::default().fg(self.theme.primary),
            ),
            Span::styled(&self.content.title, Style::default().fg(self.theme.text)),
        ];

        if let Some(sizes) = self.content.sizes {
            for text in [
                format!("sidebar {:.0}px", sizes.sidebar_width),
                format!("commit {:.0}%", sizes.commit_panel_height),
                format!("diff {:.0}px", sizes.diff_sidebar_width),
            ] {
                spans.push(separator.clone());
                spans.push(Span::styled(text, dim));
            }
        }

        if let Some(panel) = self.content.dragging {
            spans.push(separator.clone());
            spans.push(Span::styled(
                format!("{} resizing {panel}", self.icons.arrow_right()),
                Style::default().fg(self.theme.secondary),
            ));
        }

        if let Some(ref hint) = self.content.hint {
            spans.push(separator);
            spans.push(Span::styled(
                format!("{} {hint}", self.icons.arrow_right()),
                Style::default().fg(self.theme.warning),
            ));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::IconMode;

    fn rendered(content: &StatusBarContent) -> String {
        let theme = Theme::default();
        let icons = IconSet::new(IconMode::Ascii);
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(content, &theme, &icons).render(area, &mut buf);
        (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_sizes_are_shown() {
        let line = rendered(&StatusBarContent::new(PanelSizes::default(), None));
        let sizes = "* forky | sidebar 260px | commit 50% | diff 300px";
        assert!(line.starts_with(sizes));
    }

    #[test]
    fn test_dragging_panel_is_shown() {
        let line = rendered(&StatusBarContent::new(
            PanelSizes::default(),
            Some(Panel::CommitPanel),
        ));
        assert!(line.contains("-> resizing commit panel"));
    }

    #[test]
    fn test_too_small_content() {
        let content = StatusBarContent::too_small();
        assert!(content.sizes.is_none());
        assert!(rendered(&content).contains("Terminal too small"));
    }
}
