//! Footer widget: drag affordances on the left, keybinding hints on the right.
//!
//! Format: `⇔ resizing │ selection off              [r] reset │ [q] quit`

use forky_layout::{Affordances, CursorHint};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{IconSet, Theme};

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or gesture (e.g., "r", "drag border").
    pub key: String,
    /// The action description (e.g., "reset").
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer hints widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    icons: &'a IconSet,
    affordances: Affordances,
}

impl<'a> FooterHints<'a> {
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            hints,
            theme,
            icons,
            affordances: Affordances::default(),
        }
    }

    /// Show the affordances of the active drag.
    #[must_use]
    pub fn affordances(mut self, affordances: Affordances) -> Self {
        self.affordances = affordances;
        self
    }

    /// Hints while no drag is active.
    pub fn idle_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("drag border", "resize"),
            KeyHint::new("r", "reset"),
            KeyHint::new("q", "quit"),
        ]
    }

    /// Hints during a drag.
    pub fn drag_hints() -> Vec<KeyHint> {
        vec![KeyHint::new("release", "finish"), KeyHint::new("Esc", "cancel")]
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = self.icons.separator();
        let muted = Style::default().fg(self.theme.muted);
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        // Left side: cursor and selection state, only while they differ from rest
        if self.affordances.cursor != CursorHint::Default {
            left_spans.push(Span::styled(
                format!("{} resizing", self.icons.cursor(self.affordances.cursor)),
                Style::default().fg(self.theme.handle_active),
            ));
        }
        if !self.affordances.text_selection {
            if !left_spans.is_empty() {
                left_spans.push(Span::styled(separator, muted));
            }
            left_spans.push(Span::styled(
                "selection off",
                Style::default().fg(self.theme.subtext),
            ));
        }

        // Right side: hints
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(separator, muted));
            }
            let key = Style::default().fg(self.theme.primary);
            let action = Style::default().fg(self.theme.subtext);
            right_spans.push(Span::styled("[", muted));
            right_spans.push(Span::styled(&hint.key, key));
            right_spans.push(Span::styled("] ", muted));
            right_spans.push(Span::styled(&hint.action, action));
        }

        let width = |spans: &[Span<'_>]| spans.iter().map(Span::width).sum::<usize>();
        let used = width(&left_spans) + width(&right_spans);
        let padding = usize::from(area.width).saturating_sub(used);
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }
        left_spans.extend(right_spans);

        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::IconMode;

    fn rendered(hints: &[KeyHint], affordances: Affordances) -> String {
        let theme = Theme::default();
        let icons = IconSet::new(IconMode::Ascii);
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        FooterHints::new(hints, &theme, &icons)
            .affordances(affordances)
            .render(area, &mut buf);
        (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_idle_footer_is_right_aligned() {
        let line = rendered(&FooterHints::idle_hints(), Affordances::default());
        let hints = "[drag border] resize | [r] reset | [q] quit";
        assert!(line.ends_with(hints));
        assert!(line.starts_with(' '));
    }

    #[test]
    fn test_drag_footer_shows_affordances() {
        let affordances = Affordances {
            cursor: CursorHint::RowResize,
            text_selection: false,
        };
        let line = rendered(&FooterHints::drag_hints(), affordances);
        assert!(line.starts_with("^v resizing | selection off"));
        assert!(line.ends_with("[release] finish | [Esc] cancel"));
    }
}
