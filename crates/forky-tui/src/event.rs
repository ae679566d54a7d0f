//! Terminal input for the forky TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use tokio::sync::mpsc;

/// How long the reader thread blocks before checking for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Reads terminal events on a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm reads are blocking, so they get their own thread
        std::thread::spawn(move || loop {
            if tx.is_closed() {
                break;
            }
            if !event::poll(POLL_INTERVAL).unwrap_or(false) {
                continue;
            }
            let event = match event::read() {
                Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                Ok(CrosstermEvent::Mouse(mouse)) => Event::Mouse(mouse),
                Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                _ => continue,
            };
            if tx.send(event).is_err() {
                break;
            }
        });

        Self { rx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// End the active drag, or quit when idle.
    Cancel,
    Reset,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('r') => Action::Reset,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_to_action() {
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(key_to_action(plain(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(key_to_action(plain(KeyCode::Esc)), Action::Cancel);
        assert_eq!(key_to_action(plain(KeyCode::Char('r'))), Action::Reset);
        assert_eq!(key_to_action(plain(KeyCode::Char('x'))), Action::None);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }
}
