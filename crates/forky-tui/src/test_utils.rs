//! Test utilities for forky-tui rendering tests.

use std::cell::RefCell;
use std::rc::Rc;

use forky_layout::{
    MemoryStore, PanelSizeModel, SharedSizes, DEFAULT_STORAGE_KEY, DEFAULT_THROTTLE_INTERVAL,
};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use crate::layout::CellMetrics;
use crate::shell::{ShellApp, UiConfig};
use crate::theme::{IconMode, ThemeKind};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 120;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 40;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Fixed UI config so tests do not depend on the environment.
pub fn test_ui_config() -> UiConfig {
    UiConfig {
        icons: IconMode::Ascii,
        theme: ThemeKind::Dark,
        metrics: CellMetrics::default(),
    }
}

/// Create a test app over an in-memory store, returning the store too.
pub fn create_test_app() -> (ShellApp, Rc<RefCell<MemoryStore>>) {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let sizes = SharedSizes::new(PanelSizeModel::load(
        Box::new(store.clone()),
        DEFAULT_STORAGE_KEY,
    ));
    let app = ShellApp::new(sizes, DEFAULT_THROTTLE_INTERVAL, test_ui_config());
    (app, store)
}

/// Draw `app` into a terminal of the default test size and return the screen.
pub fn draw_app(app: &mut ShellApp) -> String {
    let mut terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
    app.handle_resize(TEST_WIDTH, TEST_HEIGHT);
    terminal.draw(|frame| app.draw(frame)).expect("draw failed");
    buffer_to_string(terminal.backend().buffer())
}

/// Convert a buffer to a string, one line per row with trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        result.push_str(line.trim_end());
        result.push('\n');
    }

    result.truncate(result.trim_end_matches('\n').len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld");
    }
}
