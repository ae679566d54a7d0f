//! forky-tui: Terminal shell for the forky panel layout
//!
//! This crate is the rendering layer over `forky-layout`, including:
//! - The three-panel shell drawn from the live panel sizes
//! - Mouse press/drag/release on panel borders driving the resize controller
//! - A ~60 Hz frame clock that applies deferred updates
//! - Themes and Unicode/ASCII glyphs

mod event;
pub mod layout;
mod shell;
#[cfg(test)]
pub mod test_utils;
pub mod theme;
mod widgets;

pub use event::{key_to_action, Action, Event, EventHandler};
pub use forky_layout;
pub use shell::{ShellApp, UiConfig};

use std::io::{self, stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use forky_layout::{JsonFileStore, LayoutConfig, PanelSizeModel, SharedSizes};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Render clock period (~60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Run the TUI application.
///
/// Loads the layout config and persisted sizes from `data_dir`, sets up the
/// terminal, runs the event loop, and restores the terminal on exit.
pub async fn run_tui(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = LayoutConfig::load_or_default(data_dir);
    let store = JsonFileStore::new(config.store_path(data_dir));
    info!(store = %store.path().display(), "Opening panel shell");
    let sizes = SharedSizes::new(PanelSizeModel::load(
        Box::new(store),
        config.storage_key.clone(),
    ));

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = ShellApp::new(sizes, config.throttle_interval(), UiConfig::from_env());
    let size = terminal.size()?;
    app.handle_resize(size.width, size.height);

    let mut events = EventHandler::new();
    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut ShellApp,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|frame| app.draw(frame))?;
            dirty = false;
        }

        tokio::select! {
            _ = frames.tick() => {
                dirty |= app.handle_frame(Instant::now());
            }
            event = events.next() => match event {
                Some(Event::Key(key)) => {
                    app.handle_key_event(key);
                    dirty = true;
                }
                Some(Event::Mouse(mouse)) => {
                    dirty |= app.handle_mouse_event(mouse, Instant::now());
                }
                Some(Event::Resize(width, height)) => {
                    app.handle_resize(width, height);
                    dirty = true;
                }
                None => break,
            },
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}


#[cfg(test)]
mod snapshot_tests {
    use crate::test_utils::{create_test_app, draw_app};
    use insta::assert_snapshot;

    #[test]
    fn test_snapshot_shell_idle() {
        let (mut app, _) = create_test_app();
        let screen = draw_app(&mut app);
        let top: Vec<&str> = screen.lines().take(3).collect();
        assert_snapshot!(top.join("\n"), @r"
        * forky | sidebar 260px | commit 50% | diff 300px
        + Branches ---------------------++ Commits ----------------------------------------------------------------------------+
        |260 px                         ||50%                                                                                  |
        ");
    }
}
