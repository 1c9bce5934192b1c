//! Terminal User Interface (TUI) for the pomodoro timer.
//!
//! A full-screen countdown built with ratatui and crossterm. The view owns
//! one [`PomodoroRunner`]; leaving the view drops it, which stops the tick
//! task.

mod app;
mod event;
mod ui;

pub use app::{Action, App, Notification};

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

use crate::error::StudyError;
use crate::features::pomodoro::{
    default_subject, PomodoroRunner, PomodoroTimer, SessionKind, SessionStore, TaskCatalog,
    TimerEvent,
};

const REDRAW: Duration = Duration::from_millis(250);

/// How the view starts.
#[derive(Debug, Clone)]
pub struct TimerOptions {
    /// Preset menu in minutes.
    pub presets: Vec<u32>,
    /// Initial preset.
    pub minutes: u32,
    /// Initial kind.
    pub kind: SessionKind,
    /// Initial subject; the first catalog subject when unset.
    pub subject: Option<String>,
    /// Subject used when the catalog is empty or unreachable.
    pub fallback_subject: String,
}

/// Run the pomodoro view until the user quits.
///
/// # Errors
///
/// Returns an error if the options are invalid or the terminal cannot be
/// set up.
pub async fn run(
    store: Arc<dyn SessionStore>,
    catalog: &dyn TaskCatalog,
    options: TimerOptions,
) -> Result<(), StudyError> {
    let subjects = catalog.list_subjects().await.unwrap_or_else(|e| {
        warn!(error = %e, "could not load subjects");
        Vec::new()
    });
    let subject = options
        .subject
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default_subject(&subjects, &options.fallback_subject));

    let mut timer =
        PomodoroTimer::with_presets(options.presets.clone(), options.minutes, subject.as_str())?;
    timer.set_kind(options.kind);

    let (runner, events) = PomodoroRunner::new(timer, store);
    let mut app = App::new(runner, options.presets, subjects, &subject);
    app.refresh_stats();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &mut app, events).await;

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Raw mode plus the alternate screen. A failing step undoes the earlier ones.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    undo_on_error(execute!(stdout, EnterAlternateScreen), || {
        disable_raw_mode().ok();
    })?;
    undo_on_error(Terminal::new(CrosstermBackend::new(stdout)), || {
        execute!(io::stdout(), LeaveAlternateScreen).ok();
        disable_raw_mode().ok();
    })
}

fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// Run the main application loop.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events: UnboundedReceiver<TimerEvent>,
) -> Result<(), StudyError> {
    let stop = Arc::new(AtomicBool::new(false));
    let mut keys = event::spawn_key_reader(Arc::clone(&stop));
    let mut redraw = tokio::time::interval(REDRAW);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::render(frame, app)) {
            break Err(StudyError::Io(e));
        }

        tokio::select! {
            Some(key) = keys.recv() => {
                if let Some(action) = event::map_key(key) {
                    app.apply(action);
                }
            }
            Some(timer_event) = events.recv() => app.handle_event(timer_event),
            _ = redraw.tick() => {}
        }

        if app.should_quit {
            break Ok(());
        }
    };

    stop.store(true, Ordering::Relaxed);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_step_is_undone() {
        let undone = Cell::new(false);
        let result: io::Result<()> = undo_on_error(Err(io::Error::other("no tty")), || {
            undone.set(true);
        });
        assert!(result.is_err());
        assert!(undone.get());
    }

    #[test]
    fn test_successful_setup_step_is_kept() {
        let undone = Cell::new(false);
        let result = undo_on_error(Ok(7), || undone.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }
}
