//! Keyboard input for the pomodoro view.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::warn;

use crate::features::pomodoro::SessionKind;
use crate::tui::app::Action;

const POLL: Duration = Duration::from_millis(100);

/// Read key presses on a blocking thread until `stop` is set or the
/// receiver is dropped.
pub fn spawn_key_reader(stop: Arc<AtomicBool>) -> UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(POLL) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "event read failed");
                        break;
                    }
                },
                Err(e) => {
                    warn!(error = %e, "event poll failed");
                    break;
                }
            }
        }
    });
    rx
}

/// Map a key press to an action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::ToggleRunning),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('f') => Some(Action::SetKind(SessionKind::Focus)),
        KeyCode::Char('b') => Some(Action::SetKind(SessionKind::Break)),
        KeyCode::Char('s') => Some(Action::RefreshStats),
        KeyCode::Char('[') | KeyCode::Left => Some(Action::PreviousSubject),
        KeyCode::Char(']') | KeyCode::Right => Some(Action::NextSubject),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| usize::try_from(d).ok())
            .map(|d| Action::SelectPreset(d - 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_key_controls() {
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(Action::ToggleRunning));
        assert_eq!(map_key(key(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(
            map_key(key(KeyCode::Char('b'))),
            Some(Action::SetKind(SessionKind::Break))
        );
        assert_eq!(map_key(key(KeyCode::Char(']'))), Some(Action::NextSubject));
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_map_key_presets_are_one_based() {
        assert_eq!(map_key(key(KeyCode::Char('1'))), Some(Action::SelectPreset(0)));
        assert_eq!(map_key(key(KeyCode::Char('9'))), Some(Action::SelectPreset(8)));
        assert_eq!(map_key(key(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_map_key_quit() {
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }
}
