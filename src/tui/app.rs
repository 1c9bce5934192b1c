//! Application state for the pomodoro view.

use crate::api::StudySession;
use crate::features::pomodoro::{
    placeholder_cards, stat_cards, PomodoroRunner, SessionKind, StatCard, TimerEvent,
    TimerSnapshot,
};

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start, or pause if running.
    ToggleRunning,
    /// Rewind the current interval.
    Reset,
    /// Switch between focus and break.
    SetKind(SessionKind),
    /// Select a preset by menu position (0-based).
    SelectPreset(usize),
    /// Previous subject in the menu.
    PreviousSubject,
    /// Next subject in the menu.
    NextSubject,
    /// Re-read the statistics.
    RefreshStats,
    /// Leave the view.
    Quit,
}

/// Severity of the status line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Success(String),
    Error(String),
}

/// Application state.
pub struct App {
    runner: PomodoroRunner,
    /// Preset menu in minutes.
    pub presets: Vec<u32>,
    /// Subject menu.
    pub subjects: Vec<String>,
    /// Index into `subjects` of the active subject.
    pub subject_index: usize,
    /// Statistics panel.
    pub cards: Vec<StatCard>,
    /// Today's recorded sessions, newest last.
    pub history: Vec<StudySession>,
    /// Latest notification.
    pub notification: Option<Notification>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create the view state around a runner.
    ///
    /// `subject` is made the active entry, and added to the menu if missing.
    pub fn new(
        runner: PomodoroRunner,
        presets: Vec<u32>,
        mut subjects: Vec<String>,
        subject: &str,
    ) -> Self {
        let subject_index = subjects.iter().position(|s| s == subject).unwrap_or_else(|| {
            subjects.insert(0, subject.to_string());
            0
        });
        Self {
            runner,
            presets,
            subjects,
            subject_index,
            cards: placeholder_cards(),
            history: Vec::new(),
            notification: Some(Notification::Info("Press space to start".to_string())),
            should_quit: false,
        }
    }

    /// Current timer state.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.runner.snapshot()
    }

    /// Ask for fresh statistics.
    pub fn refresh_stats(&self) {
        self.runner.refresh_stats();
    }

    /// Apply a user action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::ToggleRunning => {
                if self.runner.snapshot().running {
                    self.runner.pause();
                    self.notification = Some(Notification::Info("Paused".to_string()));
                } else if self.runner.start() {
                    self.notification = None;
                }
            }
            Action::Reset => {
                self.runner.reset();
                self.notification = Some(Notification::Info("Reset".to_string()));
            }
            Action::SetKind(kind) => {
                self.runner.set_kind(kind);
                self.notification = Some(Notification::Info(format!("{kind} selected")));
            }
            Action::SelectPreset(index) => {
                let Some(&minutes) = self.presets.get(index) else {
                    return;
                };
                self.notification = Some(match self.runner.set_preset(minutes) {
                    Ok(()) => Notification::Info(format!("{minutes} min preset")),
                    Err(e) => Notification::Error(e.to_string()),
                });
            }
            Action::PreviousSubject => self.cycle_subject(false),
            Action::NextSubject => self.cycle_subject(true),
            Action::RefreshStats => {
                self.runner.refresh_stats();
                self.notification = Some(Notification::Info("Refreshing statistics".to_string()));
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Fold a runner event into the view.
    pub fn handle_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick { .. } => {}
            TimerEvent::Completed(interval) => {
                self.notification = Some(Notification::Info(format!(
                    "{} complete: {} min of {}. Saving...",
                    interval.kind, interval.duration_minutes, interval.subject
                )));
            }
            TimerEvent::SessionRecorded(session) => {
                self.notification = Some(Notification::Success(format!(
                    "Recorded {} min {} on {}",
                    session.duration,
                    session.kind.as_str(),
                    session.study_task
                )));
            }
            TimerEvent::RecordFailed { interval, message } => {
                self.notification = Some(Notification::Error(format!(
                    "Could not record {} min on {}: {message}",
                    interval.duration_minutes, interval.subject
                )));
            }
            TimerEvent::StatsRefreshed(overview) => {
                self.cards = stat_cards(&overview.metadata);
                self.history = overview.sessions;
            }
            TimerEvent::StatsUnavailable { message } => {
                self.cards = placeholder_cards();
                self.notification =
                    Some(Notification::Error(format!("Statistics unavailable: {message}")));
            }
        }
    }

    /// The active subject.
    pub fn subject(&self) -> &str {
        self.subjects
            .get(self.subject_index)
            .map_or("", String::as_str)
    }

    fn cycle_subject(&mut self, forward: bool) {
        let len = self.subjects.len();
        if len < 2 {
            return;
        }
        self.subject_index = if forward {
            (self.subject_index + 1) % len
        } else {
            (self.subject_index + len - 1) % len
        };
        let subject = self.subject().to_string();
        self.runner.set_subject(subject.clone());
        self.notification = Some(Notification::Info(format!("Subject: {subject}")));
    }
}
