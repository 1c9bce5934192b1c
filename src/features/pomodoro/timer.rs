//! Pomodoro countdown state.
//!
//! The timer itself is pure arithmetic on an in-memory counter. Scheduling
//! the once-per-second tick is the job of [`super::PomodoroRunner`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::session::{CompletedInterval, SessionKind};

/// Preset menu offered when the configuration does not override it.
pub const DEFAULT_PRESETS: [u32; 6] = [1, 5, 10, 15, 20, 25];

/// Preset selected when a timer is created.
pub const DEFAULT_MINUTES: u32 = 25;

/// Errors raised by timer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// Interval lengths must be at least one minute.
    #[error("Interval length must be at least 1 minute")]
    ZeroMinutes,

    /// The requested length is not on the preset menu.
    #[error("{minutes} minutes is not a preset (choose one of {allowed:?})")]
    NotAPreset {
        /// Requested minutes.
        minutes: u32,
        /// The preset menu.
        allowed: Vec<u32>,
    },

    /// The preset menu itself is unusable.
    #[error("Invalid preset menu: {0}")]
    InvalidPresets(String),
}

/// Point-in-time view of the timer, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Seconds left in the current interval.
    pub remaining_seconds: u32,
    /// Length of the current interval, in minutes.
    pub configured_minutes: u32,
    /// Current kind.
    pub kind: SessionKind,
    /// Whether the countdown is running.
    pub running: bool,
    /// Subject recorded on the next completion.
    pub subject: String,
}

/// A pomodoro countdown.
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    presets: Vec<u32>,
    configured_minutes: u32,
    remaining_seconds: u32,
    kind: SessionKind,
    running: bool,
    subject: String,
}

impl PomodoroTimer {
    /// Create a focus timer with the default preset menu.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            presets: DEFAULT_PRESETS.to_vec(),
            configured_minutes: DEFAULT_MINUTES,
            remaining_seconds: DEFAULT_MINUTES * 60,
            kind: SessionKind::Focus,
            running: false,
            subject: subject.into(),
        }
    }

    /// Create a focus timer with a custom preset menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu is empty, contains a zero, or does not
    /// contain `default_minutes`.
    pub fn with_presets(
        presets: Vec<u32>,
        default_minutes: u32,
        subject: impl Into<String>,
    ) -> Result<Self, TimerError> {
        validate_presets(&presets, default_minutes)?;
        Ok(Self {
            presets,
            configured_minutes: default_minutes,
            remaining_seconds: default_minutes * 60,
            kind: SessionKind::Focus,
            running: false,
            subject: subject.into(),
        })
    }

    /// Start or resume the countdown.
    ///
    /// Returns true if the timer was not already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Pause the countdown, keeping the remaining time.
    ///
    /// Returns true if the timer was running.
    pub fn pause(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    /// Rewind to the full configured length and stop.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.configured_minutes * 60;
        self.running = false;
    }

    /// Select a preset length, rewinding and stopping the countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if `minutes` is zero or not on the preset menu.
    pub fn set_preset(&mut self, minutes: u32) -> Result<(), TimerError> {
        if minutes == 0 {
            return Err(TimerError::ZeroMinutes);
        }
        if !self.presets.contains(&minutes) {
            return Err(TimerError::NotAPreset {
                minutes,
                allowed: self.presets.clone(),
            });
        }
        self.configured_minutes = minutes;
        self.reset();
        Ok(())
    }

    /// Switch between focus and break, rewinding and stopping the countdown.
    pub fn set_kind(&mut self, kind: SessionKind) {
        self.kind = kind;
        self.reset();
    }

    /// Change the subject recorded on the next completion.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the completed interval when this tick reached zero. The timer
    /// then stops, flips to the other kind, and rewinds to the configured
    /// length. Ticks while stopped do nothing.
    pub fn tick(&mut self) -> Option<CompletedInterval> {
        if !self.running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        let completed = CompletedInterval {
            subject: self.subject.clone(),
            duration_minutes: self.configured_minutes,
            kind: self.kind,
        };
        self.kind = self.kind.next();
        self.reset();
        Some(completed)
    }

    /// Seconds left in the current interval.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Configured interval length in minutes.
    #[must_use]
    pub const fn configured_minutes(&self) -> u32 {
        self.configured_minutes
    }

    /// Current kind.
    #[must_use]
    pub const fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Subject recorded on the next completion.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The preset menu.
    #[must_use]
    pub fn presets(&self) -> &[u32] {
        &self.presets
    }

    /// Get progress through the current interval (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = f64::from(self.configured_minutes * 60);
        if total == 0.0 {
            return 1.0;
        }
        1.0 - f64::from(self.remaining_seconds) / total
    }

    /// Format remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_mmss(self.remaining_seconds)
    }

    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining_seconds: self.remaining_seconds,
            configured_minutes: self.configured_minutes,
            kind: self.kind,
            running: self.running,
            subject: self.subject.clone(),
        }
    }
}

/// Check a preset menu and its default entry.
///
/// # Errors
///
/// Returns [`TimerError::InvalidPresets`] describing the first problem found.
pub fn validate_presets(presets: &[u32], default_minutes: u32) -> Result<(), TimerError> {
    if presets.is_empty() {
        return Err(TimerError::InvalidPresets("menu is empty".to_string()));
    }
    if presets.contains(&0) {
        return Err(TimerError::InvalidPresets(
            "every preset must be at least 1 minute".to_string(),
        ));
    }
    if !presets.contains(&default_minutes) {
        return Err(TimerError::InvalidPresets(format!(
            "default of {default_minutes} minutes is not on the menu"
        )));
    }
    Ok(())
}

/// Format seconds as MM:SS.
#[must_use]
pub fn format_mmss(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a minute count the way the backend formats focus time ("1h 5m").
#[must_use]
pub fn format_minutes(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{hours}h {minutes}m")
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
