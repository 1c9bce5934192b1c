//! Pomodoro study timer.
//!
//! - [`PomodoroTimer`]: the countdown state machine, no I/O
//! - [`PomodoroRunner`]: drives a timer once per second and submits
//!   completed intervals to a [`SessionStore`]
//! - [`stat_cards`]: the aggregate statistics panel

pub mod runner;
pub mod session;
pub mod stats;
pub mod store;
pub mod timer;

pub use runner::{PomodoroRunner, TimerEvent};
pub use session::{default_subject, CompletedInterval, SessionKind, FALLBACK_SUBJECT};
pub use stats::{placeholder_cards, stat_cards, today_focus, StatCard};
pub use store::{unique_subjects, SessionOverview, SessionStore, TaskCatalog};
pub use timer::{
    format_minutes, format_mmss, render_progress_bar, validate_presets, PomodoroTimer,
    TimerError, TimerSnapshot, DEFAULT_MINUTES, DEFAULT_PRESETS,
};
