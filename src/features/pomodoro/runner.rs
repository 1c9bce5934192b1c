//! Drives a [`PomodoroTimer`] on the tokio clock.
//!
//! The runner owns the timer and at most one tick task. Completions are
//! handed to the [`SessionStore`] on a detached task; every outcome is
//! reported on the event channel returned by [`PomodoroRunner::new`].
//! Dropping the runner aborts the tick task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::session::{CompletedInterval, SessionKind};
use super::store::{SessionOverview, SessionStore};
use super::timer::{PomodoroTimer, TimerError, TimerSnapshot};
use crate::api::StudySession;

const TICK: Duration = Duration::from_secs(1);

/// Something the view should know about.
#[derive(Debug, Clone)]
pub enum TimerEvent {
    /// One second elapsed.
    Tick { remaining_seconds: u32 },
    /// The countdown reached zero.
    Completed(CompletedInterval),
    /// The store accepted the completed interval.
    SessionRecorded(StudySession),
    /// The store rejected the completed interval. Not retried.
    RecordFailed {
        interval: CompletedInterval,
        message: String,
    },
    /// Fresh aggregates.
    StatsRefreshed(SessionOverview),
    /// The aggregate read failed.
    StatsUnavailable { message: String },
}

/// A timer plus its tick task.
pub struct PomodoroRunner {
    timer: Arc<Mutex<PomodoroTimer>>,
    store: Arc<dyn SessionStore>,
    events: UnboundedSender<TimerEvent>,
    ticker: Option<JoinHandle<()>>,
}

impl PomodoroRunner {
    /// Wrap a timer. Must be called inside a tokio runtime.
    pub fn new(
        timer: PomodoroTimer,
        store: Arc<dyn SessionStore>,
    ) -> (Self, UnboundedReceiver<TimerEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let runner = Self {
            timer: Arc::new(Mutex::new(timer)),
            store,
            events,
            ticker: None,
        };
        (runner, rx)
    }

    /// Start or resume. No-op if already running.
    pub fn start(&mut self) -> bool {
        if !lock(&self.timer).start() {
            return false;
        }
        self.stop_ticker();

        let timer = Arc::clone(&self.timer);
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let (completed, remaining_seconds) = {
                    let mut timer = lock(&timer);
                    if !timer.is_running() {
                        break;
                    }
                    (timer.tick(), timer.remaining_seconds())
                };

                if let Some(done) = completed {
                    debug!(subject = %done.subject, minutes = done.duration_minutes, "interval complete");
                    let _ = events.send(TimerEvent::Completed(done.clone()));
                    tokio::spawn(record(Arc::clone(&store), events.clone(), done));
                    break;
                }
                let _ = events.send(TimerEvent::Tick { remaining_seconds });
            }
        }));
        true
    }

    /// Pause, keeping the remaining time. An in-flight record call is not
    /// cancelled.
    pub fn pause(&mut self) -> bool {
        let paused = lock(&self.timer).pause();
        self.stop_ticker();
        paused
    }

    /// Rewind to the configured length and stop.
    pub fn reset(&mut self) {
        lock(&self.timer).reset();
        self.stop_ticker();
    }

    /// Select a preset from the menu.
    ///
    /// # Errors
    ///
    /// Returns an error if `minutes` is zero or not on the menu; the timer
    /// is left untouched.
    pub fn set_preset(&mut self, minutes: u32) -> Result<(), TimerError> {
        lock(&self.timer).set_preset(minutes)?;
        self.stop_ticker();
        Ok(())
    }

    /// Switch between focus and break.
    pub fn set_kind(&mut self, kind: SessionKind) {
        lock(&self.timer).set_kind(kind);
        self.stop_ticker();
    }

    /// Change the subject used by the next completion.
    pub fn set_subject(&self, subject: impl Into<String>) {
        lock(&self.timer).set_subject(subject);
    }

    /// Current timer state.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        lock(&self.timer).snapshot()
    }

    /// Re-read the aggregates in the background.
    pub fn refresh_stats(&self) {
        tokio::spawn(refresh(Arc::clone(&self.store), self.events.clone()));
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for PomodoroRunner {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

fn lock(timer: &Mutex<PomodoroTimer>) -> MutexGuard<'_, PomodoroTimer> {
    timer.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn record(
    store: Arc<dyn SessionStore>,
    events: UnboundedSender<TimerEvent>,
    interval: CompletedInterval,
) {
    match store.record_session(&interval).await {
        Ok(session) => {
            info!(
                subject = %session.study_task,
                minutes = session.duration,
                kind = %session.kind,
                "session recorded"
            );
            let _ = events.send(TimerEvent::SessionRecorded(session));
            refresh(store, events).await;
        }
        Err(e) => {
            warn!(
                error = %e,
                transient = e.is_transient(),
                subject = %interval.subject,
                "failed to record session"
            );
            let _ = events.send(TimerEvent::RecordFailed {
                interval,
                message: e.to_string(),
            });
        }
    }
}

async fn refresh(store: Arc<dyn SessionStore>, events: UnboundedSender<TimerEvent>) {
    let event = match store.fetch_overview().await {
        Ok(overview) => TimerEvent::StatsRefreshed(overview),
        Err(e) => {
            warn!(error = %e, "failed to load session statistics");
            TimerEvent::StatsUnavailable {
                message: e.to_string(),
            }
        }
    };
    let _ = events.send(event);
}
