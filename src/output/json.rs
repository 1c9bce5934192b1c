//! JSON output formatting for studykit.

use serde::Serialize;
use serde_json::json;

use crate::api::{BudgetEntry, ClassSchedule, StudySession, StudyTask};
use crate::error::StudyError;
use crate::features::budget::BudgetSummary;
use crate::features::planner::{deadline_status, TaskCounts};
use crate::features::pomodoro::StatCard;

/// Format a titled list as `{ list, count, items }`.
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_list_json<T: Serialize>(items: &[T], title: &str) -> Result<String, StudyError> {
    let output = json!({
        "list": title,
        "count": items.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format study tasks with their counts and deadline status.
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_tasks_json(
    tasks: &[&StudyTask],
    counts: TaskCounts,
    today: chrono::NaiveDate,
) -> Result<String, StudyError> {
    let items: Vec<_> = tasks
        .iter()
        .map(|t| {
            json!({
                "task": t,
                "deadlineStatus": deadline_status(t, today),
            })
        })
        .collect();
    let output = json!({
        "count": tasks.len(),
        "pending": counts.pending,
        "completed": counts.completed,
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format classes.
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_classes_json(classes: &[ClassSchedule], title: &str) -> Result<String, StudyError> {
    format_list_json(classes, title)
}

/// Format budget entries with the summary.
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_budget_json(
    entries: &[BudgetEntry],
    summary: &BudgetSummary,
) -> Result<String, StudyError> {
    let output = json!({
        "summary": summary,
        "count": entries.len(),
        "items": entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the statistics cards.
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_stats_json(cards: &[StatCard]) -> Result<String, StudyError> {
    to_json(&cards)
}

/// Format recorded sessions.
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_sessions_json(sessions: &[StudySession]) -> Result<String, StudyError> {
    format_list_json(sessions, "Today's Sessions")
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StudyError> {
    Ok(serde_json::to_string_pretty(value)?)
}
