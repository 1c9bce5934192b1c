//! Output formatting for studykit.
//!
//! Every command renders either colored text or pretty-printed JSON.

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::api::{BudgetEntry, ClassSchedule, StudySession, StudyTask};
use crate::cli::args::OutputFormat;
use crate::error::StudyError;
use crate::features::budget::BudgetSummary;
use crate::features::planner::TaskCounts;
use crate::features::pomodoro::StatCard;

pub use json::*;
pub use pretty::*;

/// Format study tasks based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[&StudyTask],
    counts: TaskCounts,
    title: &str,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, counts, title, today)),
        OutputFormat::Json => format_tasks_json(tasks, counts, today),
    }
}

/// Format a single study task based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_task(
    task: &StudyTask,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task, today)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format classes based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_classes(
    classes: &[ClassSchedule],
    title: &str,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_classes_pretty(classes, title)),
        OutputFormat::Json => format_classes_json(classes, title),
    }
}

/// Format a single class based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_class(class: &ClassSchedule, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_class_pretty(class)),
        OutputFormat::Json => to_json(class),
    }
}

/// Format budget entries and summary based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_budget(
    entries: &[BudgetEntry],
    summary: &BudgetSummary,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_budget_pretty(entries, summary)),
        OutputFormat::Json => format_budget_json(entries, summary),
    }
}

/// Format statistics cards based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_stats(cards: &[StatCard], format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(cards)),
        OutputFormat::Json => format_stats_json(cards),
    }
}

/// Format recorded sessions based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_sessions(
    sessions: &[StudySession],
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_sessions_pretty(sessions)),
        OutputFormat::Json => format_sessions_json(sessions),
    }
}
