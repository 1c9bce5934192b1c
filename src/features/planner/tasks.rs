//! Study tasks: form checks and derived status.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::api::{NewStudyTask, Priority, StudyTask, StudyTaskUpdate};
use crate::core::{days_until, deadline_date, parse_date_input, FieldErrors};
use crate::error::StudyError;

/// Which tasks to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    /// Whether `task` passes this filter.
    #[must_use]
    pub const fn matches(self, task: &StudyTask) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Pending and completed totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub pending: usize,
    pub completed: usize,
}

impl TaskCounts {
    /// Count a task list.
    #[must_use]
    pub fn of(tasks: &[StudyTask]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            pending: tasks.len() - completed,
            completed,
        }
    }
}

/// Where a task stands relative to its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "days")]
pub enum DeadlineStatus {
    Done,
    Overdue(i64),
    DueToday,
    Upcoming(i64),
    Unknown,
}

/// Classify a task's deadline against `today`.
#[must_use]
pub fn deadline_status(task: &StudyTask, today: NaiveDate) -> DeadlineStatus {
    if task.completed {
        return DeadlineStatus::Done;
    }
    match deadline_date(&task.deadline).map(|d| days_until(d, today)) {
        None => DeadlineStatus::Unknown,
        Some(0) => DeadlineStatus::DueToday,
        Some(days) if days < 0 => DeadlineStatus::Overdue(-days),
        Some(days) => DeadlineStatus::Upcoming(days),
    }
}

/// A deadline strictly before today, on a task not yet done.
#[must_use]
pub fn is_overdue(task: &StudyTask, today: NaiveDate) -> bool {
    matches!(deadline_status(task, today), DeadlineStatus::Overdue(_))
}

/// Tasks passing `filter`, in backend order.
#[must_use]
pub fn filter_tasks(tasks: &[StudyTask], filter: TaskFilter) -> Vec<&StudyTask> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// Fields of the task form, as typed.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub subject: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub deadline: String,
    pub estimated_hours: Option<f64>,
}

impl TaskForm {
    /// Check the form and build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::Validation`] listing every invalid field.
    pub fn into_request(self, today: NaiveDate) -> Result<NewStudyTask, StudyError> {
        let mut errors = FieldErrors::new();
        errors.require("title", "Title", &self.title);
        errors.require("subject", "Subject", &self.subject);
        let deadline = check_deadline(&mut errors, &self.deadline, today);
        check_hours(&mut errors, self.estimated_hours);
        errors.into_result()?;

        Ok(NewStudyTask {
            title: self.title.trim().to_string(),
            subject: self.subject.trim().to_string(),
            description: non_blank(self.description),
            priority: self.priority,
            deadline: deadline.unwrap_or_default(),
            estimated_hours: self.estimated_hours,
            completed: false,
        })
    }
}

/// Check an edit and normalize its deadline.
///
/// # Errors
///
/// Returns [`StudyError::Validation`] if a set field is invalid or nothing
/// would change.
pub fn check_update(
    mut update: StudyTaskUpdate,
    today: NaiveDate,
) -> Result<StudyTaskUpdate, StudyError> {
    if update.is_empty() {
        return Err(StudyError::invalid("task", "Nothing to update"));
    }
    let mut errors = FieldErrors::new();
    if let Some(title) = &update.title {
        errors.require("title", "Title", title);
    }
    if let Some(subject) = &update.subject {
        errors.require("subject", "Subject", subject);
    }
    if let Some(raw) = update.deadline.take() {
        update.deadline = check_deadline(&mut errors, &raw, today);
    }
    check_hours(&mut errors, update.estimated_hours);
    errors.into_result()?;
    Ok(update)
}

fn check_deadline(errors: &mut FieldErrors, raw: &str, today: NaiveDate) -> Option<String> {
    if !errors.require("deadline", "Deadline", raw) {
        return None;
    }
    let parsed = parse_date_input(raw, today);
    if parsed.is_none() {
        errors.add("deadline", "Deadline must be a date (YYYY-MM-DD)");
    }
    parsed.map(|d| d.format("%Y-%m-%d").to_string())
}

fn check_hours(errors: &mut FieldErrors, hours: Option<f64>) {
    if let Some(h) = hours {
        if !h.is_finite() || h < 0.0 {
            errors.add("estimatedHours", "Estimated hours cannot be negative");
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(deadline: &str, completed: bool) -> StudyTask {
        StudyTask {
            id: "t".to_string(),
            title: "Essay".to_string(),
            subject: "History".to_string(),
            description: None,
            priority: Priority::High,
            deadline: deadline.to_string(),
            completed,
            estimated_hours: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    #[test]
    fn test_deadline_status() {
        assert_eq!(deadline_status(&task("2025-03-11", false), today()), DeadlineStatus::Overdue(1));
        assert_eq!(deadline_status(&task("2025-03-12T18:00:00Z", false), today()), DeadlineStatus::DueToday);
        assert_eq!(deadline_status(&task("2025-03-14", false), today()), DeadlineStatus::Upcoming(2));
        assert_eq!(deadline_status(&task("2025-03-01", true), today()), DeadlineStatus::Done);
        assert_eq!(deadline_status(&task("", false), today()), DeadlineStatus::Unknown);
    }

    #[test]
    fn test_today_is_not_overdue() {
        assert!(!is_overdue(&task("2025-03-12", false), today()));
        assert!(is_overdue(&task("2025-03-10", false), today()));
        assert!(!is_overdue(&task("2025-03-10", true), today()));
    }

    #[test]
    fn test_filter_and_counts() {
        let tasks = vec![
            task("2025-03-11", false),
            task("2025-03-12", true),
            task("2025-03-13", false),
        ];
        assert_eq!(filter_tasks(&tasks, TaskFilter::All).len(), 3);
        assert_eq!(filter_tasks(&tasks, TaskFilter::Pending).len(), 2);
        assert_eq!(filter_tasks(&tasks, TaskFilter::Completed).len(), 1);
        assert_eq!(
            TaskCounts::of(&tasks),
            TaskCounts {
                pending: 2,
                completed: 1
            }
        );
    }

    #[test]
    fn test_form_collects_all_errors() {
        let form = TaskForm {
            deadline: "whenever".to_string(),
            estimated_hours: Some(-1.0),
            ..TaskForm::default()
        };
        let Err(StudyError::Validation(errors)) = form.into_request(today()) else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["deadline", "estimatedHours", "subject", "title"]);
    }

    #[test]
    fn test_form_normalizes_relative_deadline() {
        let form = TaskForm {
            title: " Read ch. 3 ".to_string(),
            subject: "Biology".to_string(),
            description: Some("   ".to_string()),
            deadline: "tomorrow".to_string(),
            estimated_hours: Some(1.5),
            ..TaskForm::default()
        };
        let request = form.into_request(today()).unwrap();
        assert_eq!(request.title, "Read ch. 3");
        assert_eq!(request.deadline, "2025-03-13");
        assert_eq!(request.description, None);
        assert!(!request.completed);
    }

    #[test]
    fn test_update_checks() {
        assert!(check_update(StudyTaskUpdate::default(), today()).is_err());

        let update = StudyTaskUpdate {
            deadline: Some("friday".to_string()),
            ..StudyTaskUpdate::default()
        };
        assert_eq!(
            check_update(update, today()).unwrap().deadline.as_deref(),
            Some("2025-03-14")
        );

        let update = StudyTaskUpdate {
            title: Some(" ".to_string()),
            ..StudyTaskUpdate::default()
        };
        assert!(check_update(update, today()).is_err());
    }
}
