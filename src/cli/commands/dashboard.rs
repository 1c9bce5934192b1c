//! Today at a glance.

use colored::Colorize;
use serde::Serialize;
use tracing::warn;

use crate::api::{ApiClient, Weekday};
use crate::cli::args::OutputFormat;
use crate::core::today;
use crate::error::StudyError;
use crate::features::budget::BudgetSummary;
use crate::features::planner::{is_overdue, TaskCounts};
use crate::features::pomodoro::{today_focus, SessionStore};
use crate::output::{money, to_json};

/// Dashboard figures. `None` means the section could not be loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub day: Option<Weekday>,
    pub classes_today: Option<usize>,
    pub pending_tasks: Option<usize>,
    pub overdue_tasks: Option<usize>,
    pub current_balance: Option<f64>,
    pub today_focus: Option<String>,
}

/// Execute dashboard command
///
/// The four sections load concurrently; a failed section is logged and
/// shown as unavailable.
///
/// # Errors
///
/// Returns [`StudyError::Unauthorized`] without a token, or an error if
/// output formatting fails.
pub async fn dashboard(client: &ApiClient, format: OutputFormat) -> Result<String, StudyError> {
    if !client.has_token() {
        return Err(StudyError::Unauthorized(
            "run 'studykit login' first or set STUDYKIT_TOKEN".to_string(),
        ));
    }

    let (classes, tasks, budget, overview) = tokio::join!(
        client.today_schedules(),
        client.study_tasks(),
        client.budget(),
        client.fetch_overview(),
    );

    let today = today();
    let mut board = Dashboard {
        day: Some(Weekday::today()),
        ..Dashboard::default()
    };
    board.classes_today = section("classes", classes).map(|c| c.len());
    if let Some(tasks) = section("tasks", tasks) {
        board.pending_tasks = Some(TaskCounts::of(&tasks).pending);
        board.overdue_tasks = Some(tasks.iter().filter(|t| is_overdue(t, today)).count());
    }
    board.current_balance = section("budget", budget)
        .map(|page| BudgetSummary::new(&page.data, page.metadata).totals.current_balance);
    board.today_focus = section("sessions", overview).map(|o| today_focus(&o.metadata));

    match format {
        OutputFormat::Json => to_json(&board),
        OutputFormat::Pretty => Ok(format_dashboard_pretty(&board)),
    }
}

fn section<T>(name: &str, result: Result<T, StudyError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(section = name, error = %e, "dashboard section unavailable");
            None
        }
    }
}

fn format_dashboard_pretty(board: &Dashboard) -> String {
    let unavailable = || "unavailable".dimmed().to_string();
    let title = board
        .day
        .map_or_else(|| "Dashboard".to_string(), |d| format!("Dashboard ({d})"));

    let tasks = board.pending_tasks.map_or_else(unavailable, |pending| {
        match board.overdue_tasks.filter(|n| *n > 0) {
            Some(overdue) => format!("{} ({})", pending, format!("{overdue} overdue").red()),
            None => pending.to_string(),
        }
    });
    let balance = board.current_balance.map_or_else(unavailable, |b| {
        if b >= 0.0 {
            money(b).green().to_string()
        } else {
            money(b).red().to_string()
        }
    });

    [
        title.bold().to_string(),
        "─".repeat(40),
        format!(
            "{:<16} {}",
            "Classes today:",
            board
                .classes_today
                .map_or_else(unavailable, |n| n.to_string().cyan().to_string())
        ),
        format!("{:<16} {tasks}", "Pending tasks:"),
        format!("{:<16} {balance}", "Balance:"),
        format!(
            "{:<16} {}",
            "Focus today:",
            board
                .today_focus
                .as_deref()
                .map_or_else(unavailable, |f| f.cyan().to_string())
        ),
    ]
    .join("\n")
}
