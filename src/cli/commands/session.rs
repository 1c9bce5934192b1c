//! Study session commands and the subject list.

use colored::Colorize;

use crate::api::ApiClient;
use crate::cli::args::{OutputFormat, SessionCommands};
use crate::error::StudyError;
use crate::features::pomodoro::{
    format_minutes, stat_cards, CompletedInterval, SessionStore, TaskCatalog,
};
use crate::output::{format_sessions, format_stats, format_list_json, to_json};

/// Execute session subcommands
///
/// # Errors
///
/// Returns an error if the API call fails or output formatting fails.
pub async fn session(
    client: &ApiClient,
    cmd: SessionCommands,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match cmd {
        SessionCommands::Stats => {
            let overview = client.fetch_overview().await?;
            format_stats(&stat_cards(&overview.metadata), format)
        }
        SessionCommands::History => {
            let overview = client.fetch_overview().await?;
            format_sessions(&overview.sessions, format)
        }
        SessionCommands::Log {
            subject,
            minutes,
            kind,
        } => {
            if subject.trim().is_empty() {
                return Err(StudyError::invalid("studyTask", "Subject is required"));
            }
            if minutes == 0 {
                return Err(StudyError::invalid(
                    "duration",
                    "Duration must be at least 1 minute",
                ));
            }
            let interval = CompletedInterval {
                subject: subject.trim().to_string(),
                duration_minutes: minutes,
                kind,
            };
            let session = SessionStore::record_session(client, &interval).await?;
            match format {
                OutputFormat::Json => to_json(&session),
                OutputFormat::Pretty => Ok(format!(
                    "{} Recorded {} {} on {}",
                    "✓".green(),
                    format_minutes(u64::from(session.duration)),
                    session.kind.as_str(),
                    session.study_task.bold()
                )),
            }
        }
    }
}

/// Execute subjects command
///
/// # Errors
///
/// Returns an error if the API call fails or output formatting fails.
pub async fn subjects(client: &ApiClient, format: OutputFormat) -> Result<String, StudyError> {
    let subjects = client.list_subjects().await?;
    match format {
        OutputFormat::Json => format_list_json(&subjects, "Subjects"),
        OutputFormat::Pretty => {
            if subjects.is_empty() {
                return Ok(format!(
                    "{} (0)\n  No subjects yet. Add a study task first.",
                    "Subjects".bold()
                ));
            }
            let mut lines = vec![format!("{} ({})", "Subjects".bold(), subjects.len())];
            lines.extend(subjects.iter().map(|s| format!("  {s}")));
            Ok(lines.join("\n"))
        }
    }
}
