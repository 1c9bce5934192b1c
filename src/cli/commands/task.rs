//! Study planner commands.

use colored::Colorize;
use serde_json::json;

use crate::api::{ApiClient, StudyTaskUpdate};
use crate::cli::args::{AddTaskArgs, EditTaskArgs, OutputFormat, TaskCommands};
use crate::core::today;
use crate::error::StudyError;
use crate::features::planner::{filter_tasks, tasks, TaskCounts, TaskFilter, TaskForm};
use crate::output::{format_task, format_tasks, to_json};

/// Execute task subcommands
///
/// # Errors
///
/// Returns an error if validation fails, the API call fails, or output
/// formatting fails.
pub async fn task(
    client: &ApiClient,
    cmd: TaskCommands,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let today = today();
    match cmd {
        TaskCommands::List { filter } => {
            let all = client.study_tasks().await?;
            let counts = TaskCounts::of(&all);
            let shown = filter_tasks(&all, filter);
            let title = match filter {
                TaskFilter::All => "Study Tasks",
                TaskFilter::Pending => "Pending Tasks",
                TaskFilter::Completed => "Completed Tasks",
            };
            format_tasks(&shown, counts, title, today, format)
        }
        TaskCommands::Show { id } => {
            let task = client.study_task(&id).await?;
            format_task(&task, today, format)
        }
        TaskCommands::Add(args) => add_task(client, args, format).await,
        TaskCommands::Edit(args) => edit_task(client, args, format).await,
        TaskCommands::Done { id, undo } => {
            let update = StudyTaskUpdate {
                completed: Some(!undo),
                ..StudyTaskUpdate::default()
            };
            let task = client.update_study_task(&id, &update).await?;
            match format {
                OutputFormat::Json => to_json(&task),
                OutputFormat::Pretty if task.completed => {
                    Ok(format!("{} Completed: {}", "✓".green(), task.title.bold()))
                }
                OutputFormat::Pretty => Ok(format!("Reopened: {}", task.title.bold())),
            }
        }
        TaskCommands::Delete { id } => {
            client.delete_study_task(&id).await?;
            match format {
                OutputFormat::Json => to_json(&json!({ "deleted": id })),
                OutputFormat::Pretty => Ok(format!("Deleted task: {id}")),
            }
        }
    }
}

async fn add_task(
    client: &ApiClient,
    args: AddTaskArgs,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let request = TaskForm {
        title: args.title,
        subject: args.subject,
        description: args.description,
        priority: args.priority,
        deadline: args.deadline,
        estimated_hours: args.hours,
    }
    .into_request(today())?;

    let task = client.create_study_task(&request).await?;
    match format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(format!(
            "{} Created task: {} (due {}, ID: {})",
            "✓".green(),
            task.title.bold(),
            task.deadline,
            task.id
        )),
    }
}

async fn edit_task(
    client: &ApiClient,
    args: EditTaskArgs,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let update = tasks::check_update(
        StudyTaskUpdate {
            title: args.title,
            subject: args.subject,
            description: args.description,
            priority: args.priority,
            deadline: args.deadline,
            estimated_hours: args.hours,
            completed: None,
        },
        today(),
    )?;

    let task = client.update_study_task(&args.id, &update).await?;
    match format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(format!("Updated task: {}", task.title.bold())),
    }
}
