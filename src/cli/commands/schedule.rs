//! Class schedule commands.

use colored::Colorize;
use serde_json::json;

use crate::api::{ApiClient, ClassScheduleUpdate, Weekday};
use crate::cli::args::{AddClassArgs, EditClassArgs, OutputFormat, ScheduleCommands};
use crate::error::StudyError;
use crate::features::planner::{classes_on, schedule, sort_classes, ClassForm};
use crate::output::{format_class, format_classes, to_json};

/// Execute schedule subcommands
///
/// # Errors
///
/// Returns an error if validation fails, the API call fails, or output
/// formatting fails.
pub async fn schedule(
    client: &ApiClient,
    cmd: ScheduleCommands,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match cmd {
        ScheduleCommands::List { day } => {
            let mut classes = client.schedules().await?;
            sort_classes(&mut classes);
            match day {
                Some(day) => format_classes(&classes_on(&classes, day), &day.to_string(), format),
                None => format_classes(&classes, "Class Schedule", format),
            }
        }
        ScheduleCommands::Today => {
            let mut classes = client.today_schedules().await?;
            sort_classes(&mut classes);
            let title = format!("Today ({})", Weekday::today());
            format_classes(&classes, &title, format)
        }
        ScheduleCommands::Show { id } => {
            let class = client.schedule(&id).await?;
            format_class(&class, format)
        }
        ScheduleCommands::Add(args) => add_class(client, args, format).await,
        ScheduleCommands::Edit(args) => edit_class(client, args, format).await,
        ScheduleCommands::Delete { id } => {
            client.delete_schedule(&id).await?;
            match format {
                OutputFormat::Json => to_json(&json!({ "deleted": id })),
                OutputFormat::Pretty => Ok(format!("Deleted class: {id}")),
            }
        }
    }
}

async fn add_class(
    client: &ApiClient,
    args: AddClassArgs,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let request = ClassForm {
        subject: args.subject,
        instructor: args.instructor,
        day: args.day,
        start_time: args.start,
        end_time: args.end,
        location: args.location,
        color: args.color,
    }
    .into_request()?;

    let class = client.create_schedule(&request).await?;
    match format {
        OutputFormat::Json => to_json(&class),
        OutputFormat::Pretty => Ok(format!(
            "{} Added class: {} {}-{} (ID: {})",
            "✓".green(),
            class.subject.bold(),
            class.start_time,
            class.end_time,
            class.id
        )),
    }
}

async fn edit_class(
    client: &ApiClient,
    args: EditClassArgs,
    format: OutputFormat,
) -> Result<String, StudyError> {
    // Times are checked against the stored range, so read it first.
    let current = client.schedule(&args.id).await?;
    let update = schedule::check_update(
        ClassScheduleUpdate {
            subject: args.subject,
            instructor: args.instructor,
            day: args.day,
            start_time: args.start,
            end_time: args.end,
            location: args.location,
            color: args.color,
        },
        &current,
    )?;

    let class = client.update_schedule(&args.id, &update).await?;
    match format {
        OutputFormat::Json => to_json(&class),
        OutputFormat::Pretty => Ok(format!("Updated class: {}", class.subject.bold())),
    }
}
