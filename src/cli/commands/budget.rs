//! Budget tracker commands.

use colored::Colorize;
use serde_json::json;

use crate::api::{ApiClient, BudgetType};
use crate::cli::args::{AddEntryArgs, BudgetCommands, OutputFormat};
use crate::core::today;
use crate::error::StudyError;
use crate::features::budget::{categories, BudgetSummary, EntryForm};
use crate::output::{format_budget, format_summary_pretty, money, to_json};

/// Execute budget subcommands
///
/// # Errors
///
/// Returns an error if validation fails, the API call fails, or output
/// formatting fails.
pub async fn budget(
    client: &ApiClient,
    cmd: BudgetCommands,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match cmd {
        BudgetCommands::List => {
            let page = client.budget().await?;
            let summary = BudgetSummary::new(&page.data, page.metadata);
            format_budget(&page.data, &summary, format)
        }
        BudgetCommands::Summary => {
            let page = client.budget().await?;
            let summary = BudgetSummary::new(&page.data, page.metadata);
            match format {
                OutputFormat::Json => to_json(&summary),
                OutputFormat::Pretty => Ok(format_summary_pretty(&summary)),
            }
        }
        BudgetCommands::Add(args) => add_entry(client, args, format).await,
        BudgetCommands::Delete { id } => {
            client.delete_budget_entry(&id).await?;
            match format {
                OutputFormat::Json => to_json(&json!({ "deleted": id })),
                OutputFormat::Pretty => Ok(format!("Deleted entry: {id}")),
            }
        }
        BudgetCommands::Categories => match format {
            OutputFormat::Json => to_json(&json!({
                "Income": categories(BudgetType::Income),
                "Expense": categories(BudgetType::Expense),
            })),
            OutputFormat::Pretty => Ok([BudgetType::Income, BudgetType::Expense]
                .iter()
                .map(|kind| format!("{}: {}", kind.to_string().bold(), categories(*kind).join(", ")))
                .collect::<Vec<_>>()
                .join("\n")),
        },
    }
}

async fn add_entry(
    client: &ApiClient,
    args: AddEntryArgs,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let request = EntryForm {
        budget_type: args.budget_type,
        category: args.category,
        amount: args.amount,
        description: args.description,
        date: args.date,
    }
    .into_request(today())?;

    let entry = client.create_budget_entry(&request).await?;
    match format {
        OutputFormat::Json => to_json(&entry),
        OutputFormat::Pretty => {
            let amount = match entry.budget_type {
                BudgetType::Income => format!("+{}", money(entry.amount)).green(),
                BudgetType::Expense => format!("-{}", money(entry.amount)).red(),
            };
            Ok(format!(
                "{} Added {} {} ({}, {})",
                "✓".green(),
                entry.budget_type.to_string().to_lowercase(),
                amount,
                entry.category,
                entry.date
            ))
        }
    }
}
