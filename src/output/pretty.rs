use chrono::NaiveDate;
use colored::Colorize;

use crate::api::{
    BudgetEntry, BudgetType, ClassSchedule, Priority, Question, StudySession, StudyTask, User,
};
use crate::features::budget::BudgetSummary;
use crate::features::planner::{deadline_status, DeadlineStatus, TaskCounts};
use crate::features::pomodoro::{SessionKind, StatCard};

/// Format a list of study tasks with their counts.
pub fn format_tasks_pretty(
    tasks: &[&StudyTask],
    counts: TaskCounts,
    title: &str,
    today: NaiveDate,
) -> String {
    let mut output = format!(
        "{} ({} items)  {} pending, {} completed\n",
        title.bold(),
        tasks.len(),
        counts.pending.to_string().yellow(),
        counts.completed.to_string().green()
    );
    output.push_str(&"─".repeat(60));
    output.push('\n');

    if tasks.is_empty() {
        output.push_str("  No tasks");
        return output;
    }

    for task in tasks {
        let icon = if task.completed {
            "[x]".green()
        } else {
            "[ ]".white()
        };
        let title = if task.completed {
            task.title.strikethrough().to_string()
        } else {
            task.title.bold().to_string()
        };

        let mut line = format!("{icon} {title}  {}", task.subject.cyan());
        line.push_str(&format!("  {}", priority_label(task.priority)));
        line.push_str(&format!("  {}", deadline_label(task, today)));
        line.push_str(&format!("  {}", short_id(&task.id).dimmed()));

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single study task.
pub fn format_task_pretty(task: &StudyTask, today: NaiveDate) -> String {
    let icon = if task.completed {
        "[x]".green()
    } else {
        "[ ]".white()
    };

    let mut output = format!("{} {}\n", icon, task.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Subject".dimmed(), task.subject));
    output.push_str(&format!(
        "  {}: {}\n",
        "Priority".dimmed(),
        priority_label(task.priority)
    ));
    output.push_str(&format!(
        "  {}: {} ({})\n",
        "Deadline".dimmed(),
        task.deadline.get(..10).unwrap_or(&task.deadline),
        deadline_label(task, today)
    ));

    if let Some(hours) = task.estimated_hours {
        output.push_str(&format!("  {}: {hours}h\n", "Estimate".dimmed()));
    }

    if let Some(description) = &task.description {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), description));
    }

    output
}

fn priority_label(priority: Priority) -> String {
    match priority {
        Priority::High => "!high".red().to_string(),
        Priority::Medium => "!medium".yellow().to_string(),
        Priority::Low => "!low".blue().to_string(),
    }
}

fn deadline_label(task: &StudyTask, today: NaiveDate) -> String {
    match deadline_status(task, today) {
        DeadlineStatus::Done => "done".green().to_string(),
        DeadlineStatus::DueToday => "due today".yellow().bold().to_string(),
        DeadlineStatus::Overdue(1) => "1 day overdue".red().to_string(),
        DeadlineStatus::Overdue(days) => format!("{days} days overdue").red().to_string(),
        DeadlineStatus::Upcoming(1) => "due tomorrow".yellow().to_string(),
        DeadlineStatus::Upcoming(days) => format!("{days} days left"),
        DeadlineStatus::Unknown => "no deadline".dimmed().to_string(),
    }
}

/// Format classes, one line each.
pub fn format_classes_pretty(classes: &[ClassSchedule], title: &str) -> String {
    if classes.is_empty() {
        return format!("{} (0)\n  No classes", title.bold());
    }

    let mut output = format!("{} ({})\n", title.bold(), classes.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for class in classes {
        let day = class
            .day
            .map_or_else(|| "Any day".to_string(), |d| d.to_string());
        let mut line = format!(
            "{:<10} {}-{}  {}  {}",
            day.cyan(),
            class.start_time,
            class.end_time,
            class.subject.bold(),
            class.instructor.dimmed()
        );
        if let Some(location) = &class.location {
            line.push_str(&format!("  @ {location}"));
        }
        line.push_str(&format!("  {}", short_id(&class.id).dimmed()));
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single class.
pub fn format_class_pretty(class: &ClassSchedule) -> String {
    let mut output = format!("{}\n", class.subject.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), class.id));
    output.push_str(&format!("  {}: {}\n", "Instructor".dimmed(), class.instructor));
    if let Some(day) = class.day {
        output.push_str(&format!("  {}: {day}\n", "Day".dimmed()));
    }
    output.push_str(&format!(
        "  {}: {} - {}\n",
        "Time".dimmed(),
        class.start_time,
        class.end_time
    ));
    if let Some(location) = &class.location {
        output.push_str(&format!("  {}: {location}\n", "Location".dimmed()));
    }
    if let Some(color) = &class.color {
        output.push_str(&format!("  {}: {color}\n", "Color".dimmed()));
    }
    output
}

/// Format money with two decimals.
#[must_use]
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

/// Format budget entries followed by the summary.
pub fn format_budget_pretty(entries: &[BudgetEntry], summary: &BudgetSummary) -> String {
    let mut output = format!("{} ({} entries)\n", "Budget".bold(), entries.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    if entries.is_empty() {
        output.push_str("  No entries\n");
    }

    for entry in entries {
        let amount = match entry.budget_type {
            BudgetType::Income => format!("+{}", money(entry.amount)).green(),
            BudgetType::Expense => format!("-{}", money(entry.amount)).red(),
        };
        let label = entry.description.as_deref().unwrap_or(&entry.category);
        output.push_str(&format!(
            "{}  {:>12}  {}  {}  {}\n",
            entry.date.get(..10).unwrap_or(&entry.date),
            amount,
            label.bold(),
            entry.category.dimmed(),
            short_id(&entry.id).dimmed()
        ));
    }

    output.push('\n');
    output.push_str(&format_summary_pretty(summary));
    output
}

/// Format totals and the per-category breakdown.
pub fn format_summary_pretty(summary: &BudgetSummary) -> String {
    let totals = &summary.totals;
    let balance = if totals.current_balance >= 0.0 {
        money(totals.current_balance).green()
    } else {
        money(totals.current_balance).red()
    };

    let mut lines = vec![
        "Summary".bold().to_string(),
        "─".repeat(40),
        format!("Total income:    {}", money(totals.total_income).green()),
        format!("Total expenses:  {}", money(totals.total_expenses).red()),
        format!("Current balance: {balance}"),
        format!("Entries:         {}", totals.total_entries),
    ];

    if !summary.by_category.is_empty() {
        lines.push(String::new());
        lines.push("By category".bold().to_string());
        for total in &summary.by_category {
            lines.push(format!("  {:<16} {:>12}", total.category, money(total.amount)));
        }
    }

    lines.join("\n")
}

/// Format the statistics cards.
pub fn format_stats_pretty(cards: &[StatCard]) -> String {
    let mut lines = vec!["Study Statistics".bold().to_string(), "─".repeat(40)];
    for card in cards {
        lines.push(format!("{:<16} {}", format!("{}:", card.label), card.value.cyan()));
    }
    lines.join("\n")
}

/// Format recorded sessions.
pub fn format_sessions_pretty(sessions: &[StudySession]) -> String {
    if sessions.is_empty() {
        return format!("{} (0)\n  No sessions yet", "Today's Sessions".bold());
    }

    let mut output = format!("{} ({})\n", "Today's Sessions".bold(), sessions.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for session in sessions {
        let kind = match session.kind {
            SessionKind::Focus => "focus".red(),
            SessionKind::Break => "break".green(),
        };
        let time = session
            .created_at
            .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
            .unwrap_or_default();
        output.push_str(&format!(
            "{:>5}  {:<6} {:>3} min  {}\n",
            time.dimmed(),
            kind,
            session.duration,
            session.study_task
        ));
    }

    output
}

/// Format the user's profile.
pub fn format_user_pretty(user: &User) -> String {
    let mut lines = vec![user.name.as_deref().unwrap_or("(no name)").bold().to_string()];
    lines.push(format!("  {}: {}", "Email".dimmed(), user.email));
    if let Some(phone) = &user.phone {
        lines.push(format!("  {}: {phone}", "Phone".dimmed()));
    }
    if !user.id.is_empty() {
        lines.push(format!("  {}: {}", "ID".dimmed(), user.id));
    }
    lines.join("\n")
}

/// Format generated questions, optionally with their answers.
pub fn format_questions_pretty(questions: &[Question], show_answers: bool) -> String {
    if questions.is_empty() {
        return "No questions generated".to_string();
    }

    let mut lines = Vec::new();
    for (i, question) in questions.iter().enumerate() {
        lines.push(format_question_pretty(i, question));
        if show_answers {
            lines.push(format!("   {} {}", "Answer:".dimmed(), question.answer().green()));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Format one question with its options.
pub fn format_question_pretty(index: usize, question: &Question) -> String {
    let mut lines = vec![format!(
        "{} {}  {}",
        format!("Q{}.", index + 1).bold(),
        question.text(),
        format!("[{}]", question.difficulty()).dimmed()
    )];
    match question {
        Question::Mcq { options, .. } => {
            for (j, option) in options.iter().enumerate() {
                lines.push(format!("   {}) {option}", option_letter(j)));
            }
        }
        Question::TrueFalse { .. } => lines.push("   true / false".dimmed().to_string()),
        Question::Short { .. } => {}
    }
    lines.join("\n")
}

/// `a`, `b`, ... for option positions.
#[must_use]
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'a' + i))
}

fn short_id(id: &str) -> &str {
    id.get(id.len().saturating_sub(6)..).unwrap_or(id)
}
