use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::api::{BudgetType, Difficulty, Priority, QuestionType, Weekday};
use crate::features::planner::TaskFilter;
use crate::features::pomodoro::SessionKind;

#[derive(Parser)]
#[command(name = "studykit")]
#[command(about = "Study planner, class schedule, budget, exams, and a pomodoro timer")]
#[command(long_about = "studykit - a terminal client for your study backend

Plan study tasks, keep your weekly class schedule, track a student budget,
generate practice exams, and run a pomodoro timer that records every
completed interval to the server.

QUICK START:
  studykit login --email you@uni.edu --password ******
  studykit dashboard             Today at a glance
  studykit timer                 Interactive pomodoro timer
  studykit task add \"Lab report\" --subject Chemistry --deadline friday

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  studykit <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output suitable for scripting. Defaults to
    /// `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log requests and timer events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides `api.base_url`)
    #[arg(long, env = "STUDYKIT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token (overrides the one saved by `login`)
    #[arg(long, env = "STUDYKIT_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and save the access token
    ///
    /// The token is stored in ~/.studykit/credentials.yaml and sent with
    /// every later request.
    ///
    /// # Examples
    ///
    ///   studykit login --email ana@uni.edu --password hunter22
    Login {
        /// Account email
        #[arg(long, short = 'e')]
        email: String,

        /// Account password (at least 6 characters)
        #[arg(long, short = 'p', env = "STUDYKIT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        /// Full name
        #[arg(long, short = 'n')]
        name: String,

        /// Email address
        #[arg(long, short = 'e')]
        email: String,

        /// Phone number
        #[arg(long)]
        phone: String,

        /// Password (at least 6 characters)
        #[arg(long, short = 'p', env = "STUDYKIT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the saved access token
    Logout,

    /// Show the logged-in user's profile
    Whoami,

    /// Interactive pomodoro timer
    ///
    /// Opens a full-screen timer. Completed intervals are recorded to the
    /// server and the statistics refresh afterwards.
    ///
    /// # Keys
    ///
    ///   space      Start / pause
    ///   r          Reset
    ///   f / b      Focus / break
    ///   1-9        Select preset
    ///   [ / ]      Previous / next subject
    ///   s          Refresh statistics
    ///   q, Esc     Quit
    #[command(alias = "t")]
    Timer(TimerArgs),

    /// Study session statistics and history
    ///
    /// # Subcommands
    ///
    ///   stats     Aggregate focus and break time
    ///   history   Today's recorded sessions
    ///   log       Record a session by hand
    Session(SessionArgs),

    /// List subjects from your study tasks
    Subjects,

    /// Manage study tasks (list, show, add, edit, done, delete)
    ///
    /// # Examples
    ///
    ///   studykit task list --filter pending
    ///   studykit task add "Essay draft" --subject History --deadline 2025-05-01
    ///   studykit task done 65f0c0ffee
    Task(TaskArgs),

    /// Manage the weekly class schedule
    ///
    /// # Examples
    ///
    ///   studykit schedule today
    ///   studykit schedule add --subject Physics --instructor "Dr. Ahmed" \
    ///       --day monday --start 09:00 --end 10:30
    Schedule(ScheduleArgs),

    /// Track income and expenses
    ///
    /// # Examples
    ///
    ///   studykit budget add expense --category Food --amount 7.50
    ///   studykit budget summary
    Budget(BudgetArgs),

    /// Question bank, generated exams, and quizzes
    ///
    /// # Examples
    ///
    ///   studykit exam generate --difficulty medium --type mixed --count 10
    ///   studykit exam quiz --count 5
    Exam(ExamArgs),

    /// Today's classes, pending tasks, balance, and focus time
    #[command(alias = "d")]
    Dashboard,

    /// Generate shell completions
    ///
    /// Example: studykit completions zsh > ~/.zfunc/_studykit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the interactive timer.
#[derive(Args, Default)]
pub struct TimerArgs {
    /// Subject to record sessions under (defaults to the first study task)
    #[arg(long, short = 's')]
    pub subject: Option<String>,

    /// Initial preset in minutes
    #[arg(long, short = 'm')]
    pub minutes: Option<u32>,

    /// Start with a break instead of a focus interval
    #[arg(long = "break", short = 'b')]
    pub start_with_break: bool,
}

/// Arguments for study sessions.
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

/// Study session subcommands.
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Aggregate statistics
    Stats,

    /// Sessions recorded today
    History,

    /// Record a session without running the timer
    Log {
        /// Subject studied
        #[arg(long, short = 's')]
        subject: String,

        /// Length in minutes
        #[arg(long, short = 'm')]
        minutes: u32,

        /// Session kind (focus, break)
        #[arg(long, short = 'k', default_value = "focus", value_parser = parse_kind)]
        kind: SessionKind,
    },
}

/// Arguments for study tasks.
#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

/// Study task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// List study tasks
    #[command(alias = "ls")]
    List {
        /// Which tasks to show
        #[arg(long, short = 'f', value_enum, default_value = "all")]
        filter: TaskFilter,
    },

    /// Show task details by ID
    Show {
        /// Task ID
        id: String,
    },

    /// Add a study task
    Add(AddTaskArgs),

    /// Change fields of a task
    Edit(EditTaskArgs),

    /// Mark a task as completed
    Done {
        /// Task ID
        id: String,

        /// Mark as pending again
        #[arg(long)]
        undo: bool,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task ID
        id: String,
    },
}

/// Arguments for adding a study task.
#[derive(Args)]
pub struct AddTaskArgs {
    /// Task title
    pub title: String,

    /// Subject the task belongs to
    #[arg(long, short = 's')]
    pub subject: String,

    /// Deadline (YYYY-MM-DD, today, tomorrow, friday, in 3 days)
    #[arg(long, short = 'd')]
    pub deadline: String,

    /// Priority
    #[arg(long, short = 'p', value_enum, default_value = "medium")]
    pub priority: Priority,

    /// Estimated hours of work
    #[arg(long, short = 'e')]
    pub hours: Option<f64>,

    /// Longer description
    #[arg(long, short = 'n')]
    pub description: Option<String>,
}

/// Arguments for editing a study task.
#[derive(Args)]
pub struct EditTaskArgs {
    /// Task ID
    pub id: String,

    /// New title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// New subject
    #[arg(long, short = 's')]
    pub subject: Option<String>,

    /// New deadline
    #[arg(long, short = 'd')]
    pub deadline: Option<String>,

    /// New priority
    #[arg(long, short = 'p', value_enum)]
    pub priority: Option<Priority>,

    /// New estimate in hours
    #[arg(long, short = 'e')]
    pub hours: Option<f64>,

    /// New description
    #[arg(long, short = 'n')]
    pub description: Option<String>,
}

/// Arguments for the class schedule.
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    pub command: ScheduleCommands,
}

/// Class schedule subcommands.
#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// List classes, sorted by day and start time
    #[command(alias = "ls")]
    List {
        /// Only classes on this day
        #[arg(long, value_enum)]
        day: Option<Weekday>,
    },

    /// Classes meeting today
    Today,

    /// Show class details by ID
    Show {
        /// Class ID
        id: String,
    },

    /// Add a class
    Add(AddClassArgs),

    /// Change fields of a class
    Edit(EditClassArgs),

    /// Delete a class
    #[command(alias = "rm")]
    Delete {
        /// Class ID
        id: String,
    },
}

/// Arguments for adding a class.
#[derive(Args)]
pub struct AddClassArgs {
    /// Subject name
    #[arg(long, short = 's')]
    pub subject: String,

    /// Instructor name
    #[arg(long, short = 'i')]
    pub instructor: String,

    /// Day of the week
    #[arg(long, short = 'd', value_enum)]
    pub day: Option<Weekday>,

    /// Start time (HH:MM, 24-hour)
    #[arg(long)]
    pub start: String,

    /// End time (HH:MM, 24-hour)
    #[arg(long)]
    pub end: String,

    /// Room or building
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Palette color (hex value or position 1-8)
    #[arg(long, short = 'c')]
    pub color: Option<String>,
}

/// Arguments for editing a class.
#[derive(Args)]
pub struct EditClassArgs {
    /// Class ID
    pub id: String,

    /// New subject
    #[arg(long, short = 's')]
    pub subject: Option<String>,

    /// New instructor
    #[arg(long, short = 'i')]
    pub instructor: Option<String>,

    /// New day
    #[arg(long, short = 'd', value_enum)]
    pub day: Option<Weekday>,

    /// New start time
    #[arg(long)]
    pub start: Option<String>,

    /// New end time
    #[arg(long)]
    pub end: Option<String>,

    /// New location
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// New palette color
    #[arg(long, short = 'c')]
    pub color: Option<String>,
}

/// Arguments for the budget tracker.
#[derive(Args)]
pub struct BudgetArgs {
    #[command(subcommand)]
    pub command: BudgetCommands,
}

/// Budget subcommands.
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List entries with totals
    #[command(alias = "ls")]
    List,

    /// Add an income or expense entry
    Add(AddEntryArgs),

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry ID
        id: String,
    },

    /// Totals and per-category sums
    Summary,

    /// Categories accepted for each entry type
    Categories,
}

/// Arguments for adding a budget entry.
#[derive(Args)]
pub struct AddEntryArgs {
    /// Entry type
    #[arg(value_enum, ignore_case = true)]
    pub budget_type: BudgetType,

    /// Category (see `studykit budget categories`)
    #[arg(long, short = 'c')]
    pub category: String,

    /// Amount, greater than zero
    #[arg(long, short = 'a', allow_negative_numbers = true)]
    pub amount: f64,

    /// What it was for
    #[arg(long, short = 'n')]
    pub description: Option<String>,

    /// Date of the entry
    #[arg(long, default_value = "today")]
    pub date: String,
}

/// Arguments for the exam generator.
#[derive(Args)]
pub struct ExamArgs {
    #[command(subcommand)]
    pub command: ExamCommands,
}

/// Exam subcommands.
#[derive(Subcommand)]
pub enum ExamCommands {
    /// Add a question to the bank
    ///
    /// Examples:
    ///   studykit exam add --type mcq "Largest planet?" \
    ///       --option Jupiter --option Mars --answer Jupiter
    ///   studykit exam add --type truefalse "The sun is a star." --answer true
    Add(AddQuestionArgs),

    /// Generate an exam and print it
    Generate {
        #[command(flatten)]
        settings: ExamSettings,

        /// Print the answer key under each question
        #[arg(long)]
        answers: bool,
    },

    /// Generate an exam and answer it interactively
    Quiz {
        #[command(flatten)]
        settings: ExamSettings,
    },
}

/// Exam generation settings.
#[derive(Args, Clone, Copy)]
pub struct ExamSettings {
    /// Difficulty
    #[arg(long, short = 'd', value_enum, default_value = "easy")]
    pub difficulty: Difficulty,

    /// Question type
    #[arg(long = "type", short = 't', value_enum, default_value = "mixed")]
    pub question_type: QuestionType,

    /// Number of questions (1-30)
    #[arg(long, short = 'n', default_value = "10")]
    pub count: u32,
}

/// Arguments for adding a question.
#[derive(Args)]
pub struct AddQuestionArgs {
    /// Question text
    pub question: String,

    /// Question type
    #[arg(long = "type", short = 't', value_enum, default_value = "mcq")]
    pub question_type: QuestionType,

    /// Difficulty
    #[arg(long, short = 'd', value_enum, default_value = "easy")]
    pub difficulty: Difficulty,

    /// Answer option (repeat for each; multiple choice only)
    #[arg(long = "option")]
    pub options: Vec<String>,

    /// Correct answer
    #[arg(long, short = 'a')]
    pub answer: String,
}

fn parse_kind(s: &str) -> Result<SessionKind, String> {
    SessionKind::parse(s).ok_or_else(|| format!("unknown session kind '{s}' (use focus or break)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_output_default_is_unset() {
        let cli = Cli::try_parse_from(["studykit", "dashboard"]).unwrap();
        assert!(cli.output.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_output_format_json() {
        let cli = Cli::try_parse_from(["studykit", "--output", "json", "subjects"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_output_format_short_after_subcommand() {
        let cli = Cli::try_parse_from(["studykit", "task", "list", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_login() {
        let cli = Cli::try_parse_from([
            "studykit", "login", "--email", "ana@uni.edu", "--password", "secret1",
        ])
        .unwrap();
        match cli.command {
            Commands::Login { email, password } => {
                assert_eq!(email, "ana@uni.edu");
                assert_eq!(password, "secret1");
            }
            _ => panic!("Expected Login command"),
        }
    }

    #[test]
    fn test_cli_timer_alias_and_flags() {
        let cli = Cli::try_parse_from(["studykit", "t", "-m", "5", "--break"]).unwrap();
        match cli.command {
            Commands::Timer(args) => {
                assert_eq!(args.minutes, Some(5));
                assert!(args.start_with_break);
                assert!(args.subject.is_none());
            }
            _ => panic!("Expected Timer command"),
        }
    }

    #[test]
    fn test_cli_session_log_kind() {
        let cli = Cli::try_parse_from([
            "studykit", "session", "log", "-s", "Math", "-m", "25", "-k", "break",
        ])
        .unwrap();
        match cli.command {
            Commands::Session(SessionArgs {
                command: SessionCommands::Log { subject, minutes, kind },
            }) => {
                assert_eq!(subject, "Math");
                assert_eq!(minutes, 25);
                assert_eq!(kind, SessionKind::Break);
            }
            _ => panic!("Expected Session Log command"),
        }

        assert!(Cli::try_parse_from(["studykit", "session", "log", "-s", "M", "-m", "5", "-k", "nap"]).is_err());
    }

    #[test]
    fn test_cli_task_list_filter() {
        let cli = Cli::try_parse_from(["studykit", "task", "ls", "--filter", "pending"]).unwrap();
        match cli.command {
            Commands::Task(TaskArgs {
                command: TaskCommands::List { filter },
            }) => assert_eq!(filter, TaskFilter::Pending),
            _ => panic!("Expected Task List command"),
        }
    }

    #[test]
    fn test_cli_task_add() {
        let cli = Cli::try_parse_from([
            "studykit", "task", "add", "Essay", "-s", "History", "-d", "friday", "-p", "high",
            "-e", "2.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Task(TaskArgs {
                command: TaskCommands::Add(args),
            }) => {
                assert_eq!(args.title, "Essay");
                assert_eq!(args.priority, Priority::High);
                assert_eq!(args.hours, Some(2.5));
            }
            _ => panic!("Expected Task Add command"),
        }
    }

    #[test]
    fn test_cli_schedule_add() {
        let cli = Cli::try_parse_from([
            "studykit", "schedule", "add", "-s", "Physics", "-i", "Dr. Ahmed", "-d", "monday",
            "--start", "09:00", "--end", "10:30",
        ])
        .unwrap();
        match cli.command {
            Commands::Schedule(ScheduleArgs {
                command: ScheduleCommands::Add(args),
            }) => {
                assert_eq!(args.day, Some(Weekday::Monday));
                assert_eq!(args.start, "09:00");
            }
            _ => panic!("Expected Schedule Add command"),
        }
    }

    #[test]
    fn test_cli_budget_add() {
        let cli = Cli::try_parse_from([
            "studykit", "budget", "add", "expense", "-c", "Food", "-a", "7.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Budget(BudgetArgs {
                command: BudgetCommands::Add(args),
            }) => {
                assert_eq!(args.budget_type, BudgetType::Expense);
                assert_eq!(args.date, "today");
            }
            _ => panic!("Expected Budget Add command"),
        }
    }

    #[test]
    fn test_cli_exam_generate_defaults() {
        let cli = Cli::try_parse_from(["studykit", "exam", "generate"]).unwrap();
        match cli.command {
            Commands::Exam(ExamArgs {
                command: ExamCommands::Generate { settings, answers },
            }) => {
                assert_eq!(settings.difficulty, Difficulty::Easy);
                assert_eq!(settings.question_type, QuestionType::Mixed);
                assert_eq!(settings.count, 10);
                assert!(!answers);
            }
            _ => panic!("Expected Exam Generate command"),
        }
    }

    #[test]
    fn test_cli_exam_add_options() {
        let cli = Cli::try_parse_from([
            "studykit", "exam", "add", "2+2?", "--option", "3", "--option", "4", "-a", "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Exam(ExamArgs {
                command: ExamCommands::Add(args),
            }) => {
                assert_eq!(args.options, vec!["3".to_string(), "4".to_string()]);
                assert_eq!(args.question_type, QuestionType::Mcq);
            }
            _ => panic!("Expected Exam Add command"),
        }
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["studykit", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Bash }));
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
