use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use studykit::api::{ApiClient, RegisterRequest};
use studykit::cli::args::{Cli, Commands, TimerArgs};
use studykit::cli::commands;
use studykit::config::{Config, Credentials, Paths};
use studykit::error::StudyError;
use studykit::features::pomodoro::{SessionKind, SessionStore};
use studykit::tui::{self, TimerOptions};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StudyError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, matches!(cli.command, Commands::Timer(_)));

    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::completions(shell));
        return Ok(());
    }

    let paths = Paths::new()?;
    let mut config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();
    if let Some(url) = cli.api_url.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url;
    }
    let format = cli.output.unwrap_or(config.general.default_output);

    let token = match cli.token.filter(|t| !t.trim().is_empty()) {
        Some(token) => Some(token),
        None => Credentials::load_from_path(&paths.credentials_file)?.map(|c| c.token),
    };
    let client = ApiClient::new(&config.api, token)?;

    let output = match cli.command {
        Commands::Login { email, password } => {
            commands::login(&client, &paths, &email, &password, format).await?
        }
        Commands::Register {
            name,
            email,
            phone,
            password,
        } => {
            let request = RegisterRequest {
                name,
                email,
                phone,
                password,
            };
            commands::register(&client, request, format).await?
        }
        Commands::Logout => commands::logout(&paths, format)?,
        Commands::Whoami => commands::whoami(&client, format).await?,
        Commands::Timer(args) => {
            run_timer(client, &config, args).await?;
            String::new()
        }
        Commands::Session(args) => commands::session(&client, args.command, format).await?,
        Commands::Subjects => commands::subjects(&client, format).await?,
        Commands::Task(args) => commands::task(&client, args.command, format).await?,
        Commands::Schedule(args) => commands::schedule(&client, args.command, format).await?,
        Commands::Budget(args) => commands::budget(&client, args.command, format).await?,
        Commands::Exam(args) => commands::exam(&client, args.command, format).await?,
        Commands::Dashboard => commands::dashboard(&client, format).await?,
        Commands::Completions { shell } => commands::completions(shell),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

async fn run_timer(client: ApiClient, config: &Config, args: TimerArgs) -> Result<(), StudyError> {
    if !client.has_token() {
        return Err(StudyError::Unauthorized(
            "run 'studykit login' first or set STUDYKIT_TOKEN".to_string(),
        ));
    }

    let options = TimerOptions {
        presets: config.timer.presets.clone(),
        minutes: args.minutes.unwrap_or(config.timer.default_minutes),
        kind: if args.start_with_break {
            SessionKind::Break
        } else {
            SessionKind::Focus
        },
        subject: args.subject,
        fallback_subject: config.timer.fallback_subject.clone(),
    };

    let client = Arc::new(client);
    let store: Arc<dyn SessionStore> = client.clone();
    tui::run(store, client.as_ref(), options).await
}

/// Logs go to stderr. The timer view draws on the terminal, so it logs
/// nothing unless `RUST_LOG` asks for it.
fn init_tracing(verbose: bool, interactive: bool) {
    let default = if interactive {
        "off"
    } else if verbose {
        "studykit=debug"
    } else {
        "studykit=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
