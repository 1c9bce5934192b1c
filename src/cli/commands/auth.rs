//! Account commands: login, register, logout, whoami.

use colored::Colorize;
use serde_json::json;
use tracing::info;

use crate::api::{ApiClient, LoginRequest, RegisterRequest};
use crate::cli::args::OutputFormat;
use crate::config::{Config, Credentials, Paths};
use crate::core::{check_login, FieldErrors};
use crate::error::StudyError;
use crate::output::{format_user_pretty, to_json};

/// Execute login command
///
/// Checks the form, exchanges the credentials for a token, and stores it.
/// The first login also writes a default `config.yaml`.
///
/// # Errors
///
/// Returns [`StudyError::Validation`] for a malformed form, or an API error
/// if the backend rejects the credentials.
pub async fn login(
    client: &ApiClient,
    paths: &Paths,
    email: &str,
    password: &str,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let mut errors = FieldErrors::new();
    check_login(&mut errors, email, password);
    errors.into_result()?;

    let email = email.trim().to_string();
    let token = client
        .login(&LoginRequest {
            email: email.clone(),
            password: password.to_string(),
        })
        .await?;

    paths.ensure_dirs()?;
    if !paths.config_file.exists() {
        Config::default().save_to_path(&paths.config_file)?;
    }
    Credentials {
        token,
        email: Some(email.clone()),
    }
    .save_to_path(&paths.credentials_file)?;
    info!(%email, "logged in");

    match format {
        OutputFormat::Json => to_json(&json!({ "loggedIn": true, "email": email })),
        OutputFormat::Pretty => Ok(format!("{} Logged in as {}", "✓".green(), email.bold())),
    }
}

/// Execute register command
///
/// # Errors
///
/// Returns [`StudyError::Validation`] for a malformed form, or an API error
/// if the backend rejects the registration.
pub async fn register(
    client: &ApiClient,
    request: RegisterRequest,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let mut errors = FieldErrors::new();
    errors.require("name", "Name", &request.name);
    check_login(&mut errors, &request.email, &request.password);
    errors.require("phone", "Phone", &request.phone);
    errors.into_result()?;

    let request = RegisterRequest {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        phone: request.phone.trim().to_string(),
        password: request.password,
    };
    let user = client.register(&request).await?;

    match format {
        OutputFormat::Json => to_json(&user),
        OutputFormat::Pretty => Ok(format!(
            "{} Registered {}. Run 'studykit login' to sign in.",
            "✓".green(),
            user.email.bold()
        )),
    }
}

/// Execute logout command
///
/// # Errors
///
/// Returns an error if the credentials file cannot be removed.
pub fn logout(paths: &Paths, format: OutputFormat) -> Result<String, StudyError> {
    let removed = Credentials::remove_at(&paths.credentials_file)?;
    match format {
        OutputFormat::Json => to_json(&json!({ "loggedOut": removed })),
        OutputFormat::Pretty if removed => Ok("Logged out".to_string()),
        OutputFormat::Pretty => Ok("Not logged in".dimmed().to_string()),
    }
}

/// Execute whoami command
///
/// # Errors
///
/// Returns [`StudyError::Unauthorized`] without a valid token.
pub async fn whoami(client: &ApiClient, format: OutputFormat) -> Result<String, StudyError> {
    let user = client.profile().await?;
    match format {
        OutputFormat::Json => to_json(&user),
        OutputFormat::Pretty => Ok(format_user_pretty(&user)),
    }
}
