//! Error types for studykit.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::features::pomodoro::TimerError;

/// Errors that can occur while talking to the study backend or running commands.
#[derive(Debug, Error)]
pub enum StudyError {
    /// Configuration could not be loaded, saved, or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON payload could not be encoded or decoded.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The HTTP request never produced a response.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// No token is stored, or the backend rejected it.
    #[error("Not logged in: {0}")]
    Unauthorized(String),

    /// The requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Form input failed validation.
    #[error("Invalid input: {}", format_field_errors(.0))]
    Validation(BTreeMap<String, Vec<String>>),

    /// The pomodoro timer rejected an operation.
    #[error(transparent)]
    Timer(#[from] TimerError),
}

impl StudyError {
    /// Build a validation error for a single field.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), vec![message.into()]);
        Self::Validation(errors)
    }

    /// Whether retrying later could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

fn format_field_errors(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let mut errors = BTreeMap::new();
        errors.insert("title".to_string(), vec!["Title is required".to_string()]);
        errors.insert(
            "deadline".to_string(),
            vec!["Invalid date".to_string(), "Deadline is required".to_string()],
        );
        let err = StudyError::Validation(errors);

        assert_eq!(
            err.to_string(),
            "Invalid input: deadline: Invalid date, Deadline is required; title: Title is required"
        );
    }

    #[test]
    fn test_is_transient() {
        let server = StudyError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        let client = StudyError::Api {
            status: 400,
            message: "bad".to_string(),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert!(!StudyError::NotFound("x".to_string()).is_transient());
    }
}
