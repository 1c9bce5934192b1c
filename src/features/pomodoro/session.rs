//! Study session kinds and completed intervals.

use serde::{Deserialize, Serialize};

/// Subject used when the task catalog has nothing to offer.
pub const FALLBACK_SUBJECT: &str = "Pomodoro Session";

/// Kind of pomodoro interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Concentrated study.
    #[default]
    Focus,
    /// Rest between focus intervals.
    Break,
}

impl SessionKind {
    /// The kind that follows this one once an interval completes.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::Focus,
        }
    }

    /// Wire name, as sent in the `type` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Break => "break",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::Break => "Break",
        }
    }

    /// Parse a kind from user input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "focus" | "f" | "work" => Some(Self::Focus),
            "break" | "b" | "rest" => Some(Self::Break),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// An interval whose countdown reached zero while running.
///
/// This is what gets submitted to the session store. The completion
/// timestamp is assigned by the store on receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedInterval {
    /// Subject selected at the moment of completion.
    pub subject: String,
    /// Configured length of the interval, in minutes.
    pub duration_minutes: u32,
    /// Kind active on the last tick.
    pub kind: SessionKind,
}

/// Pick the default subject from a catalog listing.
#[must_use]
pub fn default_subject(subjects: &[String], fallback: &str) -> String {
    subjects
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map_or_else(|| fallback.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_next_alternates() {
        assert_eq!(SessionKind::Focus.next(), SessionKind::Break);
        assert_eq!(SessionKind::Break.next(), SessionKind::Focus);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(SessionKind::parse("focus"), Some(SessionKind::Focus));
        assert_eq!(SessionKind::parse(" Break "), Some(SessionKind::Break));
        assert_eq!(SessionKind::parse("b"), Some(SessionKind::Break));
        assert_eq!(SessionKind::parse("nap"), None);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SessionKind::Break).unwrap(), "\"break\"");
    }

    #[test]
    fn test_default_subject() {
        let subjects = vec!["Math".to_string(), "Physics".to_string()];
        assert_eq!(default_subject(&subjects, FALLBACK_SUBJECT), "Math");
        assert_eq!(default_subject(&[], FALLBACK_SUBJECT), "Pomodoro Session");
        assert_eq!(
            default_subject(&["  ".to_string(), "Chem".to_string()], FALLBACK_SUBJECT),
            "Chem"
        );
    }
}
