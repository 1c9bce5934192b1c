//! Form validation shared by the command families.
//!
//! Validators collect every problem into [`FieldErrors`] instead of stopping
//! at the first one, so a single run reports everything wrong with a form.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::StudyError;

/// Colors a class may be tagged with.
pub const CLASS_COLORS: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#6B7280",
];

/// Minimum password length accepted by login and registration.
pub const MIN_PASSWORD_LEN: usize = 6;

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap_or_else(|e| panic!("Invalid time regex: {e}"))
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+$").unwrap_or_else(|e| panic!("Invalid email regex: {e}"))
});

/// Field name to messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// An empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem with `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record `"<label> is required"` when `value` is blank.
    pub fn require(&mut self, field: &str, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, format!("{label} is required"));
            return false;
        }
        true
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for one field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok` when empty, otherwise [`StudyError::Validation`].
    ///
    /// # Errors
    ///
    /// Returns the collected errors.
    pub fn into_result(self) -> Result<(), StudyError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(StudyError::Validation(self.0))
        }
    }
}

/// Parse a 24-hour `HH:MM` time.
#[must_use]
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let caps = TIME_PATTERN.captures(input.trim())?;
    let hour = caps[1].parse().ok()?;
    let minute = caps[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse a `YYYY-MM-DD` date.
#[must_use]
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Whether `input` looks like an email address.
#[must_use]
pub fn is_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input.trim())
}

/// Resolve a palette color by hex value (any case) or position (1-based).
#[must_use]
pub fn resolve_color(input: &str) -> Option<&'static str> {
    let input = input.trim();
    if let Ok(index) = input.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| CLASS_COLORS.get(i)).copied();
    }
    CLASS_COLORS
        .iter()
        .find(|c| c.eq_ignore_ascii_case(input))
        .copied()
}

/// Check login credentials.
pub fn check_login(errors: &mut FieldErrors, email: &str, password: &str) {
    if errors.require("email", "Email", email) && !is_email(email) {
        errors.add("email", "Email must be a valid address");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
}

/// Check a start/end pair of `HH:MM` times; end must come after start.
pub fn check_time_range(errors: &mut FieldErrors, start: &str, end: &str) {
    let start_time = check_time(errors, "startTime", "Start time", start);
    let end_time = check_time(errors, "endTime", "End time", end);
    if let (Some(start_time), Some(end_time)) = (start_time, end_time) {
        if end_time <= start_time {
            errors.add("endTime", "End time must be after start time");
        }
    }
}

fn check_time(errors: &mut FieldErrors, field: &str, label: &str, value: &str) -> Option<NaiveTime> {
    if !errors.require(field, label, value) {
        return None;
    }
    let parsed = parse_time(value);
    if parsed.is_none() {
        errors.add(field, format!("{label} must be HH:MM"));
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("09:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_time(" 23:59 "), NaiveTime::from_hms_opt(23, 59, 0));
        assert_eq!(parse_time("24:00"), None);
        assert_eq!(parse_time("9:05"), None);
        assert_eq!(parse_time("09:60"), None);
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2025-02-28"), NaiveDate::from_ymd_opt(2025, 2, 28));
        assert_eq!(parse_iso_date("2025-02-30"), None);
        assert_eq!(parse_iso_date("tomorrow"), None);
    }

    #[test]
    fn test_login_rules() {
        let mut errors = FieldErrors::new();
        check_login(&mut errors, "not-an-email", "12345");
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());

        let mut errors = FieldErrors::new();
        check_login(&mut errors, "ana@uni.edu", "secret");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_time_range_end_after_start() {
        let mut errors = FieldErrors::new();
        check_time_range(&mut errors, "10:00", "09:30");
        assert_eq!(
            errors.get("endTime"),
            Some(&["End time must be after start time".to_string()][..])
        );

        let mut errors = FieldErrors::new();
        check_time_range(&mut errors, "", "9am");
        assert_eq!(errors.get("startTime").unwrap()[0], "Start time is required");
        assert_eq!(errors.get("endTime").unwrap()[0], "End time must be HH:MM");
    }

    #[test]
    fn test_resolve_color() {
        assert_eq!(resolve_color("#3b82f6"), Some("#3B82F6"));
        assert_eq!(resolve_color("2"), Some("#10B981"));
        assert_eq!(resolve_color("0"), None);
        assert_eq!(resolve_color("#000000"), None);
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());
        let mut errors = FieldErrors::new();
        errors.require("title", "Title", "  ");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: title: Title is required");
    }
}
