//! Weekly class schedule: form checks and ordering.

use std::cmp::Ordering;

use crate::api::{ClassSchedule, ClassScheduleUpdate, NewClassSchedule, Weekday};
use crate::core::{check_time_range, parse_time, resolve_color, FieldErrors, CLASS_COLORS};
use crate::error::StudyError;

/// Fields of the class form, as typed.
#[derive(Debug, Clone, Default)]
pub struct ClassForm {
    pub subject: String,
    pub instructor: String,
    pub day: Option<Weekday>,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub color: Option<String>,
}

impl ClassForm {
    /// Check the form and build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::Validation`] listing every invalid field.
    pub fn into_request(self) -> Result<NewClassSchedule, StudyError> {
        let mut errors = FieldErrors::new();
        errors.require("subject", "Subject", &self.subject);
        errors.require("instructor", "Instructor", &self.instructor);
        check_time_range(&mut errors, &self.start_time, &self.end_time);
        let color = check_color(&mut errors, self.color.as_deref());
        errors.into_result()?;

        Ok(NewClassSchedule {
            subject: self.subject.trim().to_string(),
            instructor: self.instructor.trim().to_string(),
            day: self.day,
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            location: self
                .location
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
            color,
        })
    }
}

/// Check an edit against the stored class.
///
/// A new start or end time is compared with whichever end of the range the
/// edit leaves alone.
///
/// # Errors
///
/// Returns [`StudyError::Validation`] if a set field is invalid or nothing
/// would change.
pub fn check_update(
    mut update: ClassScheduleUpdate,
    current: &ClassSchedule,
) -> Result<ClassScheduleUpdate, StudyError> {
    if update.is_empty() {
        return Err(StudyError::invalid("class", "Nothing to update"));
    }
    let mut errors = FieldErrors::new();
    if let Some(subject) = &update.subject {
        errors.require("subject", "Subject", subject);
    }
    if let Some(instructor) = &update.instructor {
        errors.require("instructor", "Instructor", instructor);
    }
    if update.start_time.is_some() || update.end_time.is_some() {
        let start = update.start_time.as_deref().unwrap_or(&current.start_time);
        let end = update.end_time.as_deref().unwrap_or(&current.end_time);
        check_time_range(&mut errors, start, end);
    }
    if let Some(raw) = update.color.take() {
        update.color = check_color(&mut errors, Some(&raw));
    }
    errors.into_result()?;
    Ok(update)
}

fn check_color(errors: &mut FieldErrors, raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|c| !c.is_empty())?;
    let color = resolve_color(raw);
    if color.is_none() {
        errors.add(
            "color",
            format!("Color must be one of {}", CLASS_COLORS.join(", ")),
        );
    }
    color.map(String::from)
}

/// Order by weekday (undated classes last), then start time.
pub fn sort_classes(classes: &mut [ClassSchedule]) {
    classes.sort_by(|a, b| {
        let by_day = match (a.day, b.day) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_day.then_with(|| parse_time(&a.start_time).cmp(&parse_time(&b.start_time)))
    });
}

/// Classes meeting on `day`.
#[must_use]
pub fn classes_on(classes: &[ClassSchedule], day: Weekday) -> Vec<ClassSchedule> {
    classes
        .iter()
        .filter(|c| c.day == Some(day))
        .cloned()
        .collect()
}
