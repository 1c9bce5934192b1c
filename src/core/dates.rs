//! Date input and deadline arithmetic.
//!
//! Forms accept either `YYYY-MM-DD` or a few relative words (`today`,
//! `tomorrow`, `friday`, `next monday`, `in 3 days`). The backend only ever
//! sees the ISO form.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use super::validation::parse_iso_date;

/// Latest year a relative date may land in.
const MAX_YEAR: i32 = 9999;

/// Today's local date.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date typed by the user, relative to `today`.
#[must_use]
pub fn parse_date_input(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix("in ") {
        let mut parts = rest.split_whitespace();
        let amount: i64 = parts.next()?.parse().ok()?;
        let days = match parts.next()?.trim_end_matches('s') {
            "day" => amount,
            "week" => amount.checked_mul(7)?,
            _ => return None,
        };
        let date = today.checked_add_signed(Duration::try_days(days)?)?;
        return (date.year() <= MAX_YEAR).then_some(date);
    }

    let (skip_week, day) = input
        .strip_prefix("next ")
        .map_or((false, input.as_str()), |rest| (true, rest));
    if let Some(target) = weekday_from_name(day) {
        let mut ahead = (i64::from(target.num_days_from_monday())
            - i64::from(today.weekday().num_days_from_monday()))
        .rem_euclid(7);
        if ahead == 0 || skip_week {
            ahead += 7;
        }
        return Some(today + Duration::days(ahead));
    }

    parse_iso_date(&input)
}

/// The calendar date of a stored deadline.
///
/// Deadlines come back either as `YYYY-MM-DD` or as a full ISO timestamp;
/// only the date part counts.
#[must_use]
pub fn deadline_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    parse_iso_date(date_part)
}

/// Whole days from `today` until `date`; negative when it has passed.
#[must_use]
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    Some(match name {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    })
}
