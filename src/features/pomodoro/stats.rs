//! Aggregate statistics display.
//!
//! The backend sends each duration twice: as a number of minutes and as a
//! preformatted string. Strings are shown verbatim; numbers are formatted
//! locally when the string is missing.

use serde::Serialize;

use super::timer::format_minutes;
use crate::api::SessionMetadata;

/// Shown when a duration is unknown.
pub const ZERO_DURATION: &str = "0h 0m";

/// One labelled statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

/// The six cards of the statistics panel, in display order.
#[must_use]
pub fn stat_cards(meta: &SessionMetadata) -> Vec<StatCard> {
    vec![
        StatCard {
            label: "Total Sessions",
            value: meta.total_sessions.unwrap_or(0).to_string(),
        },
        StatCard {
            label: "Total Focus",
            value: duration_value(
                meta.total_focus_time_formatted.as_deref(),
                meta.total_focus_time,
            ),
        },
        StatCard {
            label: "Total Break",
            value: duration_value(
                meta.total_break_time_formatted.as_deref(),
                meta.total_break_time,
            ),
        },
        StatCard {
            label: "Today",
            value: duration_value(
                meta.today_focus_time_formatted.as_deref(),
                meta.today_focus_time,
            ),
        },
        StatCard {
            label: "This Week",
            value: duration_value(
                meta.week_focus_time_formatted.as_deref(),
                meta.week_focus_time,
            ),
        },
        StatCard {
            label: "This Month",
            value: duration_value(
                meta.month_focus_time_formatted.as_deref(),
                meta.month_focus_time,
            ),
        },
    ]
}

/// Placeholder cards used when the aggregate read fails.
#[must_use]
pub fn placeholder_cards() -> Vec<StatCard> {
    stat_cards(&SessionMetadata::default())
}

/// Today's focus time, as shown on the dashboard.
#[must_use]
pub fn today_focus(meta: &SessionMetadata) -> String {
    duration_value(
        meta.today_focus_time_formatted.as_deref(),
        meta.today_focus_time,
    )
}

fn duration_value(formatted: Option<&str>, minutes: Option<f64>) -> String {
    if let Some(text) = formatted.map(str::trim).filter(|t| !t.is_empty()) {
        return text.to_string();
    }
    minutes.map_or_else(|| ZERO_DURATION.to_string(), |m| format_minutes(whole_minutes(m)))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_minutes(minutes: f64) -> u64 {
    if minutes.is_finite() && minutes > 0.0 {
        minutes.round() as u64
    } else {
        0
    }
}
