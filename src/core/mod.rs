//! Shared utilities for studykit.
//!
//! Date handling and form validation used by several command families.

pub mod dates;
pub mod validation;

pub use dates::{days_until, deadline_date, parse_date_input, today};
pub use validation::{
    check_login, check_time_range, is_email, parse_iso_date, parse_time, resolve_color,
    FieldErrors, CLASS_COLORS, MIN_PASSWORD_LEN,
};
