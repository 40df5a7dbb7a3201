//! Shared utilities for CLI commands

use chrono::{Local, NaiveDateTime};

/// Current local wall-clock time
///
/// Archive names are rendered in local time, so cutoffs are computed in it too.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Format an instant as `YYYY-MM-DD`
pub fn format_date(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d").to_string()
}
