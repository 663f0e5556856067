//! Date helper functions

use chrono::{Local, NaiveDate};

/// Format an ISO date (`YYYY-MM-DD`) as a short label
///
/// Anything that is not a plain calendar date is returned unchanged.
///
/// # Examples
/// ```ignore
/// date_label("2024-01-05") // -> "Jan 05, 2024"
/// date_label("someday")    // -> "someday"
/// ```
pub fn date_label(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%b %d, %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Today's date in ISO format, for new post front-matter
pub fn today_iso() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
