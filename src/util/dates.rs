//! Calendar date helpers for the dashboard.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Today's date in the browser's local timezone as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    iso_date(now.date())
}

pub fn iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

/// Format a backend date (`YYYY-MM-DD`, optionally followed by a time) as
/// `Mar 20, 2024`. Unparseable input is returned unchanged.
pub fn format_service_date(raw: &str) -> String {
    let day = raw.get(..10).unwrap_or(raw);
    Date::parse(day, format_description!("[year]-[month]-[day]"))
        .ok()
        .and_then(|date| date.format(format_description!("[month repr:short] [day], [year]")).ok())
        .unwrap_or_else(|| raw.to_owned())
}
