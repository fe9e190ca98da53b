// src/scrape/times.rs
//
// The site publishes mint times as "HH:MM UTC" and dates as "Month Dayth"
// labels. Everything here is best-effort: unparseable input yields None
// and the caller degrades the field, never the row.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use log::debug;

const TIME_FORMAT: &str = "%H:%M utc";
const CLOCK_12H: &str = "%I:%M %p";

/// Check a raw time string against the site's "HH:MM UTC" form and
/// reformat it to a 12-hour clock: `"09:00 UTC"` gives `"09:00 AM"`.
pub fn validate_utc(raw: &str) -> Option<String> {
    let lower = raw.trim().to_lowercase();
    if !lower.contains("utc") {
        debug!("Invalid UTC time string encountered: {raw}");
    }

    match NaiveTime::parse_from_str(&lower, TIME_FORMAT) {
        Ok(t) => Some(t.format(CLOCK_12H).to_string()),
        Err(e) => {
            debug!("Unable to parse UTC time string: {e}");
            None
        }
    }
}

/// Convert a "HH:MM UTC" string to US Eastern on the given calendar date,
/// 12-hour clock. The date decides whether daylight saving applies.
pub fn to_eastern(raw: &str, date: NaiveDate) -> Option<String> {
    let lower = raw.trim().to_lowercase();
    let time = match NaiveTime::parse_from_str(&lower, TIME_FORMAT) {
        Ok(t) => t,
        Err(e) => {
            debug!("Unable to parse UTC time string: {e}");
            return None;
        }
    };

    let utc = Utc.from_utc_datetime(&date.and_time(time));
    let eastern = utc.with_timezone(&New_York);
    Some(eastern.format(CLOCK_12H).to_string())
}

/// Parse a "January 25th"-style label into an `MM/DD` key. The trailing
/// ordinal suffix is dropped; the given year anchors the parse (it only
/// matters for Feb 29 labels).
pub fn parse_date_label(label: &str, year: i32) -> Option<String> {
    let stripped = label
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let candidate = format!("{} {}", stripped.trim_end(), year);

    match NaiveDate::parse_from_str(&candidate, "%B %d %Y") {
        Ok(d) => Some(format!("{:02}/{:02}", d.month(), d.day())),
        Err(e) => {
            debug!("Invalid date format: {label:?} ({e})");
            None
        }
    }
}

/* ---------- tests ---------- */
