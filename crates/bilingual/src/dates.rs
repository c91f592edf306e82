//! Date parsing and French date formatting

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// French month names, January first
pub const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Parse the date shapes found in civil registry records
///
/// Accepts ISO dates (`1994-05-14`), RFC 3339 timestamps, bare timestamps
/// without an offset, and French day-first dates (`14/05/1994`). Returns
/// `None` for anything else.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(stamp.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%d/%m/%Y") {
        return Some(date);
    }
    None
}

/// Format a date in the short French form (e.g., "14/05/1994")
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
}

/// Format a date in the long French form (e.g., "14 mai 1994")
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        FRENCH_MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Format a raw record value as a short date, or empty when unparsable
///
/// Registry records carry dates in whatever shape the upstream system stored,
/// so an unreadable date degrades to an empty cell rather than an error.
pub fn format_date_value(value: &str) -> String {
    parse_date(value).map(format_short_date).unwrap_or_default()
}
