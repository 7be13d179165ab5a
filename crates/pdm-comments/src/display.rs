//! Timestamp handling for comment rows.

use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::Utc;

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Parse a backend timestamp into UTC.
///
/// Accepts RFC 3339 (`2025-01-05T15:07:00.123+00:00`), the Postgres text form
/// with a space separator and short offset (`2025-01-05 15:07:00+00`), and
/// offset-less timestamps, which are taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Format a backend timestamp as `Jan 5, 2025, 03:07 PM` (UTC).
///
/// Unparseable input is returned as-is.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(timestamp) => timestamp.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}
