//! Date/time normalization for raw ICS values.
//!
//! Raw `DTSTART`/`DTEND` values arrive in several encodings. This module
//! converts the recognized ones into a canonical ISO-8601 string and passes
//! everything else through untouched.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

/// The canonical output shape, e.g. `2025-09-17T15:30:00`.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date/time patterns attempted in order, first match wins.
const DATETIME_FORMATS: [&str; 3] = ["%Y%m%dT%H%M%S", "%Y%m%dT%H%M", "%Y-%m-%dT%H:%M:%S"];

/// Normalizes a raw ICS date/time value into an ISO-8601 string.
///
/// Accepted encodings, tried in order: basic date-time with seconds
/// (`20250917T153000`), basic date-time without seconds (`20250917T1530`),
/// extended date-time (`2025-09-17T15:30:00`), and date-only (`20250917`,
/// which becomes midnight). A `TZID=...:` prefix is discarded up to the
/// first colon, and one trailing `Z` is stripped.
///
/// The output carries no offset annotation: the stripped `Z`/`TZID`
/// information is dropped, not re-attached. Downstream consumers depend on
/// this exact string shape, so re-encoding the zone would be a behavior
/// change, not a fix.
///
/// Never fails: an empty input yields an empty output, and a value matching
/// no pattern is returned exactly as it came in, with none of the prefix or
/// `Z` stripping applied.
pub fn normalize_datetime(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut value = raw;
    // A zone parameter that survived into the value, e.g.
    // "TZID=Asia/Kolkata:20250917T153000".
    if value.to_uppercase().starts_with("TZID=") {
        if let Some((_, rest)) = value.split_once(':') {
            value = rest;
        }
    }
    let value = value.strip_suffix('Z').unwrap_or(value);

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return datetime.format(ISO_FORMAT).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y%m%d") {
        let midnight = date.and_hms_opt(0, 0, 0).expect("valid time");
        return midnight.format(ISO_FORMAT).to_string();
    }

    debug!(value = raw, "date/time matched no known pattern, passing through");
    raw.to_string()
}
