//! Event types for parsed calendar data.
//!
//! This module provides the core data model of a conversion run:
//! - [`EventRecord`]: one VEVENT projected onto a fixed field set
//! - [`ParsedFile`]: a source file name with its events, in source order

use serde::{Deserialize, Serialize};

/// One calendar event extracted from a VEVENT block.
///
/// Every field is a plain string. A property that is absent from the source
/// block yields an empty string, never an absent field, so that downstream
/// exports always see the full column set. The two `_iso` fields are filled
/// in by the normalizer after extraction; all other fields carry the raw
/// property value as written in the file.
///
/// Serialized field names are uppercase (`UID`, `DTSTART_ISO`, ...) to match
/// the object form emitted by the JSON export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct EventRecord {
    /// Unique identifier (`UID`).
    pub uid: String,
    /// Event title (`SUMMARY`).
    pub summary: String,
    /// Long-form description (`DESCRIPTION`).
    pub description: String,
    /// Location text (`LOCATION`).
    pub location: String,
    /// Raw start date/time (`DTSTART`), as written in the source.
    pub dtstart: String,
    /// Raw end date/time (`DTEND`), as written in the source.
    pub dtend: String,
    /// Raw recurrence rule (`RRULE`). Expansion is out of scope.
    pub rrule: String,
    /// Organizer value (`ORGANIZER`).
    pub organizer: String,
    /// All `ATTENDEE` values, joined with `;` when the property repeats.
    pub attendee: String,
    /// Normalized start, ISO-8601 without offset, or the raw value if
    /// normalization did not recognize it.
    pub dtstart_iso: String,
    /// Normalized end, same rules as `dtstart_iso`.
    pub dtend_iso: String,
}

/// A source file name together with the events parsed from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFile {
    /// The name of the input file, as given by the caller.
    pub name: String,
    /// Events in order of appearance in the source text.
    pub events: Vec<EventRecord>,
}

impl ParsedFile {
    /// Creates a parsed file entry.
    pub fn new(name: impl Into<String>, events: Vec<EventRecord>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }
}
