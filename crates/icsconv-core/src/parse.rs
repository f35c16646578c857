//! ICS/iCalendar parsing.
//!
//! This module implements the small subset of RFC 5545 the converter needs,
//! without a calendar-grammar library:
//! - [`unfold`]: collapse folded physical lines into logical lines
//! - [`tokenize_properties`]: split an event block into a [`PropertyMap`]
//! - [`extract_events`]: project `BEGIN:VEVENT` blocks into [`EventRecord`]s
//!
//! Parsing is deliberately lenient by default: a property line without a
//! colon is dropped, and a `BEGIN:VEVENT` without a matching `END:VEVENT`
//! runs to the end of the text. [`ParsePolicy::Strict`] turns both
//! deviations into errors instead.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::event::EventRecord;

/// Regex matching a line fold: a terminator followed by leading whitespace.
static FOLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]+").expect("Invalid fold regex"));

/// Regex locating event block starts, case-insensitively.
static VEVENT_BEGIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)BEGIN:VEVENT").expect("Invalid VEVENT regex"));

/// End-of-block marker. Matched literally, not case-insensitively.
const VEVENT_END: &str = "END:VEVENT";

/// Mapping from uppercased, parameter-stripped property name to the ordered
/// values encountered for it. A property that never occurs has no key.
pub type PropertyMap = HashMap<String, Vec<String>>;

/// How to treat recoverable deviations in the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Drop malformed property lines, let unterminated blocks run to the
    /// end of the text, and decode input bytes best-effort.
    #[default]
    Lenient,
    /// Reject malformed property lines, unterminated blocks, and input
    /// that is not valid UTF-8.
    Strict,
}

/// Errors raised under [`ParsePolicy::Strict`].
///
/// Under the lenient policy the same conditions are logged and recovered
/// from, and parsing never fails.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A non-blank property line had no `:` separator.
    #[error("property line has no colon separator: {line:?}")]
    PropertyMissingColon {
        /// The offending logical line.
        line: String,
    },

    /// A `BEGIN:VEVENT` marker had no matching `END:VEVENT`.
    #[error("BEGIN:VEVENT without matching END:VEVENT")]
    UnterminatedEvent,

    /// The input bytes were not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Removes RFC-style line folds from `text`.
///
/// A fold is a line terminator (`\r\n` or `\n`) immediately followed by one
/// or more space/tab characters; the terminator and the leading whitespace
/// are deleted, joining the continuation onto the previous line with no
/// separator. No other whitespace is altered, and input without folds is
/// returned unchanged (borrowed). Idempotent.
pub fn unfold(text: &str) -> Cow<'_, str> {
    FOLD_REGEX.replace_all(text, "")
}

/// Tokenizes the unfolded text of one event block into a [`PropertyMap`].
///
/// Each line is split once at the first colon; the left side is stripped of
/// any `;PARAM=value` segments and uppercased to form the property name, and
/// the right side is trimmed to form the value. Because only the first colon
/// separates, a value containing colons (a URL, say) is preserved whole.
/// Blank lines are skipped. A line with no colon is dropped under
/// [`ParsePolicy::Lenient`] and rejected under [`ParsePolicy::Strict`].
pub fn tokenize_properties(block: &str, policy: ParsePolicy) -> Result<PropertyMap, ParseError> {
    let mut properties = PropertyMap::new();

    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((left, value)) = line.split_once(':') else {
            match policy {
                ParsePolicy::Lenient => {
                    debug!(line, "dropping property line without a colon");
                    continue;
                }
                ParsePolicy::Strict => {
                    return Err(ParseError::PropertyMissingColon {
                        line: line.to_string(),
                    });
                }
            }
        };

        let name = left.split(';').next().unwrap_or(left).to_uppercase();
        properties
            .entry(name)
            .or_default()
            .push(value.trim().to_string());
    }

    Ok(properties)
}

/// Extracts all VEVENT blocks from the full text of one file.
///
/// The text is unfolded, then split at every case-insensitive
/// `BEGIN:VEVENT`; each block runs to the next literal `END:VEVENT`, or to
/// the end of the text when the end marker is missing (lenient) /
/// [`ParseError::UnterminatedEvent`] (strict). Text before the first marker
/// and non-VEVENT components are ignored. Records come back in source
/// order.
pub fn extract_events(text: &str, policy: ParsePolicy) -> Result<Vec<EventRecord>, ParseError> {
    let unfolded = unfold(text);

    let mut blocks = VEVENT_BEGIN_REGEX.split(&unfolded);
    // Everything before the first BEGIN:VEVENT is calendar preamble.
    blocks.next();

    let mut events = Vec::new();
    for block in blocks {
        let body = match block.split_once(VEVENT_END) {
            Some((body, _)) => body,
            None => match policy {
                ParsePolicy::Lenient => {
                    debug!("VEVENT block without END marker, reading to end of text");
                    block
                }
                ParsePolicy::Strict => return Err(ParseError::UnterminatedEvent),
            },
        };

        let properties = tokenize_properties(body, policy)?;
        events.push(project_event(&properties));
    }

    Ok(events)
}

/// Builds an [`EventRecord`] from a tokenized block.
///
/// Each named field takes the first value of its property, except
/// `ATTENDEE`, which concatenates every occurrence with `;`. Absent
/// properties yield empty strings. The `_iso` fields are left empty here;
/// the normalizer fills them in.
fn project_event(properties: &PropertyMap) -> EventRecord {
    EventRecord {
        uid: first_value(properties, "UID"),
        summary: first_value(properties, "SUMMARY"),
        description: first_value(properties, "DESCRIPTION"),
        location: first_value(properties, "LOCATION"),
        dtstart: first_value(properties, "DTSTART"),
        dtend: first_value(properties, "DTEND"),
        rrule: first_value(properties, "RRULE"),
        organizer: first_value(properties, "ORGANIZER"),
        attendee: properties
            .get("ATTENDEE")
            .map(|values| values.join(";"))
            .unwrap_or_default(),
        dtstart_iso: String::new(),
        dtend_iso: String::new(),
    }
}

/// Returns the first value recorded for `name`, or an empty string.
fn first_value(properties: &PropertyMap, name: &str) -> String {
    properties
        .get(name)
        .and_then(|values| values.first())
        .cloned()
        .unwrap_or_default()
}
