//! The conversion run: named byte buffers in, aggregated events out.
//!
//! A run is a pure function of a [`ConversionRequest`]: every input file is
//! decoded, parsed, and normalized independently, and one file's failure
//! never aborts the rest. Failures are collected as [`FileError`] values on
//! the [`ConversionResult`] rather than raised.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::event::{EventRecord, ParsedFile};
use crate::normalize::normalize_datetime;
use crate::parse::{ParseError, ParsePolicy, extract_events};

/// A named input buffer, expected to hold UTF-8 iCalendar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// The file name the caller knows this input by.
    pub name: String,
    /// The raw bytes of the file.
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Creates a source file from a name and its bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Options for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Parse policy applied to every file in the run.
    pub policy: ParsePolicy,
    /// Accepted for interface compatibility; recurrence expansion is not
    /// implemented and RRULE values are exported raw.
    pub expand_rrule: bool,
}

/// Everything one conversion run needs: the inputs and the options.
///
/// There is no other state; two runs over equal requests produce equal
/// results.
#[derive(Debug, Clone, Default)]
pub struct ConversionRequest {
    /// Input files, processed in order.
    pub files: Vec<SourceFile>,
    /// Run options.
    pub options: ConversionOptions,
}

/// A per-file failure, recorded instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    /// The input file the failure belongs to.
    pub file: String,
    /// A human-readable description of what went wrong.
    pub message: String,
}

/// The outcome of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Successfully parsed files, in input order. A file that parsed but
    /// contained no events is still present, with an empty event list.
    pub files: Vec<ParsedFile>,
    /// Files that failed to decode or parse, in input order.
    pub errors: Vec<FileError>,
}

impl ConversionResult {
    /// Total number of events across all parsed files.
    pub fn total_events(&self) -> usize {
        self.files.iter().map(|file| file.events.len()).sum()
    }

    /// Returns true when no parsed file contributed any event.
    pub fn is_empty(&self) -> bool {
        self.total_events() == 0
    }

    /// Iterates every (file name, event) pair across all parsed files, in
    /// input and source order. This is the row set the exports project.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &EventRecord)> {
        self.files
            .iter()
            .flat_map(|file| file.events.iter().map(move |event| (file.name.as_str(), event)))
    }
}

/// Runs one conversion over the given request.
///
/// Each file is handled independently: a decode or parse failure is
/// recorded as a [`FileError`] and contributes zero events, while the
/// remaining files are still processed. Never fails as a whole.
pub fn convert(request: &ConversionRequest) -> ConversionResult {
    if request.options.expand_rrule {
        debug!("RRULE expansion requested but not implemented; rules are exported raw");
    }

    let mut result = ConversionResult::default();
    for file in &request.files {
        match parse_source(file, request.options.policy) {
            Ok(parsed) => {
                debug!(file = %parsed.name, events = parsed.events.len(), "parsed input file");
                result.files.push(parsed);
            }
            Err(error) => {
                warn!(file = %file.name, error = %error, "failed to parse input file");
                result.errors.push(FileError {
                    file: file.name.clone(),
                    message: error.to_string(),
                });
            }
        }
    }
    result
}

/// Decodes, parses, and normalizes one input file.
fn parse_source(file: &SourceFile, policy: ParsePolicy) -> Result<ParsedFile, ParseError> {
    let text = match policy {
        ParsePolicy::Lenient => String::from_utf8_lossy(&file.bytes).into_owned(),
        ParsePolicy::Strict => std::str::from_utf8(&file.bytes)?.to_string(),
    };

    let mut events = extract_events(&text, policy)?;
    for event in &mut events {
        event.dtstart_iso = normalize_datetime(&event.dtstart);
        event.dtend_iso = normalize_datetime(&event.dtend);
    }

    Ok(ParsedFile::new(file.name.clone(), events))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ics(body: &str) -> String {
        format!("BEGIN:VCALENDAR\nVERSION:2.0\n{body}END:VCALENDAR\n")
    }

    fn one_event_ics() -> String {
        ics("BEGIN:VEVENT\n\
             UID:one@example.com\n\
             SUMMARY:Standup\n\
             DTSTART:20250917T153000Z\n\
             DTEND:20250917\n\
             END:VEVENT\n")
    }

    fn request_of(files: Vec<SourceFile>) -> ConversionRequest {
        ConversionRequest {
            files,
            options: ConversionOptions::default(),
        }
    }

    #[test]
    fn normalizes_start_and_end_in_place() {
        let request = request_of(vec![SourceFile::new("cal.ics", one_event_ics())]);
        let result = convert(&request);

        assert_eq!(result.total_events(), 1);
        let event = &result.files[0].events[0];
        assert_eq!(event.dtstart, "20250917T153000Z");
        assert_eq!(event.dtstart_iso, "2025-09-17T15:30:00");
        assert_eq!(event.dtend_iso, "2025-09-17T00:00:00");
    }

    #[test]
    fn one_bad_file_does_not_abort_the_run() {
        let invalid = SourceFile::new("bad.ics", vec![0xff, 0xfe, 0x00]);
        let good = SourceFile::new("good.ics", one_event_ics());
        let request = ConversionRequest {
            files: vec![invalid, good],
            options: ConversionOptions {
                policy: ParsePolicy::Strict,
                ..Default::default()
            },
        };

        let result = convert(&request);

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].file, "bad.ics");
        assert!(result.errors[0].message.contains("UTF-8"));
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].name, "good.ics");
        assert_eq!(result.total_events(), 1);
    }

    #[test]
    fn lenient_policy_decodes_invalid_utf8_best_effort() {
        let mut bytes = b"BEGIN:VEVENT\nSUMMARY:Caf".to_vec();
        bytes.push(0xe9); // latin-1 'e acute', invalid UTF-8
        bytes.extend_from_slice(b"\nEND:VEVENT\n");
        let request = request_of(vec![SourceFile::new("latin.ics", bytes)]);

        let result = convert(&request);

        assert!(result.errors.is_empty());
        assert_eq!(result.total_events(), 1);
        assert!(result.files[0].events[0].summary.starts_with("Caf"));
    }

    #[test]
    fn event_less_file_still_appears_in_results() {
        let request = request_of(vec![SourceFile::new(
            "empty.ics",
            ics("").into_bytes(),
        )]);

        let result = convert(&request);

        assert!(result.errors.is_empty());
        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].events.is_empty());
        assert!(result.is_empty());
    }

    #[test]
    fn rows_flatten_files_in_order() {
        let request = request_of(vec![
            SourceFile::new("a.ics", one_event_ics()),
            SourceFile::new("b.ics", one_event_ics()),
        ]);

        let result = convert(&request);
        let rows: Vec<_> = result.rows().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "a.ics");
        assert_eq!(rows[1].0, "b.ics");
    }

    #[test]
    fn expand_rrule_flag_is_accepted_but_inert() {
        let body = "BEGIN:VEVENT\nRRULE:FREQ=WEEKLY\nEND:VEVENT\n";
        let request = ConversionRequest {
            files: vec![SourceFile::new("recurring.ics", ics(body))],
            options: ConversionOptions {
                expand_rrule: true,
                ..Default::default()
            },
        };

        let result = convert(&request);

        assert_eq!(result.total_events(), 1);
        assert_eq!(result.files[0].events[0].rrule, "FREQ=WEEKLY");
    }
}
