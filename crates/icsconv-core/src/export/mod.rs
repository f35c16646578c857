//! Export formatters for the aggregated event table.
//!
//! This module provides four independent projections of a
//! [`ConversionResult`](crate::convert::ConversionResult):
//! - **Combined CSV**: one row per event across all files
//! - **Per-file archive**: a ZIP with one CSV per source file
//! - **Workbook**: an XLSX spreadsheet with one sheet per source file
//! - **JSON**: a flat event list or a per-file mapping
//!
//! All four are pure functions of the aggregated result; no parsing happens
//! here. The tabular projections share one column set and ordering, so the
//! combined CSV, the archive CSVs, and the workbook sheets stay
//! interchangeable.

use thiserror::Error;

use crate::event::EventRecord;

mod archive;
mod csv;
mod json;
mod workbook;

#[cfg(test)]
mod golden_tests;

pub use self::archive::per_file_archive;
pub use self::csv::combined_csv;
pub use self::json::{CombinedEvent, combined_json, per_file_json};
pub use self::workbook::workbook;

/// Column names shared by every tabular projection, in output order.
///
/// The combined CSV prepends a `file` column; the per-file CSVs and the
/// workbook sheets use exactly this set, since the file is implicit there.
pub const EVENT_COLUMNS: [&str; 7] = [
    "uid",
    "summary",
    "start",
    "end",
    "location",
    "description",
    "rrule",
];

/// An error from encoding one of the export formats.
///
/// These only surface for genuine encoding or buffer failures in the
/// underlying writers; no event data shape produces one.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] ::csv::Error),

    /// ZIP archive writing failed.
    #[error("failed to build archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Workbook writing failed.
    #[error("failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization failed.
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An in-memory buffer write failed.
    #[error("buffer write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One tabular output row projected from an [`EventRecord`].
///
/// `start`/`end` carry the normalized ISO values, not the raw property
/// text. The `file` column of the combined CSV is supplied by the caller
/// alongside this row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub uid: String,
    pub summary: String,
    pub start: String,
    pub end: String,
    pub location: String,
    pub description: String,
    pub rrule: String,
}

impl ExportRow {
    /// Projects an event into its tabular row.
    pub fn from_event(event: &EventRecord) -> Self {
        Self {
            uid: event.uid.clone(),
            summary: event.summary.clone(),
            start: event.dtstart_iso.clone(),
            end: event.dtend_iso.clone(),
            location: event.location.clone(),
            description: event.description.clone(),
            rrule: event.rrule.clone(),
        }
    }

    /// The row values in [`EVENT_COLUMNS`] order.
    pub(crate) fn fields(&self) -> [&str; 7] {
        [
            &self.uid,
            &self.summary,
            &self.start,
            &self.end,
            &self.location,
            &self.description,
            &self.rrule,
        ]
    }
}
