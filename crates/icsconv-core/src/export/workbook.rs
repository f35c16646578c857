//! Workbook export: an XLSX spreadsheet with one sheet per source file.

use std::collections::HashSet;

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::convert::ConversionResult;
use crate::event::EventRecord;
use crate::export::{EVENT_COLUMNS, ExportError, ExportRow};

/// The host format caps sheet names at 31 characters.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Builds an XLSX workbook with one sheet per parsed file.
///
/// Sheet names are the source file name with every character outside
/// `[0-9A-Za-z_]` replaced by `_`, truncated to the 31-character limit.
/// Names that are empty, already taken (sheet names are case-insensitive),
/// or otherwise rejected by the format fall back to a generated unique
/// `sheet_N` name, so the export never aborts over naming. A run with zero
/// parsed files still yields a valid workbook with a single header-only
/// sheet.
pub fn workbook(result: &ConversionResult) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let mut used_names: HashSet<String> = HashSet::new();

    for (index, file) in result.files.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        let candidate = sanitize_sheet_name(&file.name);
        let fresh = !candidate.is_empty() && used_names.insert(candidate.to_lowercase());
        if !fresh || sheet.set_name(&candidate).is_err() {
            let fallback = fallback_name(index, &mut used_names);
            sheet.set_name(&fallback)?;
        }
        write_sheet(sheet, &file.events)?;
    }

    if result.files.is_empty() {
        let sheet = workbook.add_worksheet();
        write_sheet(sheet, &[])?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Writes the header row and one row per event.
fn write_sheet(sheet: &mut Worksheet, events: &[EventRecord]) -> Result<(), ExportError> {
    for (col, column) in EVENT_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *column)?;
    }
    for (row, event) in events.iter().enumerate() {
        let export_row = ExportRow::from_event(event);
        for (col, value) in export_row.fields().iter().enumerate() {
            sheet.write_string((row + 1) as u32, col as u16, *value)?;
        }
    }
    Ok(())
}

/// Replaces every character outside `[0-9A-Za-z_]` with `_` and truncates
/// to the sheet-name limit.
fn sanitize_sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .take(MAX_SHEET_NAME_LEN)
        .collect()
}

/// Picks the first unused `sheet_N` name, counting from the sheet's
/// position.
fn fallback_name(index: usize, used_names: &mut HashSet<String>) -> String {
    let mut n = index + 1;
    loop {
        let candidate = format!("sheet_{n}");
        if used_names.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ConversionRequest, SourceFile, convert};
    use crate::event::ParsedFile;

    fn one_event_file(name: &str) -> SourceFile {
        SourceFile::new(
            name,
            "BEGIN:VEVENT\nUID:w@example.com\nSUMMARY:Weekly\nEND:VEVENT\n",
        )
    }

    #[test]
    fn produces_a_workbook_for_each_file() {
        let result = convert(&ConversionRequest {
            files: vec![one_event_file("alpha.ics"), one_event_file("beta.ics")],
            options: Default::default(),
        });

        let bytes = workbook(&result).unwrap();
        // XLSX is a ZIP container; check the magic instead of re-reading the
        // whole sheet structure.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn sheet_names_are_sanitized_and_truncated() {
        assert_eq!(sanitize_sheet_name("team meeting.ics"), "team_meeting_ics");
        assert_eq!(
            sanitize_sheet_name("a-very-long-calendar-export-file-name.ics"),
            "a_very_long_calendar_export_fil"
        );
        assert_eq!(sanitize_sheet_name("a-very-long-calendar-export-file-name.ics").len(), 31);
    }

    #[test]
    fn colliding_names_fall_back_to_generated_ones() {
        // Both names sanitize to "a_.ics" -> "a__ics"; the second sheet must
        // survive under a generated name.
        let result = ConversionResult {
            files: vec![
                ParsedFile::new("a?.ics", Vec::new()),
                ParsedFile::new("a!.ics", Vec::new()),
            ],
            errors: Vec::new(),
        };

        assert!(workbook(&result).is_ok());
    }

    #[test]
    fn empty_run_still_saves() {
        assert!(workbook(&ConversionResult::default()).is_ok());
    }
}
