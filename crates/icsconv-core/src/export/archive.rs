//! Per-file CSV archive export: one CSV entry per source file, zipped.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::convert::ConversionResult;
use crate::event::EventRecord;
use crate::export::{EVENT_COLUMNS, ExportError, ExportRow};

/// Builds a deflate-compressed ZIP holding one CSV per parsed file.
///
/// Entry names are the sanitized source file name with `.csv` appended.
/// Every parsed file gets an entry, including files that contributed zero
/// events (their CSV holds only the header row), so the archive always
/// mirrors the input set.
pub fn per_file_archive(result: &ConversionResult) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in &result.files {
        let entry_name = format!("{}.csv", sanitize_entry_name(&file.name));
        zip.start_file(entry_name, options)?;
        let table = event_table(&file.events)?;
        zip.write_all(&table)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Encodes one file's events as CSV without the `file` column.
fn event_table(events: &[EventRecord]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(EVENT_COLUMNS)?;
        for event in events {
            let row = ExportRow::from_event(event);
            writer.write_record(row.fields())?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

/// Replaces every character outside `[0-9A-Za-z._-]` with `_`.
fn sanitize_entry_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
