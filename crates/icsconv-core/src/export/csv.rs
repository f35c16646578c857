//! Combined CSV export: every event across all files in one table.

use std::iter;

use crate::convert::ConversionResult;
use crate::export::{EVENT_COLUMNS, ExportError, ExportRow};

/// Encodes the combined event table as CSV with a header row.
///
/// The column order is `file` followed by [`EVENT_COLUMNS`]. Returns
/// `Ok(None)` when the run produced zero events, so callers can tell "no
/// data" apart from an empty-but-valid table.
pub fn combined_csv(result: &ConversionResult) -> Result<Option<Vec<u8>>, ExportError> {
    if result.is_empty() {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(iter::once("file").chain(EVENT_COLUMNS))?;
        for (file, event) in result.rows() {
            let row = ExportRow::from_event(event);
            writer.write_record(iter::once(file).chain(row.fields()))?;
        }
        writer.flush()?;
    }
    Ok(Some(buffer))
}
