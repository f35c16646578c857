//! Structured object export: events as indented JSON.
//!
//! Two shapes are offered, matching the two grouping modes of the tool:
//! a flat list of event objects tagged with their source file, or a map
//! from file name to that file's event list.

use serde::{Deserialize, Serialize};

use crate::convert::ConversionResult;
use crate::event::EventRecord;
use crate::export::ExportError;

/// One event in the combined JSON export: the full uppercase field set of
/// [`EventRecord`] plus a lowercase `file` key naming its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedEvent {
    /// The event fields, flattened into the object.
    #[serde(flatten)]
    pub event: EventRecord,
    /// The source file the event came from.
    pub file: String,
}

/// Encodes all events as one flat, indented JSON array in aggregation
/// order. Zero events yield the empty array, which is still valid output.
pub fn combined_json(result: &ConversionResult) -> Result<Vec<u8>, ExportError> {
    let payload: Vec<CombinedEvent> = result
        .rows()
        .map(|(file, event)| CombinedEvent {
            event: event.clone(),
            file: file.to_string(),
        })
        .collect();
    Ok(serde_json::to_vec_pretty(&payload)?)
}

/// Encodes the aggregation as an indented JSON object mapping each file
/// name to its event list. Keys come out name-ordered; the grouping, not
/// the key order, is the contract.
pub fn per_file_json(result: &ConversionResult) -> Result<Vec<u8>, ExportError> {
    let mut payload = serde_json::Map::new();
    for file in &result.files {
        payload.insert(file.name.clone(), serde_json::to_value(&file.events)?);
    }
    Ok(serde_json::to_vec_pretty(&serde_json::Value::Object(
        payload,
    ))?)
}
