//! Core types: ICS parsing, date/time normalization, export formatters

pub mod convert;
pub mod event;
pub mod export;
pub mod normalize;
pub mod parse;
pub mod tracing;

pub use convert::{
    ConversionOptions, ConversionRequest, ConversionResult, FileError, SourceFile, convert,
};
pub use event::{EventRecord, ParsedFile};
pub use export::{
    CombinedEvent, EVENT_COLUMNS, ExportError, ExportRow, combined_csv, combined_json,
    per_file_archive, per_file_json, workbook,
};
pub use normalize::normalize_datetime;
pub use parse::{
    ParseError, ParsePolicy, PropertyMap, extract_events, tokenize_properties, unfold,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
