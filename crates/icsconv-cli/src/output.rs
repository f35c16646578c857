//! Input reading, export writing, and the run summary.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use icsconv_core::{
    ConversionResult, FileError, SourceFile, combined_csv, combined_json, per_file_archive,
    per_file_json, workbook,
};

use crate::cli::Cli;
use crate::error::CliResult;

/// Reads the input files into named buffers, truncating to `max_files`.
///
/// A path that cannot be read becomes a [`FileError`] instead of aborting;
/// the remaining inputs are still read. File-count limiting happens here,
/// before any parsing: only the first `max_files` paths are kept, with a
/// warning naming how many were dropped.
pub fn read_inputs(paths: &[PathBuf], max_files: usize) -> (Vec<SourceFile>, Vec<FileError>) {
    let mut paths = paths;
    if paths.len() > max_files {
        warn!(
            given = paths.len(),
            keeping = max_files,
            "too many input files, processing only the first ones"
        );
        paths = &paths[..max_files];
    }

    let mut files = Vec::new();
    let mut errors = Vec::new();
    for path in paths {
        let name = display_name(path);
        match fs::read(path) {
            Ok(bytes) => {
                debug!(file = %name, bytes = bytes.len(), "read input file");
                files.push(SourceFile::new(name, bytes));
            }
            Err(error) => {
                warn!(file = %name, error = %error, "failed to read input file");
                errors.push(FileError {
                    file: name,
                    message: error.to_string(),
                });
            }
        }
    }
    (files, errors)
}

/// The name a file is reported and exported under: its final path
/// component.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Prints the run summary: counts first, then any per-file failures.
pub fn print_summary(result: &ConversionResult) {
    println!(
        "Files processed: {}  -  Total events: {}",
        result.files.len(),
        result.total_events()
    );
    if !result.errors.is_empty() {
        println!("Some files could not be processed:");
        for error in &result.errors {
            println!("  - {}: {}", error.file, error.message);
        }
    }
}

/// Writes every requested export to its path.
///
/// The combined CSV is skipped with a notice when the run produced zero
/// events; the other exports are valid (if empty) either way and are always
/// written when requested.
pub fn write_exports(cli: &Cli, result: &ConversionResult) -> CliResult<()> {
    if let Some(ref path) = cli.csv {
        match combined_csv(result)? {
            Some(bytes) => fs::write(path, bytes)?,
            None => println!("No events found; skipping combined CSV."),
        }
    }
    if let Some(ref path) = cli.zip {
        fs::write(path, per_file_archive(result)?)?;
    }
    if let Some(ref path) = cli.xlsx {
        fs::write(path, workbook(result)?)?;
    }
    if let Some(ref path) = cli.json {
        let bytes = if cli.json_per_file {
            per_file_json(result)?
        } else {
            combined_json(result)?
        };
        fs::write(path, bytes)?;
    }
    Ok(())
}
