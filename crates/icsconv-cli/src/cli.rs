//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;
use icsconv_core::{ConversionOptions, ParsePolicy};

/// icsconv - Convert .ics calendars to CSV, Excel, JSON and zipped CSVs
#[derive(Debug, Parser)]
#[command(name = "icsconv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input .ics files
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Maximum number of input files processed per run
    #[arg(long, default_value = "20")]
    pub max_files: usize,

    // --- Parse options ---
    /// Expand simple RRULE occurrences (accepted for compatibility; rules
    /// are exported raw)
    #[arg(long)]
    pub expand_rrule: bool,

    /// Reject malformed property lines and unterminated events instead of
    /// skipping them
    #[arg(long)]
    pub strict: bool,

    // --- Export selection ---
    /// Write the combined CSV to this path
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write a ZIP of per-file CSVs to this path
    #[arg(long, value_name = "PATH")]
    pub zip: Option<PathBuf>,

    /// Write an Excel workbook with one sheet per file to this path
    #[arg(long, value_name = "PATH")]
    pub xlsx: Option<PathBuf>,

    /// Write the JSON export to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Group the JSON export by source file instead of one flat list
    #[arg(long, requires = "json")]
    pub json_per_file: bool,
}

impl Cli {
    /// Conversion options derived from the parse flags.
    pub fn options(&self) -> ConversionOptions {
        ConversionOptions {
            policy: if self.strict {
                ParsePolicy::Strict
            } else {
                ParsePolicy::Lenient
            },
            expand_rrule: self.expand_rrule,
        }
    }

    /// Returns true when at least one export path was requested.
    pub fn wants_export(&self) -> bool {
        self.csv.is_some() || self.zip.is_some() || self.xlsx.is_some() || self.json.is_some()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["icsconv", "cal.ics"]).unwrap();
        assert_eq!(cli.max_files, 20);
        assert!(!cli.strict);
        assert!(!cli.expand_rrule);
        assert!(!cli.wants_export());
        assert_eq!(cli.options(), ConversionOptions::default());
    }

    #[test]
    fn requires_at_least_one_input() {
        assert!(Cli::try_parse_from(["icsconv"]).is_err());
    }

    #[test]
    fn json_per_file_requires_json() {
        assert!(Cli::try_parse_from(["icsconv", "cal.ics", "--json-per-file"]).is_err());
        assert!(
            Cli::try_parse_from(["icsconv", "cal.ics", "--json", "out.json", "--json-per-file"])
                .is_ok()
        );
    }

    #[test]
    fn strict_flag_selects_strict_policy() {
        let cli = Cli::try_parse_from(["icsconv", "cal.ics", "--strict"]).unwrap();
        assert_eq!(cli.options().policy, ParsePolicy::Strict);
    }
}
