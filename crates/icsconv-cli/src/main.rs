//! icsconv CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use icsconv_cli::cli::Cli;
use icsconv_cli::error::CliResult;
use icsconv_cli::output;
use icsconv_core::{ConversionRequest, TracingConfig, convert, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(error) = init_tracing(tracing_config) {
        eprintln!("warning: {}", error);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let (files, mut errors) = output::read_inputs(&cli.files, cli.max_files);

    let request = ConversionRequest {
        files,
        options: cli.options(),
    };
    let mut result = convert(&request);

    // Read failures happened before parsing; report them first.
    errors.append(&mut result.errors);
    result.errors = errors;

    output::print_summary(&result);

    if cli.wants_export() {
        output::write_exports(&cli, &result)?;
    } else {
        println!("No output requested; pass --csv, --zip, --xlsx or --json to write exports.");
    }
    Ok(())
}
