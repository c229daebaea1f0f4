//! CLI logic for the GraphCSS style resolver.
//!
//! Reads a diagram description, resolves every element against the
//! configured theme and override rules, and writes the computed styles.

pub mod error_adapter;

mod args;
mod config;
mod diagram;
mod error;
mod report;

pub use args::Args;
pub use diagram::Diagram;
pub use error::{CliError, SourceError};

use std::{fs, io::Write, path::Path};

use log::info;

use graphcss::Stylist;

/// Run the GraphCSS CLI application
///
/// Parses the input diagram, computes the styles of each element and writes
/// the report to the output file, or to standard output if none is given.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Diagram parsing errors
/// - Invalid themes or style rules
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Resolving diagram styles"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;
    let stylist = Stylist::new(&app_config)?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;
    let diagram = Diagram::parse(Path::new(&args.input), &source)?;

    let report = report::render(&stylist, &diagram);

    match &args.output {
        Some(output) => {
            fs::write(output, report)?;
            info!(output_file = output.as_str(), elements = diagram.len(); "Styles exported successfully");
        }
        None => std::io::stdout().write_all(report.as_bytes())?,
    }

    Ok(())
}
