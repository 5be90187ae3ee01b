//! ontosheet-cli: Command-line interface for the ontosheet report tool.
//!
//! Reads an OBO ontology file, flattens the class hierarchy below a start
//! class, and writes the result as a banded XLSX report next to the input
//! file. Also provides the error-to-diagnostic adapters used by the
//! binary to render failures.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use ontosheet::{OntosheetError, ReportBuilder, ReportMode};

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

/// Runs the report pipeline for the given arguments.
///
/// Parses the ontology, resolves the start class, and writes the report
/// to `<obo-path>.xlsx`. Errors are returned to the caller; the binary
/// renders them through [`error_adapter::to_reportables`].
pub fn run(args: &Args) -> Result<(), OntosheetError> {
    info!(ontology_file:? = args.ontology; "Processing ontology");

    let app_config = config::load_config(args.config.as_deref())?;
    let source = fs::read_to_string(&args.ontology)?;

    let builder = ReportBuilder::new(app_config);
    let ontology = builder.parse(&source)?;
    let start = builder.resolve_start(&ontology, args.class.as_deref());

    let output = report_path(&args.ontology);
    let mode = if args.flat {
        ReportMode::Flat
    } else {
        ReportMode::Banded
    };

    println!("create xls version at {}", output.display());
    builder.write_report(&ontology, start, &source_name(&args.ontology), mode, &output)?;

    info!(output_file:? = output; "Report exported successfully");
    Ok(())
}

/// The report lands next to its input: `<obo-path>.xlsx`.
fn report_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_os_string();
    path.push(".xlsx");
    PathBuf::from(path)
}

/// File name of the input, used in the sheet title.
fn source_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}
