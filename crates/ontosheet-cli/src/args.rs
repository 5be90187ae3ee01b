//! Command-line argument definitions for the ontosheet CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the ontology file, the class whose
//! subtree the report covers, the report layout, and logging verbosity.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the ontosheet report tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the OBO ontology file
    #[arg(short, long, value_parser = existing_file)]
    pub ontology: PathBuf,

    /// Identifier of the class whose subtree the report covers; the whole
    /// ontology is reported when omitted
    #[arg(short, long)]
    pub class: Option<String>,

    /// List every term under the start class exactly once, without bands
    /// or group gaps
    #[arg(long)]
    pub flat: bool,

    /// Path to configuration file (TOML)
    #[arg(long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Rejects paths that do not name an existing file, so a mistyped path
/// fails at argument parsing with the usage text instead of midway
/// through a run.
fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("ontology file `{value}` does not exist"))
    }
}
