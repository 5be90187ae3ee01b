//! Error types for ontosheet operations.
//!
//! This module provides the main error type [`OntosheetError`] which wraps
//! the error conditions that can occur while turning an ontology file
//! into a report.

use std::io;

use thiserror::Error;

use ontosheet_core::graph::GraphError;
use ontosheet_parser::ParseError;
use rust_xlsxwriter::XlsxError;

/// The main error type for ontosheet operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the offending source text next to the
/// structured error, so callers can render annotated reports with exact
/// spans.
#[derive(Debug, Error)]
pub enum OntosheetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] XlsxError),
}

impl OntosheetError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
