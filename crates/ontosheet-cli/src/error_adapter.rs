//! Adapters that turn [`OntosheetError`] values into miette reportables.
//!
//! The CLI renders failures through miette's graphical report handler.
//! Parse errors carry their source text and span, so they render as
//! annotated snippets; everything else renders as a plain message.

use miette::{Diagnostic, NamedSource, SourceSpan};
use ontosheet::OntosheetError;
use thiserror::Error;

/// A parse failure with the offending source attached.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
struct ParseReport {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
    #[help]
    help: Option<String>,
}

/// A report without source attribution.
#[derive(Debug, Error, Diagnostic)]
#[error("{0}")]
struct PlainReport(String);

/// Converts an error into independently renderable diagnostics.
pub fn to_reportables(err: &OntosheetError) -> Vec<Box<dyn Diagnostic + Send + Sync>> {
    match err {
        OntosheetError::Parse { err, src } => vec![Box::new(ParseReport {
            message: err.message().to_string(),
            src: NamedSource::new("ontology", src.clone()),
            span: (err.span().start(), err.span().len()).into(),
            label: err.label().to_string(),
            help: err.help().map(str::to_string),
        })],
        other => vec![Box::new(PlainReport(other.to_string()))],
    }
}
