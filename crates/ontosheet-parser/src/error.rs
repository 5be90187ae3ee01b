//! Parse errors with source location information.
//!
//! Parsing stops at the first defect and reports it as a [`ParseError`]:
//! a message, the byte span of the offending line, its 1-based line
//! number, a short label for the span, and optional help text. Callers
//! that hold the source text can turn this into a rich annotated report.

use thiserror::Error;

use crate::span::Span;

/// A fatal defect found while parsing an ontology file.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    span: Span,
    line: usize,
    label: String,
    help: Option<String>,
}

impl ParseError {
    pub(crate) fn new(
        message: impl Into<String>,
        span: Span,
        line: usize,
        label: impl Into<String>,
        help: Option<String>,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            line,
            label: label.into(),
            help,
        }
    }

    /// The primary error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The byte span of the offending text.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The 1-based line number of the offending text.
    pub fn line(&self) -> usize {
        self.line
    }

    /// A short label describing what the span points at.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Optional advice on how to fix the defect.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}
