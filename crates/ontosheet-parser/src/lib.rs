//! # Ontosheet Parser
//!
//! Parser for OBO ontology flat files. This crate provides the loading
//! pipeline from source text to an in-memory
//! [`Ontology`](ontosheet_core::ontology::Ontology).
//!
//! ## Usage
//!
//! ```
//! # use ontosheet_parser::{ParseError, parse};
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         format-version: 1.2
//!         data-version: releases/2026-03-14
//!
//!         [Term]
//!         id: EX:0000001
//!         name: example root
//!     "#;
//!
//!     let ontology = parse(source)?;
//!     assert_eq!(ontology.graph().len(), 1);
//!     Ok(())
//! }
//! ```

mod error;
mod parser;
mod span;

pub use error::ParseError;
pub use span::Span;

use ontosheet_core::ontology::Ontology;

/// Parse OBO source text into an [`Ontology`].
///
/// This is the main entry point for loading an ontology. It walks the
/// flat file line by line:
///
/// 1. **Header** - captures `format-version`, `data-version` and
///    `ontology` before the first stanza
/// 2. **Stanzas** - collects `[Term]` stanzas and their clauses, skipping
///    `[Typedef]` and other stanza kinds
/// 3. **Hierarchy** - resolves `is_a` links, rejects cycles, and locates
///    the root term
///
/// # Errors
///
/// Returns a [`ParseError`] with location information when the text is
/// malformed or the hierarchy cannot be validated.
pub fn parse(source: &str) -> Result<Ontology, ParseError> {
    parser::parse_document(source)
}
