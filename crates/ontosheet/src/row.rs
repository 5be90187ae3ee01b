//! Projection of terms into report rows.
//!
//! Every emitted row carries the same six columns. Multi-valued
//! annotations are joined with `"; "`, and supertype references are
//! rendered as `label (id)` so a reader can follow them without leaving
//! the sheet.

use ontosheet_core::{
    graph::{TermGraph, TermIdx},
    term::{Term, TermId},
};

/// Column titles of the report, in sheet order.
pub const COLUMN_HEADERS: [&str; 6] = [
    "Class Label",
    "Class ID",
    "Alternative IDs",
    "Synonyms (separated by semicolon)",
    "Definition",
    "Subclass-of (label+id)",
];

/// One fully rendered report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedRow {
    pub label: String,
    pub id: String,
    pub alt_ids: String,
    pub synonyms: String,
    pub definition: String,
    pub supertypes: String,
}

impl FlattenedRow {
    /// The cell texts in sheet order, matching [`COLUMN_HEADERS`].
    pub fn columns(&self) -> [&str; 6] {
        [
            &self.label,
            &self.id,
            &self.alt_ids,
            &self.synonyms,
            &self.definition,
            &self.supertypes,
        ]
    }
}

/// Renders the term at `idx` into its report row.
pub fn emit(graph: &TermGraph, idx: TermIdx) -> FlattenedRow {
    let term = graph.term(idx);
    FlattenedRow {
        label: term.name().to_string(),
        id: term.id().to_string(),
        alt_ids: join_ids(term.alternative_ids()),
        synonyms: term.synonyms().join("; "),
        definition: term.definition().to_string(),
        supertypes: join_supertypes(graph, idx),
    }
}

fn join_ids(ids: &[TermId]) -> String {
    ids.iter()
        .map(TermId::as_str)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_supertypes(graph: &TermGraph, idx: TermIdx) -> String {
    graph
        .parents(idx)
        .iter()
        .map(|&parent| supertype_ref(graph.term(parent)))
        .collect::<Vec<_>>()
        .join("; ")
}

/// `label (id)`, the form used in the subclass-of column.
fn supertype_ref(term: &Term) -> String {
    format!("{} ({})", term.name(), term.id())
}
