//! Ontology term identifiers and annotations.
//!
//! A [`Term`] is one class of an ontology: a stable identifier plus the
//! human-facing annotations that end up as report columns. Hierarchy is
//! not stored here; parent and child links live in
//! [`TermGraph`](crate::graph::TermGraph).

use std::borrow::Borrow;
use std::fmt;

/// A stable ontology class identifier, such as `HP:0000118`.
///
/// Identifiers compare and hash by their textual form. The type is a thin
/// wrapper so that primary identifiers, alternative identifiers, and
/// supertype references cannot be mixed up with arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(String);

impl TermId {
    /// Creates an identifier from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TermId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TermId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One ontology class and the annotations carried on its stanza.
#[derive(Debug, Clone)]
pub struct Term {
    id: TermId,
    name: String,
    alternative_ids: Vec<TermId>,
    synonyms: Vec<String>,
    definition: String,
    obsolete: bool,
}

impl Term {
    /// Creates a term with the given identifier and label. All other
    /// annotations start out empty.
    pub fn new(id: TermId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            alternative_ids: Vec::new(),
            synonyms: Vec::new(),
            definition: String::new(),
            obsolete: false,
        }
    }

    /// Returns the primary identifier.
    pub fn id(&self) -> &TermId {
        &self.id
    }

    /// Returns the human-readable label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the merged-in identifiers this term also answers to.
    pub fn alternative_ids(&self) -> &[TermId] {
        &self.alternative_ids
    }

    /// Returns the synonym labels in declaration order.
    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    /// Returns the textual definition, empty when the term has none.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Whether the term has been retired from the ontology.
    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }

    /// Records an additional identifier for this term.
    pub fn push_alternative_id(&mut self, id: TermId) {
        self.alternative_ids.push(id);
    }

    /// Records a synonym label.
    pub fn push_synonym(&mut self, synonym: impl Into<String>) {
        self.synonyms.push(synonym.into());
    }

    /// Sets the textual definition.
    pub fn set_definition(&mut self, definition: impl Into<String>) {
        self.definition = definition.into();
    }

    /// Marks the term as retired (or active again).
    pub fn set_obsolete(&mut self, obsolete: bool) {
        self.obsolete = obsolete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_id_display_matches_text() {
        let id = TermId::new("HP:0000118");
        assert_eq!(id.to_string(), "HP:0000118");
        assert_eq!(id.as_str(), "HP:0000118");
    }

    #[test]
    fn test_new_term_has_empty_annotations() {
        let term = Term::new(TermId::new("EX:1"), "Root");
        assert_eq!(term.name(), "Root");
        assert!(term.alternative_ids().is_empty());
        assert!(term.synonyms().is_empty());
        assert_eq!(term.definition(), "");
        assert!(!term.is_obsolete());
    }

    #[test]
    fn test_annotations_accumulate_in_order() {
        let mut term = Term::new(TermId::new("EX:2"), "Leaf");
        term.push_synonym("first");
        term.push_synonym("second");
        term.push_alternative_id(TermId::new("EX:9"));
        term.set_definition("A leaf class.");
        term.set_obsolete(true);

        assert_eq!(term.synonyms(), ["first", "second"]);
        assert_eq!(term.alternative_ids(), [TermId::new("EX:9")]);
        assert_eq!(term.definition(), "A leaf class.");
        assert!(term.is_obsolete());
    }
}
