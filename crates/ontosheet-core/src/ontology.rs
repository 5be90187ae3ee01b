//! An ontology: hierarchy plus file-level metadata.

use crate::graph::TermGraph;

/// Header metadata of an ontology file.
///
/// All fields are optional; files in the wild frequently omit one or more
/// of them.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    format_version: Option<String>,
    data_version: Option<String>,
    ontology_name: Option<String>,
}

impl Metadata {
    /// The declared flat-file format version, e.g. `1.2`.
    pub fn format_version(&self) -> Option<&str> {
        self.format_version.as_deref()
    }

    /// The release identifier of this ontology snapshot, e.g.
    /// `releases/2026-03-14`.
    pub fn data_version(&self) -> Option<&str> {
        self.data_version.as_deref()
    }

    /// The short name of the ontology, e.g. `hp`.
    pub fn ontology_name(&self) -> Option<&str> {
        self.ontology_name.as_deref()
    }

    pub fn set_format_version(&mut self, version: impl Into<String>) {
        self.format_version = Some(version.into());
    }

    pub fn set_data_version(&mut self, version: impl Into<String>) {
        self.data_version = Some(version.into());
    }

    pub fn set_ontology_name(&mut self, name: impl Into<String>) {
        self.ontology_name = Some(name.into());
    }
}

/// A fully loaded ontology: the term hierarchy and the header metadata
/// of the file it came from.
#[derive(Debug)]
pub struct Ontology {
    graph: TermGraph,
    metadata: Metadata,
}

impl Ontology {
    pub fn new(graph: TermGraph, metadata: Metadata) -> Self {
        Self { graph, metadata }
    }

    /// The term hierarchy.
    pub fn graph(&self) -> &TermGraph {
        &self.graph
    }

    /// The file header metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}
