//! Ontosheet Core Types and Definitions
//!
//! This crate provides the foundational types for the ontosheet report
//! tool. It includes:
//!
//! - **Terms**: ontology classes with their annotations ([`term::Term`],
//!   [`term::TermId`])
//! - **Graph**: the subclass hierarchy over terms with deterministic
//!   child ordering ([`graph::TermGraph`])
//! - **Ontology**: a term graph paired with the header metadata of the
//!   file it was loaded from ([`ontology::Ontology`])

pub mod graph;
pub mod ontology;
pub mod term;
