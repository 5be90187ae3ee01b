//! The subclass hierarchy over ontology terms.
//!
//! [`TermGraph`] stores every term of an ontology together with its
//! `is_a` links, resolved into index form. The graph is built once via
//! [`TermGraphBuilder`] and is immutable afterwards:
//!
//! - Terms keep the order in which they were pushed, and the children of
//!   a term keep the order in which their `is_a` links were pushed, so
//!   traversals are deterministic.
//! - Building rejects duplicate identifiers and cyclic hierarchies, and
//!   locates the distinguished root term.
//! - Lookup works by primary identifier or by any merged-in alternative
//!   identifier.

use std::collections::VecDeque;

use indexmap::IndexMap;
use log::{debug, warn};
use thiserror::Error;

use crate::term::{Term, TermId};

/// Type-safe index of a term inside a [`TermGraph`].
///
/// Indices are only handed out by the graph (or its builder) and are
/// meaningless for any other graph instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermIdx(usize);

/// Errors raised while assembling a [`TermGraph`].
#[derive(Debug, Error)]
pub enum GraphError {
    /// Two term stanzas claimed the same primary identifier.
    #[error("duplicate term id `{0}`")]
    DuplicateTerm(TermId),

    /// The `is_a` links contain a cycle; the named term is part of it.
    #[error("subclass hierarchy contains a cycle through `{0}`")]
    Cycle(TermId),

    /// No term qualifies as the root of the hierarchy.
    #[error("ontology has no non-obsolete term without supertypes to act as root")]
    MissingRoot,
}

/// An immutable ontology hierarchy with index-based adjacency.
#[derive(Debug)]
pub struct TermGraph {
    terms: Vec<Term>,
    index: IndexMap<TermId, TermIdx>,
    alt_index: IndexMap<TermId, TermIdx>,
    children: Vec<Vec<TermIdx>>,
    parents: Vec<Vec<TermIdx>>,
    root: TermIdx,
}

impl TermGraph {
    /// Starts assembling a new graph.
    pub fn builder() -> TermGraphBuilder {
        TermGraphBuilder::default()
    }

    /// Number of terms in the graph, obsolete ones included.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the graph holds no terms. Never true for a built graph,
    /// since building requires a root, but kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the term at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` was issued by a different graph.
    pub fn term(&self, idx: TermIdx) -> &Term {
        &self.terms[idx.0]
    }

    /// Iterates over all terms in insertion order.
    pub fn terms(&self) -> impl Iterator<Item = (TermIdx, &Term)> {
        self.terms
            .iter()
            .enumerate()
            .map(|(i, term)| (TermIdx(i), term))
    }

    /// The distinguished root: the first pushed term that is not obsolete
    /// and has no supertypes.
    pub fn root(&self) -> TermIdx {
        self.root
    }

    /// Direct subclasses of `idx`, in the order their `is_a` links were
    /// declared.
    pub fn children(&self, idx: TermIdx) -> &[TermIdx] {
        &self.children[idx.0]
    }

    /// Direct supertypes of `idx`, in declaration order.
    pub fn parents(&self, idx: TermIdx) -> &[TermIdx] {
        &self.parents[idx.0]
    }

    /// Looks a term up by its primary identifier.
    pub fn lookup(&self, id: &str) -> Option<TermIdx> {
        self.index.get(id).copied()
    }

    /// Looks a term up by its primary identifier, falling back to the
    /// merged-in alternative identifiers.
    pub fn resolve(&self, id: &str) -> Option<TermIdx> {
        self.lookup(id).or_else(|| self.alt_index.get(id).copied())
    }

    /// Collects `start` and every term reachable from it through child
    /// links, depth-first in child order, each term listed once no matter
    /// how many paths lead to it.
    pub fn descendants(&self, start: TermIdx) -> Vec<TermIdx> {
        let mut visited = vec![false; self.terms.len()];
        let mut out = Vec::new();
        let mut stack = vec![start];

        while let Some(idx) = stack.pop() {
            if visited[idx.0] {
                continue;
            }
            visited[idx.0] = true;
            out.push(idx);
            for &child in self.children(idx).iter().rev() {
                if !visited[child.0] {
                    stack.push(child);
                }
            }
        }
        out
    }
}

/// Accumulates terms and `is_a` links, then validates them into a
/// [`TermGraph`].
///
/// Links may reference terms that have not been pushed yet; they are
/// resolved when [`build`](Self::build) runs.
#[derive(Debug, Default)]
pub struct TermGraphBuilder {
    terms: Vec<Term>,
    index: IndexMap<TermId, TermIdx>,
    links: Vec<(TermIdx, TermId)>,
}

impl TermGraphBuilder {
    /// Adds a term and returns its index.
    pub fn push_term(&mut self, term: Term) -> Result<TermIdx, GraphError> {
        if self.index.contains_key(term.id()) {
            return Err(GraphError::DuplicateTerm(term.id().clone()));
        }
        let idx = TermIdx(self.terms.len());
        self.index.insert(term.id().clone(), idx);
        self.terms.push(term);
        Ok(idx)
    }

    /// Records that `child` is a subclass of the term identified by
    /// `parent`.
    pub fn push_is_a(&mut self, child: TermIdx, parent: TermId) {
        self.links.push((child, parent));
    }

    /// Resolves all links, checks the hierarchy, and produces the graph.
    pub fn build(self) -> Result<TermGraph, GraphError> {
        let TermGraphBuilder {
            terms,
            index,
            links,
        } = self;

        let mut alt_index = IndexMap::new();
        for (i, term) in terms.iter().enumerate() {
            for alt in term.alternative_ids() {
                if index.contains_key(alt) || alt_index.contains_key(alt) {
                    warn!(alt_id = alt.as_str(); "Alternative id clashes with another term; keeping the earlier mapping");
                } else {
                    alt_index.insert(alt.clone(), TermIdx(i));
                }
            }
        }

        let mut children: Vec<Vec<TermIdx>> = vec![Vec::new(); terms.len()];
        let mut parents: Vec<Vec<TermIdx>> = vec![Vec::new(); terms.len()];
        for (child, parent_id) in links {
            match index.get(&parent_id) {
                Some(&parent) => {
                    children[parent.0].push(child);
                    parents[child.0].push(parent);
                }
                None => {
                    warn!(
                        child = terms[child.0].id().as_str(),
                        parent = parent_id.as_str();
                        "is_a target is not defined in this ontology; link skipped"
                    );
                }
            }
        }

        check_acyclic(&terms, &children, &parents)?;

        let root = find_root(&terms, &parents)?;
        Ok(TermGraph {
            terms,
            index,
            alt_index,
            children,
            parents,
            root,
        })
    }
}

/// Kahn's algorithm over the parent counts. Every term must be reachable
/// from the zero-in-degree frontier, otherwise a cycle remains.
fn check_acyclic(
    terms: &[Term],
    children: &[Vec<TermIdx>],
    parents: &[Vec<TermIdx>],
) -> Result<(), GraphError> {
    let mut in_degree: Vec<usize> = parents.iter().map(Vec::len).collect();
    let mut queue: VecDeque<usize> = (0..terms.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut processed = 0;

    while let Some(i) = queue.pop_front() {
        processed += 1;
        for &child in &children[i] {
            in_degree[child.0] -= 1;
            if in_degree[child.0] == 0 {
                queue.push_back(child.0);
            }
        }
    }

    if processed < terms.len() {
        let blocked = in_degree.iter().position(|&d| d > 0).unwrap_or(0);
        let culprit = cycle_member(blocked, &in_degree, parents);
        return Err(GraphError::Cycle(terms[culprit].id().clone()));
    }
    Ok(())
}

/// Walks from `start` to a blocked parent until a term repeats. Every
/// blocked term keeps at least one blocked parent, so the walk never
/// leaves the blocked set and the repeated term lies on a cycle, not
/// merely below one.
fn cycle_member(start: usize, in_degree: &[usize], parents: &[Vec<TermIdx>]) -> usize {
    let mut visited = vec![false; in_degree.len()];
    let mut at = start;
    loop {
        if visited[at] {
            return at;
        }
        visited[at] = true;
        match parents[at].iter().find(|p| in_degree[p.0] > 0) {
            Some(parent) => at = parent.0,
            None => return at,
        }
    }
}

fn find_root(terms: &[Term], parents: &[Vec<TermIdx>]) -> Result<TermIdx, GraphError> {
    let mut candidates = terms
        .iter()
        .enumerate()
        .filter(|(i, term)| parents[*i].is_empty() && !term.is_obsolete());

    let (first, _) = candidates.next().ok_or(GraphError::MissingRoot)?;
    let remaining = candidates.count();
    if remaining > 0 {
        debug!(extra_roots = remaining; "Multiple root candidates; the first in declaration order wins");
    }
    Ok(TermIdx(first))
}
