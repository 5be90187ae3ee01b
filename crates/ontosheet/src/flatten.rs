//! Depth-first flattening of the term hierarchy into a row stream.
//!
//! [`Flattener`] walks the hierarchy top-down and yields one
//! [`RowEvent`] per visited term, plus the blank-line gaps that visually
//! separate sibling groups in the finished sheet. The walk follows three
//! rules:
//!
//! - A term is emitted before its children, and children are visited in
//!   declaration order.
//! - Each level flips the band flag relative to its parent, so rows
//!   alternate between plain and filled along every path.
//! - Obsolete terms produce nothing: no row, no descent into their
//!   children, and no gap.
//!
//! Terms reachable along several paths are emitted once per path; the
//! sheet mirrors the hierarchy as a tree, not as a deduplicated set. The
//! deduplicated form is available separately through
//! [`descendant_listing`].

use ontosheet_core::graph::{TermGraph, TermIdx};

/// One step of the flattening walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    /// Emit the term as a row, filled with the band color when `banded`.
    Row { term: TermIdx, banded: bool },
    /// Leave one row blank after a sibling group that ended in a leaf.
    Gap,
}

/// A stack frame of the walk: a visited term and the traversal state it
/// was reached with.
#[derive(Debug)]
struct Frame {
    term: TermIdx,
    banded: bool,
    is_last: bool,
    next_child: usize,
}

/// Iterative depth-first walk over a term hierarchy.
///
/// The iterator owns an explicit frame stack, so arbitrarily deep
/// hierarchies flatten without growing the call stack.
#[derive(Debug)]
pub struct Flattener<'g> {
    graph: &'g TermGraph,
    start: Option<TermIdx>,
    stack: Vec<Frame>,
}

impl<'g> Flattener<'g> {
    /// Starts a walk at `start`, which is emitted unbanded. Pass
    /// [`TermGraph::root`] to flatten the whole ontology.
    pub fn new(graph: &'g TermGraph, start: TermIdx) -> Self {
        Self {
            graph,
            start: Some(start),
            stack: Vec::new(),
        }
    }
}

impl Iterator for Flattener<'_> {
    type Item = RowEvent;

    fn next(&mut self) -> Option<RowEvent> {
        if let Some(start) = self.start.take() {
            if self.graph.term(start).is_obsolete() {
                return None;
            }
            self.stack.push(Frame {
                term: start,
                banded: false,
                is_last: false,
                next_child: 0,
            });
            return Some(RowEvent::Row {
                term: start,
                banded: false,
            });
        }

        while let Some(frame) = self.stack.last_mut() {
            let children = self.graph.children(frame.term);
            if let Some(&child) = children.get(frame.next_child) {
                let banded = !frame.banded;
                let is_last = frame.next_child + 1 == children.len();
                frame.next_child += 1;

                if self.graph.term(child).is_obsolete() {
                    continue;
                }
                self.stack.push(Frame {
                    term: child,
                    banded,
                    is_last,
                    next_child: 0,
                });
                return Some(RowEvent::Row {
                    term: child,
                    banded,
                });
            }

            // The gap is decided on the raw child list: a term whose
            // children are all obsolete still counts as having children.
            let gap = children.is_empty() && frame.is_last;
            self.stack.pop();
            if gap {
                return Some(RowEvent::Gap);
            }
        }
        None
    }
}

/// The flat alternative to the banded walk: every term reachable from
/// `start`, listed once in depth-first order, obsolete terms dropped.
pub fn descendant_listing(graph: &TermGraph, start: TermIdx) -> Vec<TermIdx> {
    graph
        .descendants(start)
        .into_iter()
        .filter(|&idx| !graph.term(idx).is_obsolete())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontosheet_core::term::{Term, TermId};
    use proptest::prelude::*;

    /// Pushes `terms` in order, links each `(child, parent)` pair in
    /// order, and builds the graph.
    fn build(terms: &[&str], links: &[(&str, &str)], obsolete: &[&str]) -> TermGraph {
        let mut builder = TermGraph::builder();
        let mut by_id = std::collections::HashMap::new();
        for name in terms {
            let mut term = Term::new(TermId::new(format!("EX:{name}")), *name);
            if obsolete.contains(name) {
                term.set_obsolete(true);
            }
            by_id.insert(*name, builder.push_term(term).unwrap());
        }
        for (child, parent) in links {
            builder.push_is_a(by_id[child], TermId::new(format!("EX:{parent}")));
        }
        builder.build().unwrap()
    }

    /// Renders the walk as readable tokens: `name` for a plain row,
    /// `name*` for a banded row, `-` for a gap.
    fn trace(graph: &TermGraph, start: TermIdx) -> Vec<String> {
        Flattener::new(graph, start)
            .map(|event| match event {
                RowEvent::Row { term, banded } => {
                    let name = graph.term(term).name();
                    if banded {
                        format!("{name}*")
                    } else {
                        name.to_string()
                    }
                }
                RowEvent::Gap => "-".to_string(),
            })
            .collect()
    }

    fn names<'a>(graph: &'a TermGraph, indices: &[TermIdx]) -> Vec<&'a str> {
        indices.iter().map(|&i| graph.term(i).name()).collect()
    }

    #[test]
    fn test_alternating_bands_and_leaf_gaps() {
        let g = build(
            &["A", "B", "C", "D"],
            &[("B", "A"), ("C", "A"), ("D", "B")],
            &[],
        );
        assert_eq!(trace(&g, g.root()), ["A", "B*", "D", "-", "C*", "-"]);
    }

    #[test]
    fn test_single_term_emits_one_row_and_no_gap() {
        let g = build(&["A"], &[], &[]);
        assert_eq!(trace(&g, g.root()), ["A"]);
    }

    #[test]
    fn test_obsolete_start_emits_nothing() {
        let g = build(&["A", "B"], &[], &["B"]);
        let start = g.lookup("EX:B").unwrap();
        assert!(trace(&g, start).is_empty());
    }

    #[test]
    fn test_obsolete_branch_is_not_descended() {
        // C is only reachable through the obsolete B, so it never shows.
        let g = build(
            &["A", "B", "C", "D"],
            &[("B", "A"), ("C", "B"), ("D", "A")],
            &["B"],
        );
        assert_eq!(trace(&g, g.root()), ["A", "D*", "-"]);
    }

    #[test]
    fn test_obsolete_last_sibling_leaves_no_gap() {
        // X sits at raw position 0 of 2, so it is not the last child even
        // though Y vanishes from the output.
        let g = build(&["A", "X", "Y"], &[("X", "A"), ("Y", "A")], &["Y"]);
        assert_eq!(trace(&g, g.root()), ["A", "X*"]);
    }

    #[test]
    fn test_term_with_only_obsolete_children_gets_no_gap() {
        let g = build(
            &["R", "P", "Z"],
            &[("P", "R"), ("Z", "P")],
            &["Z"],
        );
        assert_eq!(trace(&g, g.root()), ["R", "P*"]);
    }

    #[test]
    fn test_gap_follows_only_the_last_childless_sibling() {
        let g = build(&["R", "L1", "L2"], &[("L1", "R"), ("L2", "R")], &[]);
        assert_eq!(trace(&g, g.root()), ["R", "L1*", "L2*", "-"]);
    }

    #[test]
    fn test_shared_subtree_repeats_per_path() {
        let g = build(
            &["R", "B", "C", "D"],
            &[("B", "R"), ("C", "R"), ("D", "B"), ("D", "C")],
            &[],
        );
        assert_eq!(
            trace(&g, g.root()),
            ["R", "B*", "D", "-", "C*", "D", "-"]
        );
    }

    #[test]
    fn test_band_depends_on_path_not_on_term() {
        // C is a child of both R and B, so it shows once at depth two
        // (plain) and once at depth one (banded).
        let g = build(
            &["R", "B", "C"],
            &[("B", "R"), ("C", "B"), ("C", "R")],
            &[],
        );
        assert_eq!(trace(&g, g.root()), ["R", "B*", "C", "-", "C*", "-"]);
    }

    #[test]
    fn test_walk_can_start_below_the_root() {
        let g = build(
            &["A", "B", "D"],
            &[("B", "A"), ("D", "B")],
            &[],
        );
        let inner = g.lookup("EX:B").unwrap();
        assert_eq!(trace(&g, inner), ["B", "D*", "-"]);
    }

    #[test]
    fn test_flat_listing_dedups_shared_subtrees() {
        let g = build(
            &["R", "B", "C", "D"],
            &[("B", "R"), ("C", "R"), ("D", "B"), ("D", "C")],
            &[],
        );
        assert_eq!(
            names(&g, &descendant_listing(&g, g.root())),
            ["R", "B", "D", "C"]
        );
    }

    #[test]
    fn test_flat_listing_drops_obsolete_terms() {
        let g = build(&["R", "B", "C"], &[("B", "R"), ("C", "R")], &["B"]);
        assert_eq!(names(&g, &descendant_listing(&g, g.root())), ["R", "C"]);
    }

    /// Direct transcription of the walk as a recursion, used as the
    /// reference the iterative version must match.
    fn reference_walk(
        graph: &TermGraph,
        term: TermIdx,
        banded: bool,
        is_last: bool,
        out: &mut Vec<RowEvent>,
    ) {
        if graph.term(term).is_obsolete() {
            return;
        }
        out.push(RowEvent::Row { term, banded });
        let children = graph.children(term);
        for (i, &child) in children.iter().enumerate() {
            reference_walk(graph, child, !banded, i + 1 == children.len(), out);
        }
        if children.is_empty() && is_last {
            out.push(RowEvent::Gap);
        }
    }

    type NodeSpec = (prop::sample::Index, bool, Option<prop::sample::Index>);

    /// Random DAGs: node 0 is the root, every later node links to at
    /// least one earlier node, so the result is acyclic with a single
    /// root candidate.
    fn arbitrary_nodes() -> impl Strategy<Value = Vec<NodeSpec>> {
        prop::collection::vec(
            (
                any::<prop::sample::Index>(),
                any::<bool>(),
                prop::option::of(any::<prop::sample::Index>()),
            ),
            1..32,
        )
    }

    fn build_random(nodes: &[NodeSpec]) -> TermGraph {
        let mut builder = TermGraph::builder();
        let mut indices = Vec::new();
        for (i, (_, obsolete, _)) in nodes.iter().enumerate() {
            let mut term = Term::new(TermId::new(format!("EX:{i:04}")), format!("term {i}"));
            term.set_obsolete(i != 0 && *obsolete);
            indices.push(builder.push_term(term).unwrap());
        }
        for (i, (primary, _, extra)) in nodes.iter().enumerate().skip(1) {
            let primary = primary.index(i);
            builder.push_is_a(indices[i], TermId::new(format!("EX:{primary:04}")));
            if let Some(extra) = extra {
                let secondary = extra.index(i);
                if secondary != primary {
                    builder.push_is_a(indices[i], TermId::new(format!("EX:{secondary:04}")));
                }
            }
        }
        builder.build().unwrap()
    }

    proptest! {
        #[test]
        fn test_iterative_walk_matches_recursive_reference(nodes in arbitrary_nodes()) {
            let graph = build_random(&nodes);
            let walked: Vec<RowEvent> = Flattener::new(&graph, graph.root()).collect();

            let mut reference = Vec::new();
            reference_walk(&graph, graph.root(), false, false, &mut reference);

            prop_assert_eq!(walked, reference);
        }

        #[test]
        fn test_no_walk_emits_an_obsolete_term(nodes in arbitrary_nodes()) {
            let graph = build_random(&nodes);
            for event in Flattener::new(&graph, graph.root()) {
                if let RowEvent::Row { term, .. } = event {
                    prop_assert!(!graph.term(term).is_obsolete());
                }
            }
        }
    }
}
