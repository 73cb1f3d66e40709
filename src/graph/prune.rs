//! Fixed-point pruning of the raw containment graph
//!
//! Two passes run in alternation until a full round leaves both the edge
//! count and the node count unchanged:
//!
//! - **Transitive edges**: `u → w` is dropped when `u → v → w` also exists.
//!   Each pass removes depth-2 shortcuts; repeated rounds reach longer ones.
//! - **Synthetic collapse**: a non-label node with exactly one predecessor
//!   is removed and that predecessor is linked directly to the node's own
//!   successors.
//!
//! Both passes decide from a snapshot taken at the start of the pass and
//! visit nodes in [`Ngram`] order.

use super::hierarchy::HierarchyGraph;
use crate::types::Ngram;

/// Counters collected while pruning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    /// Rounds run, including the final round that changed nothing
    pub rounds: usize,
    pub transitive_edges_removed: usize,
    pub synthetic_nodes_removed: usize,
    /// Edges added while collapsing synthetic nodes
    pub edges_rewired: usize,
}

/// Runs both pruning passes to a fixed point
#[derive(Debug, Clone, Copy, Default)]
pub struct Pruner;

impl Pruner {
    pub fn new() -> Self {
        Self
    }

    /// Prune `graph` in place.
    ///
    /// Pruning a graph that is already a fixed point changes nothing and
    /// reports a single round.
    pub fn prune(&self, graph: &mut HierarchyGraph) -> PruneStats {
        let mut stats = PruneStats::default();

        loop {
            stats.rounds += 1;
            let before = (graph.edge_count(), graph.node_count());

            stats.transitive_edges_removed += remove_transitive_edges(graph);
            let (removed, rewired) = collapse_synthetic_nodes(graph);
            stats.synthetic_nodes_removed += removed;
            stats.edges_rewired += rewired;

            if (graph.edge_count(), graph.node_count()) == before {
                break;
            }
        }

        stats
    }
}

/// Remove every `u → w` shortcut for which some `v` gives `u → v → w`.
///
/// Returns the number of edges removed.
pub fn remove_transitive_edges(graph: &mut HierarchyGraph) -> usize {
    let mut shortcuts: Vec<(Ngram, Ngram)> = Vec::new();

    for (node, _) in graph.nodes() {
        let direct = graph.successor_set(node);
        for via in direct {
            for target in graph.successors(via) {
                if direct.contains(target) {
                    shortcuts.push((node.clone(), target.clone()));
                }
            }
        }
    }

    shortcuts
        .into_iter()
        .filter(|(from, to)| graph.remove_edge(from, to))
        .count()
}

/// Collapse synthetic nodes that have exactly one predecessor.
///
/// Returns `(nodes removed, edges added)`.
pub fn collapse_synthetic_nodes(graph: &mut HierarchyGraph) -> (usize, usize) {
    let candidates: Vec<Ngram> = graph
        .nodes()
        .filter(|(node, attrs)| !attrs.real_label && graph.in_degree(node) == 1)
        .map(|(node, _)| node.clone())
        .collect();

    let mut removed = 0;
    let mut rewired = 0;

    for node in candidates {
        if graph.in_degree(&node) != 1 {
            continue;
        }
        let Some(child) = graph.predecessors(&node).next().cloned() else {
            continue;
        };
        let parents: Vec<Ngram> = graph.successors(&node).cloned().collect();

        graph.remove_node(&node);
        removed += 1;
        for parent in parents {
            if graph.add_edge(child.clone(), parent) {
                rewired += 1;
            }
        }
    }

    (removed, rewired)
}
