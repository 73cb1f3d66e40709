//! Ancestor support aggregation
//!
//! The ancestor support of a node is the summed weight of every node that
//! reaches it along edges, i.e. every more specific n-gram that eventually
//! generalizes to it. The node's own weight is not included. Ancestors are
//! collected as a set per node, so a specialization reachable along several
//! paths is counted once.

use rayon::prelude::*;

use super::hierarchy::HierarchyGraph;
use crate::types::Ngram;

/// Below this many nodes the per-node traversals run sequentially
const PARALLEL_THRESHOLD: usize = 2000;

/// Ancestor support of a single node
pub fn ancestor_support(graph: &HierarchyGraph, ngram: &Ngram) -> u64 {
    graph
        .ancestors(ngram)
        .into_iter()
        .filter_map(|a| graph.attrs(a))
        .map(|attrs| attrs.weight)
        .sum()
}

/// Compute and store `ancestor_support` on every node
pub fn add_ancestor_support(graph: &mut HierarchyGraph) {
    let view: &HierarchyGraph = graph;
    let nodes: Vec<&Ngram> = view.nodes().map(|(n, _)| n).collect();

    let support: Vec<(Ngram, u64)> = if nodes.len() >= PARALLEL_THRESHOLD {
        nodes
            .par_iter()
            .map(|&n| (n.clone(), ancestor_support(view, n)))
            .collect()
    } else {
        nodes
            .iter()
            .map(|&n| (n.clone(), ancestor_support(view, n)))
            .collect()
    };

    for (node, value) in support {
        if let Some(attrs) = graph.attrs_mut(&node) {
            attrs.ancestor_support = value;
        }
    }
}
