//! Directed label hierarchy keyed by n-gram value
//!
//! Edges point from a more specific n-gram to a shorter n-gram it contains
//! (`specific → general`). Both directions of adjacency are stored so the
//! pruner can walk successors-of-successors and predecessor counts without
//! rescanning the edge set. All maps are ordered by [`Ngram`], which fixes
//! every iteration order.

use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::errors::{HierarchyError, Result};
use crate::types::{Ngram, NodeAttrs};

static EMPTY: BTreeSet<Ngram> = BTreeSet::new();

/// A directed acyclic graph over n-gram nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyGraph {
    nodes: BTreeMap<Ngram, NodeAttrs>,
    /// node -> the shorter n-grams it generalizes to
    successors: BTreeMap<Ngram, BTreeSet<Ngram>>,
    /// node -> the longer n-grams that generalize to it
    predecessors: BTreeMap<Ngram, BTreeSet<Ngram>>,
    edge_count: usize,
}

impl HierarchyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or overwrite the attributes of an existing one
    pub fn add_node(&mut self, ngram: Ngram, attrs: NodeAttrs) {
        self.successors.entry(ngram.clone()).or_default();
        self.predecessors.entry(ngram.clone()).or_default();
        self.nodes.insert(ngram, attrs);
    }

    /// Add `from → to`, creating missing endpoints with default attributes.
    ///
    /// Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, from: Ngram, to: Ngram) -> bool {
        for node in [&from, &to] {
            if !self.nodes.contains_key(node) {
                self.add_node(node.clone(), NodeAttrs::default());
            }
        }
        let inserted = self
            .successors
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        if inserted {
            self.predecessors.entry(to).or_default().insert(from);
            self.edge_count += 1;
        }
        inserted
    }

    /// Remove `from → to`; returns whether it existed
    pub fn remove_edge(&mut self, from: &Ngram, to: &Ngram) -> bool {
        let removed = self
            .successors
            .get_mut(from)
            .is_some_and(|succ| succ.remove(to));
        if removed {
            if let Some(pred) = self.predecessors.get_mut(to) {
                pred.remove(from);
            }
            self.edge_count -= 1;
        }
        removed
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&mut self, ngram: &Ngram) -> Option<NodeAttrs> {
        let attrs = self.nodes.remove(ngram)?;

        let succ = self.successors.remove(ngram).unwrap_or_default();
        for target in &succ {
            if let Some(pred) = self.predecessors.get_mut(target) {
                pred.remove(ngram);
            }
        }
        let pred = self.predecessors.remove(ngram).unwrap_or_default();
        for source in &pred {
            if let Some(out) = self.successors.get_mut(source) {
                out.remove(ngram);
            }
        }
        self.edge_count -= succ.len() + pred.len();

        Some(attrs)
    }

    pub fn contains_node(&self, ngram: &Ngram) -> bool {
        self.nodes.contains_key(ngram)
    }

    pub fn contains_edge(&self, from: &Ngram, to: &Ngram) -> bool {
        self.successor_set(from).contains(to)
    }

    pub fn attrs(&self, ngram: &Ngram) -> Option<&NodeAttrs> {
        self.nodes.get(ngram)
    }

    pub fn attrs_mut(&mut self, ngram: &Ngram) -> Option<&mut NodeAttrs> {
        self.nodes.get_mut(ngram)
    }

    /// Direct generalizations of `ngram`, in sorted order
    pub fn successors(&self, ngram: &Ngram) -> impl Iterator<Item = &Ngram> + '_ {
        self.successor_set(ngram).iter()
    }

    /// Direct specializations of `ngram`, in sorted order
    pub fn predecessors(&self, ngram: &Ngram) -> impl Iterator<Item = &Ngram> + '_ {
        self.predecessor_set(ngram).iter()
    }

    pub(crate) fn successor_set(&self, ngram: &Ngram) -> &BTreeSet<Ngram> {
        self.successors.get(ngram).unwrap_or(&EMPTY)
    }

    pub(crate) fn predecessor_set(&self, ngram: &Ngram) -> &BTreeSet<Ngram> {
        self.predecessors.get(ngram).unwrap_or(&EMPTY)
    }

    pub fn out_degree(&self, ngram: &Ngram) -> usize {
        self.successor_set(ngram).len()
    }

    pub fn in_degree(&self, ngram: &Ngram) -> usize {
        self.predecessor_set(ngram).len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with their attributes, in sorted order
    pub fn nodes(&self) -> impl Iterator<Item = (&Ngram, &NodeAttrs)> + '_ {
        self.nodes.iter()
    }

    /// Edges as `(specific, general)` pairs, sorted by source then target
    pub fn edges(&self) -> impl Iterator<Item = (&Ngram, &Ngram)> + '_ {
        self.successors
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |to| (from, to)))
    }

    /// Nodes without any generalization
    pub fn roots(&self) -> Vec<&Ngram> {
        self.nodes
            .keys()
            .filter(|n| self.out_degree(n) == 0)
            .collect()
    }

    /// Roots that are real labels
    pub fn real_roots(&self) -> Vec<&Ngram> {
        self.nodes
            .iter()
            .filter(|(n, attrs)| attrs.real_label && self.out_degree(n) == 0)
            .map(|(n, _)| n)
            .collect()
    }

    /// Every node with a directed path to `ngram`, excluding `ngram` itself
    pub fn ancestors(&self, ngram: &Ngram) -> BTreeSet<&Ngram> {
        let mut seen: FxHashSet<&Ngram> = FxHashSet::default();
        let mut stack: Vec<&Ngram> = self.predecessors(ngram).collect();

        while let Some(node) = stack.pop() {
            if seen.insert(node) {
                stack.extend(self.predecessors(node).filter(|p| !seen.contains(p)));
            }
        }

        seen.remove(ngram);
        seen.into_iter().collect()
    }

    /// The sub-hierarchy under the given roots.
    ///
    /// Keeps each root and every node that reaches one of them, with the
    /// edges among those nodes and their attributes unchanged.
    pub fn subgraph(&self, roots: &[Ngram]) -> Result<HierarchyGraph> {
        let mut keep: BTreeSet<&Ngram> = BTreeSet::new();
        for root in roots {
            let (key, _) = self
                .nodes
                .get_key_value(root)
                .ok_or_else(|| HierarchyError::UnknownNode(root.clone()))?;
            keep.insert(key);
            keep.extend(self.ancestors(root));
        }

        let mut sub = HierarchyGraph::new();
        for &node in &keep {
            sub.add_node(node.clone(), self.nodes[node]);
        }
        for &node in &keep {
            for target in self.successors(node).filter(|t| keep.contains(t)) {
                sub.add_edge(node.clone(), target.clone());
            }
        }
        Ok(sub)
    }

    /// Kahn's algorithm over the stored adjacency
    pub fn is_acyclic(&self) -> bool {
        let mut in_degree: BTreeMap<&Ngram, usize> = self
            .nodes
            .keys()
            .map(|n| (n, self.in_degree(n)))
            .collect();
        let mut queue: VecDeque<&Ngram> = in_degree
            .iter()
            .filter(|(_, &d)| d == 0)
            .map(|(&n, _)| n)
            .collect();
        let mut visited = 0;

        while let Some(node) = queue.pop_front() {
            visited += 1;
            for target in self.successors(node) {
                if let Some(d) = in_degree.get_mut(target) {
                    *d -= 1;
                    if *d == 0 {
                        queue.push_back(target);
                    }
                }
            }
        }

        visited == self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(words: &str) -> Ngram {
        Ngram::from_phrase(words)
    }

    fn diamond() -> HierarchyGraph {
        // a b c -> a b -> b, a b c -> b c -> b
        let mut graph = HierarchyGraph::new();
        graph.add_node(g("a b c"), NodeAttrs::real(3));
        graph.add_node(g("a b"), NodeAttrs::real(2));
        graph.add_node(g("b c"), NodeAttrs::synthetic());
        graph.add_node(g("b"), NodeAttrs::real(1));
        graph.add_edge(g("a b c"), g("a b"));
        graph.add_edge(g("a b c"), g("b c"));
        graph.add_edge(g("a b"), g("b"));
        graph.add_edge(g("b c"), g("b"));
        graph
    }

    #[test]
    fn test_edges_tracked_both_directions() {
        let graph = diamond();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.in_degree(&g("b")), 2);
        assert_eq!(graph.out_degree(&g("a b c")), 2);
        assert!(graph.contains_edge(&g("a b"), &g("b")));
        assert!(!graph.contains_edge(&g("b"), &g("a b")));
    }

    #[test]
    fn test_duplicate_edge_ignored() {
        let mut graph = diamond();
        assert!(!graph.add_edge(g("a b"), g("b")));
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = diamond();
        assert!(graph.remove_edge(&g("a b"), &g("b")));
        assert!(!graph.remove_edge(&g("a b"), &g("b")));
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.in_degree(&g("b")), 1);
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = diamond();
        let attrs = graph.remove_node(&g("b c")).unwrap();
        assert!(!attrs.real_label);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.out_degree(&g("a b c")), 1);
        assert_eq!(graph.in_degree(&g("b")), 1);
        assert!(graph.remove_node(&g("b c")).is_none());
    }

    #[test]
    fn test_roots() {
        let mut graph = diamond();
        graph.add_node(g("x"), NodeAttrs::synthetic());
        assert_eq!(graph.roots(), vec![&g("b"), &g("x")]);
        assert_eq!(graph.real_roots(), vec![&g("b")]);
    }

    #[test]
    fn test_ancestors_exclude_self() {
        let graph = diamond();
        let anc: Vec<_> = graph.ancestors(&g("b")).into_iter().cloned().collect();
        assert_eq!(anc, vec![g("a b"), g("a b c"), g("b c")]);
        assert!(graph.ancestors(&g("a b c")).is_empty());
    }

    #[test]
    fn test_subgraph_keeps_ancestors_only() {
        let mut graph = diamond();
        graph.add_node(g("z"), NodeAttrs::real(9));
        graph.add_node(g("y z"), NodeAttrs::real(4));
        graph.add_edge(g("y z"), g("z"));

        let sub = graph.subgraph(&[g("a b")]).unwrap();
        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.edge_count(), 1);
        assert!(sub.contains_edge(&g("a b c"), &g("a b")));
        assert_eq!(sub.attrs(&g("a b")).unwrap().weight, 2);

        let both = graph.subgraph(&[g("b"), g("z")]).unwrap();
        assert_eq!(both.node_count(), 6);
        assert_eq!(both.edge_count(), 5);
    }

    #[test]
    fn test_subgraph_unknown_root() {
        let graph = diamond();
        let err = graph.subgraph(&[g("missing")]).unwrap_err();
        assert!(matches!(err, HierarchyError::UnknownNode(n) if n == g("missing")));
    }

    #[test]
    fn test_acyclic_detection() {
        let mut graph = diamond();
        assert!(graph.is_acyclic());
        graph.add_edge(g("b"), g("a b c"));
        assert!(!graph.is_acyclic());
    }

    #[test]
    fn test_edges_sorted() {
        let graph = diamond();
        let edges: Vec<_> = graph
            .edges()
            .map(|(a, b)| (a.text(), b.text()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("a b".to_string(), "b".to_string()),
                ("a b c".to_string(), "a b".to_string()),
                ("a b c".to_string(), "b c".to_string()),
                ("b c".to_string(), "b".to_string()),
            ]
        );
    }
}
