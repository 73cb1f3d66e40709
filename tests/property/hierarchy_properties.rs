use std::collections::BTreeSet;

use label_hierarchy::graph::support::ancestor_support;
use label_hierarchy::nlp::lemma::BaseForms;
use label_hierarchy::{HierarchyGraph, HierarchyPipeline, Ngram, Pruner};
use proptest::prelude::*;

const VOCAB: &[&str] = &[
    "access", "control", "controls", "quality", "data", "policy", "policies", "risk", "of", "the",
    "management",
];

fn label() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 1..=4).prop_map(|words| words.join(" "))
}

fn corpus() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(label(), 0..4), 0..10)
}

fn reaches(graph: &HierarchyGraph, from: &Ngram, to: &Ngram) -> bool {
    let mut stack = vec![from];
    let mut seen = BTreeSet::new();
    while let Some(node) = stack.pop() {
        for next in graph.successors(node) {
            if next == to {
                return true;
            }
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    false
}

proptest! {
    #[test]
    fn graph_is_acyclic_before_and_after_pruning(docs in corpus()) {
        let raw = HierarchyPipeline::new().with_pruning(false).run(&docs).unwrap();
        let pruned = HierarchyPipeline::new().run(&docs).unwrap();
        prop_assert!(raw.graph.is_acyclic());
        prop_assert!(pruned.graph.is_acyclic());
    }

    #[test]
    fn edges_point_to_contained_shorter_ngrams(docs in corpus()) {
        for prune in [false, true] {
            let result = HierarchyPipeline::new().with_pruning(prune).run(&docs).unwrap();
            for (from, to) in result.graph.edges() {
                prop_assert!(from.generalizes_to(to), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn pruning_is_idempotent(docs in corpus()) {
        let pruned = HierarchyPipeline::new().run(&docs).unwrap().into_graph();
        let mut again = pruned.clone();
        let stats = Pruner::new().prune(&mut again);
        prop_assert_eq!(&again, &pruned);
        prop_assert_eq!(stats.rounds, 1);
        prop_assert_eq!(stats.transitive_edges_removed, 0);
        prop_assert_eq!(stats.synthetic_nodes_removed, 0);
    }

    #[test]
    fn roots_have_no_remaining_generalization(docs in corpus()) {
        let graph = HierarchyPipeline::new().run(&docs).unwrap().into_graph();
        for root in graph.roots() {
            for (other, _) in graph.nodes() {
                prop_assert!(!root.generalizes_to(other), "root {} contains {}", root, other);
            }
        }
    }

    #[test]
    fn every_label_lemma_survives_pruning(docs in corpus()) {
        let graph = HierarchyPipeline::new().run(&docs).unwrap().into_graph();
        let base_forms = BaseForms::from_labels(docs.iter().flatten().map(String::as_str));
        for label in docs.iter().flatten() {
            let lemma = base_forms.lemmatize(label);
            let attrs = graph.attrs(&lemma);
            prop_assert!(attrs.is_some_and(|a| a.real_label), "missing {}", lemma);
        }
    }

    #[test]
    fn ancestor_support_sums_strict_ancestors(docs in corpus(), prune in any::<bool>()) {
        let graph = HierarchyPipeline::new().with_pruning(prune).run(&docs).unwrap().into_graph();
        for (node, attrs) in graph.nodes() {
            let expected: u64 = graph
                .nodes()
                .filter(|(other, _)| *other != node && reaches(&graph, other, node))
                .map(|(_, a)| a.weight)
                .sum();
            prop_assert_eq!(attrs.ancestor_support, expected);
            prop_assert_eq!(ancestor_support(&graph, node), expected);
        }
    }

    #[test]
    fn total_weight_equals_label_occurrences(docs in corpus()) {
        let graph = HierarchyPipeline::new().run(&docs).unwrap().into_graph();
        let total: u64 = graph.nodes().map(|(_, a)| a.weight).sum();
        let occurrences = docs.iter().map(Vec::len).sum::<usize>() as u64;
        prop_assert_eq!(total, occurrences);
    }
}
