//! Hierarchy graph construction from counted n-grams
//!
//! Every counted n-gram becomes a node. N-grams are bucketed by length and
//! each n-gram is compared against every strictly shorter bucket, not just
//! the adjacent one: `a → b` is added whenever `b` occurs contiguously in
//! `a`, so a long n-gram can skip lengths for which no intermediate span
//! was counted.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::hierarchy::HierarchyGraph;
use crate::ngram::NgramCounts;
use crate::types::{LabelCounts, Ngram, NodeAttrs};

/// Below this many n-grams edge discovery runs sequentially
const PARALLEL_THRESHOLD: usize = 1000;

/// Builds the unpruned hierarchy
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyBuilder {
    parallel: bool,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover edges on the rayon pool for large vocabularies
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the graph.
    ///
    /// `label_counts` holds the corpus occurrences of each surface label;
    /// labels sharing a lemma add their counts into that node's weight.
    pub fn build(&self, counts: &NgramCounts, label_counts: &LabelCounts) -> HierarchyGraph {
        let weights = lemma_weights(counts, label_counts);

        let mut graph = HierarchyGraph::new();
        for gram in counts.sorted_ngrams() {
            let attrs = if counts.is_label_lemma(gram) {
                NodeAttrs::real(weights.get(gram).copied().unwrap_or(0))
            } else {
                NodeAttrs::synthetic()
            };
            graph.add_node(gram.clone(), attrs);
        }

        let buckets = bucket_by_length(counts.sorted_ngrams());
        for (specific, general) in self.discover_edges(&buckets, counts.len()) {
            graph.add_edge(specific.clone(), general.clone());
        }

        graph
    }

    fn discover_edges<'a>(
        &self,
        buckets: &[Vec<&'a Ngram>],
        total: usize,
    ) -> Vec<(&'a Ngram, &'a Ngram)> {
        let jobs: Vec<(usize, &'a Ngram)> = buckets
            .iter()
            .enumerate()
            .flat_map(|(i, bucket)| bucket.iter().map(move |&gram| (i, gram)))
            .collect();

        if self.parallel && total >= PARALLEL_THRESHOLD {
            jobs.par_iter()
                .flat_map_iter(|&(i, gram)| containment_edges(gram, &buckets[i + 1..]))
                .collect()
        } else {
            jobs.iter()
                .flat_map(|&(i, gram)| containment_edges(gram, &buckets[i + 1..]))
                .collect()
        }
    }
}

/// Group n-grams by token length, longest bucket first
fn bucket_by_length(grams: Vec<&Ngram>) -> Vec<Vec<&Ngram>> {
    let mut by_len: FxHashMap<usize, Vec<&Ngram>> = FxHashMap::default();
    for gram in grams {
        by_len.entry(gram.len()).or_default().push(gram);
    }

    let mut lengths: Vec<usize> = by_len.keys().copied().collect();
    lengths.sort_unstable_by(|a, b| b.cmp(a));
    lengths
        .into_iter()
        .filter_map(|len| by_len.remove(&len))
        .collect()
}

/// Edges from `specific` to every contained n-gram in the shorter buckets
fn containment_edges<'a>(
    specific: &'a Ngram,
    shorter: &[Vec<&'a Ngram>],
) -> Vec<(&'a Ngram, &'a Ngram)> {
    shorter
        .iter()
        .flatten()
        .filter(|general| specific.generalizes_to(general))
        .map(|&general| (specific, general))
        .collect()
}

fn lemma_weights<'a>(
    counts: &'a NgramCounts,
    label_counts: &LabelCounts,
) -> FxHashMap<&'a Ngram, u64> {
    let mut weights: FxHashMap<&Ngram, u64> = FxHashMap::default();
    for (label, &count) in label_counts {
        if let Some(lemma) = counts.lemma_of(label) {
            *weights.entry(lemma).or_insert(0) += count;
        }
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::NgramCounter;
    use crate::nlp::lemma::BaseForms;
    use crate::nlp::stopwords::StopwordFilter;

    fn g(words: &str) -> Ngram {
        Ngram::from_phrase(words)
    }

    fn build(labels: &[(&str, u64)]) -> HierarchyGraph {
        let names: Vec<&str> = labels.iter().map(|(l, _)| *l).collect();
        let forms = BaseForms::from_labels(names.iter().copied());
        let counts = NgramCounter::new(StopwordFilter::from_list(&["of", "the"]))
            .count(&names, &forms);
        let label_counts: LabelCounts = labels.iter().map(|(l, c)| (l.to_string(), *c)).collect();
        HierarchyBuilder::new().build(&counts, &label_counts)
    }

    #[test]
    fn test_quality_access_control() {
        let graph = build(&[("quality control", 1), ("control", 1), ("access control", 1)]);

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.contains_edge(&g("quality control"), &g("control")));
        assert!(graph.contains_edge(&g("quality control"), &g("quality")));
        assert!(graph.contains_edge(&g("access control"), &g("control")));
        assert!(graph.contains_edge(&g("access control"), &g("access")));

        assert!(graph.attrs(&g("control")).unwrap().real_label);
        assert!(graph.attrs(&g("quality control")).unwrap().real_label);
        assert!(!graph.attrs(&g("quality")).unwrap().real_label);
        assert!(!graph.attrs(&g("access")).unwrap().real_label);
        assert_eq!(graph.attrs(&g("access")).unwrap().weight, 0);
    }

    #[test]
    fn test_edges_skip_lengths() {
        // "of" is a stopword, so "change of" and "of control" are never
        // counted and the 3-gram links straight to the 1-grams.
        let graph = build(&[("change of control", 1)]);

        assert!(graph.contains_edge(&g("change of control"), &g("change")));
        assert!(graph.contains_edge(&g("change of control"), &g("control")));
        assert!(!graph.contains_node(&g("of control")));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_all_length_pairs_connected() {
        let graph = build(&[("a b c", 1)]);

        // 3 -> 2, 3 -> 1 and 2 -> 1 edges all exist before pruning
        assert!(graph.contains_edge(&g("a b c"), &g("a b")));
        assert!(graph.contains_edge(&g("a b c"), &g("b")));
        assert!(graph.contains_edge(&g("a b"), &g("b")));
        assert!(!graph.contains_edge(&g("a b"), &g("c")));
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 3 + 2 + 2 + 2);
    }

    #[test]
    fn test_weights_sum_over_shared_lemma() {
        let graph = build(&[("notices", 4), ("notice", 3), ("notice period", 2)]);

        assert_eq!(graph.attrs(&g("notice")).unwrap().weight, 7);
        assert_eq!(graph.attrs(&g("notice period")).unwrap().weight, 2);
        assert!(!graph.contains_node(&g("notices")));
    }

    #[test]
    fn test_isolated_label_is_a_node() {
        let graph = build(&[("indemnification", 5)]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.roots(), vec![&g("indemnification")]);
    }

    #[test]
    fn test_empty_input() {
        let graph = build(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let owned: Vec<String> = (0..1200)
            .map(|i| format!("term{} clause{} review{}", i % 13, i % 11, i % 9))
            .collect();
        let names: Vec<&str> = owned.iter().map(String::as_str).collect();
        let forms = BaseForms::from_labels(names.iter().copied());
        let counts = NgramCounter::new(StopwordFilter::empty()).count(&names, &forms);
        let label_counts: LabelCounts = owned.iter().map(|l| (l.clone(), 1)).collect();

        let seq = HierarchyBuilder::new().build(&counts, &label_counts);
        let par = HierarchyBuilder::new()
            .with_parallel(true)
            .build(&counts, &label_counts);

        assert!(counts.len() >= PARALLEL_THRESHOLD);
        assert_eq!(seq, par);
        assert!(seq.is_acyclic());
    }
}
