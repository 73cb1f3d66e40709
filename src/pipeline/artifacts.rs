//! Pipeline artifacts.
//!
//! [`LabelInventory`] is the validated input flowing into the n-gram stage;
//! [`LabelHierarchy`] is what a run hands back.

use crate::errors::Result;
use crate::graph::hierarchy::HierarchyGraph;
use crate::graph::prune::PruneStats;
use crate::nlp::tokenizer::checked_tokens;
use crate::types::{LabelCounts, Ngram};

/// Distinct labels of a corpus together with their occurrence counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelInventory {
    counts: LabelCounts,
    documents: usize,
}

impl LabelInventory {
    /// Collect labels from per-document label sets.
    ///
    /// Every occurrence counts, including repeats within one document.
    /// Fails on the first label with no tokens.
    pub fn from_label_sets<I, L, S>(label_sets: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = LabelCounts::new();
        let mut documents = 0;

        for (document, labels) in label_sets.into_iter().enumerate() {
            documents += 1;
            for label in labels {
                let label = label.as_ref();
                checked_tokens(label, document)?;
                *counts.entry(label.to_string()).or_insert(0) += 1;
            }
        }

        Ok(Self { counts, documents })
    }

    /// Occurrences per distinct label
    pub fn counts(&self) -> &LabelCounts {
        &self.counts
    }

    /// Distinct labels in sorted order
    pub fn labels(&self) -> Vec<&str> {
        self.counts.keys().map(String::as_str).collect()
    }

    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct LabelHierarchy {
    pub graph: HierarchyGraph,
    /// `None` when pruning was disabled
    pub prune_stats: Option<PruneStats>,
    pub label_count: usize,
    pub ngram_count: usize,
}

impl LabelHierarchy {
    pub fn graph(&self) -> &HierarchyGraph {
        &self.graph
    }

    pub fn into_graph(self) -> HierarchyGraph {
        self.graph
    }

    pub fn roots(&self) -> Vec<&Ngram> {
        self.graph.roots()
    }

    /// Sub-hierarchy below the given label lemmas
    pub fn subgraph(&self, roots: &[Ngram]) -> Result<HierarchyGraph> {
        self.graph.subgraph(roots)
    }
}
