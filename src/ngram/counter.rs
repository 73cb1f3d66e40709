//! N-gram extraction and counting
//!
//! Every label is lemmatized and every contiguous sub-tuple of its lemma is
//! enumerated. The full lemma is always counted. Shorter n-grams must pass
//! the boundary filter: neither the first nor the last token may be a
//! stopword, which also rejects n-grams made only of stopwords. Interior
//! stopwords are allowed, so "change of control" survives while "of
//! control" does not.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};

use crate::nlp::lemma::BaseForms;
use crate::nlp::stopwords::StopwordFilter;
use crate::types::Ngram;

/// Below this many labels the parallel counter falls back to sequential
const PARALLEL_THRESHOLD: usize = 512;

/// Enumerate every contiguous, non-empty sub-slice of `tokens`.
///
/// Yields all start positions × all lengths, shortest first per start.
pub fn ngrams(tokens: &[String]) -> impl Iterator<Item = &[String]> + '_ {
    let n = tokens.len();
    (0..n).flat_map(move |start| (start + 1..=n).map(move |end| &tokens[start..end]))
}

/// Whether a partial n-gram may become a hierarchy node
pub fn passes_boundary_filter(ngram: &[String], stopwords: &StopwordFilter) -> bool {
    match (ngram.first(), ngram.last()) {
        (Some(first), Some(last)) => !stopwords.is_stopword(first) && !stopwords.is_stopword(last),
        _ => false,
    }
}

/// Output of the counting stage
#[derive(Debug, Clone, Default)]
pub struct NgramCounts {
    counts: FxHashMap<Ngram, u64>,
    label_lemma: BTreeMap<String, Ngram>,
    label_set_lemmas: BTreeSet<Ngram>,
}

impl NgramCounts {
    /// Occurrences of `ngram` across all labels (0 if never counted)
    pub fn count(&self, ngram: &Ngram) -> u64 {
        self.counts.get(ngram).copied().unwrap_or(0)
    }

    /// Number of distinct counted n-grams
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counted n-grams in sorted order
    pub fn sorted_ngrams(&self) -> Vec<&Ngram> {
        let mut grams: Vec<&Ngram> = self.counts.keys().collect();
        grams.sort();
        grams
    }

    /// Lemma recorded for `label`
    pub fn lemma_of(&self, label: &str) -> Option<&Ngram> {
        self.label_lemma.get(label)
    }

    /// Whether `ngram` is the full lemma of some label
    pub fn is_label_lemma(&self, ngram: &Ngram) -> bool {
        self.label_set_lemmas.contains(ngram)
    }

    /// All label lemmas in sorted order
    pub fn label_lemmas(&self) -> &BTreeSet<Ngram> {
        &self.label_set_lemmas
    }

    fn absorb(&mut self, label: &str, lemma: Ngram, partial: FxHashMap<Ngram, u64>) {
        for (gram, count) in partial {
            *self.counts.entry(gram).or_insert(0) += count;
        }
        self.label_set_lemmas.insert(lemma.clone());
        self.label_lemma.insert(label.to_string(), lemma);
    }
}

/// Counts label n-grams under a stopword filter
#[derive(Debug, Clone, Default)]
pub struct NgramCounter {
    stopwords: StopwordFilter,
    parallel: bool,
}

impl NgramCounter {
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self {
            stopwords,
            parallel: false,
        }
    }

    /// Count labels on the rayon pool when there are enough of them
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    /// Lemmatize and count every label.
    ///
    /// Labels are expected to be distinct and non-empty; duplicates count
    /// their n-grams once per occurrence.
    pub fn count(&self, labels: &[&str], base_forms: &BaseForms) -> NgramCounts {
        let mut out = NgramCounts::default();

        if self.parallel && labels.len() >= PARALLEL_THRESHOLD {
            let partials: Vec<_> = labels
                .par_iter()
                .map(|&label| {
                    let lemma = base_forms.lemmatize(label);
                    let partial = self.count_lemma(&lemma);
                    (label, lemma, partial)
                })
                .collect();
            for (label, lemma, partial) in partials {
                out.absorb(label, lemma, partial);
            }
        } else {
            for &label in labels {
                let lemma = base_forms.lemmatize(label);
                let partial = self.count_lemma(&lemma);
                out.absorb(label, lemma, partial);
            }
        }

        out
    }

    /// Count the n-grams of a single lemma
    fn count_lemma(&self, lemma: &Ngram) -> FxHashMap<Ngram, u64> {
        let mut counts = FxHashMap::default();
        let whole = lemma.tokens();

        for gram in ngrams(whole) {
            if gram.len() == whole.len() || passes_boundary_filter(gram, &self.stopwords) {
                *counts.entry(Ngram::from(gram)).or_insert(0) += 1;
            }
        }

        counts
    }
}
