//! Core value types shared by every hierarchy stage
//!
//! An [`Ngram`] is both the unit of counting and the identity of a graph
//! node. Node identity is the token tuple itself, so two n-grams built from
//! different labels compare, hash and sort equal whenever their tokens do.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Occurrence count of each label across the corpus documents.
pub type LabelCounts = BTreeMap<String, u64>;

/// An ordered tuple of base-formed tokens.
///
/// Ordering is lexicographic over tokens, with a proper prefix sorting
/// before its extensions. Every map and set keyed by `Ngram` in this crate
/// iterates in this order, which makes graph output reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ngram(Vec<String>);

impl Ngram {
    /// Wrap a token sequence
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    /// Split a phrase on whitespace without any base-form resolution
    pub fn from_phrase(phrase: &str) -> Self {
        Self(phrase.split_whitespace().map(str::to_string).collect())
    }

    /// The tokens of this n-gram
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `other` is a contiguous sub-tuple of `self` with strictly
    /// fewer tokens.
    pub fn generalizes_to(&self, other: &Ngram) -> bool {
        other.len() < self.len() && contains_subsequence(&self.0, &other.0)
    }

    /// Tokens joined by single spaces
    pub fn text(&self) -> String {
        self.0.join(" ")
    }
}

impl fmt::Display for Ngram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

impl From<&[String]> for Ngram {
    fn from(tokens: &[String]) -> Self {
        Self(tokens.to_vec())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Ngram {
    fn from(tokens: [S; N]) -> Self {
        Self(tokens.into_iter().map(Into::into).collect())
    }
}

/// Check whether `needle` occurs contiguously inside `haystack`.
///
/// Every offset `0..=haystack.len() - needle.len()` is tested. An empty
/// needle never matches.
pub fn contains_subsequence(haystack: &[String], needle: &[String]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Attributes carried by every hierarchy node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttrs {
    /// The n-gram equals the full lemma of at least one label
    pub real_label: bool,
    /// Summed corpus count of the labels lemmatizing to this n-gram
    pub weight: u64,
    /// Summed weight of every node that reaches this one, excluding itself
    pub ancestor_support: u64,
}

impl NodeAttrs {
    /// Attributes of a node that equals a label lemma
    pub fn real(weight: u64) -> Self {
        Self {
            real_label: true,
            weight,
            ancestor_support: 0,
        }
    }

    /// Attributes of a scaffolding n-gram that never forms a whole label
    pub fn synthetic() -> Self {
        Self::default()
    }
}
