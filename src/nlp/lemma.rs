//! Base-form resolution over the label vocabulary
//!
//! A token is singularized only when its singular spelling is itself a
//! token somewhere in the vocabulary, so "notices" maps to "notice" only if
//! some label uses "notice". Two rules apply, in order:
//!
//! 1. `<t>s` → `<t>`
//! 2. `<t>ies` → `<t>y`
//!
//! Resolution is a single lookup; chains are never followed.

use rustc_hash::{FxHashMap, FxHashSet};

use super::tokenizer::tokenize_label;
use crate::types::Ngram;

/// Mapping from surface token to base form
#[derive(Debug, Clone, Default)]
pub struct BaseForms {
    forms: FxHashMap<String, String>,
}

impl BaseForms {
    /// Derive base forms from every token of every label
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let vocabulary: FxHashSet<&str> = labels
            .into_iter()
            .flat_map(|label| label.split_whitespace())
            .collect();
        Self::from_vocabulary(&vocabulary)
    }

    /// Derive base forms from an explicit token vocabulary
    pub fn from_vocabulary(vocabulary: &FxHashSet<&str>) -> Self {
        let mut forms = FxHashMap::default();

        for &token in vocabulary {
            if let Some(stem) = token.strip_suffix('s') {
                if vocabulary.contains(stem) {
                    forms.insert(token.to_string(), stem.to_string());
                    continue;
                }
            }
            if let Some(stem) = token.strip_suffix("ies") {
                let singular = format!("{stem}y");
                if vocabulary.contains(singular.as_str()) {
                    forms.insert(token.to_string(), singular);
                }
            }
        }

        Self { forms }
    }

    /// Base form of `token`, or the token itself when unmapped
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.forms.get(token).map(String::as_str).unwrap_or(token)
    }

    /// Tokenize a label and resolve every token
    pub fn lemmatize(&self, label: &str) -> Ngram {
        Ngram::new(
            tokenize_label(label)
                .into_iter()
                .map(|token| self.resolve(token).to_string())
                .collect(),
        )
    }

    /// Number of tokens with a distinct base form
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Iterate over `(surface, base)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forms.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
