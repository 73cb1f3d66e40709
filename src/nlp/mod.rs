//! Natural Language Processing components
//!
//! This module provides label tokenization, base-form resolution and
//! stopword filtering.

pub mod lemma;
pub mod stopwords;
pub mod tokenizer;
