//! Stopword filtering for label n-grams
//!
//! Stopwords decide which sub-phrases of a label may become hierarchy
//! nodes: an n-gram that starts or ends with a stopword is dropped, while
//! interior stopwords ("change of control") are kept. Word lists are the
//! NLTK lists from the `stop-words` crate, with support for custom lists
//! and overrides.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// A filter answering "is this token a stopword?"
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase unless case-sensitive)
    stopwords: FxHashSet<String>,
    case_sensitive: bool,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl StopwordFilter {
    /// Create a filter for the given language code or name.
    ///
    /// Unknown languages fall back to English; use
    /// [`StopwordFilter::is_supported_language`] to detect that case.
    pub fn new(language: &str) -> Self {
        let lang = lookup_language(language).unwrap_or(LANGUAGE::English);
        Self {
            stopwords: get(lang).iter().map(|s| s.to_string()).collect(),
            case_sensitive: false,
        }
    }

    /// Create an empty filter (no token is a stopword)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
            case_sensitive: false,
        }
    }

    /// Create a filter from a custom word list
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.as_ref().to_lowercase()).collect(),
            case_sensitive: false,
        }
    }

    /// Whether `language` maps to a bundled stopword list
    pub fn is_supported_language(language: &str) -> bool {
        lookup_language(language).is_some()
    }

    /// Set case sensitivity
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Add stopwords
    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.insert(self.normalize(word.as_ref()));
        }
    }

    /// Remove stopwords, e.g. domain words the bundled list over-filters
    pub fn remove_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            let key = self.normalize(word.as_ref());
            self.stopwords.remove(&key);
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.stopwords.contains(word)
        } else {
            self.stopwords.contains(&word.to_lowercase())
        }
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn normalize(&self, word: &str) -> String {
        if self.case_sensitive {
            word.to_string()
        } else {
            word.to_lowercase()
        }
    }
}

fn lookup_language(language: &str) -> Option<LANGUAGE> {
    let lang = match language.to_lowercase().as_str() {
        "en" | "english" => LANGUAGE::English,
        "de" | "german" => LANGUAGE::German,
        "fr" | "french" => LANGUAGE::French,
        "es" | "spanish" => LANGUAGE::Spanish,
        "it" | "italian" => LANGUAGE::Italian,
        "pt" | "portuguese" => LANGUAGE::Portuguese,
        "nl" | "dutch" => LANGUAGE::Dutch,
        "sv" | "swedish" => LANGUAGE::Swedish,
        "da" | "danish" => LANGUAGE::Danish,
        "fi" | "finnish" => LANGUAGE::Finnish,
        "no" | "norwegian" => LANGUAGE::Norwegian,
        _ => return None,
    };
    Some(lang)
}
