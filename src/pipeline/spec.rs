//! Hierarchy pipeline specification types.
//!
//! A [`HierarchySpec`] selects the stopword list, runtime limits, and
//! strictness settings for a run. These types are the input to the
//! [`super::validation::ValidationEngine`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "stopwords": { "language": "en", "extra": ["other"], "remove": [] },
//!   "runtime": { "max_labels": 10000, "parallel": true },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{HierarchyError, Result};
use crate::nlp::stopwords::StopwordFilter;

/// Spec version understood by this crate.
pub const SPEC_VERSION: u32 = 1;

/// Top-level hierarchy specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchySpec {
    /// Spec version (currently `1`).
    pub v: u32,

    #[serde(default)]
    pub stopwords: StopwordSpec,

    #[serde(default)]
    pub runtime: RuntimeSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for HierarchySpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            stopwords: StopwordSpec::default(),
            runtime: RuntimeSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl HierarchySpec {
    /// Parse a spec from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a spec file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HierarchyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Which words may not open or close a partial n-gram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopwordSpec {
    /// Language code or name of the bundled list (default `"en"`).
    #[serde(default = "default_language")]
    pub language: String,

    /// Words added to the bundled list.
    #[serde(default)]
    pub extra: Vec<String>,

    /// Words removed from the bundled list.
    #[serde(default)]
    pub remove: Vec<String>,

    #[serde(default)]
    pub case_sensitive: bool,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for StopwordSpec {
    fn default() -> Self {
        Self {
            language: default_language(),
            extra: Vec::new(),
            remove: Vec::new(),
            case_sensitive: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl StopwordSpec {
    /// Materialize the configured stopword filter
    pub fn build_filter(&self) -> StopwordFilter {
        let mut filter =
            StopwordFilter::new(&self.language).with_case_sensitive(self.case_sensitive);
        filter.add_stopwords(self.extra.as_slice());
        filter.remove_stopwords(self.remove.as_slice());
        filter
    }
}

/// Runtime execution limits (fail-fast guards).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeSpec {
    /// Maximum number of distinct labels before rejecting.
    #[serde(default)]
    pub max_labels: Option<usize>,

    /// Maximum number of counted n-grams before rejecting.
    #[serde(default)]
    pub max_ngrams: Option<usize>,

    /// Allow counting, edge discovery and aggregation on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_parallel() -> bool {
    true
}

impl Default for RuntimeSpec {
    fn default() -> Self {
        Self {
            max_labels: None,
            max_ngrams: None,
            parallel: default_parallel(),
            unknown_fields: HashMap::new(),
        }
    }
}
