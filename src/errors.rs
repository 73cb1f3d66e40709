//! Crate-level error type

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::validation::ValidationReport;
use crate::types::Ngram;

/// Errors raised while loading labels, configuring, or building a hierarchy.
///
/// The hierarchy stages themselves are total over validated input; every
/// variant here comes from malformed input, a configured limit, or I/O at
/// the edges.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// A label produced no tokens after whitespace tokenization.
    #[error("invalid label {label:?} in document {document}: label has no tokens")]
    InvalidLabel { label: String, document: usize },

    /// The hierarchy spec failed validation.
    #[error("invalid hierarchy spec: {}", .0.summary())]
    InvalidSpec(ValidationReport),

    /// A runtime limit from the spec was exceeded.
    #[error("{what} limit exceeded: {actual} > {limit}")]
    LimitExceeded {
        what: &'static str,
        limit: usize,
        actual: usize,
    },

    /// A requested node does not exist in the graph.
    #[error("node {0} is not in the hierarchy")]
    UnknownNode(Ngram),

    /// A corpus or spec file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be created.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A corpus line was not a valid labeled record.
    #[error("malformed corpus record at line {line}: {source}")]
    Corpus {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
