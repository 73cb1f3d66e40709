//! Label n-gram extraction
//!
//! This module turns labels into counted n-grams, the candidate nodes of
//! the hierarchy.

pub mod counter;

pub use counter::{ngrams, passes_boundary_filter, NgramCounter, NgramCounts};
