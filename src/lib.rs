//! # label-hierarchy
//!
//! Induces a generalization hierarchy over a flat vocabulary of
//! multi-label classification labels. Labels are reduced to base forms,
//! every contiguous sub-phrase becomes a candidate node, and an edge
//! `specific → general` links each n-gram to the shorter n-grams it
//! contains. A fixed-point pruner then removes transitive shortcuts and
//! pass-through scaffolding nodes, and every surviving node is annotated
//! with the corpus weight of the labels that specialize it.
//!
//! ## Quick start
//!
//! ```
//! use label_hierarchy::{HierarchyPipeline, Ngram};
//!
//! let labels = vec![
//!     vec!["quality control"],
//!     vec!["control"],
//!     vec!["access control"],
//! ];
//! let result = HierarchyPipeline::new().run(labels).unwrap();
//!
//! assert_eq!(result.roots(), vec![&Ngram::from_phrase("control")]);
//! let control = result.graph.attrs(&Ngram::from_phrase("control")).unwrap();
//! assert_eq!(control.ancestor_support, 2);
//! ```
//!
//! ## Modules
//!
//! - [`nlp`]: tokenization, base forms and stopwords
//! - [`ngram`]: n-gram enumeration and counting
//! - [`graph`]: the containment graph, pruning and ancestor support
//! - [`pipeline`]: configuration, validation and the staged runner
//! - [`corpus`] / [`export`]: JSON-lines input and node-link JSON output

pub mod corpus;
pub mod errors;
pub mod export;
pub mod graph;
pub mod ngram;
pub mod nlp;
pub mod pipeline;
pub mod types;

pub use corpus::LabelCorpus;
pub use errors::{HierarchyError, Result};
pub use export::NodeLinkGraph;
pub use graph::{HierarchyBuilder, HierarchyGraph, PruneStats, Pruner};
pub use pipeline::{HierarchyPipeline, HierarchySpec, LabelHierarchy};
pub use types::{LabelCounts, Ngram, NodeAttrs};
