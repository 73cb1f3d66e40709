//! Pipeline orchestration: configuration, validation, stage execution and
//! observation.
//!
//! Most callers only need [`runner::HierarchyPipeline`]. A
//! [`spec::HierarchySpec`] loaded from JSON configures it after passing the
//! [`validation::ValidationEngine`].

pub mod artifacts;
pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod validation;

pub use artifacts::{LabelHierarchy, LabelInventory};
pub use observer::{NoopObserver, PipelineObserver, StageReport, TracingObserver};
pub use runner::HierarchyPipeline;
pub use spec::HierarchySpec;
