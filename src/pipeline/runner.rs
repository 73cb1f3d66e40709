//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! [`HierarchyPipeline::run`] takes per-document label sets through six
//! stages in order, threading artifacts between them and notifying an
//! optional [`PipelineObserver`] at each boundary:
//!
//! 1. Labels: validate and count surface labels
//! 2. Base forms: derive the token lemma map
//! 3. N-grams: lemmatize labels and count their sub-phrases
//! 4. Graph: build the containment graph
//! 5. Prune: remove transitive edges and synthetic pass-through nodes
//! 6. Support: aggregate ancestor support
//!
//! # Example
//!
//! ```
//! use label_hierarchy::pipeline::runner::HierarchyPipeline;
//! use label_hierarchy::types::Ngram;
//!
//! let result = HierarchyPipeline::new()
//!     .run(vec![vec!["quality control", "control"], vec!["access control"]])
//!     .unwrap();
//! let control = result.graph.attrs(&Ngram::from_phrase("control")).unwrap();
//! assert_eq!(control.ancestor_support, 2);
//! ```

use tracing::{debug, info, warn};

use crate::errors::{HierarchyError, Result};
use crate::graph::builder::HierarchyBuilder;
use crate::graph::prune::Pruner;
use crate::graph::support::add_ancestor_support;
use crate::ngram::NgramCounter;
use crate::nlp::lemma::BaseForms;
use crate::nlp::stopwords::StopwordFilter;
use crate::pipeline::artifacts::{LabelHierarchy, LabelInventory};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReportBuilder, STAGE_BASE_FORMS,
    STAGE_GRAPH, STAGE_LABELS, STAGE_NGRAMS, STAGE_PRUNE, STAGE_SUPPORT,
};
use crate::pipeline::spec::{HierarchySpec, RuntimeSpec};
use crate::pipeline::validation::ValidationEngine;

/// Enter a tracing span for a pipeline stage. The span closes at the end
/// of the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

fn check_limit(what: &'static str, limit: Option<usize>, actual: usize) -> Result<()> {
    match limit {
        Some(limit) if actual > limit => Err(HierarchyError::LimitExceeded {
            what,
            limit,
            actual,
        }),
        _ => Ok(()),
    }
}

/// Label hierarchy induction pipeline.
#[derive(Debug, Clone)]
pub struct HierarchyPipeline {
    stopwords: StopwordFilter,
    runtime: RuntimeSpec,
    prune: bool,
}

impl Default for HierarchyPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyPipeline {
    /// English stopwords, no limits, pruning on.
    pub fn new() -> Self {
        Self {
            stopwords: StopwordFilter::default(),
            runtime: RuntimeSpec::default(),
            prune: true,
        }
    }

    /// Build a pipeline from a validated spec.
    ///
    /// Specs with validation errors are refused with
    /// [`HierarchyError::InvalidSpec`]; warnings are logged and the spec is
    /// used as is.
    pub fn from_spec(spec: &HierarchySpec) -> Result<Self> {
        let report = ValidationEngine::with_defaults().validate(spec);
        if report.has_errors() {
            return Err(HierarchyError::InvalidSpec(report));
        }
        for warning in report.warnings() {
            warn!(code = %warning.code, path = %warning.path, "{}", warning.message);
        }

        Ok(Self {
            stopwords: spec.stopwords.build_filter(),
            runtime: spec.runtime.clone(),
            prune: true,
        })
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_runtime(mut self, runtime: RuntimeSpec) -> Self {
        self.runtime = runtime;
        self
    }

    /// Skip the pruning stage and keep the raw containment graph
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    pub fn runtime(&self) -> &RuntimeSpec {
        &self.runtime
    }

    /// Run the pipeline without an observer.
    pub fn run<I, L, S>(&self, label_sets: I) -> Result<LabelHierarchy>
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with_observer(label_sets, &mut NoopObserver)
    }

    /// Run the pipeline, reporting each stage to `observer`.
    pub fn run_with_observer<I, L, S>(
        &self,
        label_sets: I,
        observer: &mut impl PipelineObserver,
    ) -> Result<LabelHierarchy>
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // Stage 1: Labels
        let inventory = {
            trace_stage!(STAGE_LABELS);
            observer.on_stage_start(STAGE_LABELS);
            let clock = StageClock::start();
            let inventory = LabelInventory::from_label_sets(label_sets)?;
            check_limit("max_labels", self.runtime.max_labels, inventory.len())?;
            debug!(
                documents = inventory.documents(),
                labels = inventory.len(),
                "labels collected"
            );
            let report = StageReportBuilder::new(clock.elapsed())
                .items(inventory.len())
                .build();
            observer.on_stage_end(STAGE_LABELS, &report);
            inventory
        };
        let labels = inventory.labels();

        // Stage 2: Base forms
        let base_forms = {
            trace_stage!(STAGE_BASE_FORMS);
            observer.on_stage_start(STAGE_BASE_FORMS);
            let clock = StageClock::start();
            let base_forms = BaseForms::from_labels(labels.iter().copied());
            debug!(mapped = base_forms.len(), "base forms derived");
            let report = StageReportBuilder::new(clock.elapsed())
                .items(base_forms.len())
                .build();
            observer.on_stage_end(STAGE_BASE_FORMS, &report);
            base_forms
        };

        // Stage 3: N-grams
        let counts = {
            trace_stage!(STAGE_NGRAMS);
            observer.on_stage_start(STAGE_NGRAMS);
            let clock = StageClock::start();
            let counts = NgramCounter::new(self.stopwords.clone())
                .with_parallel(self.runtime.parallel)
                .count(&labels, &base_forms);
            check_limit("max_ngrams", self.runtime.max_ngrams, counts.len())?;
            debug!(ngrams = counts.len(), "n-grams counted");
            let report = StageReportBuilder::new(clock.elapsed())
                .items(counts.len())
                .build();
            observer.on_stage_end(STAGE_NGRAMS, &report);
            observer.on_counts(&counts);
            counts
        };

        // Stage 4: Graph
        let mut graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let graph = HierarchyBuilder::new()
                .with_parallel(self.runtime.parallel)
                .build(&counts, inventory.counts());
            debug!(
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "containment graph built"
            );
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(graph.node_count())
                .edges(graph.edge_count())
                .build();
            observer.on_stage_end(STAGE_GRAPH, &report);
            observer.on_graph(&graph);
            graph
        };

        // Stage 5: Prune
        let prune_stats = if self.prune {
            trace_stage!(STAGE_PRUNE);
            observer.on_stage_start(STAGE_PRUNE);
            let clock = StageClock::start();
            let stats = Pruner::new().prune(&mut graph);
            debug!(
                rounds = stats.rounds,
                transitive = stats.transitive_edges_removed,
                synthetic = stats.synthetic_nodes_removed,
                rewired = stats.edges_rewired,
                "graph pruned"
            );
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(graph.node_count())
                .edges(graph.edge_count())
                .rounds(stats.rounds)
                .build();
            observer.on_stage_end(STAGE_PRUNE, &report);
            observer.on_pruned(&graph, &stats);
            Some(stats)
        } else {
            None
        };

        // Stage 6: Support
        {
            trace_stage!(STAGE_SUPPORT);
            observer.on_stage_start(STAGE_SUPPORT);
            let clock = StageClock::start();
            add_ancestor_support(&mut graph);
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(graph.node_count())
                .build();
            observer.on_stage_end(STAGE_SUPPORT, &report);
        }

        info!(
            labels = inventory.len(),
            ngrams = counts.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "label hierarchy built"
        );

        Ok(LabelHierarchy {
            label_count: inventory.len(),
            ngram_count: counts.len(),
            graph,
            prune_stats,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
