//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.

use std::time::{Duration, Instant};

use crate::graph::hierarchy::HierarchyGraph;
use crate::graph::prune::PruneStats;
use crate::ngram::NgramCounts;

// ─── Stage names ────────────────────────────────────────────────────────────

pub const STAGE_LABELS: &str = "labels";
pub const STAGE_BASE_FORMS: &str = "base_forms";
pub const STAGE_NGRAMS: &str = "ngrams";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_PRUNE: &str = "prune";
pub const STAGE_SUPPORT: &str = "support";

// ─── Stage reports ──────────────────────────────────────────────────────────

/// Measures wall-clock time for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What a stage did, as reported to observers.
///
/// Only timing is always present; the remaining counters are filled in by
/// the stages they apply to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    items: Option<usize>,
    nodes: Option<usize>,
    edges: Option<usize>,
    rounds: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Labels, base forms or n-grams produced by the stage
    pub fn items(&self) -> Option<usize> {
        self.items
    }

    pub fn nodes(&self) -> Option<usize> {
        self.nodes
    }

    pub fn edges(&self) -> Option<usize> {
        self.edges
    }

    /// Pruning rounds until the fixed point
    pub fn rounds(&self) -> Option<usize> {
        self.rounds
    }
}

/// Fluent construction of a [`StageReport`].
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn items(mut self, items: usize) -> Self {
        self.report.items = Some(items);
        self
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn rounds(mut self, rounds: usize) -> Self {
        self.report.rounds = Some(rounds);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

// ─── Observer trait ─────────────────────────────────────────────────────────

/// Callbacks invoked by [`super::runner::HierarchyPipeline`].
///
/// Every method has an empty default, so implementors override only what
/// they need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Called once n-gram counting has finished.
    fn on_counts(&mut self, _counts: &NgramCounts) {}

    /// Called with the unpruned containment graph.
    fn on_graph(&mut self, _graph: &HierarchyGraph) {}

    fn on_pruned(&mut self, _graph: &HierarchyGraph, _stats: &PruneStats) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Records the report of every finished stage, in order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Summed time across all recorded stages
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

/// Emits one `tracing` event per finished stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        tracing::info!(
            stage,
            elapsed_us = report.elapsed().as_micros() as u64,
            items = report.items(),
            nodes = report.nodes(),
            edges = report.edges(),
            rounds = report.rounds(),
            "stage finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_only_requested_fields() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .nodes(4)
            .edges(2)
            .build();
        assert_eq!(report.elapsed(), Duration::from_millis(3));
        assert_eq!(report.nodes(), Some(4));
        assert_eq!(report.edges(), Some(2));
        assert_eq!(report.items(), None);
        assert_eq!(report.rounds(), None);
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_start(STAGE_GRAPH);
        obs.on_stage_end(STAGE_GRAPH, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_PRUNE, &StageReport::new(Duration::from_millis(2)));

        let names: Vec<&str> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![STAGE_GRAPH, STAGE_PRUNE]);
        assert_eq!(obs.total(), Duration::from_millis(3));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = StageClock::start();
        let first = clock.elapsed();
        assert!(clock.elapsed() >= first);
    }
}
