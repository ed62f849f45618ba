//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Every hook has an empty default, so an observer only
//! implements what it cares about.

use std::time::{Duration, Instant};

use crate::graph::cooccurrence::CooccurrenceCounts;
use crate::graph::network::IngredientNetwork;

pub const STAGE_CANONICALIZE: &str = "canonicalize";
pub const STAGE_AGGREGATE: &str = "aggregate";
pub const STAGE_NETWORK: &str = "network";
pub const STAGE_TIMELINE: &str = "timeline";

/// Measures the wall time of one stage.
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

/// Summary of one finished stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Items consumed (recipes, ingredient lines, ...)
    pub items_in: Option<usize>,
    /// Items produced (ingredients, nodes, ...)
    pub items_out: Option<usize>,
    /// Graph size, for stages that produce one
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
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

    pub fn items_in(mut self, n: usize) -> Self {
        self.report.items_in = Some(n);
        self
    }

    pub fn items_out(mut self, n: usize) -> Self {
        self.report.items_out = Some(n);
        self
    }

    pub fn nodes(mut self, n: usize) -> Self {
        self.report.nodes = Some(n);
        self
    }

    pub fn edges(mut self, n: usize) -> Self {
        self.report.edges = Some(n);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Receives callbacks as the pipeline runs.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_counts(&mut self, _counts: &CooccurrenceCounts) {}

    fn on_network(&mut self, _network: &IngredientNetwork) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that keeps every stage report in order.
#[derive(Debug, Clone, Default)]
pub struct StageRecorder {
    pub reports: Vec<(&'static str, StageReport)>,
}

impl StageRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }

    pub fn stages(&self) -> Vec<&'static str> {
        self.reports.iter().map(|(name, _)| *name).collect()
    }
}

impl PipelineObserver for StageRecorder {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

/// Observer that emits a `tracing` event per finished stage.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

#[cfg(feature = "tracing")]
impl PipelineObserver for TracingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        tracing::debug!(
            stage,
            elapsed_us = report.elapsed.as_micros() as u64,
            items_in = report.items_in,
            items_out = report.items_out,
            nodes = report.nodes,
            edges = report.edges,
            "stage finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .items_in(10)
            .nodes(4)
            .edges(2)
            .build();
        assert_eq!(report.elapsed, Duration::from_millis(3));
        assert_eq!(report.items_in, Some(10));
        assert_eq!(report.items_out, None);
        assert_eq!(report.nodes, Some(4));
        assert_eq!(report.edges, Some(2));
    }

    #[test]
    fn test_recorder_keeps_order() {
        let mut rec = StageRecorder::new();
        rec.on_stage_start(STAGE_AGGREGATE);
        rec.on_stage_end(STAGE_AGGREGATE, &StageReport::default());
        rec.on_stage_end(STAGE_NETWORK, &StageReport::default());
        assert_eq!(rec.stages(), vec![STAGE_AGGREGATE, STAGE_NETWORK]);
        assert!(rec.report(STAGE_TIMELINE).is_none());
    }
}
