use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use crate::core::project::Project;
use crate::graph::{CallNetwork, InheritanceGraph, UsageGraph};
use crate::observability::{set_phase, ProcessingPhase};

/// Lazily built graphs of one project. Each graph is built at most once; a
/// caller racing the first build blocks until it completes.
#[derive(Debug, Default)]
pub struct GraphCache {
    inheritance: OnceLock<InheritanceGraph>,
    usage: OnceLock<UsageGraph>,
    calls: OnceLock<CallNetwork>,
    builds: AtomicUsize,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inheritance(&self, project: &Project) -> &InheritanceGraph {
        self.inheritance
            .get_or_init(|| self.build(|| InheritanceGraph::build(project)))
    }

    pub fn usage(&self, project: &Project) -> &UsageGraph {
        self.usage.get_or_init(|| self.build(|| UsageGraph::build(project)))
    }

    pub fn calls(&self, project: &Project) -> &CallNetwork {
        self.calls.get_or_init(|| self.build(|| CallNetwork::build(project)))
    }

    fn build<G>(&self, build: impl FnOnce() -> G) -> G {
        let _phase = set_phase(ProcessingPhase::GraphBuilding);
        self.builds.fetch_add(1, Ordering::Relaxed);
        build()
    }

    /// Number of graph constructions performed so far.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}
