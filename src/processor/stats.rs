use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::state::ProcessingState;

/// A calculator that panicked on one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorFailure {
    pub calculator: &'static str,
    pub node: String,
    pub message: String,
}

/// Counters shared by every worker of a run.
#[derive(Debug, Default)]
pub struct ProcessingStats {
    units: AtomicUsize,
    metrics: AtomicUsize,
    failures: Mutex<Vec<CalculatorFailure>>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_unit(&self) {
        self.units.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_metrics(&self, count: usize) {
        self.metrics.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_failure(&self, failure: CalculatorFailure) {
        self.failures.lock().push(failure);
    }

    pub fn finish(self, state: ProcessingState, graph_builds: usize) -> ProcessingSummary {
        let mut failures = self.failures.into_inner();
        failures.sort_by(|a, b| (&a.node, a.calculator).cmp(&(&b.node, b.calculator)));
        ProcessingSummary {
            state,
            units: self.units.into_inner(),
            metrics_attached: self.metrics.into_inner(),
            failures,
            graph_builds,
        }
    }
}

/// Outcome of a processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub state: ProcessingState,
    /// (node, calculator) pairs executed
    pub units: usize,
    pub metrics_attached: usize,
    /// Sorted by node, then calculator
    pub failures: Vec<CalculatorFailure>,
    pub graph_builds: usize,
}

impl ProcessingSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
