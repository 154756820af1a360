//! Level-barrier scheduler.
//!
//! A run processes the tree bottom-up: methods, types, packages, project.
//! Within a level every (node, calculator) pair is an independent unit of
//! work on a bounded rayon pool; the level ends only when all its units have
//! finished, so higher levels can read the metrics lower levels attached.

pub mod state;
pub mod stats;

pub use state::ProcessingState;
pub use stats::{CalculatorFailure, ProcessingStats, ProcessingSummary};

use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, info, info_span, warn};

use crate::calculators::{Calculator, CalculatorRegistry};
use crate::config::{EngineConfig, ParallelConfig};
use crate::core::{Error, NodeId, NodeKind, Project, Result};
use crate::observability::{
    get_current_context, set_current_calculator, set_current_node, set_phase, ProcessingPhase,
};

/// Runs a calculator registry over projects.
pub struct Processor {
    registry: CalculatorRegistry,
    pool: Option<rayon::ThreadPool>,
}

impl Processor {
    /// Builds the worker pool once; it is reused for every run. With
    /// parallelism disabled, levels run on the calling thread.
    pub fn new(registry: CalculatorRegistry, parallel: &ParallelConfig) -> Result<Self> {
        let pool = if parallel.enabled {
            let threads = parallel.effective_concurrency();
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|index| format!("codemetrics-worker-{index}"))
                .build()
                .map_err(|e| Error::Concurrency(format!("failed to build worker pool: {e}")))?;
            debug!(threads, "Worker pool ready");
            Some(pool)
        } else {
            None
        };
        Ok(Self { registry, pool })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let registry = CalculatorRegistry::from_config(&config.metrics)?;
        Self::new(registry, &config.parallel)
    }

    pub fn registry(&self) -> &CalculatorRegistry {
        &self.registry
    }

    /// Pool size; 1 when running sequentially.
    pub fn concurrency(&self) -> usize {
        self.pool
            .as_ref()
            .map_or(1, rayon::ThreadPool::current_num_threads)
    }

    /// Computes every metric of `project`, level by level.
    ///
    /// Calculator panics are logged and counted; they never abort the run.
    pub fn process(&self, project: &Project) -> Result<ProcessingSummary> {
        let span = info_span!("process_project", project = %project.name());
        let _enter = span.enter();

        let stats = ProcessingStats::new();
        let mut state = ProcessingState::Init;
        while let Some(level) = state.next_level() {
            self.process_level(project, level, &stats);
            state = ProcessingState::after(level);
            debug!(%level, %state, "Level barrier reached");
        }

        let summary = stats.finish(state, project.graph_builds());
        info!(
            units = summary.units,
            metrics = summary.metrics_attached,
            failures = summary.failures.len(),
            "Project processed"
        );
        Ok(summary)
    }

    fn process_level(&self, project: &Project, level: NodeKind, stats: &ProcessingStats) {
        let _phase = set_phase(phase_for(level));
        let nodes = project.tree().nodes_of_kind(level);
        let units: Vec<(NodeId, &Calculator)> = nodes
            .iter()
            .flat_map(|&node| self.registry.at_level(level).map(move |c| (node, c)))
            .collect();

        let execute = |&(node, calculator): &(NodeId, &Calculator)| {
            run_unit(project, node, calculator, level, stats);
        };
        match &self.pool {
            Some(pool) => pool.install(|| units.par_iter().for_each(execute)),
            None => units.iter().for_each(execute),
        }
    }
}

fn run_unit(
    project: &Project,
    node: NodeId,
    calculator: &Calculator,
    level: NodeKind,
    stats: &ProcessingStats,
) {
    // Pool threads start without context; carry the level's phase over
    let _phase = set_phase(phase_for(level));
    let name = display_name(project, node);
    let _node = set_current_node(name.clone());
    let _calculator = set_current_calculator(calculator.id());

    match catch_unwind(AssertUnwindSafe(|| calculator.calculate(project, node))) {
        Ok(metrics) => {
            let declared = calculator.metric_names();
            let (accepted, undeclared): (Vec<_>, Vec<_>) = metrics
                .into_iter()
                .partition(|metric| declared.iter().any(|&name| name == metric.name()));
            stats.record_metrics(accepted.len());
            for metric in accepted {
                project.tree().attach_metric(node, metric);
            }
            // Registry collision checks only cover declared names
            for metric in undeclared {
                warn!(
                    context = %get_current_context(),
                    metric = metric.name(),
                    "Calculator produced an undeclared metric; it is dropped"
                );
                stats.record_failure(CalculatorFailure {
                    calculator: calculator.id(),
                    node: name.clone(),
                    message: format!("undeclared metric `{}`", metric.name()),
                });
            }
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(
                context = %get_current_context(),
                panic = %message,
                "Calculator panicked; its metrics are skipped"
            );
            stats.record_failure(CalculatorFailure {
                calculator: calculator.id(),
                node: name,
                message,
            });
        }
    }
    stats.record_unit();
}

fn phase_for(level: NodeKind) -> ProcessingPhase {
    match level {
        NodeKind::Method => ProcessingPhase::MethodMetrics,
        NodeKind::Type => ProcessingPhase::TypeMetrics,
        NodeKind::Package => ProcessingPhase::PackageMetrics,
        NodeKind::Project => ProcessingPhase::ProjectMetrics,
    }
}

/// Names from the first package down, e.g. `geo/Point/int getX()`.
fn display_name(project: &Project, node: NodeId) -> String {
    let mut names = Vec::new();
    let mut current = Some(project.node(node));
    while let Some(node) = current {
        if node.kind() == NodeKind::Project && !names.is_empty() {
            break;
        }
        names.push(node.name());
        current = node.parent();
    }
    names.reverse();
    names.join("/")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TreeBuilder;
    use crate::source::{Block, MethodDeclaration, Stmt, TypeDeclaration, TypeReference};

    fn sample() -> Project {
        let body = Block::new(vec![Stmt::Return(None)]);
        let ty = TypeDeclaration::class(Some("geo"), "Point")
            .with_method(MethodDeclaration::method("getX", TypeReference::unresolved("int")).with_body(body));
        TreeBuilder::new("demo").build(vec![ty]).unwrap()
    }

    #[test]
    fn test_run_reaches_terminal_state() {
        let processor =
            Processor::new(CalculatorRegistry::reference(), &ParallelConfig::sequential()).unwrap();
        let summary = processor.process(&sample()).unwrap();
        assert_eq!(summary.state, ProcessingState::ProjectDone);
        assert!(summary.failures.is_empty());
        assert!(summary.metrics_attached > 0);
    }

    #[test]
    fn test_display_name_path() {
        let project = sample();
        let ty = project.find_type("geo", "Point").unwrap();
        let method = project.node(ty).method_by_signature("int getX()").unwrap();
        assert_eq!(display_name(&project, method), "geo/Point/int getX()");
        assert_eq!(display_name(&project, project.tree().root()), "demo");
    }

    #[test]
    fn test_processor_pool_size() {
        let parallel = ParallelConfig::new().with_max_concurrency(3);
        let processor = Processor::new(CalculatorRegistry::reference(), &parallel).unwrap();
        assert_eq!(processor.concurrency(), 3);

        let sequential =
            Processor::new(CalculatorRegistry::reference(), &ParallelConfig::sequential()).unwrap();
        assert_eq!(sequential.concurrency(), 1);
    }
}
