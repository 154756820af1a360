//! Thread-local context tracking for failure reports.
//!
//! Records which processing phase, node and calculator the current thread is
//! working on. Uses thread-local storage so each rayon worker carries its own
//! context.
//!
//! ## Thread Safety
//!
//! - Thread-local context: each thread has its own context (via `thread_local!`)
//! - Context guards use RAII for automatic cleanup on drop

use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<ProcessingContext> = const { RefCell::new(ProcessingContext::new()) };
}

/// Snapshot of what the current thread is doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingContext {
    pub phase: Option<ProcessingPhase>,
    /// Display name of the node being measured
    pub current_node: Option<String>,
    /// Identifier of the calculator running on that node
    pub current_calculator: Option<&'static str>,
}

impl ProcessingContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_node: None,
            current_calculator: None,
        }
    }
}

impl std::fmt::Display for ProcessingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            Some(phase) => write!(f, "phase={phase}")?,
            None => write!(f, "phase=none")?,
        }
        if let Some(node) = &self.current_node {
            write!(f, " node={node}")?;
        }
        if let Some(calculator) = self.current_calculator {
            write!(f, " calculator={calculator}")?;
        }
        Ok(())
    }
}

/// Major stages of a metrics run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingPhase {
    TreeConstruction,
    GraphBuilding,
    MethodMetrics,
    TypeMetrics,
    PackageMetrics,
    ProjectMetrics,
}

impl std::fmt::Display for ProcessingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TreeConstruction => write!(f, "tree_construction"),
            Self::GraphBuilding => write!(f, "graph_building"),
            Self::MethodMetrics => write!(f, "method_metrics"),
            Self::TypeMetrics => write!(f, "type_metrics"),
            Self::PackageMetrics => write!(f, "package_metrics"),
            Self::ProjectMetrics => write!(f, "project_metrics"),
        }
    }
}

/// Restores the previous context on drop, enabling nested tracking
/// (calculator within node within phase).
pub struct ContextGuard {
    previous: ProcessingContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = std::mem::take(&mut self.previous);
        });
    }
}

fn update(apply: impl FnOnce(&mut ProcessingContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Set the current processing phase.
///
/// Returns a guard that restores the previous phase on drop.
///
/// ```
/// use codemetrics::observability::{get_current_context, set_phase, ProcessingPhase};
///
/// {
///     let _phase = set_phase(ProcessingPhase::GraphBuilding);
///     assert_eq!(get_current_context().phase, Some(ProcessingPhase::GraphBuilding));
/// }
/// assert_eq!(get_current_context().phase, None);
/// ```
#[must_use]
pub fn set_phase(phase: ProcessingPhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

/// Set the node being measured.
#[must_use]
pub fn set_current_node(name: impl Into<String>) -> ContextGuard {
    let name = name.into();
    update(|ctx| ctx.current_node = Some(name))
}

/// Set the calculator currently running.
#[must_use]
pub fn set_current_calculator(id: &'static str) -> ContextGuard {
    update(|ctx| ctx.current_calculator = Some(id))
}

#[must_use]
pub fn get_current_context() -> ProcessingContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = ProcessingContext::new();
    });
}
