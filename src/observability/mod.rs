//! Context tracking for diagnosing failures during a metrics run.
//!
//! Each thread records the phase, node and calculator it is working on, so a
//! calculator failure logged from a rayon worker carries enough information
//! to reproduce it.
//!
//! ```ignore
//! use codemetrics::observability::{set_current_node, set_phase, ProcessingPhase};
//!
//! let _phase = set_phase(ProcessingPhase::TypeMetrics);
//! for ty in types {
//!     let _node = set_current_node(ty.name());
//!     // a warning emitted here includes phase and node
//! }
//! ```

pub mod context;

pub use context::{
    get_current_context, reset_context, set_current_calculator, set_current_node, set_phase,
    ContextGuard, ProcessingContext, ProcessingPhase,
};
