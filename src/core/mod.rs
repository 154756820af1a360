pub mod attributes;
pub mod errors;
pub mod metric;
pub mod project;
pub mod tree;

pub use errors::{Error, Result, ResultExt};
pub use metric::Metric;
pub use project::Project;
pub use tree::{CodeTree, NodeId, NodeKind, NodeRef, UNKNOWN_METHOD_NAME};
