use crate::core::attributes::line_span;
use crate::core::{Metric, NodeId, Project};

pub const LOC: &str = "LOC";

/// Lines of code from the node's source span. Used at method and type level.
pub fn calculate(project: &Project, node: NodeId) -> Vec<Metric> {
    line_span(project.node(node).attributes())
        .map(|(begin, end)| vec![Metric::new(LOC, "Lines of Code", end - begin + 1)])
        .unwrap_or_default()
}
