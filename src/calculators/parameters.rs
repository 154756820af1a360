use crate::core::{Metric, NodeId, Project};

pub const NOP: &str = "NOP";

pub fn calculate(project: &Project, method: NodeId) -> Vec<Metric> {
    project
        .node(method)
        .method_declaration()
        .map(|declaration| {
            vec![Metric::new(
                NOP,
                "Number of Parameters",
                declaration.parameters.len(),
            )]
        })
        .unwrap_or_default()
}
