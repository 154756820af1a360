use std::collections::BTreeSet;

use crate::core::{Metric, NodeId, Project};

pub const CBO: &str = "CBO";

/// Distinct other types this type uses or is used by.
pub fn calculate(project: &Project, ty: NodeId) -> Vec<Metric> {
    let usage = project.usage_graph();
    let coupled: BTreeSet<NodeId> = usage
        .dependencies(ty)
        .into_iter()
        .chain(usage.dependents(ty))
        .filter(|&other| other != ty)
        .collect();
    vec![Metric::new(CBO, "Coupling Between Objects", coupled.len())]
}
