use crate::calculators::lines::LOC;
use crate::core::{Metric, NodeId, Project};
use crate::numeric::NumericValue;

pub const TLOC: &str = "TLOC";

/// Sum of the children's `LOC` (type to package) metric.
pub fn calculate_package(project: &Project, package: NodeId) -> Vec<Metric> {
    sum_of_children(project, package, LOC)
}

/// Sum of the packages' `TLOC`.
pub fn calculate_project(project: &Project, root: NodeId) -> Vec<Metric> {
    sum_of_children(project, root, TLOC)
}

fn sum_of_children(project: &Project, node: NodeId, child_metric: &str) -> Vec<Metric> {
    let values: Vec<Metric> = project
        .node(node)
        .children()
        .filter_map(|child| child.metric(child_metric))
        .collect();
    if values.is_empty() {
        return Vec::new();
    }
    let total = values
        .iter()
        .fold(NumericValue::zero(), |sum, metric| sum.plus(metric.value()));
    vec![Metric::new(TLOC, "Total Lines of Code", total)]
}
