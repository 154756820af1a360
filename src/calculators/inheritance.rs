//! Inheritance-graph metrics: depth, children and specialization.

use std::collections::{HashSet, VecDeque};

use crate::core::{Metric, NodeId, Project};
use crate::graph::InheritanceGraph;
use crate::numeric::NumericValue;

pub const DIT: &str = "DIT";
pub const NOC: &str = "NOC";
pub const SIX: &str = "SIX";

pub fn calculate_dit(project: &Project, ty: NodeId) -> Vec<Metric> {
    let depth = project.inheritance_graph().depth(ty);
    vec![Metric::new(DIT, "Depth of Inheritance Tree", depth)]
}

pub fn calculate_noc(project: &Project, ty: NodeId) -> Vec<Metric> {
    let children = project.inheritance_graph().children(ty).len();
    vec![Metric::new(NOC, "Number of Children", children)]
}

/// `(overridden × DIT) / methods`, over the type's own non-constructor
/// methods. Empty for a type without methods.
pub fn calculate_six(project: &Project, ty: NodeId) -> Vec<Metric> {
    let Some(declaration) = project.node(ty).type_declaration() else {
        return Vec::new();
    };
    let graph = project.inheritance_graph();
    let inherited = ancestor_method_keys(project, graph, ty);

    let own: Vec<_> = declaration.methods.iter().map(|m| m.override_key()).collect();
    let overridden = own.iter().filter(|key| inherited.contains(*key)).count();
    let depth = graph.depth(ty);

    let numerator = NumericValue::from(overridden).times(&NumericValue::from(depth));
    match numerator.divide(&NumericValue::from(own.len())) {
        Ok(six) => vec![Metric::new(SIX, "Specialization Index", six)],
        Err(_) => Vec::new(),
    }
}

type OverrideKey = (String, String, Vec<String>);

/// Override keys of every method declared by any ancestor, breadth first.
fn ancestor_method_keys(
    project: &Project,
    graph: &InheritanceGraph,
    ty: NodeId,
) -> HashSet<OverrideKey> {
    let mut keys = HashSet::new();
    let mut seen = HashSet::from([ty]);
    let mut queue: VecDeque<NodeId> = graph.parents(ty).into();

    while let Some(ancestor) = queue.pop_front() {
        if !seen.insert(ancestor) {
            continue;
        }
        if let Some(declaration) = project.node(ancestor).type_declaration() {
            keys.extend(declaration.methods.iter().map(|m| m.override_key()));
        }
        queue.extend(graph.parents(ancestor));
    }
    keys
}
