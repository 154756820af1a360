//! Robert Martin package coupling metrics.
//!
//! Only public types take part. A type references another when the usage
//! graph has an edge between them, or when one of its unresolved names
//! matches the other's simple name and no type on its own side of the
//! partition has that simple name.

use std::collections::HashSet;

use crate::core::{Metric, NodeId, NodeKind, Project};
use crate::numeric::NumericValue;

pub const CA: &str = "Ca";
pub const CE: &str = "Ce";
pub const I: &str = "I";
pub const A: &str = "A";
pub const D: &str = "D";

pub fn calculate(project: &Project, package: NodeId) -> Vec<Metric> {
    let (inside, outside) = partition(project, package);
    let ce = count_referencing(project, &inside, &outside);
    let ca = count_referencing(project, &outside, &inside);

    let ce = NumericValue::from(ce);
    let ca = NumericValue::from(ca);
    let mut metrics = vec![
        Metric::new(CA, "Afferent Coupling", ca.clone()),
        Metric::new(CE, "Efferent Coupling", ce.clone()),
    ];

    let instability = ce.divide(&ca.plus(&ce)).ok();
    let abstractness = abstractness(project, package);
    if let Some(instability) = &instability {
        metrics.push(Metric::new(I, "Instability", instability.clone()));
    }
    if let Some(abstractness) = &abstractness {
        metrics.push(Metric::new(A, "Abstractness", abstractness.clone()));
    }
    if let (Some(instability), Some(abstractness)) = (instability, abstractness) {
        let distance = abstractness
            .plus(&instability)
            .minus(&NumericValue::from(1))
            .abs();
        metrics.push(Metric::new(D, "Normalized Distance from Main Sequence", distance));
    }
    metrics
}

/// `(interfaces + abstract types) / types`; `None` for an empty package.
pub fn abstractness(project: &Project, package: NodeId) -> Option<NumericValue> {
    let types: Vec<_> = project
        .node(package)
        .children()
        .filter_map(|ty| ty.type_declaration())
        .collect();
    let abstract_types = types.iter().filter(|decl| decl.is_abstract()).count();
    NumericValue::from(abstract_types)
        .divide(&NumericValue::from(types.len()))
        .ok()
}

struct Side {
    types: Vec<NodeId>,
    ids: HashSet<NodeId>,
    simple_names: HashSet<String>,
}

impl Side {
    fn new(project: &Project, types: Vec<NodeId>) -> Self {
        let simple_names = types
            .iter()
            .filter_map(|&ty| project.node(ty).type_declaration())
            .map(|decl| decl.simple_name.clone())
            .collect();
        Self {
            ids: types.iter().copied().collect(),
            types,
            simple_names,
        }
    }
}

fn partition(project: &Project, package: NodeId) -> (Side, Side) {
    let (inside, outside): (Vec<NodeId>, Vec<NodeId>) = project
        .tree()
        .nodes_of_kind(NodeKind::Type)
        .into_iter()
        .filter(|&ty| {
            project
                .node(ty)
                .type_declaration()
                .is_some_and(|decl| decl.modifiers.is_public())
        })
        .partition(|&ty| project.node(ty).parent().map(|p| p.id()) == Some(package));
    (Side::new(project, inside), Side::new(project, outside))
}

/// Types of `from` referencing at least one type of `to`.
fn count_referencing(project: &Project, from: &Side, to: &Side) -> usize {
    let usage = project.usage_graph();
    from.types
        .iter()
        .filter(|&&ty| {
            usage.dependencies(ty).iter().any(|dep| to.ids.contains(dep))
                || usage
                    .unresolved_names(ty)
                    .any(|name| to.simple_names.contains(name) && !from.simple_names.contains(name))
        })
        .count()
}
