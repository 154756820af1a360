use crate::core::{Metric, NodeId, NodeKind, Project};

pub const NOM: &str = "NOM";
pub const NOF: &str = "NOF";
pub const NOT: &str = "NOT";
pub const NOPK: &str = "NOPK";

/// Method count (constructors included) and field count of a type.
pub fn calculate_type(project: &Project, ty: NodeId) -> Vec<Metric> {
    let node = project.node(ty);
    let methods = node
        .children()
        .filter(|child| child.kind() == NodeKind::Method)
        .count();
    let mut metrics = vec![Metric::new(NOM, "Number of Methods", methods)];
    if let Some(declaration) = node.type_declaration() {
        metrics.push(Metric::new(NOF, "Number of Fields", declaration.fields.len()));
    }
    metrics
}

pub fn calculate_package(project: &Project, package: NodeId) -> Vec<Metric> {
    let types = project.node(package).children().count();
    vec![Metric::new(NOT, "Number of Types", types)]
}

pub fn calculate_project(project: &Project, root: NodeId) -> Vec<Metric> {
    let tree = project.tree();
    let packages = project.node(root).children().count();
    let types = tree.nodes_of_kind(NodeKind::Type).len();
    vec![
        Metric::new(NOPK, "Number of Packages", packages),
        Metric::new(NOT, "Number of Types", types),
    ]
}
