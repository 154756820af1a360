use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use tracing::debug;

use crate::core::{NodeId, NodeKind};
use crate::core::project::Project;

/// Directed `supertype → subtype` edges between project types. Supertypes
/// outside the project have no node and produce no edge.
///
/// Inheritance depths are computed once, when the graph is built.
#[derive(Debug, Clone, Default)]
pub struct InheritanceGraph {
    graph: DiGraphMap<NodeId, ()>,
    depths: HashMap<NodeId, u64>,
}

impl InheritanceGraph {
    pub fn build(project: &Project) -> Self {
        let mut graph = DiGraphMap::new();
        let resolver = project.resolver();

        for ty in project.tree().nodes_of_kind(NodeKind::Type) {
            graph.add_node(ty);
            let Some(declaration) = project.node(ty).type_declaration() else {
                continue;
            };
            for supertype in &declaration.supertypes {
                let parent = resolver
                    .resolve_type(supertype)
                    .ok()
                    .and_then(|name| project.lookup_type(&name));
                if let Some(parent) = parent.filter(|&p| p != ty) {
                    graph.add_edge(parent, ty, ());
                }
            }
        }

        let depths = inheritance_depths(&graph);
        debug!(
            types = graph.node_count(),
            edges = graph.edge_count(),
            "Built inheritance graph"
        );
        Self { graph, depths }
    }

    /// `1 + max(depth(parent))`, 1 for a root or a node outside the graph.
    pub fn depth(&self, ty: NodeId) -> u64 {
        self.depths.get(&ty).copied().unwrap_or(1)
    }

    /// Immediate supertypes of `ty` within the project.
    pub fn parents(&self, ty: NodeId) -> Vec<NodeId> {
        self.neighbors(ty, Direction::Incoming)
    }

    /// Immediate subtypes of `ty`.
    pub fn children(&self, ty: NodeId) -> Vec<NodeId> {
        self.neighbors(ty, Direction::Outgoing)
    }

    fn neighbors(&self, ty: NodeId, direction: Direction) -> Vec<NodeId> {
        if !self.graph.contains_node(ty) {
            return Vec::new();
        }
        self.graph.neighbors_directed(ty, direction).collect()
    }

    pub fn extends(&self, child: NodeId, parent: NodeId) -> bool {
        self.graph.contains_edge(parent, child)
    }

    pub fn type_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Depth of every node. A parent already on the current path contributes 0.
///
/// The depth of a node outside any cycle does not depend on the path that
/// reached it, so it is memoized; only nodes on a cycle are re-walked.
fn inheritance_depths(graph: &DiGraphMap<NodeId, ()>) -> HashMap<NodeId, u64> {
    let cyclic: HashSet<NodeId> = tarjan_scc(graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .flatten()
        .collect();

    let mut memo = HashMap::new();
    let mut depths = HashMap::with_capacity(graph.node_count());
    for ty in graph.nodes() {
        let depth = walk(graph, ty, &cyclic, &mut memo, &mut Vec::new());
        depths.insert(ty, depth);
    }
    depths
}

fn walk(
    graph: &DiGraphMap<NodeId, ()>,
    ty: NodeId,
    cyclic: &HashSet<NodeId>,
    memo: &mut HashMap<NodeId, u64>,
    path: &mut Vec<NodeId>,
) -> u64 {
    if let Some(&depth) = memo.get(&ty) {
        return depth;
    }
    if path.contains(&ty) {
        return 0;
    }
    path.push(ty);
    let deepest = graph
        .neighbors_directed(ty, Direction::Incoming)
        .map(|parent| walk(graph, parent, cyclic, memo, path))
        .max()
        .unwrap_or(0);
    path.pop();

    let depth = 1 + deepest;
    if !cyclic.contains(&ty) {
        memo.insert(ty, depth);
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(usize, usize)]) -> DiGraphMap<NodeId, ()> {
        let mut graph = DiGraphMap::new();
        for &(parent, child) in edges {
            graph.add_edge(NodeId::from_index(parent), NodeId::from_index(child), ());
        }
        graph
    }

    #[test]
    fn test_depths_take_the_deepest_parent() {
        // 1 <- 2 <- 3 <- 4, and 4 also extends 1 directly
        let depths = inheritance_depths(&graph(&[(1, 2), (2, 3), (3, 4), (1, 4)]));
        assert_eq!(depths[&NodeId::from_index(1)], 1);
        assert_eq!(depths[&NodeId::from_index(3)], 3);
        assert_eq!(depths[&NodeId::from_index(4)], 4);
    }

    #[test]
    fn test_cycle_members_are_walked_from_themselves() {
        // 1 <-> 2, and 2 <- 3
        let depths = inheritance_depths(&graph(&[(1, 2), (2, 1), (2, 3)]));
        assert_eq!(depths[&NodeId::from_index(1)], 2);
        assert_eq!(depths[&NodeId::from_index(2)], 2);
        assert_eq!(depths[&NodeId::from_index(3)], 3);
    }
}
