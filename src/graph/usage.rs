use std::collections::{BTreeSet, HashMap};

use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use tracing::debug;

use crate::core::project::Project;
use crate::core::{NodeId, NodeKind};
use crate::graph::references::{CallSite, References};
use crate::source::QualifiedName;

/// Directed `A → B` edges for every project type `B` that type `A` resolvably
/// references through a call, field, parameter or local variable. No
/// self-loops, no parallel edges.
///
/// The names each type left unresolved are kept with the graph, collected in
/// the same pass over the bodies.
#[derive(Debug, Clone, Default)]
pub struct UsageGraph {
    graph: DiGraphMap<NodeId, ()>,
    unresolved: HashMap<NodeId, BTreeSet<String>>,
}

impl UsageGraph {
    pub fn build(project: &Project) -> Self {
        let mut graph = DiGraphMap::new();
        let mut unresolved = HashMap::new();

        for ty in project.tree().nodes_of_kind(NodeKind::Type) {
            graph.add_node(ty);
            let Some(declaration) = project.node(ty).type_declaration() else {
                continue;
            };
            let references = References::of_type(declaration);
            let names: BTreeSet<String> =
                references.unresolved_names().map(str::to_string).collect();
            if !names.is_empty() {
                unresolved.insert(ty, names);
            }
            for target in referenced_types(project, &references) {
                if let Some(target) = project.lookup_type(&target).filter(|&t| t != ty) {
                    graph.add_edge(ty, target, ());
                }
            }
        }

        debug!(
            types = graph.node_count(),
            edges = graph.edge_count(),
            "Built usage graph"
        );
        Self { graph, unresolved }
    }

    /// Unresolved type names and bare identifiers appearing in `ty`.
    pub fn unresolved_names(&self, ty: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.unresolved
            .get(&ty)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Types `ty` depends on.
    pub fn dependencies(&self, ty: NodeId) -> Vec<NodeId> {
        self.neighbors(ty, Direction::Outgoing)
    }

    /// Types depending on `ty`.
    pub fn dependents(&self, ty: NodeId) -> Vec<NodeId> {
        self.neighbors(ty, Direction::Incoming)
    }

    fn neighbors(&self, ty: NodeId, direction: Direction) -> Vec<NodeId> {
        if !self.graph.contains_node(ty) {
            return Vec::new();
        }
        self.graph.neighbors_directed(ty, direction).collect()
    }

    pub fn depends_on(&self, from: NodeId, to: NodeId) -> bool {
        self.graph.contains_edge(from, to)
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Declaring types of every reference that resolves; failures are dropped.
fn referenced_types(project: &Project, references: &References<'_>) -> Vec<QualifiedName> {
    let resolver = project.resolver();
    let from_types = references
        .type_refs
        .iter()
        .filter_map(|reference| resolver.resolve_type(reference).ok());
    let from_calls = references.calls.iter().filter_map(|call| match call {
        CallSite::Method(call) => resolver.resolve_call(call).ok().map(|t| t.declaring),
        CallSite::Creation(creation) => resolver
            .resolve_creation(creation)
            .map(|t| t.declaring)
            .or_else(|_| resolver.resolve_type(&creation.type_ref))
            .ok(),
    });
    from_types.chain(from_calls).collect()
}
