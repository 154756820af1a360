use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::tree::{CodeTree, NodeId, NodeKind, NodeRef};
use crate::graph::{CallNetwork, GraphCache, InheritanceGraph, UsageGraph};
use crate::source::{MethodTarget, QualifiedName, SymbolResolver};

/// A built code tree together with the resolver used to relate its nodes and
/// the graphs derived from it.
pub struct Project {
    tree: CodeTree,
    type_index: HashMap<(String, String), NodeId>,
    resolver: Arc<dyn SymbolResolver>,
    graphs: GraphCache,
}

impl Project {
    pub(crate) fn new(tree: CodeTree, resolver: Arc<dyn SymbolResolver>) -> Self {
        let type_index = tree
            .nodes_of_kind(NodeKind::Type)
            .into_iter()
            .filter_map(|id| {
                let node = tree.node(id);
                let package = node.parent()?.name().to_string();
                Some(((package, node.name().to_string()), id))
            })
            .collect();
        Self {
            tree,
            type_index,
            resolver,
            graphs: GraphCache::new(),
        }
    }

    pub fn tree(&self) -> &CodeTree {
        &self.tree
    }

    pub fn name(&self) -> &str {
        self.tree.node(self.tree.root()).name()
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        self.tree.node(id)
    }

    pub fn resolver(&self) -> &dyn SymbolResolver {
        self.resolver.as_ref()
    }

    /// Type node declared under `name`, if the project contains it.
    pub fn lookup_type(&self, name: &QualifiedName) -> Option<NodeId> {
        self.find_type(name.package_name(), &name.type_name)
    }

    pub fn find_type(&self, package: &str, type_name: &str) -> Option<NodeId> {
        self.type_index
            .get(&(package.to_string(), type_name.to_string()))
            .copied()
    }

    /// Method node for a resolved call target.
    ///
    /// `None` when the declaring type lies outside the project. A project
    /// type without a matching signature maps to the unknown-method sentinel.
    pub fn lookup_method(&self, target: &MethodTarget) -> Option<NodeId> {
        let ty = self.lookup_type(&target.declaring)?;
        Some(
            self.tree
                .node(ty)
                .method_by_signature(&target.signature)
                .unwrap_or_else(|| self.tree.unknown_method()),
        )
    }

    pub fn inheritance_graph(&self) -> &InheritanceGraph {
        self.graphs.inheritance(self)
    }

    pub fn usage_graph(&self) -> &UsageGraph {
        self.graphs.usage(self)
    }

    pub fn call_network(&self) -> &CallNetwork {
        self.graphs.calls(self)
    }

    /// Number of graphs constructed so far; each is built at most once.
    pub fn graph_builds(&self) -> usize {
        self.graphs.builds()
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("tree", &self.tree)
            .field("types", &self.type_index.len())
            .field("graph_builds", &self.graph_builds())
            .finish()
    }
}
