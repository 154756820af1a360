use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;
use tracing::debug;

use crate::core::project::Project;
use crate::core::{NodeId, NodeKind};
use crate::graph::references::{CallSite, References};

/// One call expression. The ordinal is the call's position among the calling
/// method's call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEdge {
    pub ordinal: usize,
    pub callee_name: String,
}

/// Method-level call multigraph: one edge per call site, so repeated calls to
/// the same target yield parallel edges. Recursion yields self-loops.
#[derive(Debug, Clone, Default)]
pub struct CallNetwork {
    graph: DiGraph<NodeId, CallEdge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl CallNetwork {
    pub fn build(project: &Project) -> Self {
        let mut network = Self::default();
        let resolver = project.resolver();

        for method in project.tree().nodes_of_kind(NodeKind::Method) {
            let caller = network.ensure_node(method);
            let Some(declaration) = project.node(method).method_declaration() else {
                continue;
            };
            let references = References::of_method(declaration);
            for (ordinal, call) in references.calls.iter().enumerate() {
                let callee = match call {
                    CallSite::Method(call) => resolver
                        .resolve_call(call)
                        .ok()
                        .and_then(|target| project.lookup_method(&target)),
                    CallSite::Creation(creation) => match resolver.resolve_creation(creation) {
                        Ok(target) => project.lookup_method(&target),
                        // Implicit constructors of project types have no node
                        Err(_) => resolver
                            .resolve_type(&creation.type_ref)
                            .ok()
                            .and_then(|name| project.lookup_type(&name))
                            .map(|_| project.tree().unknown_method()),
                    },
                };
                if let Some(callee) = callee {
                    let callee = network.ensure_node(callee);
                    network.graph.add_edge(
                        caller,
                        callee,
                        CallEdge {
                            ordinal,
                            callee_name: call.name().to_string(),
                        },
                    );
                }
            }
        }

        debug!(
            methods = network.graph.node_count(),
            calls = network.graph.edge_count(),
            "Built call network"
        );
        network
    }

    fn ensure_node(&mut self, method: NodeId) -> NodeIndex {
        if let Some(&index) = self.index.get(&method) {
            return index;
        }
        let index = self.graph.add_node(method);
        self.index.insert(method, index);
        index
    }

    /// Outgoing call sites of `method`, parallel edges counted separately.
    pub fn fan_out(&self, method: NodeId) -> usize {
        self.degree(method, Direction::Outgoing)
    }

    /// Incoming call sites of `method`, parallel edges counted separately.
    pub fn fan_in(&self, method: NodeId) -> usize {
        self.degree(method, Direction::Incoming)
    }

    fn degree(&self, method: NodeId, direction: Direction) -> usize {
        self.index
            .get(&method)
            .map_or(0, |&index| self.graph.edges_directed(index, direction).count())
    }

    /// Distinct methods called by `method`.
    pub fn callees(&self, method: NodeId) -> Vec<NodeId> {
        let Some(&index) = self.index.get(&method) else {
            return Vec::new();
        };
        let mut callees: Vec<NodeId> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| self.graph[edge.target()])
            .collect();
        callees.sort();
        callees.dedup();
        callees
    }

    /// Number of call sites in `caller` targeting `callee`.
    pub fn call_count(&self, caller: NodeId, callee: NodeId) -> usize {
        match (self.index.get(&caller), self.index.get(&callee)) {
            (Some(&from), Some(&to)) => self.graph.edges_connecting(from, to).count(),
            _ => 0,
        }
    }

    pub fn method_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn call_site_count(&self) -> usize {
        self.graph.edge_count()
    }
}
