//! Code Entity Tree: Project → Package → Type → Method.
//!
//! Nodes live in an arena owned by [`CodeTree`]. Parents own their children
//! through index lists; the parent link is a plain [`NodeId`] set once when the
//! child is attached. Attributes are fixed at construction. Each node's metric
//! map sits behind its own lock so calculators for different nodes never
//! contend.

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::core::errors::{Error, Result};
use crate::core::metric::Metric;
use crate::source::{MethodDeclaration, TypeDeclaration};

/// Name of the sentinel method standing for call targets that resolved to a
/// project type but matched none of its signatures.
pub const UNKNOWN_METHOD_NAME: &str = "<unknown>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// Tree level. Ordered bottom-up, the order in which levels are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Method,
    Type,
    Package,
    Project,
}

impl NodeKind {
    pub const BOTTOM_UP: [NodeKind; 4] = [
        NodeKind::Method,
        NodeKind::Type,
        NodeKind::Package,
        NodeKind::Project,
    ];
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method => write!(f, "method"),
            Self::Type => write!(f, "type"),
            Self::Package => write!(f, "package"),
            Self::Project => write!(f, "project"),
        }
    }
}

enum Payload {
    Project,
    Package,
    Type {
        declaration: Arc<TypeDeclaration>,
        signatures: HashMap<String, NodeId>,
    },
    Method {
        declaration: Arc<MethodDeclaration>,
    },
    UnknownMethod,
}

struct NodeData {
    kind: NodeKind,
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    child_index: HashMap<(NodeKind, String), NodeId>,
    attributes: BTreeMap<String, String>,
    metrics: RwLock<BTreeMap<String, Metric>>,
    payload: Payload,
}

impl NodeData {
    fn new(
        kind: NodeKind,
        name: String,
        parent: Option<NodeId>,
        attributes: BTreeMap<String, String>,
        payload: Payload,
    ) -> Self {
        Self {
            kind,
            name,
            parent,
            children: Vec::new(),
            child_index: HashMap::new(),
            attributes,
            metrics: RwLock::new(BTreeMap::new()),
            payload,
        }
    }
}

pub struct CodeTree {
    nodes: Vec<NodeData>,
    root: NodeId,
    unknown_method: NodeId,
}

impl CodeTree {
    pub fn new(project_name: impl Into<String>, attributes: BTreeMap<String, String>) -> Self {
        let root = NodeData::new(
            NodeKind::Project,
            project_name.into(),
            None,
            attributes,
            Payload::Project,
        );
        let unknown = NodeData::new(
            NodeKind::Method,
            UNKNOWN_METHOD_NAME.to_string(),
            None,
            BTreeMap::new(),
            Payload::UnknownMethod,
        );
        Self {
            nodes: vec![root, unknown],
            root: NodeId(0),
            unknown_method: NodeId(1),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Detached sentinel; not reachable from the root.
    pub fn unknown_method(&self) -> NodeId {
        self.unknown_method
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    /// Number of packages, types and methods below the root. The root and
    /// the detached sentinel are not counted.
    pub fn len(&self) -> usize {
        self.nodes.len() - 2
    }

    /// True for a tree holding nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the package named `name`, creating it on first use.
    pub(crate) fn package(&mut self, name: &str) -> NodeId {
        let key = (NodeKind::Package, name.to_string());
        if let Some(&id) = self.nodes[self.root.0].child_index.get(&key) {
            return id;
        }
        self.push_child(self.root, NodeKind::Package, name.to_string(), BTreeMap::new(), Payload::Package)
    }

    pub(crate) fn add_type(&mut self, package: NodeId, declaration: TypeDeclaration) -> Result<NodeId> {
        let name = declaration.type_name();
        let key = (NodeKind::Type, name.clone());
        if self.nodes[package.0].child_index.contains_key(&key) {
            return Err(Error::construction(
                declaration.qualified_name().to_string(),
                "type declared more than once",
            ));
        }
        let attributes = declaration.attributes.clone();
        let payload = Payload::Type {
            declaration: Arc::new(declaration),
            signatures: HashMap::new(),
        };
        Ok(self.push_child(package, NodeKind::Type, name, attributes, payload))
    }

    pub(crate) fn add_method(&mut self, owner: NodeId, declaration: MethodDeclaration) -> Result<NodeId> {
        let signature = declaration.signature();
        let key = (NodeKind::Method, signature.clone());
        if self.nodes[owner.0].child_index.contains_key(&key) {
            return Err(Error::construction(
                self.nodes[owner.0].name.clone(),
                format!("duplicate method signature `{signature}`"),
            ));
        }
        let attributes = declaration.attributes.clone();
        let payload = Payload::Method {
            declaration: Arc::new(declaration),
        };
        let id = self.push_child(owner, NodeKind::Method, signature.clone(), attributes, payload);
        if let Payload::Type { signatures, .. } = &mut self.nodes[owner.0].payload {
            signatures.insert(signature, id);
        }
        Ok(id)
    }

    fn push_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: String,
        attributes: BTreeMap<String, String>,
        payload: Payload,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(NodeData::new(kind, name.clone(), Some(parent), attributes, payload));
        let parent = &mut self.nodes[parent.0];
        parent.children.push(id);
        parent.child_index.insert((kind, name), id);
        id
    }

    /// All nodes of `kind` reachable from the root, in depth-first attachment
    /// order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.kind == kind {
                found.push(id);
                continue;
            }
            stack.extend(node.children.iter().rev());
        }
        found
    }

    /// Stores `metric` on `id`, replacing any metric with the same name.
    pub fn attach_metric(&self, id: NodeId, metric: Metric) {
        self.nodes[id.0]
            .metrics
            .write()
            .insert(metric.name().to_string(), metric);
    }

    /// Snapshot of the node's metrics, ordered by name.
    pub fn metrics(&self, id: NodeId) -> Vec<Metric> {
        self.nodes[id.0].metrics.read().values().cloned().collect()
    }

    pub fn metric(&self, id: NodeId, name: &str) -> Option<Metric> {
        self.nodes[id.0].metrics.read().get(name).cloned()
    }
}

impl fmt::Debug for CodeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeTree")
            .field("project", &self.nodes[self.root.0].name)
            .field("nodes", &self.len())
            .finish()
    }
}

/// Borrowed view of one node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a CodeTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.node(id))
    }

    pub fn child(&self, kind: NodeKind, name: &str) -> Option<NodeRef<'a>> {
        self.data()
            .child_index
            .get(&(kind, name.to_string()))
            .map(|&id| self.tree.node(id))
    }

    pub fn attributes(&self) -> &'a BTreeMap<String, String> {
        &self.data().attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.data().attributes.get(key).map(String::as_str)
    }

    pub fn metrics(&self) -> Vec<Metric> {
        self.tree.metrics(self.id)
    }

    pub fn metric(&self, name: &str) -> Option<Metric> {
        self.tree.metric(self.id, name)
    }

    pub fn type_declaration(&self) -> Option<&'a TypeDeclaration> {
        match &self.data().payload {
            Payload::Type { declaration, .. } => Some(declaration.as_ref()),
            _ => None,
        }
    }

    pub fn method_declaration(&self) -> Option<&'a MethodDeclaration> {
        match &self.data().payload {
            Payload::Method { declaration } => Some(declaration.as_ref()),
            _ => None,
        }
    }

    /// Method of this type with the given rendered signature.
    pub fn method_by_signature(&self, signature: &str) -> Option<NodeId> {
        match &self.data().payload {
            Payload::Type { signatures, .. } => signatures.get(signature).copied(),
            _ => None,
        }
    }

    pub fn is_unknown_method(&self) -> bool {
        matches!(self.data().payload, Payload::UnknownMethod)
    }
}

/// Identity is the (name, parent) pair.
impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.data().parent == other.data().parent
    }
}

impl Eq for NodeRef<'_> {}

impl Hash for NodeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.data().parent.hash(state);
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TypeReference;

    fn sample_tree() -> (CodeTree, NodeId, NodeId) {
        let mut tree = CodeTree::new("demo", BTreeMap::new());
        let package = tree.package("shapes");
        let ty = tree
            .add_type(package, TypeDeclaration::class(Some("shapes"), "Circle"))
            .unwrap();
        let method = tree
            .add_method(ty, MethodDeclaration::method("area", TypeReference::unresolved("double")))
            .unwrap();
        (tree, ty, method)
    }

    #[test]
    fn test_parent_child_links() {
        let (tree, ty, method) = sample_tree();
        let method = tree.node(method);
        assert_eq!(method.name(), "double area()");
        assert_eq!(method.parent().unwrap().id(), ty);
        assert_eq!(tree.node(ty).parent().unwrap().name(), "shapes");
        assert_eq!(tree.node(ty).method_by_signature("double area()"), Some(method.id()));
    }

    #[test]
    fn test_package_is_reused() {
        let mut tree = CodeTree::new("demo", BTreeMap::new());
        let first = tree.package("a");
        let second = tree.package("a");
        assert_eq!(first, second);
        assert_eq!(tree.nodes_of_kind(NodeKind::Package).len(), 1);
    }

    #[test]
    fn test_duplicate_type_is_rejected() {
        let mut tree = CodeTree::new("demo", BTreeMap::new());
        let package = tree.package("a");
        tree.add_type(package, TypeDeclaration::class(Some("a"), "X")).unwrap();
        let err = tree
            .add_type(package, TypeDeclaration::class(Some("a"), "X"))
            .unwrap_err();
        assert!(matches!(err, Error::Construction { .. }));
    }

    #[test]
    fn test_sentinel_is_detached() {
        let (tree, _, _) = sample_tree();
        let unknown = tree.node(tree.unknown_method());
        assert!(unknown.is_unknown_method());
        assert!(unknown.parent().is_none());
        assert_eq!(tree.nodes_of_kind(NodeKind::Method).len(), 1);
    }

    #[test]
    fn test_metric_overwrite_by_name() {
        let (tree, ty, _) = sample_tree();
        tree.attach_metric(ty, Metric::new("NOM", "Number of Methods", 1));
        tree.attach_metric(ty, Metric::new("NOM", "Number of Methods", 2));
        assert_eq!(tree.metrics(ty), vec![Metric::new("NOM", "Number of Methods", 2)]);
    }

    #[test]
    fn test_len_and_is_empty_agree() {
        let empty = CodeTree::new("demo", BTreeMap::new());
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());

        let (tree, _, _) = sample_tree();
        assert_eq!(tree.len(), 3);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_identity_is_name_and_parent() {
        let (tree, ty, method) = sample_tree();
        assert_eq!(tree.node(ty), tree.node(ty));
        assert_ne!(tree.node(ty), tree.node(method));
    }
}
