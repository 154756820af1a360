//! Serializable snapshot of a processed project for external renderers.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::{NodeKind, NodeRef, Project, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricReport {
    pub name: String,
    pub description: String,
    /// Formatted with the report's significant digits
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportNode {
    pub kind: NodeKind,
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    pub metrics: Vec<MetricReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReportNode>,
}

/// The whole tree with every attached metric, values rendered
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub significant_digits: usize,
    pub root: ReportNode,
}

impl ProjectReport {
    pub fn from_project(project: &Project, significant_digits: usize) -> Self {
        let root = project.node(project.tree().root());
        Self {
            significant_digits,
            root: snapshot(root, significant_digits),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Depth-first search for the node at `path` below the root, e.g.
    /// `["geo", "Point"]`.
    pub fn find(&self, path: &[&str]) -> Option<&ReportNode> {
        path.iter().try_fold(&self.root, |node, name| {
            node.children.iter().find(|child| child.name == *name)
        })
    }
}

impl ReportNode {
    pub fn metric(&self, name: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value.as_str())
    }
}

fn snapshot(node: NodeRef<'_>, digits: usize) -> ReportNode {
    ReportNode {
        kind: node.kind(),
        name: node.name().to_string(),
        attributes: node.attributes().clone(),
        metrics: node
            .metrics()
            .into_iter()
            .map(|metric| MetricReport {
                name: metric.name().to_string(),
                description: metric.description().to_string(),
                value: metric.value().format(digits),
            })
            .collect(),
        children: node.children().map(|child| snapshot(child, digits)).collect(),
    }
}
