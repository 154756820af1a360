use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info_span};

use crate::core::{CodeTree, Error, Project, Result};
use crate::observability::{set_phase, ProcessingPhase};
use crate::source::{DeclaredResolver, MethodDeclaration, SymbolResolver, TypeDeclaration};

/// Assembles a [`Project`] from parsed type declarations.
///
/// Types are grouped under their package (`default` when absent). Constructors
/// and methods both become method nodes, named by signature.
pub struct TreeBuilder {
    project_name: String,
    attributes: BTreeMap<String, String>,
    resolver: Arc<dyn SymbolResolver>,
}

impl TreeBuilder {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            attributes: BTreeMap::new(),
            resolver: Arc::new(DeclaredResolver),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn SymbolResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builds the tree. Any malformed declaration aborts the whole build.
    pub fn build(self, declarations: Vec<TypeDeclaration>) -> Result<Project> {
        let span = info_span!("build_tree", project = %self.project_name, types = declarations.len());
        let _enter = span.enter();
        let _phase = set_phase(ProcessingPhase::TreeConstruction);

        if self.project_name.trim().is_empty() {
            return Err(Error::construction("<project>", "project name is empty"));
        }

        let mut tree = CodeTree::new(self.project_name, self.attributes);
        for declaration in declarations {
            validate_type(&declaration)?;
            let package = tree.package(declaration.package_name());
            let members: Vec<MethodDeclaration> = declaration
                .constructors
                .iter()
                .chain(&declaration.methods)
                .cloned()
                .collect();
            let ty = tree.add_type(package, declaration)?;
            for member in members {
                tree.add_method(ty, member)?;
            }
        }

        debug!(nodes = tree.len(), "Code tree built");
        Ok(Project::new(tree, self.resolver))
    }
}

fn validate_type(declaration: &TypeDeclaration) -> Result<()> {
    let qualified = || declaration.qualified_name().to_string();
    if declaration.simple_name.trim().is_empty() {
        return Err(Error::construction(qualified(), "type name is empty"));
    }
    if declaration.package.as_deref().is_some_and(|p| p.trim().is_empty()) {
        return Err(Error::construction(qualified(), "package name is empty"));
    }
    if let Some(method) = declaration.methods.iter().find(|m| m.name.trim().is_empty()) {
        return Err(Error::construction(
            qualified(),
            format!("method with empty name `{}`", method.signature()),
        ));
    }
    if let Some(field) = declaration.fields.iter().find(|f| f.name.trim().is_empty()) {
        return Err(Error::construction(
            qualified(),
            format!("field of type `{}` has no name", field.type_ref.name),
        ));
    }
    Ok(())
}
