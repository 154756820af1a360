// Shared fixtures for codemetrics integration tests
#![allow(dead_code)]

use codemetrics::config::ParallelConfig;
use codemetrics::source::{
    Block, CallResolution, Expr, MethodDeclaration, MethodTarget, ObjectCreation, Parameter,
    QualifiedName, Stmt, TypeDeclaration, TypeReference,
};
use codemetrics::{CalculatorRegistry, NodeId, ProcessingSummary, Processor, Project, TreeBuilder};

pub fn qualified(package: &str, type_name: &str) -> QualifiedName {
    QualifiedName::new(Some(package), type_name)
}

/// Type reference the parser resolved to `package.type_name`.
pub fn resolved(package: &str, type_name: &str) -> TypeReference {
    TypeReference::resolved(type_name, qualified(package, type_name))
}

pub fn primitive(name: &str) -> TypeReference {
    TypeReference::unresolved(name)
}

pub fn method(name: &str, statements: Vec<Stmt>) -> MethodDeclaration {
    MethodDeclaration::method(name, primitive("void")).with_body(Block::new(statements))
}

pub fn method_with_params(
    name: &str,
    params: &[(&str, TypeReference)],
    statements: Vec<Stmt>,
) -> MethodDeclaration {
    params.iter().fold(method(name, statements), |m, (param, ty)| {
        m.with_parameter(Parameter::new(*param, ty.clone()))
    })
}

/// Unqualified call resolved to `signature` on `package.type_name`.
pub fn call(package: &str, type_name: &str, signature: &str, name: &str) -> Stmt {
    Stmt::expr(Expr::call(
        name,
        Some(MethodTarget {
            declaring: qualified(package, type_name),
            signature: signature.to_string(),
        }),
    ))
}

pub fn unresolved_call(name: &str) -> Stmt {
    Stmt::expr(Expr::call(name, None))
}

/// `new T()` whose constructor was not resolved but whose type was.
pub fn creation(package: &str, type_name: &str) -> Stmt {
    Stmt::expr(Expr::ObjectCreation(ObjectCreation {
        type_ref: resolved(package, type_name),
        arguments: Vec::new(),
        resolution: CallResolution::Unresolved,
    }))
}

/// `n` sequential `if` statements, giving cyclomatic complexity `n + 1`.
pub fn branches(n: usize) -> Vec<Stmt> {
    (0..n)
        .map(|i| Stmt::if_then(Expr::name(format!("c{i}")), Stmt::Break))
        .collect()
}

pub fn build(types: Vec<TypeDeclaration>) -> Project {
    TreeBuilder::new("fixture")
        .build(types)
        .expect("fixture declarations are well formed")
}

pub fn process(project: &Project, parallel: ParallelConfig) -> ProcessingSummary {
    Processor::new(CalculatorRegistry::reference(), &parallel)
        .expect("worker pool")
        .process(project)
        .expect("processing run")
}

pub fn process_parallel(project: &Project) -> ProcessingSummary {
    process(project, ParallelConfig::new().with_max_concurrency(4))
}

pub fn type_node(project: &Project, package: &str, name: &str) -> NodeId {
    project
        .find_type(package, name)
        .unwrap_or_else(|| panic!("type {package}.{name} not in project"))
}

pub fn package_node(project: &Project, package: &str) -> NodeId {
    let root = project.node(project.tree().root());
    root.child(codemetrics::NodeKind::Package, package)
        .unwrap_or_else(|| panic!("package {package} not in project"))
        .id()
}

pub fn method_node(project: &Project, ty: NodeId, signature: &str) -> NodeId {
    project
        .node(ty)
        .method_by_signature(signature)
        .unwrap_or_else(|| panic!("method {signature} not found"))
}

/// Metric value rendered with the default digits, `None` when absent.
pub fn metric(project: &Project, node: NodeId, name: &str) -> Option<String> {
    project
        .node(node)
        .metric(name)
        .map(|m| m.value().to_string())
}

pub fn value(project: &Project, node: NodeId, name: &str) -> Option<codemetrics::NumericValue> {
    project.node(node).metric(name).map(|m| m.value().clone())
}
