//! Extraction of every reference a type or method makes.

use crate::source::visit::{self, Visit};
use crate::source::{
    CatchClause, Expr, MethodCall, MethodDeclaration, ObjectCreation, Resolution, Stmt,
    TypeDeclaration, TypeReference,
};

/// A call site: either a method call or a constructor invocation.
#[derive(Debug, Clone, Copy)]
pub enum CallSite<'a> {
    Method(&'a MethodCall),
    Creation(&'a ObjectCreation),
}

impl CallSite<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Method(call) => &call.name,
            Self::Creation(creation) => &creation.type_ref.name,
        }
    }
}

/// References collected from declarations and bodies, in source order.
#[derive(Debug, Default)]
pub struct References<'a> {
    /// Field, parameter and local-variable types.
    pub type_refs: Vec<&'a TypeReference>,
    pub calls: Vec<CallSite<'a>>,
    /// Unqualified identifiers appearing as expressions.
    pub bare_names: Vec<&'a str>,
}

impl<'a> References<'a> {
    pub fn of_type(declaration: &'a TypeDeclaration) -> Self {
        let mut references = Self::default();
        for field in &declaration.fields {
            references.type_refs.push(&field.type_ref);
        }
        for method in declaration.constructors.iter().chain(&declaration.methods) {
            references.collect_method(method);
        }
        references
    }

    pub fn of_method(method: &'a MethodDeclaration) -> Self {
        let mut references = Self::default();
        references.collect_method(method);
        references
    }

    fn collect_method(&mut self, method: &'a MethodDeclaration) {
        for parameter in &method.parameters {
            self.type_refs.push(&parameter.type_ref);
        }
        if let Some(body) = &method.body {
            self.visit_block(body);
        }
    }

    /// Simple names of unresolved type references plus bare identifiers;
    /// what remains when resolution gave up.
    pub fn unresolved_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.type_refs
            .iter()
            .copied()
            .filter(|r| matches!(r.resolution, Resolution::Unresolved))
            .map(TypeReference::simple_name)
            .chain(self.bare_names.iter().copied())
    }
}

impl<'a> Visit<'a> for References<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::LocalVar(decl) => self.type_refs.push(&decl.type_ref),
            Stmt::ForEach { variable, .. } => self.type_refs.push(&variable.type_ref),
            _ => {}
        }
        visit::visit_stmt(self, stmt);
    }

    fn visit_catch_clause(&mut self, clause: &'a CatchClause) {
        self.type_refs.push(&clause.type_ref);
        visit::visit_catch_clause(self, clause);
    }

    fn visit_method_call(&mut self, call: &'a MethodCall) {
        self.calls.push(CallSite::Method(call));
        visit::visit_method_call(self, call);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Name(name) => self.bare_names.push(name),
            Expr::ObjectCreation(creation) => self.calls.push(CallSite::Creation(creation)),
            _ => {}
        }
        visit::visit_expr(self, expr);
    }
}
