//! Henderson-Sellers lack of cohesion, `LCOM* = (avg - n) / (1 - n)`.
//!
//! A method accesses a field through `this.field` or through a bare name
//! that no enclosing local declaration shadows. Scopes are tracked per
//! access: parameters, every local declared in an enclosing block, for-loop
//! initialisers, for-each variables, catch parameters and lambda parameters.
//! A local shadows for its whole block, including statements before its
//! declaration.

use std::collections::HashSet;

use crate::core::{Metric, NodeId, Project};
use crate::numeric::NumericValue;
use crate::source::visit::{self, Visit};
use crate::source::{Block, CatchClause, Expr, LambdaBody, MethodDeclaration, Stmt, SwitchCase};

pub const LCOM: &str = "LCOM*";

pub fn calculate(project: &Project, ty: NodeId) -> Vec<Metric> {
    let Some(declaration) = project.node(ty).type_declaration() else {
        return Vec::new();
    };
    let fields: Vec<&str> = declaration.fields.iter().map(|f| f.name.as_str()).collect();
    let methods: Vec<&MethodDeclaration> = declaration.methods.iter().collect();

    lack_of_cohesion(&fields, &methods)
        .map(|value| vec![Metric::new(LCOM, "Lack of Cohesion of Methods", value)])
        .unwrap_or_default()
}

/// `None` without fields or with exactly one method.
pub fn lack_of_cohesion(fields: &[&str], methods: &[&MethodDeclaration]) -> Option<NumericValue> {
    let accessed: Vec<HashSet<String>> = methods
        .iter()
        .map(|method| accessed_fields(method, fields))
        .collect();
    let accessors: usize = fields
        .iter()
        .map(|field| accessed.iter().filter(|set| set.contains(*field)).count())
        .sum();

    let n = NumericValue::from(methods.len());
    let average = NumericValue::from(accessors)
        .divide(&NumericValue::from(fields.len()))
        .ok()?;
    let numerator = average.minus(&n);
    let denominator = NumericValue::from(1).minus(&n);
    numerator.divide(&denominator).ok()
}

/// Fields of the enclosing type that `method` reads or writes.
pub fn accessed_fields(method: &MethodDeclaration, fields: &[&str]) -> HashSet<String> {
    let Some(body) = &method.body else {
        return HashSet::new();
    };
    let mut visitor = FieldAccessVisitor {
        fields,
        scopes: vec![method.parameters.iter().map(|p| p.name.clone()).collect()],
        accessed: HashSet::new(),
    };
    visitor.visit_block(body);
    visitor.accessed
}

struct FieldAccessVisitor<'f> {
    fields: &'f [&'f str],
    scopes: Vec<HashSet<String>>,
    accessed: HashSet<String>,
}

impl FieldAccessVisitor<'_> {
    fn is_field(&self, name: &str) -> bool {
        self.fields.contains(&name)
    }

    fn is_shadowed(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains(name))
    }

    fn record(&mut self, name: &str) {
        self.accessed.insert(name.to_string());
    }

    fn scoped<'n>(&mut self, names: impl IntoIterator<Item = &'n str>, walk: impl FnOnce(&mut Self)) {
        self.scopes.push(names.into_iter().map(str::to_string).collect());
        walk(self);
        self.scopes.pop();
    }
}

fn locals_of(statements: &[Stmt]) -> Vec<&str> {
    statements
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::LocalVar(decl) => Some(decl.names()),
            _ => None,
        })
        .flatten()
        .collect()
}

impl<'ast> Visit<'ast> for FieldAccessVisitor<'_> {
    fn visit_block(&mut self, block: &'ast Block) {
        self.scoped(block.declared_names(), |v| visit::visit_block(v, block));
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match stmt {
            Stmt::For { init, .. } => {
                self.scoped(locals_of(init), |v| visit::visit_stmt(v, stmt));
            }
            Stmt::ForEach { variable, .. } => {
                self.scoped(variable.names(), |v| visit::visit_stmt(v, stmt));
            }
            _ => visit::visit_stmt(self, stmt),
        }
    }

    fn visit_switch_case(&mut self, case: &'ast SwitchCase) {
        self.scoped(locals_of(&case.body), |v| visit::visit_switch_case(v, case));
    }

    fn visit_catch_clause(&mut self, clause: &'ast CatchClause) {
        self.scoped([clause.parameter.as_str()], |v| {
            visit::visit_catch_clause(v, clause)
        });
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match expr {
            Expr::Name(name) if self.is_field(name) && !self.is_shadowed(name) => {
                self.record(name);
            }
            Expr::FieldAccess { target, field }
                if matches!(**target, Expr::This) && self.is_field(field) =>
            {
                self.record(field);
            }
            Expr::Lambda { parameters, body } => {
                self.scoped(parameters.iter().map(String::as_str), |v| match body {
                    LambdaBody::Expr(expr) => v.visit_expr(expr),
                    LambdaBody::Block(block) => v.visit_block(block),
                });
                return;
            }
            _ => {}
        }
        visit::visit_expr(self, expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{LocalVarDecl, Parameter, TypeReference};

    fn int() -> TypeReference {
        TypeReference::unresolved("int")
    }

    fn method(name: &str, statements: Vec<Stmt>) -> MethodDeclaration {
        MethodDeclaration::method(name, int()).with_body(Block::new(statements))
    }

    fn returns(expr: Expr) -> Stmt {
        Stmt::Return(Some(expr))
    }

    #[test]
    fn test_this_access_always_counts() {
        let m = method("get", vec![
            Stmt::LocalVar(LocalVarDecl::single(int(), "x", None)),
            returns(Expr::this_field("x")),
        ]);
        assert!(accessed_fields(&m, &["x"]).contains("x"));
    }

    #[test]
    fn test_parameter_shadows_field() {
        let m = MethodDeclaration::method("set", int())
            .with_parameter(Parameter::new("x", int()))
            .with_body(Block::new(vec![Stmt::expr(Expr::assign(
                Expr::this_field("y"),
                Expr::name("x"),
            ))]));
        let accessed = accessed_fields(&m, &["x", "y"]);
        assert!(!accessed.contains("x"));
        assert!(accessed.contains("y"));
    }

    #[test]
    fn test_shadowing_is_resolved_per_access_path() {
        // `x` is local only inside the first nested block
        let m = method("f", vec![
            Stmt::block(vec![
                Stmt::LocalVar(LocalVarDecl::single(int(), "x", None)),
                Stmt::expr(Expr::name("x")),
            ]),
            Stmt::block(vec![Stmt::expr(Expr::name("x"))]),
        ]);
        assert!(accessed_fields(&m, &["x"]).contains("x"));

        let only_shadowed = method("g", vec![Stmt::block(vec![
            Stmt::LocalVar(LocalVarDecl::single(int(), "x", None)),
            Stmt::expr(Expr::name("x")),
        ])]);
        assert!(accessed_fields(&only_shadowed, &["x"]).is_empty());
    }

    #[test]
    fn test_lambda_and_catch_parameters_shadow() {
        let lambda = Expr::Lambda {
            parameters: vec!["x".into()],
            body: LambdaBody::Expr(Box::new(Expr::name("x"))),
        };
        let m = method("f", vec![
            Stmt::expr(lambda),
            Stmt::Try {
                block: Block::new(vec![]),
                catches: vec![CatchClause {
                    parameter: "e".into(),
                    type_ref: TypeReference::unresolved("Exception"),
                    block: Block::new(vec![Stmt::expr(Expr::name("e"))]),
                }],
                finally: None,
            },
        ]);
        assert!(accessed_fields(&m, &["x", "e"]).is_empty());
    }

    #[test]
    fn test_single_method_has_no_lcom() {
        let only = method("f", vec![returns(Expr::name("a"))]);
        assert_eq!(lack_of_cohesion(&["a", "b"], &[&only]), None);
    }

    #[test]
    fn test_no_fields_has_no_lcom() {
        let f = method("f", vec![]);
        let g = method("g", vec![]);
        assert_eq!(lack_of_cohesion(&[], &[&f, &g]), None);
    }

    #[test]
    fn test_fully_cohesive_and_disjoint_types() {
        let f = method("f", vec![returns(Expr::binary(
            crate::source::BinaryOp::Add,
            Expr::name("a"),
            Expr::name("b"),
        ))]);
        let g = method("g", vec![returns(Expr::binary(
            crate::source::BinaryOp::Add,
            Expr::name("a"),
            Expr::name("b"),
        ))]);
        // avg = 2, n = 2: (2 - 2) / (1 - 2) = 0
        assert_eq!(lack_of_cohesion(&["a", "b"], &[&f, &g]), Some(NumericValue::integer(0)));

        let f = method("f", vec![returns(Expr::name("a"))]);
        let g = method("g", vec![returns(Expr::name("b"))]);
        // avg = 1, n = 2: (1 - 2) / (1 - 2) = 1
        assert_eq!(lack_of_cohesion(&["a", "b"], &[&f, &g]), Some(NumericValue::integer(1)));
    }
}
