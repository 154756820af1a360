use crate::core::{Metric, NodeId, Project};
use crate::source::visit::{self, Visit};
use crate::source::{BinaryOp, Block, Expr, Stmt, SwitchCase};

pub const VG: &str = "VG";

pub fn calculate(project: &Project, method: NodeId) -> Vec<Metric> {
    project
        .node(method)
        .method_declaration()
        .and_then(|declaration| declaration.body.as_ref())
        .map(|body| vec![Metric::new(VG, "McCabe Cyclomatic Complexity", calculate_cyclomatic(body))])
        .unwrap_or_default()
}

/// `1 + if + for + while + do + labeled case + ternary + && + ||`.
pub fn calculate_cyclomatic(block: &Block) -> u64 {
    let mut visitor = CyclomaticVisitor { complexity: 1 };
    visitor.visit_block(block);
    visitor.complexity
}

struct CyclomaticVisitor {
    complexity: u64,
}

fn stmt_complexity(stmt: &Stmt) -> u64 {
    match stmt {
        Stmt::If { .. }
        | Stmt::For { .. }
        | Stmt::ForEach { .. }
        | Stmt::While { .. }
        | Stmt::DoWhile { .. } => 1,
        _ => 0,
    }
}

fn expr_complexity(expr: &Expr) -> u64 {
    match expr {
        Expr::Conditional { .. } => 1,
        Expr::Binary { op, .. } if is_logical_operator(*op) => 1,
        _ => 0,
    }
}

fn is_logical_operator(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::And | BinaryOp::Or)
}

impl<'ast> Visit<'ast> for CyclomaticVisitor {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        self.complexity += stmt_complexity(stmt);
        visit::visit_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        self.complexity += expr_complexity(expr);
        visit::visit_expr(self, expr);
    }

    fn visit_switch_case(&mut self, case: &'ast SwitchCase) {
        if !case.is_default() {
            self.complexity += 1;
        }
        visit::visit_switch_case(self, case);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{LocalVarDecl, TypeReference};

    #[test]
    fn test_straight_line_code_is_one() {
        let body = Block::new(vec![Stmt::Return(Some(Expr::literal("0")))]);
        assert_eq!(calculate_cyclomatic(&body), 1);
    }

    #[test]
    fn test_counts_branches_and_loops() {
        let body = Block::new(vec![
            Stmt::if_then(Expr::name("a"), Stmt::Break),
            Stmt::while_loop(Expr::name("b"), Stmt::block(vec![])),
            Stmt::DoWhile {
                body: Box::new(Stmt::block(vec![])),
                condition: Expr::name("c"),
            },
            Stmt::For {
                init: vec![],
                condition: None,
                update: vec![],
                body: Box::new(Stmt::block(vec![])),
            },
            Stmt::ForEach {
                variable: LocalVarDecl::single(TypeReference::unresolved("int"), "x", None),
                iterable: Expr::name("xs"),
                body: Box::new(Stmt::block(vec![])),
            },
        ]);
        assert_eq!(calculate_cyclomatic(&body), 6);
    }

    #[test]
    fn test_switch_counts_labeled_cases_only() {
        let body = Block::new(vec![Stmt::Switch {
            selector: Expr::name("k"),
            cases: vec![
                SwitchCase {
                    labels: vec![Expr::literal("1")],
                    body: vec![Stmt::Break],
                },
                SwitchCase {
                    labels: vec![Expr::literal("2")],
                    body: vec![Stmt::Break],
                },
                SwitchCase {
                    labels: vec![],
                    body: vec![Stmt::Break],
                },
            ],
        }]);
        assert_eq!(calculate_cyclomatic(&body), 3);
    }

    #[test]
    fn test_ternary_and_logical_operators() {
        let condition = Expr::binary(
            BinaryOp::Or,
            Expr::binary(BinaryOp::And, Expr::name("a"), Expr::name("b")),
            Expr::name("c"),
        );
        let body = Block::new(vec![Stmt::Return(Some(Expr::conditional(
            condition,
            Expr::literal("1"),
            Expr::literal("2"),
        )))]);
        assert_eq!(calculate_cyclomatic(&body), 4);
    }

    #[test]
    fn test_nested_if_in_else_branch() {
        let body = Block::new(vec![Stmt::If {
            condition: Expr::name("a"),
            then_branch: Box::new(Stmt::Break),
            else_branch: Some(Box::new(Stmt::if_then(Expr::name("b"), Stmt::Break))),
        }]);
        assert_eq!(calculate_cyclomatic(&body), 3);
    }
}
