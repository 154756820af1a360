//! Syntax tree traversal in the style of `syn::visit`.
//!
//! Each `visit_*` method defaults to the matching free function, which walks
//! the node's children. Override a method to observe a node; call the free
//! function from the override to keep descending.

use super::body::{Block, CatchClause, Expr, LambdaBody, MethodCall, Stmt, SwitchCase};

pub trait Visit<'ast> {
    fn visit_block(&mut self, block: &'ast Block) {
        visit_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        visit_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        visit_expr(self, expr);
    }

    fn visit_switch_case(&mut self, case: &'ast SwitchCase) {
        visit_switch_case(self, case);
    }

    fn visit_catch_clause(&mut self, clause: &'ast CatchClause) {
        visit_catch_clause(self, clause);
    }

    fn visit_method_call(&mut self, call: &'ast MethodCall) {
        visit_method_call(self, call);
    }
}

pub fn visit_block<'ast, V>(v: &mut V, block: &'ast Block)
where
    V: Visit<'ast> + ?Sized,
{
    for stmt in &block.statements {
        v.visit_stmt(stmt);
    }
}

pub fn visit_stmt<'ast, V>(v: &mut V, stmt: &'ast Stmt)
where
    V: Visit<'ast> + ?Sized,
{
    match stmt {
        Stmt::Expr(expr) | Stmt::Throw(expr) => v.visit_expr(expr),
        Stmt::LocalVar(decl) => {
            for init in decl.declarators.iter().filter_map(|d| d.init.as_ref()) {
                v.visit_expr(init);
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            v.visit_expr(condition);
            v.visit_stmt(then_branch);
            if let Some(else_branch) = else_branch {
                v.visit_stmt(else_branch);
            }
        }
        Stmt::For {
            init,
            condition,
            update,
            body,
        } => {
            for stmt in init {
                v.visit_stmt(stmt);
            }
            if let Some(condition) = condition {
                v.visit_expr(condition);
            }
            for expr in update {
                v.visit_expr(expr);
            }
            v.visit_stmt(body);
        }
        Stmt::ForEach {
            variable: _,
            iterable,
            body,
        } => {
            v.visit_expr(iterable);
            v.visit_stmt(body);
        }
        Stmt::While { condition, body } | Stmt::DoWhile { body, condition } => {
            v.visit_expr(condition);
            v.visit_stmt(body);
        }
        Stmt::Switch { selector, cases } => {
            v.visit_expr(selector);
            for case in cases {
                v.visit_switch_case(case);
            }
        }
        Stmt::Block(block) => v.visit_block(block),
        Stmt::Return(expr) => {
            if let Some(expr) = expr {
                v.visit_expr(expr);
            }
        }
        Stmt::Try {
            block,
            catches,
            finally,
        } => {
            v.visit_block(block);
            for clause in catches {
                v.visit_catch_clause(clause);
            }
            if let Some(finally) = finally {
                v.visit_block(finally);
            }
        }
        Stmt::Labeled { body, .. } => v.visit_stmt(body),
        Stmt::Synchronized { lock, block } => {
            v.visit_expr(lock);
            v.visit_block(block);
        }
        Stmt::Break | Stmt::Continue => {}
    }
}

pub fn visit_switch_case<'ast, V>(v: &mut V, case: &'ast SwitchCase)
where
    V: Visit<'ast> + ?Sized,
{
    for label in &case.labels {
        v.visit_expr(label);
    }
    for stmt in &case.body {
        v.visit_stmt(stmt);
    }
}

pub fn visit_catch_clause<'ast, V>(v: &mut V, clause: &'ast CatchClause)
where
    V: Visit<'ast> + ?Sized,
{
    v.visit_block(&clause.block);
}

pub fn visit_method_call<'ast, V>(v: &mut V, call: &'ast MethodCall)
where
    V: Visit<'ast> + ?Sized,
{
    if let Some(target) = &call.target {
        v.visit_expr(target);
    }
    for argument in &call.arguments {
        v.visit_expr(argument);
    }
}

pub fn visit_expr<'ast, V>(v: &mut V, expr: &'ast Expr)
where
    V: Visit<'ast> + ?Sized,
{
    match expr {
        Expr::Literal(_) | Expr::Name(_) | Expr::This | Expr::ClassLiteral(_) => {}
        Expr::FieldAccess { target, .. } => v.visit_expr(target),
        Expr::MethodCall(call) => v.visit_method_call(call),
        Expr::ObjectCreation(creation) => {
            for argument in &creation.arguments {
                v.visit_expr(argument);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        Expr::Unary { operand, .. } => v.visit_expr(operand),
        Expr::Conditional {
            condition,
            then_expr,
            else_expr,
        } => {
            v.visit_expr(condition);
            v.visit_expr(then_expr);
            v.visit_expr(else_expr);
        }
        Expr::Assign { target, value } => {
            v.visit_expr(target);
            v.visit_expr(value);
        }
        Expr::Cast { expr, .. } | Expr::InstanceOf { expr, .. } => v.visit_expr(expr),
        Expr::ArrayAccess { array, index } => {
            v.visit_expr(array);
            v.visit_expr(index);
        }
        Expr::Lambda { body, .. } => match body {
            LambdaBody::Expr(expr) => v.visit_expr(expr),
            LambdaBody::Block(block) => v.visit_block(block),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::body::BinaryOp;

    struct NameCounter {
        names: Vec<String>,
    }

    impl<'ast> Visit<'ast> for NameCounter {
        fn visit_expr(&mut self, expr: &'ast Expr) {
            if let Expr::Name(name) = expr {
                self.names.push(name.clone());
            }
            visit_expr(self, expr);
        }
    }

    #[test]
    fn test_visitor_reaches_nested_expressions() {
        let body = Block::new(vec![
            Stmt::if_then(
                Expr::binary(BinaryOp::Lt, Expr::name("a"), Expr::name("b")),
                Stmt::block(vec![Stmt::Return(Some(Expr::name("c")))]),
            ),
            Stmt::while_loop(Expr::name("d"), Stmt::Break),
        ]);

        let mut counter = NameCounter { names: Vec::new() };
        counter.visit_block(&body);
        assert_eq!(counter.names, vec!["a", "b", "c", "d"]);
    }
}
