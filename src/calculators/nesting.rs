use crate::core::{Metric, NodeId, Project};
use crate::source::visit::{self, Visit};
use crate::source::{Block, Stmt};

pub const NBD: &str = "NBD";

pub fn calculate(project: &Project, method: NodeId) -> Vec<Metric> {
    project
        .node(method)
        .method_declaration()
        .and_then(|declaration| declaration.body.as_ref())
        .map(|body| vec![Metric::new(NBD, "Nested Block Depth", nested_block_depth(body))])
        .unwrap_or_default()
}

/// Depth of the deepest control structure; the method body itself is 1.
pub fn nested_block_depth(body: &Block) -> u64 {
    let mut visitor = DepthVisitor { depth: 1, max: 1 };
    visitor.visit_block(body);
    visitor.max
}

struct DepthVisitor {
    depth: u64,
    max: u64,
}

fn opens_block(stmt: &Stmt) -> bool {
    matches!(
        stmt,
        Stmt::If { .. }
            | Stmt::For { .. }
            | Stmt::ForEach { .. }
            | Stmt::While { .. }
            | Stmt::DoWhile { .. }
            | Stmt::Switch { .. }
            | Stmt::Try { .. }
            | Stmt::Synchronized { .. }
    )
}

impl<'ast> Visit<'ast> for DepthVisitor {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if !opens_block(stmt) {
            visit::visit_stmt(self, stmt);
            return;
        }
        self.depth += 1;
        self.max = self.max.max(self.depth);
        visit::visit_stmt(self, stmt);
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Expr;

    #[test]
    fn test_flat_body_has_depth_one() {
        let body = Block::new(vec![Stmt::Return(None)]);
        assert_eq!(nested_block_depth(&body), 1);
    }

    #[test]
    fn test_deepest_branch_wins() {
        let body = Block::new(vec![
            Stmt::if_then(
                Expr::name("a"),
                Stmt::block(vec![Stmt::while_loop(
                    Expr::name("b"),
                    Stmt::block(vec![Stmt::Break]),
                )]),
            ),
            Stmt::while_loop(Expr::name("c"), Stmt::Break),
        ]);
        assert_eq!(nested_block_depth(&body), 3);
    }

    #[test]
    fn test_plain_blocks_do_not_add_depth() {
        let body = Block::new(vec![Stmt::block(vec![Stmt::block(vec![Stmt::Break])])]);
        assert_eq!(nested_block_depth(&body), 1);
    }
}
