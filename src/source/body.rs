//! Method body syntax tree.
//!
//! A deliberately small statement/expression model: enough structure for
//! branch counting, nesting depth, scope-aware name lookup and reference
//! extraction. Calls and object creations carry the parser's resolution.

use serde::{Deserialize, Serialize};

use super::declarations::{QualifiedName, TypeReference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }

    /// Names declared by local variable statements directly inside this block.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.statements.iter().flat_map(|stmt| match stmt {
            Stmt::LocalVar(decl) => decl.names().collect::<Vec<_>>(),
            _ => Vec::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDeclarator {
    pub name: String,
    #[serde(default)]
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalVarDecl {
    pub type_ref: TypeReference,
    pub declarators: Vec<VarDeclarator>,
}

impl LocalVarDecl {
    pub fn single(type_ref: TypeReference, name: impl Into<String>, init: Option<Expr>) -> Self {
        Self {
            type_ref,
            declarators: vec![VarDeclarator {
                name: name.into(),
                init,
            }],
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarators.iter().map(|d| d.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// Case labels; empty for `default`.
    pub labels: Vec<Expr>,
    pub body: Vec<Stmt>,
}

impl SwitchCase {
    pub fn is_default(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub parameter: String,
    pub type_ref: TypeReference,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Expr(Expr),
    LocalVar(LocalVarDecl),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    For {
        init: Vec<Stmt>,
        condition: Option<Expr>,
        update: Vec<Expr>,
        body: Box<Stmt>,
    },
    ForEach {
        variable: LocalVarDecl,
        iterable: Expr,
        body: Box<Stmt>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
    },
    Switch {
        selector: Expr,
        cases: Vec<SwitchCase>,
    },
    Block(Block),
    Return(Option<Expr>),
    Throw(Expr),
    Try {
        block: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    },
    Labeled {
        label: String,
        body: Box<Stmt>,
    },
    Synchronized {
        lock: Expr,
        block: Block,
    },
    Break,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
    BitNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

/// Declaring type and signature of a call target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodTarget {
    pub declaring: QualifiedName,
    pub signature: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallResolution {
    Resolved(MethodTarget),
    #[default]
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Receiver expression; `None` for unqualified calls.
    #[serde(default)]
    pub target: Option<Box<Expr>>,
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Expr>,
    #[serde(default)]
    pub resolution: CallResolution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCreation {
    pub type_ref: TypeReference,
    #[serde(default)]
    pub arguments: Vec<Expr>,
    /// Resolved constructor, when known.
    #[serde(default)]
    pub resolution: CallResolution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(String),
    /// Unqualified identifier.
    Name(String),
    This,
    FieldAccess {
        target: Box<Expr>,
        field: String,
    },
    MethodCall(MethodCall),
    ObjectCreation(ObjectCreation),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Cast {
        type_ref: TypeReference,
        expr: Box<Expr>,
    },
    InstanceOf {
        expr: Box<Expr>,
        type_ref: TypeReference,
    },
    ClassLiteral(TypeReference),
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Lambda {
        parameters: Vec<String>,
        body: LambdaBody,
    },
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// `this.<field>`
    pub fn this_field(field: impl Into<String>) -> Self {
        Self::FieldAccess {
            target: Box::new(Self::This),
            field: field.into(),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn conditional(condition: Expr, then_expr: Expr, else_expr: Expr) -> Self {
        Self::Conditional {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }
    }

    /// Unqualified call resolved to `target`.
    pub fn call(name: impl Into<String>, target: Option<MethodTarget>) -> Self {
        Self::MethodCall(MethodCall {
            target: None,
            name: name.into(),
            arguments: Vec::new(),
            resolution: target.map_or(CallResolution::Unresolved, CallResolution::Resolved),
        })
    }
}

impl Stmt {
    pub fn expr(expr: Expr) -> Self {
        Self::Expr(expr)
    }

    pub fn if_then(condition: Expr, then_branch: Stmt) -> Self {
        Self::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: None,
        }
    }

    pub fn while_loop(condition: Expr, body: Stmt) -> Self {
        Self::While {
            condition,
            body: Box::new(body),
        }
    }

    pub fn block(statements: Vec<Stmt>) -> Self {
        Self::Block(Block::new(statements))
    }
}
