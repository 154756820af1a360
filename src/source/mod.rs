//! Input model delivered by the external parsing and resolution collaborator.
//!
//! The engine never reads source text. A parser hands over one
//! [`TypeDeclaration`] per type, with method bodies as a small syntax tree and
//! every reference annotated with what it resolved to. A [`SymbolResolver`]
//! sits between those annotations and the graph builders.

pub mod body;
pub mod declarations;
pub mod resolver;
pub mod visit;

pub use body::{
    BinaryOp, Block, CallResolution, CatchClause, Expr, LambdaBody, LocalVarDecl, MethodCall,
    MethodTarget, ObjectCreation, Stmt, SwitchCase, UnaryOp, VarDeclarator,
};
pub use declarations::{
    FieldDeclaration, MethodDeclaration, MethodKind, Modifiers, Parameter, QualifiedName,
    Resolution, TypeDeclaration, TypeKind, TypeReference, Visibility, DEFAULT_PACKAGE,
};
pub use resolver::{DeclaredResolver, ResolutionError, SymbolResolver};
pub use visit::Visit;
