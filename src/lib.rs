//! Software-quality metrics over an object-oriented code model.
//!
//! A parser hands over resolved [`source::TypeDeclaration`]s, the
//! [`builders::TreeBuilder`] assembles them into a Project → Package → Type
//! → Method tree, and the [`processor::Processor`] runs the calculator
//! registry over it bottom-up. Every metric value is a
//! [`numeric::NumericValue`], exact until a computation needs a real.
//!
//! ```
//! use codemetrics::{compute_metrics, EngineConfig, TreeBuilder};
//! use codemetrics::source::{Block, MethodDeclaration, Stmt, Expr, TypeDeclaration, TypeReference};
//!
//! let body = Block::new(vec![Stmt::if_then(Expr::name("ready"), Stmt::Return(None))]);
//! let point = TypeDeclaration::class(Some("geo"), "Point")
//!     .with_method(MethodDeclaration::method("check", TypeReference::unresolved("void")).with_body(body));
//!
//! let project = TreeBuilder::new("demo").build(vec![point])?;
//! compute_metrics(&project, &EngineConfig::default())?;
//!
//! let ty = project.find_type("geo", "Point").unwrap();
//! assert_eq!(project.node(ty).metric("WMC").unwrap().value().to_string(), "2");
//! # Ok::<(), codemetrics::Error>(())
//! ```

pub mod builders;
pub mod calculators;
pub mod config;
pub mod core;
pub mod graph;
pub mod numeric;
pub mod observability;
pub mod processor;
pub mod report;
pub mod source;

pub use crate::builders::TreeBuilder;
pub use crate::calculators::{Calculator, CalculatorRegistry, CustomCalculator};
pub use crate::config::{load_config, EngineConfig};
pub use crate::core::{
    CodeTree, Error, Metric, NodeId, NodeKind, NodeRef, Project, Result, ResultExt,
};
pub use crate::numeric::{NumericError, NumericValue, Precision};
pub use crate::processor::{ProcessingState, ProcessingSummary, Processor};
pub use crate::report::ProjectReport;

/// Runs the calculators `config` selects over `project` with its parallelism
/// settings.
pub fn compute_metrics(project: &Project, config: &EngineConfig) -> Result<ProcessingSummary> {
    config.validate().map_err(Error::Configuration)?;
    Processor::from_config(config)
        .context("setting up processor")?
        .process(project)
}
