//! Construction of a [`Project`](crate::core::Project) from parsed declarations.

pub mod tree_builder;

pub use tree_builder::TreeBuilder;
