//! Relationship graphs derived from the code tree.
//!
//! - [`InheritanceGraph`]: supertype to subtype edges
//! - [`UsageGraph`]: type to referenced type edges
//! - [`CallNetwork`]: method to callee multigraph
//!
//! Graphs are built on first request through [`GraphCache`]. Reference
//! failures never abort a build; the offending relationship is dropped.

pub mod cache;
pub mod call_network;
pub mod inheritance;
pub mod references;
pub mod usage;

pub use cache::GraphCache;
pub use call_network::{CallEdge, CallNetwork};
pub use inheritance::InheritanceGraph;
pub use references::{CallSite, References};
pub use usage::UsageGraph;
