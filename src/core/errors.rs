//! Shared error types for the engine

use thiserror::Error;

use crate::core::tree::NodeKind;

/// Main error type for codemetrics operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input from the parsing collaborator; the run cannot continue
    #[error("Tree construction error in `{type_name}`: {message}")]
    Construction { type_name: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two calculators at one level declare the same metric name
    #[error("Metric `{metric}` is produced by both `{first}` and `{second}` at {level} level")]
    MetricCollision {
        metric: String,
        level: NodeKind,
        first: &'static str,
        second: &'static str,
    },

    /// Worker pool errors
    #[error("Concurrency error: {0}")]
    Concurrency(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a construction error for a type declaration
    pub fn construction(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
