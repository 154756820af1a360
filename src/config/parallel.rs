//! Parallelism configuration for metric processing.

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// Controls the processor's worker pool.
///
/// ```rust
/// use codemetrics::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     max_concurrency: Some(4),
/// };
/// assert_eq!(config.effective_concurrency(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Run calculators on a worker pool (default: true)
    ///
    /// When disabled, every level runs sequentially on the calling thread.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Pool size (default: available CPU cores)
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
        }
    }
}

impl ParallelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn with_max_concurrency(mut self, threads: usize) -> Self {
        self.max_concurrency = Some(threads);
        self
    }

    /// Configured `max_concurrency`, or the number of available CPU cores.
    /// Always 1 when parallelism is disabled.
    pub fn effective_concurrency(&self) -> usize {
        if !self.enabled {
            return 1;
        }
        self.max_concurrency.unwrap_or_else(num_cpus)
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}
