use serde::{Deserialize, Serialize};

use super::parallel::ParallelConfig;
use crate::numeric::DEFAULT_SIGNIFICANT_DIGITS;

/// Upper bound accepted for `format.significant_digits`.
pub const MAX_SIGNIFICANT_DIGITS: usize = 40;

/// Engine configuration as read from `.codemetrics.toml`.
///
/// ```toml
/// [parallel]
/// enabled = true
/// max_concurrency = 4
///
/// [metrics]
/// disabled = ["six", "martin-coupling"]
///
/// [format]
/// significant_digits = 8
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub parallel: ParallelConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,

    #[serde(default)]
    pub format: FormatConfig,
}

/// Which calculators run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Calculator ids to leave out of the reference set
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Rendering of non-integer metric values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatConfig {
    #[serde(default = "default_significant_digits")]
    pub significant_digits: usize,
}

fn default_significant_digits() -> usize {
    DEFAULT_SIGNIFICANT_DIGITS
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            significant_digits: default_significant_digits(),
        }
    }
}

impl EngineConfig {
    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        let digits = self.format.significant_digits;
        if !(1..=MAX_SIGNIFICANT_DIGITS).contains(&digits) {
            return Err(format!(
                "format.significant_digits must be between 1 and {MAX_SIGNIFICANT_DIGITS}, got {digits}"
            ));
        }
        if self.parallel.max_concurrency == Some(0) {
            return Err("parallel.max_concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}
