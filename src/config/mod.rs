//! Engine configuration.
//!
//! Read from `.codemetrics.toml`, found by walking up from the current
//! directory. Every field has a default, so an absent or partial file is
//! fine.

pub mod core;
pub mod loader;
pub mod parallel;

pub use self::core::{EngineConfig, FormatConfig, MetricsConfig, MAX_SIGNIFICANT_DIGITS};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use parallel::ParallelConfig;
