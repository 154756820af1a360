use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::EngineConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".codemetrics.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML document and check its value ranges.
pub fn parse_and_validate_config(contents: &str) -> Result<EngineConfig> {
    let config = toml::from_str::<EngineConfig>(contents)?;
    config.validate().map_err(Error::Configuration)?;
    Ok(config)
}

/// Load and validate the config file at `path`.
pub fn load_config_file(path: &Path) -> Result<EngineConfig> {
    let contents = read_config_file(path)?;
    parse_and_validate_config(&contents)
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<EngineConfig> {
    match load_config_file(config_path) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(Error::Io(e)) => {
            handle_read_error(config_path, &e);
            None
        }
        Err(e) => {
            log::warn!(
                "Invalid config file {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // "not found" is the normal case while walking ancestors
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` followed by its parents, at most `max_depth` directories.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search the current directory and its ancestors for `.codemetrics.toml`.
pub fn load_config() -> EngineConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            EngineConfig::default()
        }
    }
}

/// The first loadable config at or above `start`; defaults when none is.
pub fn load_config_from(start: PathBuf) -> EngineConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH + 1)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH + 1
            );
            EngineConfig::default()
        })
}
