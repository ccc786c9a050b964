use std::fs;
use std::path::{Path, PathBuf};

use super::core::DyscreenConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".dyscreen.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<DyscreenConfig> {
    let config = toml::from_str::<DyscreenConfig>(contents)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;

    config.profile().validate().map_err(Error::config)?;

    Ok(config)
}

/// Load an explicitly requested config file. Every failure propagates.
pub fn load_config_from(path: &Path) -> Result<DyscreenConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let config = parse_and_validate_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading a discovered config file; problems are logged and skipped.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<DyscreenConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
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

/// Search `start` and its ancestors for a config file.
///
/// The first file that loads and validates wins. A broken file is skipped
/// with a warning rather than aborting the search.
pub fn discover_config(start: PathBuf) -> DyscreenConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DyscreenConfig::default()
        })
}

/// Resolve configuration: explicit path if given, otherwise discovery from
/// the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<DyscreenConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    match std::env::current_dir() {
        Ok(dir) => Ok(discover_config(dir)),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(DyscreenConfig::default())
        }
    }
}
