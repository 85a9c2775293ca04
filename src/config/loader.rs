use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::core::RepodocConfig;

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".repodoc.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<RepodocConfig> {
    let config = toml::from_str::<RepodocConfig>(contents)
        .with_context(|| format!("Failed to parse {CONFIG_FILE_NAME}"))?;
    config.validate()?;
    Ok(config)
}

/// Load a config file the user named explicitly. Any problem is an error.
pub fn load_config_from_path(path: &Path) -> Result<RepodocConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_and_validate_config(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Try loading a discovered config file; problems fall back to defaults
fn try_load_config_from_path(config_path: &Path) -> Option<RepodocConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{:#}. Using defaults.", e);
            None
        }
    }
}

/// Generate directory ancestors up to a depth limit
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

/// Search `start` and up to nine of its ancestors for `.repodoc.toml`.
pub fn discover_config(start: &Path) -> RepodocConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RepodocConfig::default()
        })
}
