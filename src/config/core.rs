use serde::{Deserialize, Serialize};

use super::parallel::ParallelConfig;
use super::patterns::{ComponentConfig, DependencyPatterns, RouteConfig};
use crate::core::errors::{Error, Result};

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_max_file_bytes() -> u64 {
    1024 * 1024
}

fn default_max_files() -> usize {
    100
}

/// Root configuration structure for repodoc
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RepodocConfig {
    /// Dependency categorization and technology rules
    pub patterns: DependencyPatterns,

    /// API route file conventions
    pub routes: RouteConfig,

    /// UI component heuristics
    pub components: ComponentConfig,

    /// Per-file parser limits
    pub parser: ParserConfig,

    /// Batch parallelism
    pub parallel: ParallelConfig,

    /// Local directory walking
    pub walker: WalkerConfig,
}

impl RepodocConfig {
    /// Reject settings that cannot work at all.
    pub fn validate(&self) -> Result<()> {
        if self.parallel.max_concurrency == Some(0) {
            return Err(Error::configuration(
                "parallel.max_concurrency must be at least 1",
            ));
        }
        if self.walker.max_files == 0 {
            return Err(Error::configuration("walker.max_files must be at least 1"));
        }
        if self.routes.entry_names.is_empty() {
            return Err(Error::configuration(
                "routes.entry_names must name at least one file stem",
            ));
        }
        Ok(())
    }
}

/// Limits applied to every file before and during parsing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserConfig {
    /// Parser watchdog per file, in milliseconds (0 disables it)
    pub timeout_ms: u64,

    /// Files larger than this are skipped without parsing
    pub max_file_bytes: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

/// Settings for collecting files from a local checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WalkerConfig {
    /// Stop after collecting this many analyzable files
    pub max_files: usize,

    /// Honor `.gitignore` and friends
    pub respect_gitignore: bool,

    /// Directory names never descended into
    pub skip_dirs: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            respect_gitignore: true,
            skip_dirs: [
                "node_modules",
                ".git",
                ".next",
                "dist",
                "build",
                "coverage",
                ".cache",
                ".vercel",
                ".turbo",
                "vendor",
                "target",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}
