//! `[parallel]` section: how the batch runner spreads parsing over threads.

use serde::{Deserialize, Serialize};

const DEFAULT_BATCH_SIZE: usize = 100;

fn default_enabled() -> bool {
    true
}

fn default_batch_size() -> Option<usize> {
    Some(DEFAULT_BATCH_SIZE)
}

/// Batch parallelism settings.
///
/// ```rust
/// use repodoc::config::ParallelConfig;
///
/// let config: ParallelConfig = toml::from_str("max_concurrency = 4").unwrap();
/// assert!(config.enabled);
/// assert_eq!(config.effective_batch_size(), 100);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// When false, files are parsed one after another on the calling thread.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Worker count for a dedicated pool; `None` uses rayon's global pool.
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Files handed to the pool per chunk.
    #[serde(default = "default_batch_size")]
    pub batch_size: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
            batch_size: default_batch_size(),
        }
    }
}

impl ParallelConfig {
    /// Chunk size actually used by the batch runner. Never zero.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE).max(1)
    }
}
