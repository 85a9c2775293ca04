//! Configuration for repodoc.
//!
//! Every section is optional in `.repodoc.toml`; missing sections and fields
//! take their defaults.

mod core;
pub mod loader;
pub mod parallel;
pub mod patterns;

pub use self::core::{ParserConfig, RepodocConfig, WalkerConfig};
pub use loader::{discover_config, load_config_from_path, CONFIG_FILE_NAME};
pub use parallel::ParallelConfig;
pub use patterns::{ComponentConfig, DependencyPatterns, RouteConfig, TechnologyRule};
