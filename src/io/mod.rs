pub mod manifest;
pub mod output;
pub mod walker;
pub mod writers;

pub use manifest::{load_manifest, parse_package_json, parse_package_json_str};
pub use output::{create_writer, OutputFormat, OutputWriter};
pub use walker::{collect_source_files, FileWalker};

