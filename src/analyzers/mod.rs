//! Per-file analysis.
//!
//! [`analyze_source_file`] is the unit of work: one [`SourceFile`] in, one
//! [`ParsedFile`] or a [`ParseFailure`] out. [`batch`] fans it out over a
//! whole repository.

pub mod batch;
pub mod typescript;

use crate::config::ParserConfig;
use crate::core::{ParsedFile, SourceFile};
use std::path::Path;

pub use batch::{analyze_files, analyze_files_with_progress, BatchOutcome};
pub use typescript::ParseFailure;

/// Parse and extract one file.
///
/// Files outside the JS/TS family fail with
/// [`ParseFailure::UnsupportedLanguage`]; files over
/// `config.max_file_bytes` (when non-zero) fail with
/// [`ParseFailure::TooLarge`] before any parsing happens.
pub fn analyze_source_file(
    file: &SourceFile,
    config: &ParserConfig,
) -> Result<ParsedFile, ParseFailure> {
    if !file.language().is_analyzable() {
        return Err(ParseFailure::UnsupportedLanguage);
    }

    let bytes = file.size_bytes.max(file.content.len() as u64);
    if config.max_file_bytes > 0 && bytes > config.max_file_bytes {
        return Err(ParseFailure::TooLarge {
            bytes,
            limit: config.max_file_bytes,
        });
    }

    let ast = typescript::parser::parse_source_with_timeout(
        &file.content,
        Path::new(&file.path),
        config.timeout_ms,
    )?;

    Ok(typescript::analyze_typescript_file(&ast, &file.path))
}
