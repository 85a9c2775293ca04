//! Analysis orchestration
//!
//! Top-level function that turns a parsed JS/TS file into a [`ParsedFile`].

use super::visitor::extract;
use crate::core::ast::TypeScriptAst;
use crate::core::ParsedFile;
use tracing::debug;

/// Analyze a TypeScript/JavaScript AST and build its file record.
///
/// `path` is the repository-relative path reported back to callers; the
/// language tag is the grammar variant the file was parsed with.
pub fn analyze_typescript_file(ast: &TypeScriptAst, path: &str) -> ParsedFile {
    let start = std::time::Instant::now();

    // Every '\n'-separated segment counts, including a trailing empty one
    let lines_of_code = ast.source.split('\n').count();

    let extraction = extract(ast);

    debug!(
        path,
        functions = extraction.functions.len(),
        classes = extraction.classes.len(),
        imports = extraction.imports.len(),
        exports = extraction.exports.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Analyzed file"
    );

    ParsedFile::new(
        path.to_string(),
        ast.language_variant.language(),
        lines_of_code,
        extraction.functions,
        extraction.classes,
        extraction.imports,
        extraction.exports,
    )
}
