//! Static analysis of JavaScript/TypeScript repositories.
//!
//! Raw source files go in; one serializable [`AnalysisResult`] comes out,
//! holding per-file functions, classes, imports and exports, cyclomatic
//! complexity, detected UI components and API endpoints, and repository-wide
//! metrics.
//!
//! ```rust
//! use repodoc::{analyze_repository, RepodocConfig, SourceFile};
//!
//! let files = vec![SourceFile::new(
//!     "app/api/users/route.ts",
//!     "export async function GET() { return Response.json([]); }",
//! )];
//! let result = analyze_repository(&files, None, &RepodocConfig::default());
//! assert_eq!(result.api_endpoints[0].route_path, "/api/users");
//! ```

pub mod aggregation;
pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod detectors;
pub mod io;

use std::sync::atomic::AtomicBool;
use tracing::{info, warn};

pub use crate::core::{
    AnalysisResult, ApiEndpointRecord, ArchitectureSummary, ClassRecord, ComponentKind,
    ComponentRecord, ComponentRole, DependencyCategorization, DependencyManifest,
    DependencySummary, Error, ExportKind, ExportRecord, FunctionRecord, HttpMethod, ImportKind,
    ImportRecord, Language, ParsedFile, RepositoryMetrics, Result, SkipReason, SkippedFile,
    SourceFile,
};

pub use crate::aggregation::Aggregator;
pub use crate::analyzers::{analyze_files, analyze_source_file, BatchOutcome, ParseFailure};
pub use crate::config::{discover_config, load_config_from_path, RepodocConfig};
pub use crate::detectors::{detect_api_endpoints, detect_components, route_path_for};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

/// Analyze a set of files and roll the results up into one [`AnalysisResult`].
///
/// Files that cannot be parsed are reported in `skipped_files`; they never
/// fail the run.
pub fn analyze_repository(
    files: &[SourceFile],
    manifest: Option<&DependencyManifest>,
    config: &RepodocConfig,
) -> AnalysisResult {
    analyze_repository_with_stop(files, manifest, config, None)
}

/// [`analyze_repository`] with a cooperative stop flag.
///
/// Raising `stop` leaves unstarted files out of the result; everything
/// already parsed is still aggregated.
pub fn analyze_repository_with_stop(
    files: &[SourceFile],
    manifest: Option<&DependencyManifest>,
    config: &RepodocConfig,
    stop: Option<&AtomicBool>,
) -> AnalysisResult {
    let outcome = analyze_files(files, &config.parser, &config.parallel, stop);
    if outcome.interrupted {
        warn!(
            "Analysis stopped early: {} of {} files processed",
            outcome.parsed.len() + outcome.skipped.len(),
            files.len()
        );
    }

    let components = detect_components(&outcome.parsed, &config.components);
    let api_endpoints = detect_api_endpoints(&outcome.parsed, &config.routes);

    let result = Aggregator::new(config.patterns.clone()).aggregate(
        outcome.parsed,
        outcome.skipped,
        manifest,
        components,
        api_endpoints,
    );

    info!(
        files = result.metrics.total_files,
        skipped = result.skipped_files.len(),
        endpoints = result.metrics.total_api_endpoints,
        components = result.metrics.total_components,
        "Repository analysis complete"
    );
    result
}
