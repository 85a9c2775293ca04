//! Batch file analysis.
//!
//! Maps [`analyze_source_file`] over a list of files with rayon, turning
//! every per-file failure into a [`SkippedFile`] so one bad file never
//! aborts the batch.
//!
//! # Example
//!
//! ```rust
//! use repodoc::analyzers::batch::analyze_files;
//! use repodoc::config::{ParallelConfig, ParserConfig};
//! use repodoc::core::SourceFile;
//!
//! let files = vec![
//!     SourceFile::new("a.js", "function a() {}"),
//!     SourceFile::new("b.js", "function b( {"),
//! ];
//! let outcome = analyze_files(&files, &ParserConfig::default(), &ParallelConfig::default(), None);
//! assert_eq!(outcome.parsed.len(), 1);
//! assert_eq!(outcome.skipped.len(), 1);
//! ```

use super::{analyze_source_file, ParseFailure};
use crate::config::{ParallelConfig, ParserConfig};
use crate::core::{ParsedFile, SkipReason, SkippedFile, SourceFile};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info, trace, warn};

/// Parsed files and skipped files, each in input order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchOutcome {
    pub parsed: Vec<ParsedFile>,
    pub skipped: Vec<SkippedFile>,
    /// Set when the stop flag cut the batch short
    pub interrupted: bool,
}

/// Result of one file; `None` when the stop flag was raised before it began
type FileOutcome = Option<Result<ParsedFile, SkippedFile>>;

/// Called with the number of finished files each time one completes
pub type ProgressFn<'a> = &'a (dyn Fn(usize) + Sync);

/// Shared state every worker reads while the batch runs
struct BatchContext<'a> {
    parser: &'a ParserConfig,
    stop: Option<&'a AtomicBool>,
    completed: AtomicUsize,
    progress: ProgressFn<'a>,
}

/// Analyze every file, in parallel when the config allows it.
///
/// `stop` is checked before each file starts. Files not yet started when it
/// is raised are left out; results that already completed are kept.
pub fn analyze_files(
    files: &[SourceFile],
    parser: &ParserConfig,
    parallel: &ParallelConfig,
    stop: Option<&AtomicBool>,
) -> BatchOutcome {
    let total = files.len();
    analyze_files_with_progress(files, parser, parallel, stop, &|done| {
        trace!("Analyzed {done}/{total} files");
    })
}

/// [`analyze_files`] with a callback fired after each finished file.
///
/// With parallelism on, the callback runs on worker threads and counts
/// arrive in completion order, not input order.
pub fn analyze_files_with_progress(
    files: &[SourceFile],
    parser: &ParserConfig,
    parallel: &ParallelConfig,
    stop: Option<&AtomicBool>,
    progress: ProgressFn<'_>,
) -> BatchOutcome {
    let ctx = BatchContext {
        parser,
        stop,
        completed: AtomicUsize::new(0),
        progress,
    };

    let outcomes = if !parallel.enabled || files.len() <= 1 {
        // Sequential processing
        files.iter().map(|file| analyze_one(file, &ctx)).collect()
    } else {
        match parallel.max_concurrency {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(|| analyze_parallel(files, parallel, &ctx)),
                Err(e) => {
                    warn!("Failed to build a {threads}-thread pool ({e}); using the global pool");
                    analyze_parallel(files, parallel, &ctx)
                }
            },
            None => analyze_parallel(files, parallel, &ctx),
        }
    };

    collect_outcomes(outcomes)
}

fn analyze_parallel(
    files: &[SourceFile],
    parallel: &ParallelConfig,
    ctx: &BatchContext<'_>,
) -> Vec<FileOutcome> {
    let batch_size = parallel.effective_batch_size();

    if files.len() <= batch_size {
        // Single batch
        files
            .par_iter()
            .map(|file| analyze_one(file, ctx))
            .collect()
    } else {
        // Chunked processing for large repositories
        files
            .chunks(batch_size)
            .flat_map(|chunk| {
                chunk
                    .par_iter()
                    .map(|file| analyze_one(file, ctx))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

fn analyze_one(file: &SourceFile, ctx: &BatchContext<'_>) -> FileOutcome {
    if ctx.stop.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return None;
    }

    let result = analyze_source_file(file, ctx.parser).map_err(|failure| {
        log_failure(&file.path, &failure);
        SkippedFile {
            path: file.path.clone(),
            reason: skip_reason(&failure),
            detail: match failure {
                ParseFailure::UnsupportedLanguage => None,
                other => Some(other.to_string()),
            },
        }
    });

    let done = ctx.completed.fetch_add(1, Ordering::Relaxed) + 1;
    (ctx.progress)(done);
    Some(result)
}

fn log_failure(path: &str, failure: &ParseFailure) {
    match failure {
        ParseFailure::UnsupportedLanguage => debug!(path, "Skipping file outside the JS/TS family"),
        ParseFailure::TooLarge { .. } => info!(path, "Skipping file: {failure}"),
        _ => warn!(path, "Failed to analyze file: {failure}"),
    }
}

fn skip_reason(failure: &ParseFailure) -> SkipReason {
    match failure {
        ParseFailure::UnsupportedLanguage => SkipReason::UnsupportedLanguage,
        ParseFailure::TooLarge { .. } => SkipReason::TooLarge,
        ParseFailure::Timeout { .. } => SkipReason::Timeout,
        ParseFailure::Syntax { .. } | ParseFailure::Grammar(_) => SkipReason::ParseFailure,
    }
}

fn collect_outcomes(outcomes: Vec<FileOutcome>) -> BatchOutcome {
    let mut batch = BatchOutcome::default();
    for outcome in outcomes {
        match outcome {
            Some(Ok(parsed)) => batch.parsed.push(parsed),
            Some(Err(skipped)) => batch.skipped.push(skipped),
            None => batch.interrupted = true,
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_files() -> Vec<SourceFile> {
        vec![
            SourceFile::new("src/a.js", "export function a() { return 1; }"),
            SourceFile::new("src/b.ts", "export function b( {"),
            SourceFile::new("src/c.tsx", "export const C = () => <div />;"),
            SourceFile::new("README.md", "# readme"),
        ]
    }

    #[test]
    fn test_partial_failure_isolation() {
        let outcome = analyze_files(
            &sample_files(),
            &ParserConfig::default(),
            &ParallelConfig::default(),
            None,
        );

        let parsed: Vec<_> = outcome.parsed.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(parsed, vec!["src/a.js", "src/c.tsx"]);

        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.skipped[0].path, "src/b.ts");
        assert_eq!(outcome.skipped[0].reason, SkipReason::ParseFailure);
        assert!(outcome.skipped[0].detail.is_some());
        assert_eq!(outcome.skipped[1].reason, SkipReason::UnsupportedLanguage);
        assert!(!outcome.interrupted);
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let files = sample_files();
        let parser = ParserConfig::default();

        let sequential_config = ParallelConfig {
            enabled: false,
            ..Default::default()
        };

        let sequential = analyze_files(&files, &parser, &sequential_config, None);
        let parallel = analyze_files(&files, &parser, &ParallelConfig::default(), None);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_chunked_processing_keeps_order() {
        let files: Vec<_> = (0..25)
            .map(|i| SourceFile::new(format!("f{i}.js"), format!("function f{i}() {{}}")))
            .collect();
        let parallel = ParallelConfig {
            enabled: true,
            max_concurrency: Some(2),
            batch_size: Some(4),
        };

        let outcome = analyze_files(&files, &ParserConfig::default(), &parallel, None);

        let names: Vec<_> = outcome
            .parsed
            .iter()
            .map(|p| p.functions[0].name.clone())
            .collect();
        let expected: Vec<_> = (0..25).map(|i| format!("f{i}")).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_raised_stop_flag_skips_everything() {
        let stop = AtomicBool::new(true);
        let outcome = analyze_files(
            &sample_files(),
            &ParserConfig::default(),
            &ParallelConfig::default(),
            Some(&stop),
        );

        assert!(outcome.parsed.is_empty());
        assert!(outcome.skipped.is_empty());
        assert!(outcome.interrupted);
    }

    #[test]
    fn test_stop_raised_mid_run_keeps_finished_files() {
        let files: Vec<_> = (0..6)
            .map(|i| SourceFile::new(format!("f{i}.js"), format!("function f{i}() {{}}")))
            .collect();
        let sequential = ParallelConfig {
            enabled: false,
            ..Default::default()
        };
        let stop = AtomicBool::new(false);

        let outcome = analyze_files_with_progress(
            &files,
            &ParserConfig::default(),
            &sequential,
            Some(&stop),
            &|done| {
                if done == 2 {
                    stop.store(true, Ordering::Relaxed);
                }
            },
        );

        let parsed: Vec<_> = outcome.parsed.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(parsed, vec!["f0.js", "f1.js"]);
        assert!(outcome.skipped.is_empty());
        assert!(outcome.interrupted);
    }

    #[test]
    fn test_progress_counts_every_finished_file() {
        let calls = AtomicUsize::new(0);
        let highest = AtomicUsize::new(0);

        let outcome = analyze_files_with_progress(
            &sample_files(),
            &ParserConfig::default(),
            &ParallelConfig::default(),
            None,
            &|done| {
                calls.fetch_add(1, Ordering::Relaxed);
                highest.fetch_max(done, Ordering::Relaxed);
            },
        );

        assert_eq!(outcome.parsed.len() + outcome.skipped.len(), 4);
        assert_eq!(calls.load(Ordering::Relaxed), 4);
        assert_eq!(highest.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn test_slow_parse_is_reported_as_timeout() {
        let source =
            "function f(a) { if (a && b) { return [1, 2, 3].map(x => x * 2); } }\n".repeat(50_000);
        let files = vec![SourceFile::new("slow.js", source)];
        let parser = ParserConfig {
            timeout_ms: 1,
            max_file_bytes: 0,
        };

        let outcome = analyze_files(&files, &parser, &ParallelConfig::default(), None);

        assert!(outcome.parsed.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].path, "slow.js");
        assert_eq!(outcome.skipped[0].reason, SkipReason::Timeout);
        assert!(outcome.skipped[0]
            .detail
            .as_deref()
            .is_some_and(|d| d.contains("1ms")));
    }

    #[test]
    fn test_too_large_files_are_reported() {
        let files = vec![SourceFile::new("big.js", "let x = 1;\n".repeat(10))];
        let parser = ParserConfig {
            max_file_bytes: 10,
            ..Default::default()
        };

        let outcome = analyze_files(&files, &parser, &ParallelConfig::default(), None);

        assert!(outcome.parsed.is_empty());
        assert_eq!(outcome.skipped[0].reason, SkipReason::TooLarge);
    }

    #[test]
    fn test_empty_batch() {
        let outcome = analyze_files(&[], &ParserConfig::default(), &ParallelConfig::default(), None);
        assert_eq!(outcome, BatchOutcome::default());
    }
}
