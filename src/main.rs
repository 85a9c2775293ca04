use anyhow::{Context, Result};
use clap::Parser;
use repodoc::cli::{Cli, Commands};
use repodoc::config::{discover_config, load_config_from_path, RepodocConfig};
use repodoc::io::{collect_source_files, create_writer, load_manifest, OutputFormat};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct AnalyzeConfig {
    path: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    jobs: Option<usize>,
    no_parallel: bool,
    max_files: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            config,
            jobs,
            no_parallel,
            max_files,
            verbosity,
        } => {
            init_tracing(verbosity);
            handle_analyze(AnalyzeConfig {
                path,
                format: format.into(),
                output,
                config,
                jobs,
                no_parallel,
                max_files,
            })
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("repodoc={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_analyze(args: AnalyzeConfig) -> Result<()> {
    // Discovery starts at the analyzed repository, not the working directory
    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&args.path),
    };
    let config = apply_overrides(config, &args);

    let files = collect_source_files(&args.path, &config.walker, config.parser.max_file_bytes)
        .with_context(|| format!("Failed to collect files under {}", args.path.display()))?;
    let manifest = load_manifest(&args.path)?;

    let result = repodoc::analyze_repository(&files, manifest.as_ref(), &config);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut sink = BufWriter::new(file);
            create_writer(args.format, &mut sink).write_results(&result)?;
            sink.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            create_writer(args.format, &mut sink).write_results(&result)?;
        }
    }

    Ok(())
}

/// Command-line flags take precedence over the config file
fn apply_overrides(mut config: RepodocConfig, args: &AnalyzeConfig) -> RepodocConfig {
    if args.no_parallel {
        config.parallel.enabled = false;
    }
    if let Some(jobs) = args.jobs.filter(|&jobs| jobs > 0) {
        config.parallel.max_concurrency = Some(jobs);
    }
    if let Some(max_files) = args.max_files.filter(|&max| max > 0) {
        config.walker.max_files = max_files;
    }
    config
}
