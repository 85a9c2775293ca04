use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "repodoc")]
#[command(about = "Structural analyzer for JavaScript/TypeScript repositories", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a local repository
    Analyze {
        /// Repository root to analyze
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .repodoc.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of parallel jobs (defaults to the number of CPUs)
        #[arg(short = 'j', long = "jobs", env = "REPODOC_JOBS")]
        jobs: Option<usize>,

        /// Analyze files one at a time
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Maximum number of files to collect
        #[arg(long = "max-files")]
        max_files: Option<usize>,

        /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_defaults() {
        let cli = Cli::try_parse_from(["repodoc", "analyze", "."]).unwrap();
        let Commands::Analyze {
            path,
            format,
            output,
            jobs,
            no_parallel,
            verbosity,
            ..
        } = cli.command;

        assert_eq!(path, PathBuf::from("."));
        assert_eq!(format, OutputFormat::Terminal);
        assert_eq!(output, None);
        assert_eq!(jobs, None);
        assert!(!no_parallel);
        assert_eq!(verbosity, 0);
    }

    #[test]
    fn test_parse_analyze_flags() {
        let cli = Cli::try_parse_from([
            "repodoc", "analyze", "repo", "--format", "json", "-j", "4", "--max-files", "50",
            "-vv",
        ])
        .unwrap();
        let Commands::Analyze {
            format,
            jobs,
            max_files,
            verbosity,
            ..
        } = cli.command;

        assert_eq!(format, OutputFormat::Json);
        assert_eq!(jobs, Some(4));
        assert_eq!(max_files, Some(50));
        assert_eq!(verbosity, 2);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["repodoc", "analyze", ".", "--format", "xml"]).is_err());
    }
}
