pub mod ast;
pub mod errors;
pub mod types;

use serde::{Deserialize, Serialize};

pub use errors::{Error, Result};
pub use types::{
    AnalysisResult, ApiEndpointRecord, ArchitectureSummary, ClassRecord, ComponentKind,
    ComponentRecord, ComponentRole, DependencyCategorization, DependencyManifest,
    DependencySummary, ExportKind, ExportRecord, FunctionRecord, HttpMethod, ImportKind,
    ImportRecord, ParsedFile, RepositoryMetrics, SkipReason, SkippedFile, SourceFile,
};

/// Semantic language tag derived from a file path's extension.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
    Python,
    Go,
    Rust,
    Java,
    Ruby,
    Php,
    Unknown,
}

impl Language {
    pub fn from_extension(ext: &str) -> Self {
        static EXTENSION_MAP: &[(&[&str], Language)] = &[
            (&["js", "mjs", "cjs"], Language::JavaScript),
            (&["jsx"], Language::Jsx),
            (&["ts", "mts", "cts"], Language::TypeScript),
            (&["tsx"], Language::Tsx),
            (&["py"], Language::Python),
            (&["go"], Language::Go),
            (&["rs"], Language::Rust),
            (&["java"], Language::Java),
            (&["rb"], Language::Ruby),
            (&["php"], Language::Php),
        ];

        let ext = ext.to_ascii_lowercase();
        EXTENSION_MAP
            .iter()
            .find(|(exts, _)| exts.contains(&ext.as_str()))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unknown)
    }

    /// Classify a path by the text after the last `.` of its final segment.
    ///
    /// Total over all inputs: paths without an extension (or the empty
    /// string) classify as [`Language::Unknown`].
    pub fn classify(path: &str) -> Self {
        let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(Language::Unknown)
    }

    pub fn from_path(path: &std::path::Path) -> Self {
        Self::classify(&path.to_string_lossy())
    }

    /// Whether files of this language are parsed by the JS/TS analyzer.
    pub fn is_analyzable(&self) -> bool {
        matches!(
            self,
            Language::JavaScript | Language::TypeScript | Language::Jsx | Language::Tsx
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Jsx => "JSX",
            Language::Tsx => "TSX",
            Language::Python => "Python",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Java => "Java",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
