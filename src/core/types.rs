//! Records produced by the analyzer.
//!
//! Everything here is plain data: created once per analysis run, never
//! mutated afterwards, and serializable to JSON without cycles. Field names
//! are camelCase on the wire because the consumers are prompt builders and
//! web UIs.

use super::Language;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A file handed to the analyzer by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub path: String,
    pub content: String,
    pub size_bytes: u64,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            path: path.into(),
            size_bytes: content.len() as u64,
            content,
        }
    }

    pub fn language(&self) -> Language {
        Language::classify(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    /// Own identifier, else the variable it is bound to, else `"anonymous"`
    pub name: String,
    pub parameters: Vec<String>,
    /// Annotated return type text without the colon (`Promise<User>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub line_start: usize,
    pub line_end: usize,
    /// Cyclomatic complexity, always >= 1
    pub complexity: u32,
    pub is_async: bool,
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub name: String,
    pub method_names: Vec<String>,
    pub property_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implemented_interface_names: Option<Vec<String>>,
    pub line_start: usize,
    pub line_end: usize,
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
}

/// How a module dependency was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// `import ... from "m"`
    Import,
    /// `require("m")`
    Require,
    /// `import("m")`
    Dynamic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub source_module: String,
    pub bound_names: Vec<String>,
    pub kind: ImportKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Named,
    Default,
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    /// Public name: the alias for `export { a as b }`, `"*"` for wildcards
    pub name: String,
    pub kind: ExportKind,
    /// 1-based line of the export statement
    pub line: usize,
}

/// Everything extracted from one JS/TS source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    pub path: String,
    pub language: Language,
    pub lines_of_code: usize,
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<ExportRecord>,
    pub total_complexity: u32,
}

impl ParsedFile {
    /// Build a file record, deriving `total_complexity` from the functions.
    pub fn new(
        path: String,
        language: Language,
        lines_of_code: usize,
        functions: Vec<FunctionRecord>,
        classes: Vec<ClassRecord>,
        imports: Vec<ImportRecord>,
        exports: Vec<ExportRecord>,
    ) -> Self {
        let total_complexity = functions.iter().map(|f| f.complexity).sum();
        Self {
            path,
            language,
            lines_of_code,
            functions,
            classes,
            imports,
            exports,
            total_complexity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Functional,
    Class,
}

/// What a component renders, judged from its file's place in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentRole {
    /// `page.*` under an `app` directory
    Page,
    /// `layout.*` anywhere
    Layout,
    Component,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub name: String,
    pub kind: ComponentKind,
    pub role: ComponentRole,
    pub file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Exact, case-sensitive match against an exported handler name.
    pub fn from_export_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpointRecord {
    pub http_method: HttpMethod,
    pub route_path: String,
    pub source_file: String,
    pub line_number: usize,
}

/// The dependency sections of a package manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    pub production: BTreeMap<String, String>,
    pub development: BTreeMap<String, String>,
}

impl DependencyManifest {
    pub fn is_empty(&self) -> bool {
        self.production.is_empty() && self.development.is_empty()
    }

    /// Every declared name once: production names, then development names
    /// not already declared for production
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let development_only = self
            .development
            .keys()
            .filter(|name| !self.production.contains_key(*name));
        self.production
            .keys()
            .chain(development_only)
            .map(String::as_str)
    }

    /// Declared in either section under exactly this name
    pub fn declares(&self, name: &str) -> bool {
        self.production.contains_key(name) || self.development.contains_key(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyCategorization {
    pub frameworks: BTreeSet<String>,
    pub ui_libraries: BTreeSet<String>,
    pub databases: BTreeSet<String>,
}

/// Declared dependencies plus their categorization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySummary {
    pub production: BTreeMap<String, String>,
    pub development: BTreeMap<String, String>,
    /// Distinct names: production then development-only, each group sorted
    pub all: Vec<String>,
    pub total_count: usize,
    #[serde(flatten)]
    pub categories: DependencyCategorization,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureSummary {
    pub kind: String,
    pub framework: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryMetrics {
    /// Number of analyzable files that parsed
    pub total_files: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    pub total_components: usize,
    #[serde(rename = "totalAPIEndpoints")]
    pub total_api_endpoints: usize,
    pub total_lines: usize,
    pub average_complexity: f64,
    pub language_breakdown: BTreeMap<Language, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    UnsupportedLanguage,
    TooLarge,
    ParseFailure,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// The single value handed to prompt builders and UIs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub metrics: RepositoryMetrics,
    pub dependencies: DependencySummary,
    pub technologies: BTreeSet<String>,
    pub architecture: ArchitectureSummary,
    pub api_endpoints: Vec<ApiEndpointRecord>,
    pub components: Vec<ComponentRecord>,
    pub source_files: Vec<ParsedFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_files: Vec<SkippedFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(name: &str, complexity: u32) -> FunctionRecord {
        FunctionRecord {
            name: name.to_string(),
            parameters: vec![],
            return_type: None,
            line_start: 1,
            line_end: 1,
            complexity,
            is_async: false,
            is_exported: false,
            doc_comment: None,
        }
    }

    #[test]
    fn test_parsed_file_total_complexity_is_sum() {
        let file = ParsedFile::new(
            "a.ts".into(),
            Language::TypeScript,
            3,
            vec![function("a", 2), function("b", 5)],
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(file.total_complexity, 7);
    }

    #[test]
    fn test_source_file_size_from_content() {
        let file = SourceFile::new("x.js", "let a = 1;\n");
        assert_eq!(file.size_bytes, 11);
        assert_eq!(file.language(), Language::JavaScript);
    }

    #[test]
    fn test_manifest_names_are_distinct() {
        let manifest = DependencyManifest {
            production: [("react".to_string(), "18.2.0".to_string())].into(),
            development: [
                ("react".to_string(), "18.2.0".to_string()),
                ("eslint".to_string(), "8.0.0".to_string()),
            ]
            .into(),
        };

        let names: Vec<_> = manifest.names().collect();
        assert_eq!(names, vec!["react", "eslint"]);
    }

    #[test]
    fn test_http_method_exact_match() {
        assert_eq!(HttpMethod::from_export_name("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_export_name("PATCH"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::from_export_name("get"), None);
        assert_eq!(HttpMethod::from_export_name("HEAD"), None);
    }

    #[test]
    fn test_wire_names() {
        let endpoint = ApiEndpointRecord {
            http_method: HttpMethod::Delete,
            route_path: "/api/users/:id".into(),
            source_file: "app/api/users/[id]/route.ts".into(),
            line_number: 4,
        };
        let value = serde_json::to_value(&endpoint).unwrap();
        assert_eq!(value["httpMethod"], "DELETE");
        assert_eq!(value["routePath"], "/api/users/:id");
        assert_eq!(value["lineNumber"], 4);

        let metrics = serde_json::to_value(RepositoryMetrics::default()).unwrap();
        assert!(metrics.get("totalAPIEndpoints").is_some());
        assert!(metrics.get("averageComplexity").is_some());
    }

    #[test]
    fn test_doc_comment_omitted_when_absent() {
        let value = serde_json::to_value(function("f", 1)).unwrap();
        assert!(value.get("docComment").is_none());
        assert_eq!(value["isAsync"], false);
    }
}
