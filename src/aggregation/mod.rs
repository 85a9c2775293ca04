//! Repository-level aggregation.
//!
//! Folds per-file records, detector output and the dependency manifest into
//! one [`AnalysisResult`].

pub mod architecture;

use crate::config::DependencyPatterns;
use crate::core::{
    AnalysisResult, ApiEndpointRecord, ComponentRecord, DependencyCategorization,
    DependencyManifest, DependencySummary, Language, ParsedFile, RepositoryMetrics, SkippedFile,
};
use std::collections::{BTreeMap, BTreeSet};

pub use architecture::summarize_architecture;

/// Builds the final result from already-computed parts.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    patterns: DependencyPatterns,
}

impl Aggregator {
    pub fn new(patterns: DependencyPatterns) -> Self {
        Self { patterns }
    }

    pub fn aggregate(
        &self,
        source_files: Vec<ParsedFile>,
        skipped_files: Vec<SkippedFile>,
        manifest: Option<&DependencyManifest>,
        components: Vec<ComponentRecord>,
        api_endpoints: Vec<ApiEndpointRecord>,
    ) -> AnalysisResult {
        let empty = DependencyManifest::default();
        let manifest = manifest.unwrap_or(&empty);

        let metrics = build_metrics(
            &source_files,
            &skipped_files,
            components.len(),
            api_endpoints.len(),
        );
        let dependencies = build_dependency_summary(manifest, &self.patterns);
        let technologies = detect_technologies(&source_files, manifest, &self.patterns);
        let architecture = summarize_architecture(manifest, &technologies);

        AnalysisResult {
            metrics,
            dependencies,
            technologies,
            architecture,
            api_endpoints,
            components,
            source_files,
            skipped_files,
        }
    }
}

pub fn build_metrics(
    files: &[ParsedFile],
    skipped: &[SkippedFile],
    total_components: usize,
    total_api_endpoints: usize,
) -> RepositoryMetrics {
    let total_complexity: u64 = files.iter().map(|f| u64::from(f.total_complexity)).sum();

    RepositoryMetrics {
        total_files: files.len(),
        total_functions: files.iter().map(|f| f.functions.len()).sum(),
        total_classes: files.iter().map(|f| f.classes.len()).sum(),
        total_components,
        total_api_endpoints,
        total_lines: files.iter().map(|f| f.lines_of_code).sum(),
        average_complexity: calculate_average_complexity(total_complexity, files.len()),
        language_breakdown: language_breakdown(files, skipped),
    }
}

/// Σ complexity / max(files, 1), so an empty repository averages 0.0
pub fn calculate_average_complexity(total_complexity: u64, file_count: usize) -> f64 {
    total_complexity as f64 / file_count.max(1) as f64
}

/// Files per language over everything the batch saw, parsed or not
fn language_breakdown(files: &[ParsedFile], skipped: &[SkippedFile]) -> BTreeMap<Language, usize> {
    let languages = files
        .iter()
        .map(|f| f.language)
        .chain(skipped.iter().map(|s| Language::classify(&s.path)));

    let mut breakdown = BTreeMap::new();
    for language in languages {
        *breakdown.entry(language).or_insert(0) += 1;
    }
    breakdown
}

pub fn build_dependency_summary(
    manifest: &DependencyManifest,
    patterns: &DependencyPatterns,
) -> DependencySummary {
    let all: Vec<String> = manifest.names().map(str::to_string).collect();

    DependencySummary {
        production: manifest.production.clone(),
        development: manifest.development.clone(),
        total_count: all.len(),
        categories: categorize_dependencies(&all, patterns),
        all,
    }
}

/// Case-insensitive substring match of each name against each list.
/// A name may land in several categories.
pub fn categorize_dependencies(
    names: &[String],
    patterns: &DependencyPatterns,
) -> DependencyCategorization {
    let matching = |list: &[String]| -> BTreeSet<String> {
        names
            .iter()
            .filter(|name| matches_any(name, list))
            .cloned()
            .collect()
    };

    DependencyCategorization {
        frameworks: matching(&patterns.frameworks),
        ui_libraries: matching(&patterns.ui_libraries),
        databases: matching(&patterns.databases),
    }
}

fn matches_any(name: &str, patterns: &[String]) -> bool {
    let lower = name.to_lowercase();
    patterns
        .iter()
        .any(|pattern| lower.contains(&pattern.to_lowercase()))
}

/// Languages actually parsed plus labels from the technology rules
pub fn detect_technologies(
    files: &[ParsedFile],
    manifest: &DependencyManifest,
    patterns: &DependencyPatterns,
) -> BTreeSet<String> {
    let mut technologies = BTreeSet::new();

    for file in files {
        match file.language {
            Language::TypeScript | Language::Tsx => {
                technologies.insert("TypeScript".to_string());
            }
            Language::JavaScript | Language::Jsx => {
                technologies.insert("JavaScript".to_string());
            }
            _ => {}
        }
    }

    for rule in &patterns.technologies {
        let needle = rule.contains.to_lowercase();
        if manifest
            .names()
            .any(|name| name.to_lowercase().contains(&needle))
        {
            technologies.insert(rule.label.clone());
        }
    }

    technologies
}
