//! High-level architecture summary derived from declared dependencies.

use crate::core::{ArchitectureSummary, DependencyManifest};
use std::collections::BTreeSet;

/// First match wins
const FRAMEWORKS: &[(&str, &str)] = &[("next", "Next.js"), ("react", "React"), ("express", "Express")];

/// First declared match becomes the primary database
const DATABASES: &[(&str, &str)] = &[
    ("@prisma/client", "Prisma"),
    ("@supabase/supabase-js", "Supabase"),
    ("mongoose", "MongoDB"),
    ("pg", "PostgreSQL"),
];

/// Last match wins; production dependencies only
const AUTHENTICATION: &[(&str, &str)] = &[
    ("next-auth", "NextAuth"),
    ("@supabase/auth-helpers-nextjs", "Supabase Auth"),
];

/// Last match wins; development dependencies only
const TEST_RUNNERS: &[(&str, &str)] = &[("jest", "Jest"), ("vitest", "Vitest")];

pub fn summarize_architecture(
    manifest: &DependencyManifest,
    technologies: &BTreeSet<String>,
) -> ArchitectureSummary {
    let kind = if manifest.names().any(|name| name.contains("next")) {
        "Next.js App"
    } else {
        "Web Application"
    };

    let framework = FRAMEWORKS
        .iter()
        .find(|(package, _)| manifest.declares(package))
        .map(|(_, label)| *label)
        .unwrap_or("Unknown");

    let language = if technologies.contains("TypeScript") {
        "TypeScript"
    } else {
        "JavaScript"
    };

    let database = DATABASES
        .iter()
        .find(|(package, _)| manifest.declares(package))
        .map(|(_, label)| label.to_string());

    let authentication = AUTHENTICATION
        .iter()
        .rev()
        .find(|(package, _)| manifest.production.contains_key(*package))
        .map(|(_, label)| label.to_string());

    let styling = manifest
        .declares("tailwindcss")
        .then(|| "Tailwind CSS".to_string());

    let testing = TEST_RUNNERS
        .iter()
        .rev()
        .find(|(package, _)| manifest.development.contains_key(*package))
        .map(|(_, label)| label.to_string());

    ArchitectureSummary {
        kind: kind.to_string(),
        framework: framework.to_string(),
        language: language.to_string(),
        database,
        authentication,
        styling,
        testing,
    }
}
