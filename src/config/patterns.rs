//! Pattern lists used by the aggregator and the detectors.
//!
//! All lists are plain data so a `.repodoc.toml` (or a test) can replace
//! them wholesale.

use serde::{Deserialize, Serialize};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Maps a dependency-name substring to a technology label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TechnologyRule {
    /// Substring searched for in each declared dependency name
    pub contains: String,
    /// Label added to the technology set on a match
    pub label: String,
}

impl TechnologyRule {
    pub fn new(contains: &str, label: &str) -> Self {
        Self {
            contains: contains.to_string(),
            label: label.to_string(),
        }
    }
}

/// Substring patterns for categorizing declared dependencies.
///
/// Matching is case-insensitive: both the pattern and the dependency name
/// are lowercased before the substring test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DependencyPatterns {
    pub frameworks: Vec<String>,
    pub ui_libraries: Vec<String>,
    pub databases: Vec<String>,
    pub technologies: Vec<TechnologyRule>,
}

impl Default for DependencyPatterns {
    fn default() -> Self {
        Self {
            frameworks: strings(&[
                "next", "react", "vue", "angular", "svelte", "express", "fastify", "nest",
            ]),
            ui_libraries: strings(&[
                "@radix-ui",
                "@headlessui",
                "@mui",
                "antd",
                "chakra-ui",
                "tailwindcss",
                "bootstrap",
            ]),
            databases: strings(&[
                "prisma",
                "mongoose",
                "sequelize",
                "typeorm",
                "@supabase",
                "mongodb",
                "mysql",
                "postgres",
                "redis",
            ]),
            technologies: vec![
                TechnologyRule::new("react", "React"),
                TechnologyRule::new("next", "Next.js"),
                TechnologyRule::new("tailwind", "Tailwind CSS"),
            ],
        }
    }
}

/// File-path conventions for API route handlers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouteConfig {
    /// File stems that mark a route handler (`route` for `route.ts`)
    pub entry_names: Vec<String>,
    /// Extensions a route handler may have, without the dot
    pub extensions: Vec<String>,
    /// Pages Router root: every file under `<pages_dir>/api/` is a route.
    /// Empty disables the convention.
    pub pages_dir: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            entry_names: strings(&["route"]),
            extensions: strings(&["ts", "js", "tsx", "jsx"]),
            pages_dir: "pages".to_string(),
        }
    }
}

/// Names that mark a class as a UI component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ComponentConfig {
    /// Superclass names, compared exactly
    pub base_classes: Vec<String>,
    /// A class declaring a method with this name is a component
    pub render_method: String,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            base_classes: strings(&[
                "Component",
                "PureComponent",
                "React.Component",
                "React.PureComponent",
            ]),
            render_method: "render".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dependency_patterns() {
        let patterns = DependencyPatterns::default();
        assert_eq!(patterns.frameworks.len(), 8);
        assert!(patterns.ui_libraries.contains(&"@radix-ui".to_string()));
        assert!(patterns.databases.contains(&"redis".to_string()));
        assert_eq!(patterns.technologies[1].label, "Next.js");
    }

    #[test]
    fn test_partial_override_keeps_other_lists() {
        let patterns: DependencyPatterns = toml::from_str(r#"frameworks = ["remix"]"#).unwrap();
        assert_eq!(patterns.frameworks, vec!["remix"]);
        assert_eq!(patterns.databases, DependencyPatterns::default().databases);
    }

    #[test]
    fn test_route_defaults() {
        let routes = RouteConfig::default();
        assert_eq!(routes.entry_names, vec!["route"]);
        assert_eq!(routes.extensions, vec!["ts", "js", "tsx", "jsx"]);
        assert_eq!(routes.pages_dir, "pages");
    }
}
