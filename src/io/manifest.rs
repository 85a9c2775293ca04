//! `package.json` dependency sections.

use crate::core::{DependencyManifest, Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Build a manifest from a parsed `package.json` value.
///
/// Missing or non-object sections are treated as empty; version values
/// that are not strings keep their JSON text.
pub fn parse_package_json(value: &Value) -> DependencyManifest {
    DependencyManifest {
        production: dependency_section(value, "dependencies"),
        development: dependency_section(value, "devDependencies"),
    }
}

fn dependency_section(value: &Value, key: &str) -> BTreeMap<String, String> {
    value
        .get(key)
        .and_then(Value::as_object)
        .map(|section| {
            section
                .iter()
                .map(|(name, version)| {
                    let version = version
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| version.to_string());
                    (name.clone(), version)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse manifest text; `path` only labels errors.
pub fn parse_package_json_str(contents: &str, path: &Path) -> Result<DependencyManifest> {
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| Error::manifest(path, format!("invalid JSON: {e}")))?;
    if !value.is_object() {
        return Err(Error::manifest(path, "expected a JSON object"));
    }
    Ok(parse_package_json(&value))
}

/// Read `package.json` from a repository root, if there is one.
pub fn load_manifest(root: &Path) -> Result<Option<DependencyManifest>> {
    let path = root.join(MANIFEST_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| Error::io_at(&path, e))?;
    parse_package_json_str(&contents, &path).map(Some)
}
