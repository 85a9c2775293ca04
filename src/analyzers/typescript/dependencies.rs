//! Import and export extraction for TypeScript/JavaScript
//!
//! Turns `import` statements, `require()` calls, dynamic `import()` calls and
//! `export` statements into records. The tree walk in
//! [`super::visitor::extract`] hands each candidate node to these functions.

use crate::analyzers::typescript::parser::{node_line, node_text};
use crate::core::ast::TypeScriptAst;
use crate::core::{ExportKind, ExportRecord, ImportKind, ImportRecord};
use tree_sitter::Node;

use super::visitor::helpers::{collect_bound_names, enclosing_declarator, string_value};

/// Extract an `import` statement.
///
/// ```text
/// import React from 'react';              -> ["React"]
/// import * as path from 'path';           -> ["* as path"]
/// import { a, b as c } from './m';        -> ["a", "c"]
/// import './styles.css';                  -> []
/// import fs = require('fs');              -> ["fs"] (require)
/// ```
pub fn extract_import(node: &Node, ast: &TypeScriptAst) -> Option<ImportRecord> {
    let source = ast.source.as_str();

    if let Some(module) = node.child_by_field_name("source") {
        let mut cursor = node.walk();
        let bound_names = node
            .children(&mut cursor)
            .find(|child| child.kind() == "import_clause")
            .map(|clause| import_clause_names(&clause, source))
            .unwrap_or_default();

        return Some(ImportRecord {
            source_module: string_value(&module, source),
            bound_names,
            kind: ImportKind::Import,
        });
    }

    // TypeScript: import fs = require('fs')
    let mut cursor = node.walk();
    let clause = node
        .children(&mut cursor)
        .find(|child| child.kind() == "import_require_clause")?;
    let module = clause.child_by_field_name("source")?;
    let bound_names = clause
        .named_child(0)
        .filter(|name| name.kind() == "identifier")
        .map(|name| vec![node_text(&name, source).to_string()])
        .unwrap_or_default();

    Some(ImportRecord {
        source_module: string_value(&module, source),
        bound_names,
        kind: ImportKind::Require,
    })
}

/// Local names bound by an import clause
fn import_clause_names(clause: &Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();

    let mut cursor = clause.walk();
    for child in clause.named_children(&mut cursor) {
        match child.kind() {
            // Default import
            "identifier" => names.push(node_text(&child, source).to_string()),
            "namespace_import" => {
                let mut inner = child.walk();
                let local = child
                    .named_children(&mut inner)
                    .find(|n| n.kind() == "identifier");
                if let Some(local) = local {
                    names.push(format!("* as {}", node_text(&local, source)));
                }
            }
            "named_imports" => {
                let mut inner = child.walk();
                for specifier in child.named_children(&mut inner) {
                    if specifier.kind() != "import_specifier" {
                        continue;
                    }
                    let local = specifier
                        .child_by_field_name("alias")
                        .or_else(|| specifier.child_by_field_name("name"));
                    if let Some(local) = local {
                        names.push(node_text(&local, source).to_string());
                    }
                }
            }
            _ => {}
        }
    }

    names
}

/// Extract `require('m')` and `import('m')` calls.
///
/// Calls whose first argument is not a literal string are ignored.
pub fn extract_call_import(node: &Node, ast: &TypeScriptAst) -> Option<ImportRecord> {
    let source = ast.source.as_str();
    let func = node.child_by_field_name("function")?;

    let kind = match func.kind() {
        "import" => ImportKind::Dynamic,
        "identifier" if node_text(&func, source) == "require" => ImportKind::Require,
        _ => return None,
    };

    let args = node.child_by_field_name("arguments")?;
    let module = args.named_child(0).filter(is_literal_string)?;

    let bound_names = match kind {
        ImportKind::Require => required_names(node, source),
        _ => Vec::new(),
    };

    Some(ImportRecord {
        source_module: string_value(&module, source),
        bound_names,
        kind,
    })
}

fn is_literal_string(node: &Node) -> bool {
    match node.kind() {
        "string" => true,
        "template_string" => {
            let mut cursor = node.walk();
            let has_substitution = node
                .named_children(&mut cursor)
                .any(|child| child.kind() == "template_substitution");
            !has_substitution
        }
        _ => false,
    }
}

/// `const x = require('m')` binds `x`; `const { a, b } = require('m')`
/// binds `a` and `b`.
fn required_names(call: &Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    if let Some(pattern) =
        enclosing_declarator(call).and_then(|declarator| declarator.child_by_field_name("name"))
    {
        collect_bound_names(&pattern, source, &mut names);
    }
    names
}

/// Extract the records introduced by one `export` statement.
pub fn extract_exports(node: &Node, ast: &TypeScriptAst) -> Vec<ExportRecord> {
    let source = ast.source.as_str();
    let line = node_line(node);
    let record = |name: String, kind: ExportKind| ExportRecord { name, kind, line };

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    let is_default = children.iter().any(|child| child.kind() == "default");

    if is_default {
        let name = node
            .child_by_field_name("declaration")
            .or_else(|| node.child_by_field_name("value"))
            .and_then(|target| default_export_name(&target, source))
            .unwrap_or_else(|| "default".to_string());
        return vec![record(name, ExportKind::Default)];
    }

    if let Some(declaration) = node.child_by_field_name("declaration") {
        return declared_names(&declaration, source)
            .into_iter()
            .map(|name| record(name, ExportKind::Named))
            .collect();
    }

    // export { a, b as c } [from './m']
    if let Some(clause) = children.iter().find(|c| c.kind() == "export_clause") {
        let mut inner = clause.walk();
        let names: Vec<String> = clause
            .named_children(&mut inner)
            .filter(|specifier| specifier.kind() == "export_specifier")
            .filter_map(|specifier| {
                specifier
                    .child_by_field_name("alias")
                    .or_else(|| specifier.child_by_field_name("name"))
            })
            .map(|public| string_value(&public, source))
            .collect();
        return names
            .into_iter()
            .map(|name| record(name, ExportKind::Named))
            .collect();
    }

    // export * as ns from './m'
    if let Some(namespace) = children.iter().find(|c| c.kind() == "namespace_export") {
        let name = namespace
            .named_child(0)
            .map(|alias| string_value(&alias, source))
            .unwrap_or_else(|| "*".to_string());
        return vec![record(name, ExportKind::Named)];
    }

    // export * from './m'
    if children.iter().any(|c| c.kind() == "*") {
        return vec![record("*".to_string(), ExportKind::Wildcard)];
    }

    // TypeScript `export = x` and `export as namespace X` carry no public name
    Vec::new()
}

/// Name of the declared or referenced thing behind `export default`
fn default_export_name(target: &Node, source: &str) -> Option<String> {
    if target.kind() == "identifier" {
        return Some(node_text(target, source).to_string());
    }
    target
        .child_by_field_name("name")
        .filter(|name| matches!(name.kind(), "identifier" | "type_identifier"))
        .map(|name| node_text(&name, source).to_string())
}

/// Identifiers introduced by an exported declaration
fn declared_names(declaration: &Node, source: &str) -> Vec<String> {
    match declaration.kind() {
        "lexical_declaration" | "variable_declaration" => {
            let mut names = Vec::new();
            let mut cursor = declaration.walk();
            for declarator in declaration.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(pattern) = declarator.child_by_field_name("name") {
                    collect_bound_names(&pattern, source, &mut names);
                }
            }
            names
        }
        // function, class, interface, type alias, enum, namespace
        _ => declaration
            .child_by_field_name("name")
            .map(|name| vec![node_text(&name, source).to_string()])
            .unwrap_or_default(),
    }
}
