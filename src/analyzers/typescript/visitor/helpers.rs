//! Helper functions for TypeScript/JavaScript analysis
//!
//! Provides complexity calculation and the small node queries shared by the
//! function and class extractors.

use crate::analyzers::typescript::parser::node_text;
use tree_sitter::Node;

/// Calculate cyclomatic complexity over a node's whole subtree.
///
/// Nested functions are part of the subtree, so their branches are counted
/// into the enclosing function as well as into their own record.
pub fn calculate_cyclomatic_complexity(node: &Node, source: &str) -> u32 {
    let mut complexity: u32 = 1; // Base complexity

    let mut cursor = node.walk();
    loop {
        if is_decision_point(&cursor.node(), source) {
            complexity += 1;
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return complexity;
            }
        }
    }
}

/// Whether a node adds an independent path through the code
fn is_decision_point(node: &Node, source: &str) -> bool {
    match node.kind() {
        // Control flow statements
        "if_statement" => true,
        // for-of is a for_in_statement in the tree-sitter grammar
        "for_statement" | "for_in_statement" => true,
        "while_statement" | "do_statement" => true,
        "catch_clause" => true,
        "ternary_expression" => true,
        // Count each case except default
        "switch_case" => !is_default_case(node),

        // Logical operators create branches
        "binary_expression" => node
            .child_by_field_name("operator")
            .map(|op| matches!(node_text(&op, source), "&&" | "||"))
            .unwrap_or(false),

        _ => false,
    }
}

/// Check if a switch case is the default case
fn is_default_case(node: &Node) -> bool {
    node.child_by_field_name("value").is_none()
}

/// Check whether a function-like node carries the `async` keyword
pub fn has_async_modifier(node: &Node) -> bool {
    let mut cursor = node.walk();
    let is_async = node.children(&mut cursor).any(|c| c.kind() == "async");
    is_async
}

/// The immediate parent is an export statement (named or default)
pub fn is_exported(node: &Node) -> bool {
    node.parent()
        .map(|p| p.kind() == "export_statement")
        .unwrap_or(false)
}

/// If `node` is the value of a `variable_declarator`, return the declarator.
pub fn enclosing_declarator<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let parent = node.parent()?;
    if parent.kind() != "variable_declarator" {
        return None;
    }
    let value = parent.child_by_field_name("value")?;
    (value.id() == node.id()).then_some(parent)
}

/// The outermost node a documentation comment may precede for `node`:
/// the node itself, its variable declaration, or the export wrapping either.
fn doc_anchor<'t>(node: &Node<'t>) -> Node<'t> {
    let mut anchor = *node;

    if let Some(declaration) = enclosing_declarator(&anchor).and_then(|d| d.parent()) {
        if matches!(
            declaration.kind(),
            "lexical_declaration" | "variable_declaration"
        ) {
            anchor = declaration;
        }
    }

    if let Some(parent) = anchor.parent() {
        if parent.kind() == "export_statement" {
            anchor = parent;
        }
    }

    anchor
}

/// Extract the `/** ... */` comment directly in front of a node.
///
/// Only block comments whose body starts with `*` qualify; the returned text
/// is the body between `/*` and `*/`, trimmed.
pub fn leading_doc_comment(node: &Node, source: &str) -> Option<String> {
    let previous = doc_anchor(node).prev_sibling()?;
    if previous.kind() != "comment" {
        return None;
    }

    let body = node_text(&previous, source)
        .strip_prefix("/*")?
        .strip_suffix("*/")?;

    body.starts_with('*').then(|| body.trim().to_string())
}

/// Strip the quotes from a string literal node
pub fn string_value(node: &Node, source: &str) -> String {
    node_text(node, source)
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}

/// Collect every identifier bound by a declaration pattern
/// (`a`, `{ a, b: c }`, `[a, ...rest]`, `{ a = 1 }`).
pub fn collect_bound_names(pattern: &Node, source: &str, names: &mut Vec<String>) {
    match pattern.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            names.push(node_text(pattern, source).to_string());
        }
        "object_pattern" | "array_pattern" => {
            let mut cursor = pattern.walk();
            for child in pattern.named_children(&mut cursor) {
                collect_bound_names(&child, source, names);
            }
        }
        "pair_pattern" => {
            if let Some(value) = pattern.child_by_field_name("value") {
                collect_bound_names(&value, source, names);
            }
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = pattern.child_by_field_name("left") {
                collect_bound_names(&left, source, names);
            }
        }
        "rest_pattern" => {
            if let Some(inner) = pattern.named_child(0) {
                collect_bound_names(&inner, source, names);
            }
        }
        _ => {}
    }
}
