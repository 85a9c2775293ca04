//! Class analysis for TypeScript/JavaScript
//!
//! Collects member names and heritage for class declarations.

use crate::analyzers::typescript::parser::{node_end_line, node_line, node_text};
use crate::core::ast::TypeScriptAst;
use crate::core::ClassRecord;
use tree_sitter::Node;

use super::helpers::{is_exported, leading_doc_comment};

/// Analyze a class declaration.
///
/// Anonymous class expressions are only recorded when they are the value of
/// `export default`; a class without a body is skipped.
pub fn analyze_class(node: &Node, ast: &TypeScriptAst) -> Option<ClassRecord> {
    let source = ast.source.as_str();

    if node.kind() == "class" && !is_exported(node) {
        return None;
    }

    let body = node.child_by_field_name("body")?;
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(&n, source).to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let (method_names, property_names) = collect_members(&body, source);
    let (superclass_name, implemented_interface_names) = heritage(node, source);

    Some(ClassRecord {
        name,
        method_names,
        property_names,
        superclass_name,
        implemented_interface_names,
        line_start: node_line(node),
        line_end: node_end_line(node),
        is_exported: is_exported(node),
        doc_comment: leading_doc_comment(node, source),
    })
}

/// Method and property names in declaration order
fn collect_members(body: &Node, source: &str) -> (Vec<String>, Vec<String>) {
    let mut methods = Vec::new();
    let mut properties = Vec::new();

    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match member.kind() {
            "method_definition" => {
                if let Some(name) = public_key(&member, "name", source) {
                    methods.push(name);
                }
            }
            // JavaScript grammar
            "field_definition" => {
                if let Some(name) = public_key(&member, "property", source) {
                    properties.push(name);
                }
            }
            // TypeScript grammar
            "public_field_definition" => {
                if let Some(name) = public_key(&member, "name", source) {
                    properties.push(name);
                }
            }
            _ => {}
        }
    }

    (methods, properties)
}

/// Member key text, skipping `#private` and `[computed]` keys
fn public_key(member: &Node, field: &str, source: &str) -> Option<String> {
    let key = member.child_by_field_name(field)?;
    match key.kind() {
        "property_identifier" | "identifier" => Some(node_text(&key, source).to_string()),
        _ => None,
    }
}

/// Superclass text and `implements` names from the class heritage
fn heritage(node: &Node, source: &str) -> (Option<String>, Option<Vec<String>>) {
    let mut cursor = node.walk();
    let Some(heritage) = node
        .children(&mut cursor)
        .find(|child| child.kind() == "class_heritage")
    else {
        return (None, None);
    };

    let mut superclass = None;
    let mut interfaces = None;

    let mut cursor = heritage.walk();
    for clause in heritage.named_children(&mut cursor) {
        match clause.kind() {
            // TypeScript: class A extends B implements C
            "extends_clause" => {
                superclass = clause
                    .child_by_field_name("value")
                    .and_then(|value| superclass_text(&value, source));
            }
            "implements_clause" => {
                interfaces = Some(implemented_names(&clause, source));
            }
            // JavaScript: class A extends B
            _ => {
                if superclass.is_none() {
                    superclass = superclass_text(&clause, source);
                }
            }
        }
    }

    (superclass, interfaces)
}

/// Only plain and dotted names are recorded (`Base`, `React.Component`)
fn superclass_text(node: &Node, source: &str) -> Option<String> {
    match node.kind() {
        "identifier" | "member_expression" => Some(node_text(node, source).to_string()),
        _ => None,
    }
}

fn implemented_names(clause: &Node, source: &str) -> Vec<String> {
    let mut cursor = clause.walk();
    let names = clause
        .named_children(&mut cursor)
        .filter_map(|ty| match ty.kind() {
            "type_identifier" | "nested_type_identifier" => Some(node_text(&ty, source)),
            // Repository<User> records Repository
            "generic_type" => ty.child_by_field_name("name").map(|n| node_text(&n, source)),
            _ => None,
        })
        .map(str::to_string)
        .collect();
    names
}
