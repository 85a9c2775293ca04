//! AST visitor for TypeScript/JavaScript
//!
//! Traverses the tree-sitter AST once, in source order, and hands each
//! interesting node to the function, class, import or export extractor.

pub mod class_analysis;
pub mod function_analysis;
pub mod helpers;

use crate::core::ast::TypeScriptAst;
use crate::core::{ClassRecord, ExportRecord, FunctionRecord, ImportRecord};
use tree_sitter::Node;

use super::dependencies::{extract_call_import, extract_exports, extract_import};
use class_analysis::analyze_class;
use function_analysis::analyze_function;

/// Records found in a single file, in pre-order of their nodes
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Extraction {
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<ExportRecord>,
}

/// Node categories the extractor cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    Function,
    Class,
    Import,
    Export,
    Call,
    Other,
}

impl SyntaxKind {
    pub fn of(node: &Node) -> Self {
        // Keywords such as `class` and `import` share their kind string with
        // named nodes
        if !node.is_named() {
            return SyntaxKind::Other;
        }

        match node.kind() {
            "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "function"
            | "generator_function"
            | "arrow_function" => SyntaxKind::Function,
            "class_declaration" | "abstract_class_declaration" | "class" => SyntaxKind::Class,
            "import_statement" => SyntaxKind::Import,
            "export_statement" => SyntaxKind::Export,
            "call_expression" => SyntaxKind::Call,
            _ => SyntaxKind::Other,
        }
    }
}

/// Extract functions, classes, imports and exports from an AST.
///
/// The walk uses a tree cursor instead of recursion, so deeply nested input
/// cannot exhaust the stack.
pub fn extract(ast: &TypeScriptAst) -> Extraction {
    let mut extraction = Extraction::default();
    let mut cursor = ast.tree.walk();

    loop {
        visit(&cursor.node(), ast, &mut extraction);

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return extraction;
            }
        }
    }
}

fn visit(node: &Node, ast: &TypeScriptAst, extraction: &mut Extraction) {
    match SyntaxKind::of(node) {
        SyntaxKind::Function => extraction.functions.push(analyze_function(node, ast)),
        SyntaxKind::Class => {
            if let Some(class) = analyze_class(node, ast) {
                extraction.classes.push(class);
            }
        }
        SyntaxKind::Import => {
            if let Some(import) = extract_import(node, ast) {
                extraction.imports.push(import);
            }
        }
        SyntaxKind::Export => extraction.exports.extend(extract_exports(node, ast)),
        SyntaxKind::Call => {
            if let Some(import) = extract_call_import(node, ast) {
                extraction.imports.push(import);
            }
        }
        SyntaxKind::Other => {}
    }
}
