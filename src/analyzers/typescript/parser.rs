//! Tree-sitter parser integration for JavaScript/TypeScript
//!
//! Provides parsing using tree-sitter grammars for JS/TS/JSX/TSX. The grammar
//! is picked from the file extension: TypeScript syntax for `.ts`, TypeScript
//! plus JSX for `.tsx`, and the JavaScript grammar (which already covers JSX,
//! decorators and class fields) for everything else.

use crate::core::ast::{JsLanguageVariant, TypeScriptAst};
use std::path::Path;
use thiserror::Error;
use tree_sitter::{Language as TsLanguage, Node, Parser, Tree};

/// Why a file could not be turned into a usable syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("not a JavaScript/TypeScript file")]
    UnsupportedLanguage,

    #[error("syntax error at {line}:{column}")]
    Syntax { line: usize, column: usize },

    #[error("parser gave up after {millis}ms")]
    Timeout { millis: u64 },

    #[error("file is {bytes} bytes, limit is {limit}")]
    TooLarge { bytes: u64, limit: u64 },

    #[error("grammar could not be loaded: {0}")]
    Grammar(String),
}

/// Get the tree-sitter language for a JS variant
fn get_language(variant: JsLanguageVariant) -> TsLanguage {
    match variant {
        JsLanguageVariant::JavaScript | JsLanguageVariant::Jsx => {
            tree_sitter_javascript::LANGUAGE.into()
        }
        JsLanguageVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        JsLanguageVariant::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Parse JavaScript/TypeScript source code into a tree-sitter AST
pub fn parse_source(content: &str, path: &Path) -> Result<TypeScriptAst, ParseFailure> {
    parse_source_with_timeout(content, path, 0)
}

/// Parse with a watchdog: the parser abandons the file after `timeout_ms`
/// milliseconds (0 disables the limit).
pub fn parse_source_with_timeout(
    content: &str,
    path: &Path,
    timeout_ms: u64,
) -> Result<TypeScriptAst, ParseFailure> {
    let variant = detect_variant(path).ok_or(ParseFailure::UnsupportedLanguage)?;

    let mut parser = Parser::new();
    parser
        .set_language(&get_language(variant))
        .map_err(|e| ParseFailure::Grammar(e.to_string()))?;
    parser.set_timeout_micros(timeout_ms.saturating_mul(1000));

    let tree = parser
        .parse(content, None)
        .ok_or(ParseFailure::Timeout { millis: timeout_ms })?;

    if let Some((line, column)) = first_error_position(&tree) {
        return Err(ParseFailure::Syntax { line, column });
    }

    Ok(TypeScriptAst {
        tree,
        source: content.to_string(),
        language_variant: variant,
    })
}

/// Determine language variant from file path
pub fn detect_variant(path: &Path) -> Option<JsLanguageVariant> {
    JsLanguageVariant::from_path(path)
}

/// 1-based position of the first ERROR or MISSING node, if any.
fn first_error_position(tree: &Tree) -> Option<(usize, usize)> {
    let root = tree.root_node();
    if !root.has_error() {
        return None;
    }

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some((node_line(&node), node_column(&node)));
        }
        // Push in reverse so the leftmost error is found first
        let mut cursor = node.walk();
        let children: Vec<Node> = node
            .children(&mut cursor)
            .filter(|c| c.has_error() || c.is_missing())
            .collect();
        stack.extend(children.into_iter().rev());
    }

    Some((node_line(&root), node_column(&root)))
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    let start = node.start_byte();
    let end = node.end_byte();
    &source[start..end]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Get the last line number covered by a tree-sitter node (1-indexed)
pub fn node_end_line(node: &Node) -> usize {
    node.end_position().row + 1
}

/// Get the column number for a tree-sitter node (1-indexed)
pub fn node_column(node: &Node) -> usize {
    node.start_position().column + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_variant() {
        assert_eq!(
            detect_variant(Path::new("test.js")),
            Some(JsLanguageVariant::JavaScript)
        );
        assert_eq!(
            detect_variant(Path::new("test.mjs")),
            Some(JsLanguageVariant::JavaScript)
        );
        assert_eq!(
            detect_variant(Path::new("test.jsx")),
            Some(JsLanguageVariant::Jsx)
        );
        assert_eq!(
            detect_variant(Path::new("test.ts")),
            Some(JsLanguageVariant::TypeScript)
        );
        assert_eq!(
            detect_variant(Path::new("test.tsx")),
            Some(JsLanguageVariant::Tsx)
        );
        assert_eq!(detect_variant(Path::new("main.py")), None);
    }

    #[test]
    fn test_parse_javascript() {
        let source = "function hello() { return 'world'; }";
        let path = PathBuf::from("test.js");
        let ast = parse_source(source, &path).unwrap();

        assert!(!ast.tree.root_node().has_error());
        assert_eq!(ast.language_variant, JsLanguageVariant::JavaScript);
    }

    #[test]
    fn test_parse_typescript() {
        let source = "function hello<T>(name: string, extra?: T): string { return `Hello ${name}`; }";
        let path = PathBuf::from("test.ts");
        let ast = parse_source(source, &path).unwrap();

        assert!(!ast.tree.root_node().has_error());
        assert_eq!(ast.language_variant, JsLanguageVariant::TypeScript);
    }

    #[test]
    fn test_parse_jsx() {
        let source = "const App = () => <div className=\"x\">Hello</div>;";
        let path = PathBuf::from("test.jsx");
        let ast = parse_source(source, &path).unwrap();

        assert_eq!(ast.language_variant, JsLanguageVariant::Jsx);
    }

    #[test]
    fn test_parse_tsx() {
        let source = "const App: React.FC<Props> = ({ title }) => <h1>{title}</h1>;";
        let path = PathBuf::from("test.tsx");
        let ast = parse_source(source, &path).unwrap();

        assert_eq!(ast.language_variant, JsLanguageVariant::Tsx);
    }

    #[test]
    fn test_parse_modern_syntax() {
        let source = r#"
@Injectable()
class Service {
    count = 0;
    static instances = new Map();
    async *stream() { yield await load(); }
    get value() { return this.data?.nested ?? 'none'; }
}
const lazy = () => import('./module');
"#;
        let path = PathBuf::from("service.ts");
        assert!(parse_source(source, &path).is_ok());
    }

    #[test]
    fn test_parse_failure_reports_position() {
        let source = "const ok = 1;\nfunction broken( {\n";
        let path = PathBuf::from("broken.js");
        let err = parse_source(source, &path).unwrap_err();

        match err {
            ParseFailure::Syntax { line, .. } => assert!(line >= 1),
            other => panic!("expected syntax failure, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_language() {
        let err = parse_source("print('hi')", Path::new("script.py")).unwrap_err();
        assert_eq!(err, ParseFailure::UnsupportedLanguage);
    }

    #[test]
    fn test_node_text() {
        let source = "const x = 42;";
        let path = PathBuf::from("test.js");
        let ast = parse_source(source, &path).unwrap();

        let root = ast.tree.root_node();
        let text = node_text(&root, &ast.source);
        assert_eq!(text, source);
    }

    #[test]
    fn test_node_line() {
        let source = "const x = 42;\nconst y = 24;";
        let path = PathBuf::from("test.js");
        let ast = parse_source(source, &path).unwrap();

        let root = ast.tree.root_node();
        assert_eq!(node_line(&root), 1);
        assert_eq!(node_end_line(&root), 2);
    }
}
