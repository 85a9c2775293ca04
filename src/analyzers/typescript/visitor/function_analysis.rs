//! Function analysis for TypeScript/JavaScript
//!
//! Builds a [`FunctionRecord`] for a single function-like node. The walk in
//! [`super::extract`] decides which nodes are function-like.

use crate::analyzers::typescript::parser::{node_end_line, node_line, node_text};
use crate::core::ast::TypeScriptAst;
use crate::core::FunctionRecord;
use tree_sitter::Node;

use super::helpers::{
    calculate_cyclomatic_complexity, enclosing_declarator, has_async_modifier, is_exported,
    leading_doc_comment,
};

/// Placeholder for parameters that do not bind a single identifier
const UNKNOWN_PARAMETER: &str = "unknown";

/// Analyze a function declaration, function expression, generator or
/// arrow function.
pub fn analyze_function(node: &Node, ast: &TypeScriptAst) -> FunctionRecord {
    let source = ast.source.as_str();

    FunctionRecord {
        name: function_name(node, source),
        parameters: extract_parameters(node, source),
        return_type: return_type(node, source),
        line_start: node_line(node),
        line_end: node_end_line(node),
        complexity: calculate_cyclomatic_complexity(node, source),
        is_async: has_async_modifier(node),
        is_exported: is_exported(node),
        doc_comment: leading_doc_comment(node, source),
    }
}

/// Own identifier, else the variable the function is assigned to
fn function_name(node: &Node, source: &str) -> String {
    if let Some(name) = node.child_by_field_name("name") {
        return node_text(&name, source).to_string();
    }

    // const foo = () => {} / const foo = function() {}
    enclosing_declarator(node)
        .and_then(|declarator| declarator.child_by_field_name("name"))
        .filter(|name| name.kind() == "identifier")
        .map(|name| node_text(&name, source).to_string())
        .unwrap_or_else(|| "anonymous".to_string())
}

/// Extract parameter names in declaration order
fn extract_parameters(node: &Node, source: &str) -> Vec<String> {
    // Arrow functions with a single bare parameter: x => x * 2
    if let Some(param) = node.child_by_field_name("parameter") {
        return vec![parameter_name(&param, source)];
    }

    let Some(params) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut cursor = params.walk();
    let names = params
        .named_children(&mut cursor)
        .filter(|param| param.kind() != "comment")
        .map(|param| parameter_name(&param, source))
        .collect();
    names
}

/// TypeScript return annotation, `: Promise<User>` recorded as `Promise<User>`
fn return_type(node: &Node, source: &str) -> Option<String> {
    let annotation = node.child_by_field_name("return_type")?;
    let text = node_text(&annotation, source).trim_start();
    let text = text.strip_prefix(':').unwrap_or(text).trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn parameter_name(param: &Node, source: &str) -> String {
    match param.kind() {
        "identifier" | "this" => node_text(param, source).to_string(),

        // ...args
        "rest_pattern" => {
            let inner = param
                .named_child(0)
                .filter(|inner| inner.kind() == "identifier")
                .map(|inner| node_text(&inner, source))
                .unwrap_or(UNKNOWN_PARAMETER);
            format!("...{inner}")
        }

        // x = 1
        "assignment_pattern" => param
            .child_by_field_name("left")
            .filter(|left| left.kind() == "identifier")
            .map(|left| node_text(&left, source).to_string())
            .unwrap_or_else(|| UNKNOWN_PARAMETER.to_string()),

        // TypeScript wraps every parameter: (x: number, y?: string = 'a')
        "required_parameter" | "optional_parameter" => param
            .child_by_field_name("pattern")
            .map(|pattern| parameter_name(&pattern, source))
            .unwrap_or_else(|| UNKNOWN_PARAMETER.to_string()),

        // Object and array destructuring keep their position only
        _ => UNKNOWN_PARAMETER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::parser::parse_source;
    use std::path::PathBuf;

    fn functions_in(source: &str, file: &str) -> Vec<FunctionRecord> {
        let path = PathBuf::from(file);
        let ast = parse_source(source, &path).unwrap();
        super::super::extract(&ast).functions
    }

    #[test]
    fn test_function_declaration_record() {
        let source = "/** Loads a user */\nexport async function getUser(id) {\n  if (!id) return null;\n  return db.find(id);\n}\n";
        let functions = functions_in(source, "users.js");

        assert_eq!(functions.len(), 1);
        let f = &functions[0];
        assert_eq!(f.name, "getUser");
        assert_eq!(f.parameters, vec!["id"]);
        assert_eq!(f.line_start, 2);
        assert_eq!(f.line_end, 5);
        assert_eq!(f.complexity, 2);
        assert!(f.is_async);
        assert!(f.is_exported);
        assert_eq!(f.doc_comment.as_deref(), Some("* Loads a user"));
    }

    #[test]
    fn test_arrow_function_takes_variable_name() {
        let functions = functions_in("const double = x => x * 2;", "math.js");

        assert_eq!(functions[0].name, "double");
        assert_eq!(functions[0].parameters, vec!["x"]);
        // Parent is a variable declarator, not the export statement
        assert!(!functions[0].is_exported);
    }

    #[test]
    fn test_exported_arrow_is_not_marked_exported() {
        let functions = functions_in("/** Adds */\nexport const add = (a, b) => a + b;", "math.ts");

        assert_eq!(functions[0].name, "add");
        assert!(!functions[0].is_exported);
        assert_eq!(functions[0].doc_comment.as_deref(), Some("* Adds"));
    }

    #[test]
    fn test_anonymous_callback() {
        let functions = functions_in("items.forEach(function (item) { log(item); });", "a.js");

        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "anonymous");
    }

    #[test]
    fn test_parameter_shapes() {
        let functions = functions_in(
            "function f(a, b = 2, { c }, [d], ...rest) {}",
            "params.js",
        );
        assert_eq!(
            functions[0].parameters,
            vec!["a", "b", "unknown", "unknown", "...rest"]
        );
    }

    #[test]
    fn test_typescript_parameters_unwrap_annotations() {
        let functions = functions_in(
            "function f(this: Window, id: string, limit?: number, page: number = 1, ...tags: string[]) {}",
            "params.ts",
        );
        assert_eq!(
            functions[0].parameters,
            vec!["this", "id", "limit", "page", "...tags"]
        );
    }

    #[test]
    fn test_generator_and_function_expression() {
        let source = "function* ids() { yield 1; }\nconst gen = function* () {};\nconst named = function inner() {};";
        let functions = functions_in(source, "gen.js");

        let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["ids", "gen", "inner"]);
    }

    #[test]
    fn test_return_type_annotations() {
        let source = "async function load(id: string): Promise<User> { return db.get(id); }\nconst count = (xs: number[]): number => xs.length;\nfunction plain() {}";
        let functions = functions_in(source, "load.ts");

        assert_eq!(functions[0].return_type.as_deref(), Some("Promise<User>"));
        assert_eq!(functions[1].return_type.as_deref(), Some("number"));
        assert_eq!(functions[2].return_type, None);
    }

    #[test]
    fn test_javascript_has_no_return_type() {
        let functions = functions_in("function f(a) { return a; }", "f.js");
        assert_eq!(functions[0].return_type, None);
    }

    #[test]
    fn test_async_arrow() {
        let functions = functions_in("const load = async () => { await fetch('/x'); };", "load.js");
        assert!(functions[0].is_async);
    }
}
