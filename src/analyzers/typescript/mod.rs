//! TypeScript/JavaScript source code analysis
//!
//! This module turns JavaScript and TypeScript source code into plain
//! records:
//!
//! - Functions with parameters, flags, line span and cyclomatic complexity
//! - Classes with members and heritage
//! - Imports (`import`, `require()`, `import()`) and exports
//!
//! # Example
//!
//! ```ignore
//! use repodoc::analyzers::typescript::{analyze_typescript_file, parser::parse_source};
//!
//! let ast = parse_source(source_code, path)?;
//! let parsed = analyze_typescript_file(&ast, "src/app.ts");
//! ```

pub mod dependencies;
pub mod orchestration;
pub mod parser;
pub mod visitor;

// Re-export main entry points
pub use orchestration::analyze_typescript_file;
pub use parser::ParseFailure;
pub use visitor::{extract, Extraction, SyntaxKind};
