//! # classtree-java
//!
//! Java dialect for classtree: scanner rules that keep annotation arguments
//! intact, and the Java header grammar.
//!
//! ## Features
//!
//! - `package` and `import [static]` statements
//! - `class`, `interface` and `@interface` headers with modifiers,
//!   annotations, generic parameters, `extends`, `implements` and `permits`
//! - Nested classes are qualified with their enclosing class names
//!
//! ## Quick Start
//!
//! ```rust
//! use classtree::ClassGraph;
//! use classtree_java::JavaParser;
//! use classtree_parser_api::CodeParser;
//! use std::path::Path;
//!
//! let mut graph = ClassGraph::new();
//! let parser = JavaParser::new();
//! let source = "package shapes;\npublic class Circle extends Shape {\n}\n";
//!
//! let info = parser
//!     .parse_source(source, Path::new("Circle.java"), &mut graph)
//!     .unwrap();
//! assert_eq!(info.classes.len(), 1);
//! assert_eq!(graph.name_count(), 2);
//! ```

mod extractor;
mod parser_impl;

pub use extractor::classify;

// Re-export parser-api types for convenience
pub use classtree_parser_api::{
    CodeParser, FileInfo, ParserConfig, ParserError, ParserMetrics, ProjectInfo,
};

// Export the Java parser implementation
pub use parser_impl::JavaParser;
