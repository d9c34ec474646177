//! C++ dialect for classtree
//!
//! This crate provides the C++ header grammar: classes and structs with
//! template parameters, export macros, attributes and base lists, plus
//! namespaces, forward declarations and, in import mode, `#include` lines.
//! Preprocessor directives are dropped by the scanner.
//!
//! # Example
//!
//! ```rust
//! use classtree::ClassGraph;
//! use classtree_cpp::CppParser;
//! use classtree_parser_api::CodeParser;
//! use std::path::Path;
//!
//! let parser = CppParser::new();
//! let mut graph = ClassGraph::new();
//!
//! let source = r#"
//!     namespace gfx {
//!     class Widget : public Object {
//!     public:
//!         void draw() {}
//!     };
//!     }
//! "#;
//!
//! let file_info = parser.parse_source(source, Path::new("widget.hpp"), &mut graph).unwrap();
//! assert_eq!(file_info.classes.len(), 1);
//! ```

mod extractor;
mod parser_impl;

pub use extractor::classify;
pub use parser_impl::CppParser;
