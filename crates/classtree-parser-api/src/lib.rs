//! classtree Parser API
//!
//! Shared building blocks for classtree language parsers:
//!
//! - **Scanner**: reduces raw source text to logical statements terminated
//!   by `;`, `{` or `}`, with comments and literal bodies removed
//! - **Declaration records**: [`Statement`] and [`TypeDecl`], produced by a
//!   dialect's `classify` step
//! - **Splitting helpers**: depth-aware list splitting and generic stripping
//! - **Mapper**: applies classified statements to a [`ClassGraph`](classtree::ClassGraph),
//!   tracking nesting, package context and import mode
//! - **CodeParser trait**: the interface every dialect implements
//!
//! # Example
//!
//! ```rust,ignore
//! use classtree_parser_api::{CodeParser, ParserConfig, ScannerRules, Statement};
//!
//! struct MyParser {
//!     config: ParserConfig,
//! }
//!
//! impl CodeParser for MyParser {
//!     fn language(&self) -> &str {
//!         "mylang"
//!     }
//!
//!     fn file_extensions(&self) -> &[&str] {
//!         &[".my"]
//!     }
//!
//!     fn scanner_rules(&self) -> ScannerRules {
//!         ScannerRules::java()
//!     }
//!
//!     fn classify(&self, statement: &str) -> Option<Statement> {
//!         // Match package, import and type headers here
//!         None
//!     }
//!
//!     // ... parse_file, config, metrics, reset_metrics
//! }
//! ```

pub mod config;
pub mod errors;
pub mod ir;
pub mod mapper;
pub mod metrics;
pub mod scanner;
pub mod split;
pub mod traits;

// Re-export commonly used types
pub use config::ParserConfig;
pub use errors::{ParserError, ParserResult};
pub use ir::{ImportDecl, Statement, TypeDecl};
pub use mapper::StatementMapper;
pub use metrics::ParserMetrics;
pub use scanner::{scan_str, LogicalLineScanner, ScanState, ScannerRules};
pub use traits::{CodeParser, FileInfo, ProjectInfo};
