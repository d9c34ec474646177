//! # classtree-cli
//!
//! Driver for the `llclasses` binary: walks source trees, hands each file
//! to the Java or C++ dialect by extension, and renders the resulting class
//! graph as a text tree, HTML, JSON or Graphviz.

pub mod cli;
pub mod scan;

pub use cli::{run, Cli, OutputFormat};
pub use scan::{ProjectScanner, ScanSummary};
