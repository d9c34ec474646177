//! # classtree
//!
//! An in-memory graph of class and interface declarations, built for
//! presenting inheritance hierarchies.
//!
//! ## Architecture
//!
//! ```text
//! Language parsers (classtree-java, classtree-cpp)
//!     ↓
//! ClassGraph (arena of nodes, name index, include/ignore filters)
//!     ↓
//! Traversal (roots, visibility, cycle-safe depth-first walk)
//!     ↓
//! Export (text tree, names table, DOT, HTML, JSON)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use classtree::{ClassGraph, ClassKind};
//!
//! let mut graph = ClassGraph::new();
//! let list = graph
//!     .upsert_class(ClassKind::Class, "ArrayList", "public", "ArrayList.java", "java.util", true)
//!     .unwrap();
//! graph.link_parent(list, "AbstractList", "ArrayList.java", "java.util");
//!
//! assert_eq!(graph.name_count(), 2);
//! assert_eq!(graph.roots().len(), 1);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod export;
pub mod graph;
pub mod traversal;

pub use error::{GraphError, Result};
pub use graph::{ClassGraph, ClassKind, ClassNode, EdgeKind, NodeId, PatternList};
pub use traversal::{ShowOptions, Traversal, TreeVisitor, VisitContext};
