//! Class graph types and operations.
//!
//! - [`ClassNode`]: one class, struct or interface
//! - [`ClassGraph`]: the arena owning every node plus the name index
//! - [`PatternList`]: glob filters applied at insertion time

mod classgraph;
mod filter;
mod types;
pub mod algorithms;

pub use classgraph::ClassGraph;
pub use filter::PatternList;
pub use types::{ClassKind, ClassNode, EdgeKind, NodeId};
