//! Core graph types: node handles, kinds and the class node record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Handle of a node in a [`ClassGraph`](super::ClassGraph) arena.
///
/// Handles are assigned in insertion order and stay valid until the graph
/// is released.
pub type NodeId = usize;

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// Class or struct
    Class,
    /// Interface (Java) or annotation type
    Interface,
}

impl ClassKind {
    /// Map a declaration keyword to a kind.
    ///
    /// `interface` and `@interface` are interfaces, everything else
    /// (`class`, `struct`) is a class.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "interface" | "@interface" => ClassKind::Interface,
            _ => ClassKind::Class,
        }
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassKind::Class => write!(f, "class"),
            ClassKind::Interface => write!(f, "interface"),
        }
    }
}

/// Kind of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Child extends parent (or a package depends on an import)
    Extends,
    /// Class implements interface
    Implements,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeKind::Extends => write!(f, "extends"),
            EdgeKind::Implements => write!(f, "implements"),
        }
    }
}

/// One class, struct or interface known to the graph.
///
/// Nodes are owned by the graph arena and refer to each other by
/// [`NodeId`]. `children` is always the transpose of the `parents` sets of
/// other nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassNode {
    /// Arena handle of this node
    pub id: NodeId,
    /// Class or interface
    pub kind: ClassKind,
    /// Outer.Inner dotted name (or import target in import mode)
    pub name: String,
    /// Space separated modifier words (`public abstract`)
    pub modifiers: String,
    /// Raw generic or template parameter text, display only
    pub generics: String,
    /// Raw annotation, attribute or export macro text
    pub meta: String,
    /// File the declaration (or first mention) came from
    pub file: String,
    /// Package or namespace of the declaration
    pub package: String,
    /// True once a declaration body was seen for this name
    pub is_definition: bool,
    /// Base classes (or the package that imports this node)
    pub parents: BTreeSet<NodeId>,
    /// Derived classes
    pub children: BTreeSet<NodeId>,
    /// Implemented interfaces
    pub interfaces: BTreeSet<NodeId>,
}

impl ClassNode {
    pub(crate) fn new(
        id: NodeId,
        kind: ClassKind,
        name: &str,
        modifiers: &str,
        file: &str,
        package: &str,
        is_definition: bool,
    ) -> Self {
        Self {
            id,
            kind,
            name: name.to_string(),
            modifiers: modifiers.to_string(),
            generics: String::new(),
            meta: String::new(),
            file: file.to_string(),
            package: package.to_string(),
            is_definition,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
            interfaces: BTreeSet::new(),
        }
    }

    /// Whether `word` appears among the modifier words.
    pub fn has_modifier(&self, word: &str) -> bool {
        self.modifiers.split_whitespace().any(|m| m == word)
    }

    /// Whether the node has no parents.
    pub fn is_parentless(&self) -> bool {
        self.parents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_keyword() {
        assert_eq!(ClassKind::from_keyword("class"), ClassKind::Class);
        assert_eq!(ClassKind::from_keyword("struct"), ClassKind::Class);
        assert_eq!(ClassKind::from_keyword("interface"), ClassKind::Interface);
        assert_eq!(ClassKind::from_keyword("@interface"), ClassKind::Interface);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ClassKind::Class.to_string(), "class");
        assert_eq!(ClassKind::Interface.to_string(), "interface");
        assert_eq!(EdgeKind::Implements.to_string(), "implements");
    }

    #[test]
    fn test_has_modifier_matches_whole_words() {
        let node = ClassNode::new(0, ClassKind::Class, "Foo", "public abstract", "", "", true);
        assert!(node.has_modifier("public"));
        assert!(node.has_modifier("abstract"));
        assert!(!node.has_modifier("pub"));
    }
}
