//! Declaration records produced by a dialect's statement classifier.

use classtree::ClassKind;
use serde::{Deserialize, Serialize};

/// One classified logical statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// `package a.b.c;`
    Package(String),
    /// `import [static] a.b.C;` or `#include <a/b.h>`
    Import(ImportDecl),
    /// `namespace a::b {`
    Namespace(String),
    /// Class, struct or interface header, or a forward declaration
    Type(TypeDecl),
}

/// Import or include target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// Dotted target name
    pub target: String,
    /// `import static`
    pub is_static: bool,
}

/// A decomposed type header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Class or interface
    pub kind: ClassKind,
    /// Keyword as written: `class`, `interface`, `@interface` or `struct`
    pub keyword: String,
    /// Simple (unqualified) name
    pub name: String,
    /// Space separated modifier words
    pub modifiers: String,
    /// Generic or template parameter text including the angle brackets
    pub generics: String,
    /// Annotations, attributes or export macros
    pub meta: String,
    /// Base classes with their generic arguments removed
    pub parents: Vec<String>,
    /// Implemented interfaces with their generic arguments removed
    pub interfaces: Vec<String>,
    /// False for a forward declaration without a body
    pub has_body: bool,
}

impl TypeDecl {
    /// A header with a body and no relationships.
    pub fn new(kind: ClassKind, keyword: &str, name: &str) -> Self {
        Self {
            kind,
            keyword: keyword.to_string(),
            name: name.to_string(),
            modifiers: String::new(),
            generics: String::new(),
            meta: String::new(),
            parents: Vec::new(),
            interfaces: Vec::new(),
            has_body: true,
        }
    }
}
