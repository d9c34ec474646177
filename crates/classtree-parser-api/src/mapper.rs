//! Applies classified statements to a class graph.
//!
//! The mapper owns the per-file context: the running package, the stack of
//! open scopes used to qualify nested class names, and the import-mode
//! bookkeeping. Brace nesting is tracked from the last character of each
//! statement, so statements that classify to nothing still keep the stack
//! balanced.

use crate::config::ParserConfig;
use crate::errors::{ParserError, ParserResult};
use crate::ir::{ImportDecl, Statement, TypeDecl};
use crate::split::truncate_segments;
use crate::traits::FileInfo;
use classtree::{ClassGraph, ClassKind, NodeId};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One open `{` scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// A block that is not a type or namespace body
    Anonymous,
    /// Body of a class, struct or interface
    Type(String),
    /// Body of a C++ namespace
    Namespace(String),
}

/// Per-file statement sink.
pub struct StatementMapper<'a> {
    graph: &'a mut ClassGraph,
    config: &'a ParserConfig,
    path: PathBuf,
    file: String,
    package: String,
    import_owner: Option<String>,
    owner_registered: bool,
    scopes: Vec<Scope>,
    classes: Vec<NodeId>,
    interfaces: Vec<NodeId>,
    imports: Vec<NodeId>,
    statements: usize,
}

impl<'a> StatementMapper<'a> {
    /// Start mapping `path` into `graph`.
    ///
    /// In import mode, imports are parented under `import_owner` when given
    /// (C++ uses the including file's name) and under the current package
    /// otherwise.
    pub fn new(
        graph: &'a mut ClassGraph,
        config: &'a ParserConfig,
        path: &Path,
        import_owner: Option<String>,
    ) -> Self {
        Self {
            graph,
            config,
            path: path.to_path_buf(),
            file: path.to_string_lossy().into_owned(),
            package: String::new(),
            import_owner,
            owner_registered: false,
            scopes: Vec::new(),
            classes: Vec::new(),
            interfaces: Vec::new(),
            imports: Vec::new(),
            statements: 0,
        }
    }

    /// Package of the last `package` statement.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Open scopes, innermost last.
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// `name` prefixed with every enclosing type name.
    pub fn qualified_name(&self, name: &str) -> String {
        let mut parts: Vec<&str> = self
            .scopes
            .iter()
            .filter_map(|scope| match scope {
                Scope::Type(outer) => Some(outer.as_str()),
                _ => None,
            })
            .collect();
        parts.push(name);
        parts.join(".")
    }

    /// Enclosing namespaces joined with `::`, or the file's package.
    pub fn current_package(&self) -> String {
        let namespaces: Vec<&str> = self
            .scopes
            .iter()
            .filter_map(|scope| match scope {
                Scope::Namespace(ns) => Some(ns.as_str()),
                _ => None,
            })
            .collect();
        if namespaces.is_empty() {
            self.package.clone()
        } else {
            namespaces.join("::")
        }
    }

    /// Apply one logical statement and its classification.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::MissingPackage`] when import mode cannot
    /// attribute an import to a package. Processing of the file should stop.
    pub fn apply(&mut self, statement: &str, decl: Option<Statement>) -> ParserResult<()> {
        self.statements += 1;
        let mut opened = false;

        match decl {
            Some(Statement::Package(name)) => self.set_package(&name, statement)?,
            Some(Statement::Import(import)) => {
                if self.config.import_mode() {
                    self.add_import(&import, statement)?;
                }
            }
            Some(Statement::Namespace(name)) => {
                if statement.ends_with('{') {
                    self.scopes.push(Scope::Namespace(name));
                    opened = true;
                }
            }
            Some(Statement::Type(decl)) => {
                if !self.config.import_mode() {
                    self.add_type(&decl)?;
                }
                if decl.has_body {
                    self.scopes.push(Scope::Type(decl.name));
                    opened = true;
                }
            }
            None => {}
        }

        match statement.chars().last() {
            Some('{') if !opened => self.scopes.push(Scope::Anonymous),
            Some('}') => {
                self.scopes.pop();
            }
            _ => {}
        }
        Ok(())
    }

    fn set_package(&mut self, name: &str, statement: &str) -> ParserResult<()> {
        if !self.config.import_mode() {
            self.package = name.to_string();
            return Ok(());
        }
        let Some(package) = truncate_segments(name, self.config.import_depth) else {
            return Err(ParserError::MissingPackage(
                self.path.clone(),
                statement.to_string(),
            ));
        };
        self.graph
            .upsert_class(ClassKind::Class, &package, "", &self.file, &package, true);
        self.package = package;
        Ok(())
    }

    fn owner(&mut self, statement: &str) -> ParserResult<String> {
        match &self.import_owner {
            Some(owner) => {
                let owner = owner.clone();
                if !self.owner_registered {
                    self.graph
                        .upsert_class(ClassKind::Class, &owner, "", &self.file, &owner, true);
                    self.owner_registered = true;
                }
                Ok(owner)
            }
            None if self.package.is_empty() => Err(ParserError::MissingPackage(
                self.path.clone(),
                statement.to_string(),
            )),
            None => Ok(self.package.clone()),
        }
    }

    fn add_import(&mut self, import: &ImportDecl, statement: &str) -> ParserResult<()> {
        let owner = self.owner(statement)?;
        let Some(truncated) = truncate_segments(&import.target, self.config.import_depth) else {
            debug!("Import {} truncated to nothing", import.target);
            return Ok(());
        };
        let name = truncated.trim_end_matches(".*");
        if name.is_empty() || name == "*" {
            return Ok(());
        }

        let modifiers = if import.is_static { "static" } else { "" };
        let Some(child) =
            self.graph
                .upsert_class(ClassKind::Class, name, modifiers, &self.file, name, false)
        else {
            return Ok(());
        };
        self.graph.link_parent(child, &owner, &self.file, &owner);
        self.imports.push(child);
        if self.config.trace_declarations {
            info!("import {} -> {} ({})", owner, name, self.file);
        }
        Ok(())
    }

    fn add_type(&mut self, decl: &TypeDecl) -> ParserResult<()> {
        let name = self.qualified_name(&decl.name);
        let package = self.current_package();

        if !decl.has_body {
            if self
                .graph
                .upsert_class(decl.kind, &name, "", &self.file, &package, false)
                .is_some()
            {
                debug!("Forward declaration of {} in {}", name, self.file);
            }
            return Ok(());
        }

        let Some(id) = self.graph.upsert_class(
            decl.kind,
            &name,
            &decl.modifiers,
            &self.file,
            &package,
            true,
        ) else {
            debug!("Filtered {} {}", decl.keyword, name);
            return Ok(());
        };
        self.graph.annotate(id, &decl.generics, &decl.meta)?;
        for parent in &decl.parents {
            self.graph.link_parent(id, parent, &self.file, &package);
        }
        for iface in &decl.interfaces {
            self.graph.add_interface(id, iface, &self.file, &package);
        }
        match decl.kind {
            ClassKind::Class => self.classes.push(id),
            ClassKind::Interface => self.interfaces.push(id),
        }

        if self.config.trace_declarations {
            info!(
                "{} {} [{}] extends [{}] implements [{}] in {}",
                decl.keyword,
                name,
                decl.modifiers,
                decl.parents.join(","),
                decl.interfaces.join(","),
                self.file
            );
        }
        Ok(())
    }

    /// Finish the file and report what was recorded.
    pub fn finish(self) -> FileInfo {
        FileInfo {
            file_path: self.path,
            package: self.package,
            classes: self.classes,
            interfaces: self.interfaces,
            imports: self.imports,
            statement_count: self.statements,
            parse_time: Duration::ZERO,
            line_count: 0,
            byte_count: 0,
        }
    }
}
