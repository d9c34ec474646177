//! The class graph arena.

use super::algorithms;
use super::filter::PatternList;
use super::types::{ClassKind, ClassNode, EdgeKind, NodeId};
use crate::error::{GraphError, Result};
use log::{debug, info, trace, warn};
use std::collections::HashMap;

/// Registry of every class and interface seen during a run.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. A name may map to
/// several nodes when classes with the same simple name live in different
/// packages. Relationship edges are stored on the nodes as handle sets and
/// are always added in symmetric pairs.
///
/// Mutation never fails. Filtered names yield `None` and ambiguities are
/// reported through `log`.
#[derive(Debug, Default)]
pub struct ClassGraph {
    nodes: Vec<ClassNode>,
    index: HashMap<String, Vec<NodeId>>,
    // File that first introduced each edge
    edge_files: HashMap<(EdgeKind, NodeId, NodeId), String>,
    ignore_classes: PatternList,
    include_classes: PatternList,
}

impl ClassGraph {
    /// Create an empty graph without filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with class name filters.
    ///
    /// Names matching `ignore` are never recorded. When `include` is not
    /// empty only names matching it are recorded.
    pub fn with_filters(ignore: PatternList, include: PatternList) -> Self {
        Self {
            ignore_classes: ignore,
            include_classes: include,
            ..Self::default()
        }
    }

    /// Insert or merge a class.
    ///
    /// Lookup among nodes already registered under `name` prefers, in
    /// order: one in the same package, one that is not yet a definition,
    /// and (only for non-definition requests) any node at all. Without a
    /// candidate a new node is created.
    ///
    /// A definition request promotes the chosen node in place: kind,
    /// modifiers, file and package are overwritten and existing edges stay
    /// attached. Redefining an existing definition logs a warning and the
    /// last definition wins.
    ///
    /// Returns `None` when the name is filtered out.
    pub fn upsert_class(
        &mut self,
        kind: ClassKind,
        name: &str,
        modifiers: &str,
        file: &str,
        package: &str,
        is_definition: bool,
    ) -> Option<NodeId> {
        if self.ignore_classes.matches(name) {
            info!("Ignoring class: {}", name);
            return None;
        }
        if !self.include_classes.is_empty() && !self.include_classes.matches(name) {
            debug!("Class not included: {}", name);
            return None;
        }

        let Some(id) = self.select_existing(name, package, is_definition) else {
            let id = self.nodes.len();
            trace!("New {} {} ({}) id={}", kind, name, file, id);
            self.nodes.push(ClassNode::new(
                id,
                kind,
                name,
                modifiers,
                file,
                package,
                is_definition,
            ));
            self.index.entry(name.to_string()).or_default().push(id);
            return Some(id);
        };

        if is_definition {
            let node = &mut self.nodes[id];
            if node.is_definition {
                warn!(
                    "Duplicate class {} defined in {} and {}",
                    name, node.file, file
                );
            }
            node.kind = kind;
            node.modifiers = modifiers.to_string();
            node.file = file.to_string();
            node.package = package.to_string();
            node.is_definition = true;
        }
        Some(id)
    }

    fn select_existing(&self, name: &str, package: &str, is_definition: bool) -> Option<NodeId> {
        let candidates = self.index.get(name)?;
        candidates
            .iter()
            .copied()
            .find(|&id| self.nodes[id].package == package)
            .or_else(|| {
                candidates
                    .iter()
                    .copied()
                    .find(|&id| !self.nodes[id].is_definition)
            })
            .or_else(|| {
                if is_definition {
                    None
                } else {
                    candidates.first().copied()
                }
            })
    }

    /// Record that `child` extends `parent_name`.
    ///
    /// The parent is resolved with a non-definition upsert, so it is created
    /// as a reference node when unknown. Returns the parent handle, or
    /// `None` when the parent name is filtered out and the edge dropped.
    pub fn link_parent(
        &mut self,
        child: NodeId,
        parent_name: &str,
        file: &str,
        package: &str,
    ) -> Option<NodeId> {
        if child >= self.nodes.len() {
            warn!("Dropping parent {} of unknown node {}", parent_name, child);
            return None;
        }
        let parent = self.upsert_class(ClassKind::Class, parent_name, "", file, package, false)?;
        self.connect(EdgeKind::Extends, child, parent, file);
        Some(parent)
    }

    /// Record that `node` implements `interface_name`.
    ///
    /// The target is typed as an interface whatever it was before; a later
    /// definition sets its own kind again.
    pub fn add_interface(
        &mut self,
        node: NodeId,
        interface_name: &str,
        file: &str,
        package: &str,
    ) -> Option<NodeId> {
        if node >= self.nodes.len() {
            warn!("Dropping interface {} of unknown node {}", interface_name, node);
            return None;
        }
        let iface =
            self.upsert_class(ClassKind::Interface, interface_name, "", file, package, false)?;
        self.nodes[iface].kind = ClassKind::Interface;
        self.connect(EdgeKind::Implements, node, iface, file);
        Some(iface)
    }

    fn connect(&mut self, kind: EdgeKind, from: NodeId, to: NodeId, file: &str) {
        if let Some(existing) = self.edge_files.get(&(kind, from, to)) {
            if existing != file {
                warn!(
                    "Duplicate files for {} {} {}: {} and {}",
                    self.nodes[from].name, kind, self.nodes[to].name, existing, file
                );
            }
            return;
        }
        self.edge_files.insert((kind, from, to), file.to_string());
        match kind {
            EdgeKind::Extends => {
                self.nodes[from].parents.insert(to);
                self.nodes[to].children.insert(from);
            }
            EdgeKind::Implements => {
                self.nodes[from].interfaces.insert(to);
            }
        }
    }

    /// Attach display-only generic parameter and meta text to a node.
    pub fn annotate(&mut self, id: NodeId, generics: &str, meta: &str) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or(GraphError::NodeNotFound { node_id: id })?;
        node.generics = generics.to_string();
        node.meta = meta.to_string();
        Ok(())
    }

    /// Look up a node by handle.
    pub fn get_node(&self, id: NodeId) -> Result<&ClassNode> {
        self.nodes
            .get(id)
            .ok_or(GraphError::NodeNotFound { node_id: id })
    }

    /// All nodes registered under `name`, oldest first.
    pub fn find(&self, name: &str) -> &[NodeId] {
        self.index.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The node registered under `name` in `package`, if any.
    pub fn find_in_package(&self, name: &str, package: &str) -> Option<NodeId> {
        self.find(name)
            .iter()
            .copied()
            .find(|&id| self.nodes[id].package == package)
    }

    /// File that introduced an edge.
    pub fn edge_file(&self, kind: EdgeKind, from: NodeId, to: NodeId) -> Option<&str> {
        self.edge_files.get(&(kind, from, to)).map(String::as_str)
    }

    /// Every edge as `(kind, from, to, file)`, ordered by source node.
    ///
    /// `Extends` edges point from child to parent, `Implements` edges from
    /// the implementing class to the interface.
    pub fn edges(&self) -> Vec<(EdgeKind, NodeId, NodeId, &str)> {
        let mut edges: Vec<_> = self
            .edge_files
            .iter()
            .map(|(&(kind, from, to), file)| (kind, from, to, file.as_str()))
            .collect();
        edges.sort_by_key(|&(kind, from, to, _)| (from, kind, to));
        edges
    }

    /// Iterate nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ClassNode> {
        self.nodes.iter()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct names.
    pub fn name_count(&self) -> usize {
        self.index.len()
    }

    /// Number of recorded edges of both kinds.
    pub fn edge_count(&self) -> usize {
        self.edge_files.len()
    }

    /// Whether no node was recorded.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` reaches itself through its parents.
    pub fn is_circular(&self, id: NodeId) -> Result<bool> {
        algorithms::is_circular(self, id)
    }

    /// Whether `id` has no parents or is circular.
    pub fn is_root(&self, id: NodeId) -> Result<bool> {
        algorithms::is_root(self, id)
    }

    /// Every root, in insertion order.
    pub fn roots(&self) -> Vec<NodeId> {
        algorithms::roots(self)
    }

    /// Drop every node at once. Returns how many nodes were freed.
    pub fn release(self) -> usize {
        let count = self.nodes.len();
        debug!(
            "Releasing class graph: {} nodes, {} names, {} edges",
            count,
            self.index.len(),
            self.edge_files.len()
        );
        count
    }
}
