//! Cycle-safe depth-first traversal shared by every renderer.
//!
//! A walk starts at the roots of the graph (parentless or circular nodes)
//! and descends through `children`. Each [`Traversal`] owns its own visited
//! set, so two renderers never share marks. A node is rendered at most once
//! per traversal; a node that is not visible itself is still descended into
//! when it has a visible descendant, and its children are reported one
//! level up.

use crate::graph::{ClassGraph, ClassKind, ClassNode, NodeId};
use std::collections::HashSet;

/// Visibility flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowOptions {
    /// Show every class, not only defined public ones
    pub show_all_classes: bool,
    /// Show interfaces
    pub show_interfaces: bool,
}

impl ShowOptions {
    /// Whether `node` is rendered, ignoring visited marks.
    ///
    /// Classes need a definition with a `public` modifier unless every
    /// class is shown. Interfaces are shown only on request.
    pub fn is_visible(&self, node: &ClassNode) -> bool {
        match node.kind {
            ClassKind::Class => {
                self.show_all_classes || (node.is_definition && node.has_modifier("public"))
            }
            ClassKind::Interface => self.show_interfaces,
        }
    }
}

/// Position of a rendered node in the presented tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitContext {
    /// Indentation level, 0 for top level entries
    pub depth: usize,
    /// Nearest rendered ancestor
    pub parent: Option<NodeId>,
    /// Last entry among its rendered siblings
    pub is_last: bool,
}

/// Callbacks driven by [`Traversal::walk`].
pub trait TreeVisitor {
    /// Called when a node is rendered, before its children.
    fn visit(&mut self, graph: &ClassGraph, node: &ClassNode, ctx: &VisitContext);

    /// Called after every child of a rendered node was walked.
    fn leave(&mut self, _graph: &ClassGraph, _node: &ClassNode, _ctx: &VisitContext) {}
}

/// One traversal pass over a graph.
pub struct Traversal<'g> {
    graph: &'g ClassGraph,
    options: ShowOptions,
    visited: HashSet<NodeId>,
}

impl<'g> Traversal<'g> {
    /// Start a fresh pass with no visited marks.
    pub fn new(graph: &'g ClassGraph, options: ShowOptions) -> Self {
        Self {
            graph,
            options,
            visited: HashSet::new(),
        }
    }

    /// Whether `id` was already reached in this pass.
    pub fn is_visited(&self, id: NodeId) -> bool {
        self.visited.contains(&id)
    }

    /// Whether `id` is visible and not yet visited.
    pub fn can_show(&self, id: NodeId) -> bool {
        match self.graph.get_node(id) {
            Ok(node) => !self.is_visited(id) && self.options.is_visible(node),
            Err(_) => false,
        }
    }

    /// Whether some descendant of `id` can still be shown.
    pub fn can_show_children(&self, id: NodeId) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Ok(node) = self.graph.get_node(current) else {
                continue;
            };
            for &child in &node.children {
                if !seen.insert(child) {
                    continue;
                }
                if self.can_show(child) {
                    return true;
                }
                stack.push(child);
            }
        }
        false
    }

    /// Walk every root. Returns the number of rendered nodes.
    pub fn walk<V: TreeVisitor + ?Sized>(&mut self, visitor: &mut V) -> usize {
        let roots: Vec<NodeId> = self
            .graph
            .roots()
            .into_iter()
            .filter(|&root| self.can_show(root) || self.can_show_children(root))
            .collect();
        let count = roots.len();
        roots
            .into_iter()
            .enumerate()
            .map(|(i, root)| self.descend(root, 0, None, i + 1 == count, visitor))
            .sum()
    }

    fn descend<V: TreeVisitor + ?Sized>(
        &mut self,
        id: NodeId,
        depth: usize,
        parent: Option<NodeId>,
        is_last: bool,
        visitor: &mut V,
    ) -> usize {
        if !self.visited.insert(id) {
            return 0;
        }
        let graph = self.graph;
        let Ok(node) = graph.get_node(id) else {
            return 0;
        };

        let visible = self.options.is_visible(node);
        let ctx = VisitContext {
            depth,
            parent,
            is_last,
        };
        let mut rendered = 0;
        let (child_depth, child_parent) = if visible {
            visitor.visit(graph, node, &ctx);
            rendered += 1;
            (depth + 1, Some(id))
        } else {
            (depth, parent)
        };

        let eligible: Vec<NodeId> = node
            .children
            .iter()
            .copied()
            .filter(|&child| self.can_show(child) || self.can_show_children(child))
            .collect();
        let count = eligible.len();
        for (i, child) in eligible.into_iter().enumerate() {
            let last = i + 1 == count && (visible || is_last);
            rendered += self.descend(child, child_depth, child_parent, last, visitor);
        }

        if visible {
            visitor.leave(graph, node, &ctx);
        }
        rendered
    }
}

/// Run a fresh traversal over `graph`.
pub fn walk<V: TreeVisitor + ?Sized>(
    graph: &ClassGraph,
    options: ShowOptions,
    visitor: &mut V,
) -> usize {
    Traversal::new(graph, options).walk(visitor)
}
