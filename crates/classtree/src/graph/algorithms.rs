//! Reachability over parent edges.
//!
//! Root detection needs to know whether a node reaches itself through its
//! parents. Inputs come from arbitrary source trees, so every walk here is
//! iterative and tracks visited nodes.

use crate::error::Result;
use crate::graph::{ClassGraph, NodeId};
use std::collections::HashSet;

/// Depth-first walk through `parents` starting at `start`.
///
/// Returns every node reachable through at least one parent edge, in
/// discovery order. `start` is included only if it lies on a cycle.
pub fn ancestors(graph: &ClassGraph, start: NodeId) -> Result<Vec<NodeId>> {
    let mut visited = HashSet::new();
    let mut stack = vec![start];
    let mut result = Vec::new();

    while let Some(current) = stack.pop() {
        for &parent in &graph.get_node(current)?.parents {
            if visited.insert(parent) {
                result.push(parent);
                stack.push(parent);
            }
        }
    }

    Ok(result)
}

/// Whether `start` is reachable from itself through `parents`.
pub fn is_circular(graph: &ClassGraph, start: NodeId) -> Result<bool> {
    Ok(ancestors(graph, start)?.contains(&start))
}

/// Whether the node starts a presentation tree: no parents, or circular.
pub fn is_root(graph: &ClassGraph, id: NodeId) -> Result<bool> {
    let node = graph.get_node(id)?;
    Ok(node.is_parentless() || is_circular(graph, id)?)
}

/// All roots in insertion order.
pub fn roots(graph: &ClassGraph) -> Vec<NodeId> {
    graph
        .nodes()
        .filter(|node| matches!(is_root(graph, node.id), Ok(true)))
        .map(|node| node.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ClassKind;

    fn define(graph: &mut ClassGraph, name: &str) -> NodeId {
        graph
            .upsert_class(ClassKind::Class, name, "public", "test.java", "", true)
            .unwrap()
    }

    #[test]
    fn test_ancestors_simple_chain() {
        let mut graph = ClassGraph::new();
        let c = define(&mut graph, "C");
        let b = graph.link_parent(c, "B", "test.java", "").unwrap();
        let a = graph.link_parent(b, "A", "test.java", "").unwrap();

        let result = ancestors(&graph, c).unwrap();
        assert_eq!(result, vec![b, a]);
        assert!(!is_circular(&graph, c).unwrap());
    }

    #[test]
    fn test_mutual_cycle_is_circular() {
        let mut graph = ClassGraph::new();
        let a = define(&mut graph, "A");
        let b = graph.link_parent(a, "B", "test.java", "").unwrap();
        graph.link_parent(b, "A", "test.java", "").unwrap();

        assert!(is_circular(&graph, a).unwrap());
        assert!(is_circular(&graph, b).unwrap());
        assert!(is_root(&graph, a).unwrap());
        assert_eq!(roots(&graph), vec![a, b]);
    }

    #[test]
    fn test_self_parent_is_circular() {
        let mut graph = ClassGraph::new();
        let a = define(&mut graph, "A");
        graph.link_parent(a, "A", "test.java", "").unwrap();

        assert!(is_circular(&graph, a).unwrap());
        assert_eq!(roots(&graph), vec![a]);
    }

    #[test]
    fn test_cycle_above_node_does_not_make_it_root() {
        let mut graph = ClassGraph::new();
        let leaf = define(&mut graph, "Leaf");
        let a = graph.link_parent(leaf, "A", "test.java", "").unwrap();
        let b = graph.link_parent(a, "B", "test.java", "").unwrap();
        graph.link_parent(b, "A", "test.java", "").unwrap();

        assert!(!is_root(&graph, leaf).unwrap());
        assert!(is_root(&graph, a).unwrap());
    }

    #[test]
    fn test_unknown_node_is_error() {
        let graph = ClassGraph::new();
        assert!(ancestors(&graph, 7).is_err());
    }
}
