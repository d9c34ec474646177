//! JSON format export for web visualization tools.
//!
//! Generates `nodes` and `links` arrays compatible with force-directed
//! layouts. Every node carries a `visible` flag computed with the same
//! rules the tree renderers use.

use super::PresentOptions;
use crate::error::{GraphError, Result};
use crate::graph::{ClassGraph, ClassNode};
use serde_json::{json, Value};

fn node_to_json(node: &ClassNode, options: &PresentOptions) -> Result<Value> {
    let mut value = serde_json::to_value(node)
        .map_err(|e| GraphError::serialization("Failed to serialize node", Some(e)))?;
    if let Value::Object(map) = &mut value {
        map.insert("visible".to_string(), json!(options.show.is_visible(node)));
    }
    Ok(value)
}

/// Export the whole graph as pretty printed JSON.
pub fn export_json(graph: &ClassGraph, options: &PresentOptions) -> Result<String> {
    let nodes = graph
        .nodes()
        .map(|node| node_to_json(node, options))
        .collect::<Result<Vec<_>>>()?;

    let links: Vec<Value> = graph
        .edges()
        .into_iter()
        .map(|(kind, from, to, file)| {
            json!({
                "source": from,
                "target": to,
                "type": kind,
                "file": file,
            })
        })
        .collect();

    let result = json!({
        "nodes": nodes,
        "links": links,
        "roots": graph.roots(),
    });

    serde_json::to_string_pretty(&result)
        .map_err(|e| GraphError::serialization("Failed to serialize graph", Some(e)))
}
