//! DOT format export for Graphviz visualization.
//!
//! Interfaces are drawn yellow with thick red edges, abstract classes
//! chartreuse and classes without a `public` modifier with a red outline.
//! Output can be split into one document per root or capped by node count.

use super::PresentOptions;
use crate::error::Result;
use crate::graph::{ClassGraph, ClassKind, ClassNode, NodeId};
use crate::traversal::{Traversal, TreeVisitor, VisitContext};
use log::info;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One rendered Graphviz document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotDocument {
    /// Name of the root that opened the document
    pub root: String,
    /// Complete `digraph` text
    pub content: String,
}

impl DotDocument {
    /// File name for this document: the root name with characters that are
    /// awkward in paths replaced by `_`, plus `.gv`.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .root
            .chars()
            .map(|c| match c {
                '<' | ',' | '>' | '?' | ':' | '*' | '"' | '|' | '/' | '\\' => '_',
                c => c,
            })
            .collect();
        format!("{stem}.gv")
    }
}

/// Export every visible tree as a single Graphviz document.
pub fn export_dot(graph: &ClassGraph, options: &PresentOptions) -> Result<String> {
    let single = PresentOptions {
        split_by_tree: false,
        nodes_per_file: 0,
        ..options.clone()
    };
    let mut documents = export_dot_split(graph, &single)?;
    Ok(documents.pop().map(|doc| doc.content).unwrap_or_default())
}

/// Export visible trees as one or more Graphviz documents.
///
/// A new document starts at a root when `split_by_tree` is set, or when
/// `nodes_per_file` is non-zero and the current document already holds at
/// least that many nodes. At least one document is always returned.
pub fn export_dot_split(graph: &ClassGraph, options: &PresentOptions) -> Result<Vec<DotDocument>> {
    let title = options.title(0, "Class Diagram");
    let mut writer = DotWriter {
        options,
        graph_name: graph_name(title),
        title,
        documents: Vec::new(),
        current: None,
    };
    Traversal::new(graph, options.show).walk(&mut writer);
    writer.finish_current();
    if writer.documents.is_empty() {
        writer.start(title);
        writer.finish_current();
    }
    Ok(writer.documents)
}

/// Write documents into `dir`, one file each. Returns the written paths.
pub fn write_dot_files(documents: &[DotDocument], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(documents.len());
    for doc in documents {
        let path = dir.join(doc.file_name());
        fs::write(&path, &doc.content)?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn graph_name(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

struct OpenDocument {
    root: String,
    body: String,
    declared: HashSet<NodeId>,
    node_count: usize,
}

struct DotWriter<'o> {
    options: &'o PresentOptions,
    graph_name: String,
    title: &'o str,
    documents: Vec<DotDocument>,
    current: Option<OpenDocument>,
}

impl DotWriter<'_> {
    fn start(&mut self, root: &str) {
        self.finish_current();
        self.current = Some(OpenDocument {
            root: root.to_string(),
            body: String::new(),
            declared: HashSet::new(),
            node_count: 0,
        });
    }

    fn finish_current(&mut self) {
        let Some(doc) = self.current.take() else {
            return;
        };
        let mut content = String::new();
        content.push_str(&format!("digraph {} {{\n", self.graph_name));
        content.push_str("    bgcolor=transparent;\n");
        content.push_str("    overlap=false;\n");
        content.push_str(&format!(
            "    label=\"{} Class Hierarchy\";\n",
            escape_dot_label(self.title)
        ));
        content.push_str("    fontsize=12;\n");
        content.push_str("    node [shape=box,style=filled,fillcolor=white];\n\n");
        content.push_str(&doc.body);
        content.push_str("}\n");
        self.documents.push(DotDocument {
            root: doc.root,
            content,
        });
    }

    fn needs_new_document(&self) -> bool {
        match &self.current {
            None => true,
            Some(doc) => {
                self.options.split_by_tree
                    || (self.options.nodes_per_file != 0
                        && doc.node_count >= self.options.nodes_per_file)
            }
        }
    }

    fn declare(&mut self, node: &ClassNode) {
        let Some(doc) = self.current.as_mut() else {
            return;
        };
        if !doc.declared.insert(node.id) {
            return;
        }
        let style = if node.kind == ClassKind::Interface {
            ", fillcolor=yellow"
        } else if node.has_modifier("abstract") {
            ", fillcolor=chartreuse"
        } else if !node.has_modifier("public") {
            ", color=red"
        } else {
            ""
        };
        doc.body.push_str(&format!(
            "    n{} [label=\"{}\"{}];\n",
            node.id,
            // One line per dotted segment
            escape_dot_label(&node.name).replace('.', "\\n"),
            style
        ));
        doc.node_count += 1;
    }
}

impl TreeVisitor for DotWriter<'_> {
    fn visit(&mut self, graph: &ClassGraph, node: &ClassNode, ctx: &VisitContext) {
        if ctx.depth == 0 && self.needs_new_document() {
            self.start(&node.name);
        }
        self.declare(node);

        for &iface in &node.interfaces {
            if let Ok(iface_node) = graph.get_node(iface) {
                self.declare(iface_node);
                if let Some(doc) = self.current.as_mut() {
                    doc.body.push_str(&format!(
                        "    n{} -> n{} [color=red,penwidth=3.0];\n",
                        iface, node.id
                    ));
                }
            }
        }

        if let (Some(parent), Some(doc)) = (ctx.parent, self.current.as_mut()) {
            doc.body
                .push_str(&format!("    n{} -> n{};\n", parent, node.id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::ShowOptions;

    fn forest() -> ClassGraph {
        let mut graph = ClassGraph::new();
        let base = graph
            .upsert_class(ClassKind::Class, "Base", "public abstract", "Base.java", "", true)
            .unwrap();
        let leaf = graph
            .upsert_class(ClassKind::Class, "Leaf", "public", "Leaf.java", "", true)
            .unwrap();
        graph.link_parent(leaf, "Base", "Leaf.java", "");
        graph.add_interface(leaf, "Runnable", "Leaf.java", "");
        graph.upsert_class(ClassKind::Class, "Other", "public", "Other.java", "", true);
        assert_eq!(graph.find("Base"), &[base]);
        graph
    }

    #[test]
    fn test_single_document_header_and_edges() {
        let graph = forest();
        let dot = export_dot(&graph, &PresentOptions::default()).unwrap();
        assert!(dot.starts_with("digraph Class_Diagram {\n"));
        assert!(dot.contains("label=\"Class Diagram Class Hierarchy\";"));
        assert!(dot.contains("node [shape=box,style=filled,fillcolor=white];"));
        assert!(dot.contains("n0 [label=\"Base\", fillcolor=chartreuse];"));
        assert!(dot.contains("n1 [label=\"Leaf\"];"));
        assert!(dot.contains("n0 -> n1;"));
        assert!(dot.contains("n2 [label=\"Runnable\", fillcolor=yellow];"));
        assert!(dot.contains("n2 -> n1 [color=red,penwidth=3.0];"));
        assert!(dot.contains("n3 [label=\"Other\"];"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_split_per_root() {
        let graph = forest();
        let options = PresentOptions {
            split_by_tree: true,
            ..PresentOptions::default()
        };
        let docs = export_dot_split(&graph, &options).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].root, "Base");
        assert_eq!(docs[1].root, "Other");
        assert!(docs[1].content.contains("n3 [label=\"Other\"];"));
        assert!(!docs[1].content.contains("n0 "));
    }

    #[test]
    fn test_nodes_per_file_limit() {
        let graph = forest();
        let options = PresentOptions {
            nodes_per_file: 2,
            ..PresentOptions::default()
        };
        let docs = export_dot_split(&graph, &options).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_empty_graph_still_yields_document() {
        let graph = ClassGraph::new();
        let docs = export_dot_split(&graph, &PresentOptions::default()).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].content.ends_with("fillcolor=white];\n\n}\n"));
    }

    #[test]
    fn test_non_public_classes_are_outlined() {
        let mut graph = ClassGraph::new();
        graph.upsert_class(ClassKind::Class, "com.acme.Hidden", "", "Hidden.java", "", true);
        let options = PresentOptions {
            show: ShowOptions {
                show_all_classes: true,
                show_interfaces: false,
            },
            ..PresentOptions::default()
        };
        let dot = export_dot(&graph, &options).unwrap();
        assert!(dot.contains("n0 [label=\"com\\nacme\\nHidden\", color=red];"));
    }

    #[test]
    fn test_file_names_and_writing() {
        let doc = DotDocument {
            root: "Map<K,V>".to_string(),
            content: "digraph x {\n}\n".to_string(),
        };
        assert_eq!(doc.file_name(), "Map_K_V_.gv");

        let dir = tempfile::tempdir().unwrap();
        let paths = write_dot_files(&[doc], dir.path()).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(
            std::fs::read_to_string(&paths[0]).unwrap(),
            "digraph x {\n}\n"
        );
    }
}
