//! Plain text output: a tab separated names table and an indented tree.

use super::{base_path, relative, Connectors, PresentOptions};
use crate::error::Result;
use crate::graph::{ClassGraph, ClassNode, NodeId};
use crate::traversal::{Traversal, TreeVisitor, VisitContext};
use std::collections::BTreeSet;
use std::fmt::Write;

const MIN_FILE_WIDTH: usize = 14;
const MIN_MODIFIER_WIDTH: usize = 6;

/// Names table, the tree, or both, as selected in `options`.
pub fn export_text(graph: &ClassGraph, options: &PresentOptions) -> Result<String> {
    let mut output = String::new();
    if options.show_names {
        output.push_str(&export_names(graph)?);
    }
    if options.show_tree {
        output.push_str(&export_tree(graph, options)?);
    }
    Ok(output)
}

fn first_name<'g>(graph: &'g ClassGraph, ids: &BTreeSet<NodeId>, empty: &'g str) -> &'g str {
    ids.iter()
        .next()
        .and_then(|&id| graph.get_node(id).ok())
        .map(|node| node.name.as_str())
        .unwrap_or(empty)
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

fn joined_names(graph: &ClassGraph, ids: &BTreeSet<NodeId>) -> String {
    ids.iter()
        .filter_map(|&id| graph.get_node(id).ok())
        .map(|node| node.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tab separated table of every node in insertion order.
pub fn export_names(graph: &ClassGraph) -> Result<String> {
    let mut output = String::from(
        "Type\tClassName\tGeneric\tModifiers\tFirstParent\tFirstChild\tInterfaces\tFile\tPackage\tMeta\n",
    );
    for node in graph.nodes() {
        // Writing into a String cannot fail
        let _ = writeln!(
            output,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            node.kind,
            node.name,
            node.generics,
            node.modifiers,
            first_name(graph, &node.parents, "_NoParent_"),
            first_name(graph, &node.children, "_NoChildren_"),
            joined_names(graph, &node.interfaces),
            or_placeholder(&node.file, "_NoFilename_"),
            or_placeholder(&node.package, "_NoPackage_"),
            node.meta,
        );
    }
    Ok(output)
}

struct TreeWriter {
    output: String,
    connectors: Connectors,
    base: String,
    file_width: usize,
    modifier_width: usize,
    // open[d]: the last rendered node at depth d has siblings still to come
    open: Vec<bool>,
}

impl TreeWriter {
    fn indent(&mut self, ctx: &VisitContext) -> String {
        self.open.truncate(ctx.depth);
        let mut indent = String::new();
        for level in 1..ctx.depth {
            let more = self.open.get(level).copied().unwrap_or(false);
            indent.push_str(if more {
                self.connectors.more
            } else {
                self.connectors.none
            });
        }
        if ctx.depth > 0 {
            indent.push_str(if ctx.is_last {
                self.connectors.just_me
            } else {
                self.connectors.more_and_me
            });
        }
        self.open.resize(ctx.depth, false);
        self.open.push(!ctx.is_last);
        indent
    }
}

impl TreeVisitor for TreeWriter {
    fn visit(&mut self, graph: &ClassGraph, node: &ClassNode, ctx: &VisitContext) {
        let indent = self.indent(ctx);
        let mut label = if ctx.depth == 0 {
            [node.name.as_str(), node.generics.as_str(), node.meta.as_str()]
                .iter()
                .filter(|part| !part.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            format!(" {}", node.name)
        };

        for &other in node.parents.iter().filter(|&&p| Some(p) != ctx.parent) {
            if let Ok(parent) = graph.get_node(other) {
                let _ = write!(label, "  ({})", parent.name);
            }
        }
        if !node.interfaces.is_empty() {
            let _ = write!(label, " Interfaces: {}", joined_names(graph, &node.interfaces));
        }

        let _ = writeln!(
            self.output,
            "{:>fw$}: {:<mw$} {}{}",
            relative(&node.file, &self.base),
            node.modifiers,
            indent,
            label,
            fw = self.file_width,
            mw = self.modifier_width,
        );
    }
}

/// Indented class tree below a `Base path=` header.
///
/// Each line shows the file relative to the base path, the modifiers and
/// the class name drawn with the connectors of `options.charset`. Extra
/// parents follow in parentheses and implemented interfaces at the end.
pub fn export_tree(graph: &ClassGraph, options: &PresentOptions) -> Result<String> {
    let base = base_path(graph);
    let file_width = graph
        .nodes()
        .map(|n| relative(&n.file, &base).chars().count())
        .fold(MIN_FILE_WIDTH, usize::max);
    let modifier_width = graph
        .nodes()
        .map(|n| n.modifiers.chars().count())
        .fold(MIN_MODIFIER_WIDTH, usize::max);

    let mut writer = TreeWriter {
        output: format!("Base path={}\n\nClass Tree\n", base),
        connectors: options.charset.connectors(),
        base,
        file_width,
        modifier_width,
        open: Vec::new(),
    };
    Traversal::new(graph, options.show).walk(&mut writer);
    Ok(writer.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::TreeCharset;
    use crate::graph::ClassKind;

    fn sample() -> ClassGraph {
        let mut graph = ClassGraph::new();
        let shape = graph
            .upsert_class(ClassKind::Class, "Shape", "public abstract", "src/Shape.java", "geo", true)
            .unwrap();
        let circle = graph
            .upsert_class(ClassKind::Class, "Circle", "public", "src/Circle.java", "geo", true)
            .unwrap();
        let square = graph
            .upsert_class(ClassKind::Class, "Square", "public", "src/Square.java", "geo", true)
            .unwrap();
        graph.link_parent(circle, "Shape", "src/Circle.java", "geo");
        graph.link_parent(square, "Shape", "src/Square.java", "geo");
        graph.add_interface(square, "Drawable", "src/Square.java", "geo");
        assert_eq!(graph.find("Shape"), &[shape]);
        graph
    }

    #[test]
    fn test_names_table_header_and_placeholders() {
        let graph = sample();
        let table = export_names(&graph).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[0],
            "Type\tClassName\tGeneric\tModifiers\tFirstParent\tFirstChild\tInterfaces\tFile\tPackage\tMeta"
        );
        assert_eq!(
            lines[1],
            "class\tShape\t\tpublic abstract\t_NoParent_\tCircle\t\tsrc/Shape.java\tgeo\t"
        );
        assert_eq!(
            lines[3],
            "class\tSquare\t\tpublic\tShape\t_NoChildren_\tDrawable\tsrc/Square.java\tgeo\t"
        );
        assert!(lines[4].starts_with("interface\tDrawable\t"));
        assert!(lines[4].contains("_NoParent_\t_NoChildren_"));
    }

    #[test]
    fn test_tree_graphics_connectors() {
        let graph = sample();
        let tree = export_tree(&graph, &PresentOptions::default()).unwrap();
        let lines: Vec<&str> = tree.lines().collect();
        assert_eq!(lines[0], "Base path=src/");
        assert_eq!(lines[2], "Class Tree");
        assert!(lines[3].ends_with("Shape"));
        assert!(lines[3].contains("public abstract"));
        assert!(lines[4].ends_with("  \u{2523} Circle"));
        assert!(lines[5].ends_with("  \u{2517} Square Interfaces: Drawable"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_tree_ascii_nested_indent() {
        let mut graph = sample();
        let circle = graph.find("Circle")[0];
        let ring = graph
            .upsert_class(ClassKind::Class, "Ring", "public", "src/Ring.java", "geo", true)
            .unwrap();
        graph.link_parent(ring, "Circle", "src/Ring.java", "geo");
        assert!(graph.get_node(circle).unwrap().children.contains(&ring));

        let options = PresentOptions {
            charset: TreeCharset::Ascii,
            ..PresentOptions::default()
        };
        let tree = export_tree(&graph, &options).unwrap();
        let lines: Vec<&str> = tree.lines().collect();
        assert!(lines[4].ends_with("   + Circle"));
        assert!(lines[5].ends_with("   |   - Ring"));
        assert!(lines[6].ends_with("   - Square Interfaces: Drawable"));
    }

    #[test]
    fn test_tree_lists_other_parents() {
        let mut graph = ClassGraph::new();
        let both = graph
            .upsert_class(ClassKind::Class, "Both", "public", "Both.java", "", true)
            .unwrap();
        graph.upsert_class(ClassKind::Class, "Left", "public", "Left.java", "", true);
        graph.link_parent(both, "Left", "Both.java", "");
        graph.link_parent(both, "Right", "Both.java", "");

        let tree = export_tree(&graph, &PresentOptions::default()).unwrap();
        assert!(tree.contains(" Both  (Right)"));
    }

    #[test]
    fn test_text_respects_toggles() {
        let graph = sample();
        let options = PresentOptions {
            show_names: true,
            show_tree: false,
            ..PresentOptions::default()
        };
        let text = export_text(&graph, &options).unwrap();
        assert!(text.starts_with("Type\t"));
        assert!(!text.contains("Class Tree"));
    }
}
