//! Self-contained HTML page: a collapsible class tree and a class table.

use super::{base_path, relative, PresentOptions};
use crate::error::Result;
use crate::graph::{ClassGraph, ClassKind, ClassNode};
use crate::traversal::{Traversal, TreeVisitor, VisitContext};

const STYLE: &str = "<style>
body { font-family: sans-serif; font-size: 13px; }
ul.tree, ul.tree ul { list-style: none; padding-left: 1.2em; }
ul.tree summary { cursor: pointer; }
.interface { color: #b58900; }
.abstract { font-style: italic; }
.hidden { color: #c00; }
.meta, .generics { color: #777; }
table#classes { border-collapse: collapse; margin-top: 2em; }
table#classes th, table#classes td { padding: 4px 8px; border-bottom: 1px solid #ddd; text-align: left; }
</style>
";

/// Escape text for HTML element content and attribute values.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn css_class(node: &ClassNode) -> &'static str {
    if node.kind == ClassKind::Interface {
        "interface"
    } else if node.has_modifier("abstract") {
        "abstract"
    } else if !node.has_modifier("public") {
        "hidden"
    } else {
        "class"
    }
}

struct HtmlTree {
    output: String,
}

impl TreeVisitor for HtmlTree {
    fn visit(&mut self, graph: &ClassGraph, node: &ClassNode, _ctx: &VisitContext) {
        let mut label = format!(
            "<span class=\"{}\" title=\"{}\">{}</span>",
            css_class(node),
            escape_html(&node.file),
            escape_html(&node.name)
        );
        if !node.generics.is_empty() {
            label.push_str(&format!(
                " <span class=\"generics\">{}</span>",
                escape_html(&node.generics)
            ));
        }
        if !node.meta.is_empty() {
            label.push_str(&format!(
                " <span class=\"meta\">{}</span>",
                escape_html(&node.meta)
            ));
        }
        let interfaces: Vec<String> = node
            .interfaces
            .iter()
            .filter_map(|&id| graph.get_node(id).ok())
            .map(|iface| escape_html(&iface.name))
            .collect();
        if !interfaces.is_empty() {
            label.push_str(&format!(
                " <span class=\"interface\">implements {}</span>",
                interfaces.join(", ")
            ));
        }
        self.output.push_str(&format!(
            "<li><details open><summary>{label}</summary><ul>\n"
        ));
    }

    fn leave(&mut self, _graph: &ClassGraph, _node: &ClassNode, _ctx: &VisitContext) {
        self.output.push_str("</ul></details></li>\n");
    }
}

fn class_table(graph: &ClassGraph, options: &PresentOptions) -> String {
    let base = base_path(graph);
    let show_type = options.show.show_interfaces;
    let mut output = String::from("<table id=\"classes\">\n<thead><tr><th>Package</th>");
    if show_type {
        output.push_str("<th>Type</th>");
    }
    output.push_str("<th>Name</th><th>Modifiers</th><th>Filename</th></tr></thead>\n<tbody>\n");

    for node in graph.nodes().filter(|n| options.show.is_visible(n)) {
        let mut name = escape_html(&node.name);
        if node.name.len() > 20 {
            name = name.replace('.', ".<br>");
        }
        output.push_str(&format!("<tr><td>{}</td>", escape_html(&node.package)));
        if show_type {
            output.push_str(&format!("<td>{}</td>", node.kind));
        }
        output.push_str(&format!(
            "<td>{}</td><td>{}</td><td>{}</td></tr>\n",
            name,
            escape_html(&node.modifiers),
            escape_html(relative(&node.file, &base))
        ));
    }
    output.push_str("</tbody>\n</table>\n");
    output
}

/// Render the tree and, when `show_names` is set, the class table.
pub fn export_html(graph: &ClassGraph, options: &PresentOptions) -> Result<String> {
    let title = options.title(0, "Class List");
    let subtitle = options.title(1, "");
    let full_title = format!("{title} {subtitle}");

    let mut output = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str(&format!(
        "<title>{}</title>\n",
        escape_html(full_title.trim())
    ));
    output.push_str(STYLE);
    output.push_str("</head>\n<body>\n");
    output.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));

    if options.show_tree {
        let mut tree = HtmlTree {
            output: String::from("<ul class=\"tree\">\n"),
        };
        Traversal::new(graph, options.show).walk(&mut tree);
        output.push_str(&tree.output);
        output.push_str("</ul>\n");
    }
    if options.show_names {
        output.push_str(&class_table(graph, options));
    }

    output.push_str("</body>\n</html>\n");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::ShowOptions;

    fn sample() -> ClassGraph {
        let mut graph = ClassGraph::new();
        let list = graph
            .upsert_class(ClassKind::Class, "ArrayList", "public", "src/ArrayList.java", "java.util", true)
            .unwrap();
        graph.annotate(list, "<E>", "").unwrap();
        graph.link_parent(list, "AbstractList", "src/ArrayList.java", "java.util");
        graph.add_interface(list, "List", "src/ArrayList.java", "java.util");
        graph
    }

    #[test]
    fn test_tree_nests_and_escapes() {
        let graph = sample();
        let options = PresentOptions {
            show: ShowOptions {
                show_all_classes: true,
                show_interfaces: false,
            },
            ..PresentOptions::default()
        };
        let html = export_html(&graph, &options).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Class List</title>"));
        assert!(html.contains("AbstractList</span></summary><ul>"));
        assert!(html.contains("ArrayList</span> <span class=\"generics\">&lt;E&gt;</span>"));
        assert!(html.contains("implements List"));
        assert_eq!(
            html.matches("<details open>").count(),
            html.matches("</details>").count()
        );
    }

    #[test]
    fn test_table_lists_visible_nodes() {
        let graph = sample();
        let options = PresentOptions {
            show_names: true,
            show_tree: false,
            show: ShowOptions {
                show_all_classes: false,
                show_interfaces: true,
            },
            ..PresentOptions::default()
        };
        let html = export_html(&graph, &options).unwrap();
        assert!(html.contains("<th>Type</th>"));
        assert!(html.contains(
            "<tr><td>java.util</td><td>class</td><td>ArrayList</td><td>public</td><td>ArrayList.java</td></tr>"
        ));
        assert!(html.contains("<td>interface</td><td>List</td>"));
        assert!(!html.contains("<td>AbstractList</td>"));
        assert!(!html.contains("class=\"tree\""));
    }
}
