//! Renderers for a populated class graph.
//!
//! Every renderer that draws a hierarchy drives the shared
//! [`Traversal`](crate::traversal::Traversal), so visibility and cycle
//! handling are identical across formats:
//! - **Text**: names table (TSV) and indented class tree
//! - **DOT**: Graphviz digraph, optionally split per root
//! - **HTML**: collapsible tree plus class table
//! - **JSON**: nodes and links for web tooling

pub mod dot;
pub mod html;
pub mod json;
pub mod text;

pub use dot::{export_dot, export_dot_split, write_dot_files, DotDocument};
pub use html::export_html;
pub use json::export_json;
pub use text::{export_names, export_text, export_tree};

use crate::graph::ClassGraph;
use crate::traversal::ShowOptions;

/// Characters used to draw tree connectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeCharset {
    /// Box drawing characters
    #[default]
    Graphics,
    /// Plain `|`, `+` and `-`
    Ascii,
    /// Indentation only
    Spaces,
}

/// Connector strings for one charset.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Connectors {
    pub none: &'static str,
    pub more: &'static str,
    pub more_and_me: &'static str,
    pub just_me: &'static str,
}

impl TreeCharset {
    pub(crate) fn connectors(self) -> Connectors {
        match self {
            TreeCharset::Graphics => Connectors {
                none: "    ",
                more: "  \u{2503}",
                more_and_me: "  \u{2523}",
                just_me: "  \u{2517}",
            },
            TreeCharset::Ascii => Connectors {
                none: "    ",
                more: "   |",
                more_and_me: "   +",
                just_me: "   -",
            },
            TreeCharset::Spaces => Connectors {
                none: "    ",
                more: "    ",
                more_and_me: "    ",
                just_me: "    ",
            },
        }
    }
}

/// Presentation settings shared by all renderers.
#[derive(Debug, Clone)]
pub struct PresentOptions {
    /// Visibility rules for the traversal
    pub show: ShowOptions,
    /// Emit the names table
    pub show_names: bool,
    /// Emit the class tree
    pub show_tree: bool,
    /// Tree connector style
    pub charset: TreeCharset,
    /// Titles, the first one names DOT graphs and HTML pages
    pub titles: Vec<String>,
    /// Start a new DOT document for every root
    pub split_by_tree: bool,
    /// Start a new DOT document once this many nodes were written, 0 for no limit
    pub nodes_per_file: usize,
}

impl Default for PresentOptions {
    fn default() -> Self {
        Self {
            show: ShowOptions::default(),
            show_names: false,
            show_tree: true,
            charset: TreeCharset::default(),
            titles: Vec::new(),
            split_by_tree: false,
            nodes_per_file: 0,
        }
    }
}

impl PresentOptions {
    /// Title at `index`, or `fallback` when not given.
    pub fn title<'a>(&'a self, index: usize, fallback: &'a str) -> &'a str {
        self.titles.get(index).map(String::as_str).unwrap_or(fallback)
    }
}

/// Longest directory prefix shared by every non-empty node file.
///
/// The result ends with a path separator, or is empty when the files share
/// no directory.
pub fn base_path(graph: &ClassGraph) -> String {
    let mut common: Option<&str> = None;
    for node in graph.nodes().filter(|n| !n.file.is_empty()) {
        common = Some(match common {
            None => node.file.as_str(),
            Some(prefix) => {
                let len = prefix
                    .char_indices()
                    .zip(node.file.chars())
                    .find(|((_, a), b)| a != b)
                    .map(|((i, _), _)| i)
                    .unwrap_or_else(|| prefix.len().min(node.file.len()));
                &prefix[..len]
            }
        });
    }
    let common = common.unwrap_or_default();
    match common.rfind(['/', '\\']) {
        Some(i) => common[..=i].to_string(),
        None => String::new(),
    }
}

/// `file` with the `base` prefix removed.
pub(crate) fn relative<'a>(file: &'a str, base: &str) -> &'a str {
    file.strip_prefix(base).unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ClassKind;

    #[test]
    fn test_base_path_common_directory() {
        let mut graph = ClassGraph::new();
        graph.upsert_class(ClassKind::Class, "A", "", "src/com/acme/A.java", "", true);
        graph.upsert_class(ClassKind::Class, "B", "", "src/com/acme/util/B.java", "", true);
        graph.upsert_class(ClassKind::Class, "C", "", "", "", false);
        assert_eq!(base_path(&graph), "src/com/acme/");
        assert_eq!(relative("src/com/acme/util/B.java", "src/com/acme/"), "util/B.java");
    }

    #[test]
    fn test_base_path_partial_name_is_cut_to_directory() {
        let mut graph = ClassGraph::new();
        graph.upsert_class(ClassKind::Class, "A", "", "src/Alpha.java", "", true);
        graph.upsert_class(ClassKind::Class, "B", "", "src/Alps.java", "", true);
        assert_eq!(base_path(&graph), "src/");
    }

    #[test]
    fn test_base_path_empty_graph() {
        assert_eq!(base_path(&ClassGraph::new()), "");
    }

    #[test]
    fn test_title_fallback() {
        let options = PresentOptions {
            titles: vec!["Widgets".to_string()],
            ..PresentOptions::default()
        };
        assert_eq!(options.title(0, "Class Diagram"), "Widgets");
        assert_eq!(options.title(1, ""), "");
    }
}
