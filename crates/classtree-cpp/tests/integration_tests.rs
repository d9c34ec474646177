//! Integration tests for the C++ dialect

use classtree::{ClassGraph, ClassKind};
use classtree_cpp::CppParser;
use classtree_parser_api::{CodeParser, ParserConfig};
use std::io::Write;
use std::path::Path;

const WIDGETS: &str = include_str!("fixtures/widgets.hpp");

fn node_id(graph: &ClassGraph, name: &str) -> usize {
    let ids = graph.find(name);
    assert_eq!(ids.len(), 1, "expected exactly one node named {}", name);
    ids[0]
}

fn parse(source: &str, path: &str) -> ClassGraph {
    let parser = CppParser::new();
    let mut graph = ClassGraph::new();
    parser
        .parse_source(source, Path::new(path), &mut graph)
        .unwrap();
    graph
}

#[test]
fn test_parse_widgets_declarations() {
    let parser = CppParser::new();
    let mut graph = ClassGraph::new();
    let info = parser
        .parse_source(WIDGETS, Path::new("include/widgets.hpp"), &mut graph)
        .unwrap();

    // Object, Container, Widget, Widget.Geometry, Layout, Painter, Button
    assert_eq!(info.classes.len(), 7);
    assert!(info.interfaces.is_empty());

    let object = graph.get_node(node_id(&graph, "Object")).unwrap();
    assert_eq!(object.meta, "API_EXPORT");
    assert_eq!(object.package, "gfx");

    let container = graph.get_node(node_id(&graph, "Container")).unwrap();
    assert_eq!(container.generics, "<typename T,typename Alloc = std::allocator<T>>");

    let geometry = graph.get_node(node_id(&graph, "Widget.Geometry")).unwrap();
    assert_eq!(geometry.modifiers, "public struct");

    let layout = graph.get_node(node_id(&graph, "Layout")).unwrap();
    assert_eq!(layout.package, "gfx::detail");
    assert_eq!(layout.modifiers, "public struct final");
    assert_eq!(layout.meta, "[[nodiscard]]");

    let button = graph.get_node(node_id(&graph, "Button")).unwrap();
    assert_eq!(button.package, "");
    for node in graph.nodes() {
        assert_eq!(node.kind, ClassKind::Class);
    }
}

#[test]
fn test_parse_widgets_relationships() {
    let graph = parse(WIDGETS, "widgets.hpp");

    let object = node_id(&graph, "Object");
    let container = node_id(&graph, "Container");
    let widget = node_id(&graph, "Widget");
    let layout = node_id(&graph, "Layout");

    let widget_node = graph.get_node(widget).unwrap();
    assert!(widget_node.parents.contains(&object));
    assert!(widget_node.parents.contains(&container));
    assert!(graph.get_node(container).unwrap().parents.contains(&object));
    assert!(graph.get_node(layout).unwrap().parents.contains(&widget));

    // Qualified base names stay as written
    let qualified = node_id(&graph, "gfx::Widget");
    assert!(!graph.get_node(qualified).unwrap().is_definition);
    let painter = node_id(&graph, "Painter");
    let geometry = node_id(&graph, "Widget.Geometry");
    assert_eq!(graph.roots(), vec![painter, object, geometry, qualified]);
}

#[test]
fn test_preprocessor_comments_and_literals_are_ignored() {
    let graph = parse(WIDGETS, "widgets.hpp");
    assert!(graph.find("Commented").is_empty());
    assert!(graph.find("NotAClass").is_empty());
    assert!(graph.find("name").is_empty());
    assert!(graph.find("State").is_empty());
    assert!(graph.find("Widget.State").is_empty());
}

#[test]
fn test_forward_declaration_is_promoted() {
    let graph = parse(WIDGETS, "widgets.hpp");
    let painter = graph.get_node(node_id(&graph, "Painter")).unwrap();
    assert!(painter.is_definition);
    assert_eq!(painter.package, "gfx");
}

#[test]
fn test_import_mode_records_includes() {
    let parser = CppParser::with_config(ParserConfig::default().with_import_depth(1000));
    let mut graph = ClassGraph::new();
    let info = parser
        .parse_source(WIDGETS, Path::new("include/widgets.hpp"), &mut graph)
        .unwrap();

    assert_eq!(info.imports.len(), 3);
    assert!(info.classes.is_empty());

    let owner = node_id(&graph, "widgets.hpp");
    let children = &graph.get_node(owner).unwrap().children;
    for include in ["memory", "vector", "core.object.h"] {
        assert!(children.contains(&node_id(&graph, include)), "{}", include);
    }
    assert!(graph.find("Widget").is_empty());
}

#[test]
fn test_import_mode_truncates_include_paths() {
    let parser = CppParser::with_config(ParserConfig::default().with_import_depth(1));
    let mut graph = ClassGraph::new();
    parser
        .parse_source(
            "#include <boost/asio.hpp>\n#include <boost/beast.hpp>\n",
            Path::new("net.cpp"),
            &mut graph,
        )
        .unwrap();
    let owner = node_id(&graph, "net.cpp");
    let boost = node_id(&graph, "boost");
    assert_eq!(
        graph.get_node(owner).unwrap().children.iter().collect::<Vec<_>>(),
        vec![&boost]
    );
}

#[test]
fn test_parse_file_and_extensions() {
    let mut file = tempfile::Builder::new().suffix(".hpp").tempfile().unwrap();
    file.write_all(WIDGETS.as_bytes()).unwrap();

    let parser = CppParser::new();
    let mut graph = ClassGraph::new();
    let info = parser.parse_file(file.path(), &mut graph).unwrap();
    assert_eq!(info.classes.len(), 7);
    assert_eq!(parser.metrics().files_succeeded, 1);

    assert!(parser.can_parse(Path::new("a/b.H")));
    assert!(parser.can_parse(Path::new("a/b.cpp")));
    assert!(parser.can_parse(Path::new("a/b.HPP")));
    assert!(!parser.can_parse(Path::new("a/b.java")));
}

#[test]
fn test_parse_file_with_latin1_comment() {
    let mut file = tempfile::Builder::new().suffix(".hpp").tempfile().unwrap();
    file.write_all(b"// \xA9 Soci\xE9t\xE9\nnamespace gfx {\nclass Canvas : public Surface {\n};\n}\n")
        .unwrap();

    let parser = CppParser::new();
    let mut graph = ClassGraph::new();
    let info = parser.parse_file(file.path(), &mut graph).unwrap();
    assert_eq!(info.classes.len(), 1);

    let canvas = graph.get_node(node_id(&graph, "Canvas")).unwrap();
    assert!(canvas.is_definition);
    assert_eq!(canvas.package, "gfx");
    assert!(canvas.parents.contains(&node_id(&graph, "Surface")));
}
