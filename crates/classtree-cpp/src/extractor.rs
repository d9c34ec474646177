//! C++ header grammar.
//!
//! Access labels are not statements on their own: `public:` arrives glued
//! to the statement that follows it and is stripped here.

use classtree::ClassKind;
use classtree_parser_api::split::{balanced_end, remove_template, split_depth_aware};
use classtree_parser_api::{ImportDecl, Statement, TypeDecl};
use log::trace;
use regex::Regex;
use std::sync::LazyLock;

static RE_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^#\s*include\s*[<"]([^>"]+)[>"]"#).unwrap());
static RE_NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:inline )?namespace ([A-Za-z_][A-Za-z0-9_:]*) ?\{$").unwrap()
});
static RE_FORWARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(class|struct) ([A-Za-z_][A-Za-z0-9_]*) ?;$").unwrap());
static RE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^((?:\[\[.*?\]\] ?)*)",
        r"((?:[a-z_]+ )*)",
        r"(class|struct) ",
        r"((?:\[\[.*?\]\] ?)*)",
        r"(?:([A-Z][A-Z0-9_]*|__declspec\(.*?\)|alignas\(.*?\)) )?",
        r"([A-Za-z_][A-Za-z0-9_]*)",
        r"( final)?",
        r"(?: ?: ?(.*?))? ?\{$",
    ))
    .unwrap()
});

const ACCESS_LABELS: [&str; 5] = ["public", "protected", "private", "signals", "Q_SIGNALS"];

/// Classify one logical C++ statement.
pub fn classify(statement: &str) -> Option<Statement> {
    if let Some(caps) = RE_INCLUDE.captures(statement) {
        return Some(Statement::Import(ImportDecl {
            target: caps[1].replace(['/', '\\'], "."),
            is_static: false,
        }));
    }

    let statement = strip_access_labels(statement);
    if let Some(caps) = RE_NAMESPACE.captures(statement) {
        return Some(Statement::Namespace(caps[1].to_string()));
    }

    let (generics, rest) = split_template(statement)?;
    if let Some(caps) = RE_FORWARD.captures(rest) {
        let mut decl = TypeDecl::new(ClassKind::Class, &caps[1], &caps[2]);
        decl.generics = generics.to_string();
        decl.has_body = false;
        return Some(Statement::Type(decl));
    }
    if !rest.ends_with('{') {
        return None;
    }
    parse_header(rest, generics).map(Statement::Type)
}

/// Drop leading `public:`, `protected slots:` and similar labels.
fn strip_access_labels(statement: &str) -> &str {
    let mut rest = statement;
    'labels: loop {
        for label in ACCESS_LABELS {
            let Some(after) = rest.strip_prefix(label) else {
                continue;
            };
            let after = after.trim_start();
            let after = after
                .strip_prefix("slots")
                .or_else(|| after.strip_prefix("Q_SLOTS"))
                .map_or(after, str::trim_start);
            if let Some(tail) = after.strip_prefix(':') {
                if !tail.starts_with(':') {
                    rest = tail.trim_start();
                    continue 'labels;
                }
            }
        }
        return rest;
    }
}

/// Split a leading `template <...>` off the statement.
///
/// Returns the parameter text without the `template` keyword.
fn split_template(statement: &str) -> Option<(&str, &str)> {
    let Some(after) = statement.strip_prefix("template") else {
        return Some(("", statement));
    };
    let after = after.trim_start();
    if !after.starts_with('<') {
        return Some(("", statement));
    }
    let end = balanced_end(after, 0, '<', '>')?;
    Some((&after[..end], after[end..].trim_start()))
}

fn parse_header(rest: &str, generics: &str) -> Option<TypeDecl> {
    let caps = RE_HEADER.captures(rest)?;
    let prefix = &caps[2];
    if prefix.split(' ').any(|word| word == "enum" || word == "friend") {
        return None;
    }

    let keyword = &caps[3];
    let mut name = caps[6].to_string();
    let mut export_macro = caps.get(5).map(|m| m.as_str().to_string());
    let mut is_final = caps.get(7).is_some();
    if name == "final" {
        // `class EXPORT final {`: the macro slot caught the name
        name = export_macro.take()?;
        is_final = true;
    }

    let bases = caps.get(8).map_or("", |m| m.as_str()).trim();
    if bases.starts_with(':') {
        trace!("Skipping out-of-line nested definition: {}", rest);
        return None;
    }

    let mut decl = TypeDecl::new(ClassKind::Class, keyword, &name);
    decl.generics = generics.to_string();

    let mut modifiers = vec!["public"];
    if keyword == "struct" {
        modifiers.push("struct");
    }
    if is_final {
        modifiers.push("final");
    }
    decl.modifiers = modifiers.join(" ");

    let meta: Vec<&str> = [caps[1].trim(), caps[4].trim()]
        .into_iter()
        .chain(export_macro.as_deref())
        .filter(|part| !part.is_empty())
        .collect();
    decl.meta = meta.join(" ");

    decl.parents = split_depth_aware(bases, ',')
        .into_iter()
        .map(base_name)
        .filter(|base| !base.is_empty())
        .collect();
    Some(decl)
}

/// Strip access and `virtual` keywords and template arguments from a base.
fn base_name(base: &str) -> String {
    let mut rest = base;
    loop {
        let stripped = ["virtual ", "public ", "protected ", "private "]
            .iter()
            .find_map(|word| rest.strip_prefix(word));
        match stripped {
            Some(tail) => rest = tail.trim_start(),
            None => break,
        }
    }
    remove_template(rest)
}
