//! Java header grammar.
//!
//! Statements arrive normalized from the scanner: whitespace collapsed,
//! comments and literal bodies removed, and `", "` folded to `","`.

use classtree::ClassKind;
use classtree_parser_api::split::{
    balanced_end, find_top_level, remove_template, split_depth_aware,
};
use classtree_parser_api::{ImportDecl, Statement, TypeDecl};
use log::trace;
use regex::Regex;
use std::sync::LazyLock;

static RE_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^package ([A-Za-z0-9_.$]+) ?;$").unwrap());
static RE_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^import (static )?([A-Za-z_$][A-Za-z0-9_$.]*(?:\.\*)?) ?;$").unwrap()
});
static RE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?:[a-z]+(?:-[a-z]+)? )*)(class|interface|@interface) ([A-Za-z_$][A-Za-z0-9_$]*)(.*?) ?\{$",
    )
    .unwrap()
});

/// Classify one logical Java statement.
pub fn classify(statement: &str) -> Option<Statement> {
    if let Some(caps) = RE_PACKAGE.captures(statement) {
        return Some(Statement::Package(caps[1].to_string()));
    }
    if let Some(caps) = RE_IMPORT.captures(statement) {
        return Some(Statement::Import(ImportDecl {
            target: caps[2].to_string(),
            is_static: caps.get(1).is_some(),
        }));
    }
    if !statement.ends_with('{') {
        return None;
    }
    parse_header(statement).map(Statement::Type)
}

fn parse_header(statement: &str) -> Option<TypeDecl> {
    let (meta, rest) = peel_annotations(statement)?;
    let caps = RE_HEADER.captures(rest)?;

    let keyword = &caps[2];
    let mut decl = TypeDecl::new(ClassKind::from_keyword(keyword), keyword, &caps[3]);
    decl.modifiers = caps[1].trim().to_string();
    decl.meta = meta;

    if parse_tail(caps[4].trim(), &mut decl).is_none() {
        trace!("Unrecognized {} header tail: {}", keyword, statement);
        return None;
    }
    Some(decl)
}

/// Split leading `@Name` and `@Name(args)` annotations from the header.
fn peel_annotations(statement: &str) -> Option<(String, &str)> {
    let mut meta = Vec::new();
    let mut rest = statement;
    while rest.starts_with('@') && !rest.starts_with("@interface ") {
        let name_end = rest[1..]
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.' || c == '$'))
            .map_or(rest.len(), |i| i + 1);
        let end = if rest[name_end..].starts_with('(') {
            balanced_end(rest, name_end, '(', ')')?
        } else {
            name_end
        };
        meta.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    Some((meta.join(" "), rest))
}

/// Fill generics, parents and interfaces from the text after the name.
fn parse_tail(tail: &str, decl: &mut TypeDecl) -> Option<()> {
    let mut rest = tail;
    if rest.starts_with('<') {
        let end = balanced_end(rest, 0, '<', '>')?;
        decl.generics = rest[..end].to_string();
        rest = rest[end..].trim_start();
    }
    if let Some(at) = find_top_level(rest, "permits") {
        rest = rest[..at].trim_end();
    }
    if let Some(at) = find_top_level(rest, "implements") {
        decl.interfaces = names(&rest[at + "implements".len()..]);
        rest = rest[..at].trim_end();
    }
    if let Some(parents) = rest.strip_prefix("extends ") {
        decl.parents = names(parents);
    } else if !rest.is_empty() {
        return None;
    }
    Some(())
}

fn names(list: &str) -> Vec<String> {
    split_depth_aware(list, ',')
        .into_iter()
        .map(remove_template)
        .filter(|name| !name.is_empty())
        .collect()
}
