//! Helpers shared by the dialect header grammars.
//!
//! Generic and template arguments are treated as opaque: commas and
//! keywords inside `<...>` never split a list.

/// Split `text` at `delimiter`, ignoring delimiters nested inside `<...>`.
///
/// Parts are trimmed and empty parts dropped.
pub fn split_depth_aware(text: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if c == delimiter && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Remove everything from the first `<` to the last `>`.
///
/// `Foo<Bar<Car>>` becomes `Foo`. Text without a closing `>` after the
/// first `<` is returned unchanged.
pub fn remove_template(name: &str) -> String {
    match (name.find('<'), name.rfind('>')) {
        (Some(open), Some(close)) if open < close => {
            let mut result = String::with_capacity(name.len());
            result.push_str(&name[..open]);
            result.push_str(&name[close + 1..]);
            result.trim().to_string()
        }
        _ => name.trim().to_string(),
    }
}

/// Byte offset just past the bracket matching the one at `open_at`.
///
/// Quoted text inside the brackets is skipped. Returns `None` when the
/// brackets are unbalanced.
pub fn balanced_end(text: &str, open_at: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text[open_at..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(open_at + i + c.len_utf8());
            }
        }
    }
    None
}

/// Byte offset of `word` as a whole space delimited word outside `<...>`.
pub fn find_top_level(text: &str, word: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 && text[i..].starts_with(word) => {
                let before_ok = i == 0 || text[..i].ends_with(' ');
                let after = &text[i + word.len()..];
                if before_ok && (after.is_empty() || after.starts_with(' ')) {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Truncate a dotted name to a number of segments.
///
/// `depth > 0` keeps that many leading segments, `depth < 0` drops that
/// many trailing segments, `0` keeps the name. Returns `None` when nothing
/// remains.
pub fn truncate_segments(name: &str, depth: i32) -> Option<String> {
    let segments: Vec<&str> = name.split('.').collect();
    let keep = match depth {
        0 => segments.len(),
        d if d > 0 => segments.len().min(d as usize),
        d => segments.len().checked_sub(d.unsigned_abs() as usize)?,
    };
    let truncated = segments[..keep].join(".");
    if truncated.is_empty() {
        None
    } else {
        Some(truncated)
    }
}
