//! Logical-line scanner.
//!
//! Turns physical source lines into logical statements. A statement ends at
//! a `;`, `{` or `}` found outside comments and literals. Comments are
//! dropped, string and character literals keep only their quotes, and
//! statements spanning several lines are joined with a single space.
//!
//! The scanner is resumable: feed it one line at a time and it carries open
//! comments, literals and partial statements over to the next call.

use log::trace;

/// Dialect switches for the scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScannerRules {
    /// Copy `@Name(...)` argument lists verbatim, terminators included
    pub annotations: bool,
    /// Drop lines starting with `#`, including `\` continuations
    pub preprocessor: bool,
    /// Emit `#include` lines as statements instead of dropping them
    pub keep_includes: bool,
}

impl ScannerRules {
    /// Java: annotations, no preprocessor.
    pub fn java() -> Self {
        Self {
            annotations: true,
            ..Self::default()
        }
    }

    /// C and C++: preprocessor lines are dropped.
    pub fn cpp() -> Self {
        Self {
            preprocessor: true,
            ..Self::default()
        }
    }

    /// Keep or drop `#include` lines.
    pub fn with_includes(mut self, keep: bool) -> Self {
        self.keep_includes = keep;
        self
    }
}

/// Scanner state between characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Plain source text
    Code,
    /// Inside `'...'`
    InSingleQuote,
    /// Inside `"..."`
    InDoubleQuote,
    /// Inside `/* ... */`
    InBlockComment,
    /// After `//` until the end of the physical line
    LineCommentSkip,
    /// Inside the argument list of an annotation call
    InAnnotationArgs,
    /// A statement was just emitted
    StatementComplete,
}

/// Resumable statement scanner.
#[derive(Debug, Clone)]
pub struct LogicalLineScanner {
    rules: ScannerRules,
    state: ScanState,
    // State to return to when a comment ends
    resume: ScanState,
    pending: String,
    escaped: bool,
    // Reading the name right after an `@`
    annotation_name: bool,
    paren_depth: usize,
    args_quote: Option<char>,
    directive_continues: bool,
}

impl LogicalLineScanner {
    /// Create a scanner at the start of a file.
    pub fn new(rules: ScannerRules) -> Self {
        Self {
            rules,
            state: ScanState::Code,
            resume: ScanState::Code,
            pending: String::new(),
            escaped: false,
            annotation_name: false,
            paren_depth: 0,
            args_quote: None,
            directive_continues: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Text accumulated for the statement in progress.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    fn at_code(&self) -> bool {
        matches!(self.state, ScanState::Code | ScanState::StatementComplete)
    }

    /// Scan one physical line (without its line terminator), appending
    /// every completed statement to `out`.
    pub fn feed_line(&mut self, line: &str, out: &mut Vec<String>) {
        if self.rules.preprocessor && self.at_code() && self.skip_directive(line, out) {
            return;
        }

        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if self.state == ScanState::StatementComplete {
                self.state = ScanState::Code;
            }
            match self.state {
                ScanState::Code => {
                    if self.annotation_name && !(c.is_alphanumeric() || c == '_' || c == '.') {
                        self.annotation_name = false;
                        if c == '(' {
                            self.pending.push(c);
                            self.paren_depth = 1;
                            self.args_quote = None;
                            self.state = ScanState::InAnnotationArgs;
                            continue;
                        }
                    }
                    match c {
                        '/' if chars.peek() == Some(&'/') => {
                            self.resume = ScanState::Code;
                            self.state = ScanState::LineCommentSkip;
                            break;
                        }
                        '/' if chars.peek() == Some(&'*') => {
                            chars.next();
                            self.pending.push(' ');
                            self.resume = ScanState::Code;
                            self.state = ScanState::InBlockComment;
                        }
                        '"' => {
                            self.pending.push(c);
                            self.escaped = false;
                            self.state = ScanState::InDoubleQuote;
                        }
                        '\'' => {
                            self.pending.push(c);
                            self.escaped = false;
                            self.state = ScanState::InSingleQuote;
                        }
                        '@' if self.rules.annotations => {
                            self.pending.push(c);
                            self.annotation_name = true;
                        }
                        ';' | '{' | '}' => {
                            self.pending.push(c);
                            self.emit(out);
                        }
                        _ => self.pending.push(c),
                    }
                }
                ScanState::InSingleQuote | ScanState::InDoubleQuote => {
                    let quote = if self.state == ScanState::InSingleQuote {
                        '\''
                    } else {
                        '"'
                    };
                    if self.escaped {
                        self.escaped = false;
                    } else if c == '\\' {
                        self.escaped = true;
                    } else if c == quote {
                        self.pending.push(c);
                        self.state = ScanState::Code;
                    }
                }
                ScanState::InBlockComment => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        self.pending.push(' ');
                        self.state = self.resume;
                    }
                }
                ScanState::InAnnotationArgs => {
                    // Comments between arguments are dropped, not copied
                    if self.args_quote.is_none() && c == '/' {
                        match chars.peek() {
                            Some('/') => {
                                self.resume = ScanState::InAnnotationArgs;
                                self.state = ScanState::LineCommentSkip;
                                break;
                            }
                            Some('*') => {
                                chars.next();
                                self.pending.push(' ');
                                self.resume = ScanState::InAnnotationArgs;
                                self.state = ScanState::InBlockComment;
                                continue;
                            }
                            _ => {}
                        }
                    }
                    self.pending.push(c);
                    self.annotation_argument(c);
                }
                ScanState::LineCommentSkip | ScanState::StatementComplete => {}
            }
        }

        if self.state == ScanState::LineCommentSkip {
            self.state = self.resume;
        }
        // Names do not continue across lines
        self.annotation_name = false;
        if !self.pending.is_empty() && !self.pending.ends_with(' ') {
            self.pending.push(' ');
        }
    }

    fn annotation_argument(&mut self, c: char) {
        if let Some(quote) = self.args_quote {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == quote {
                self.args_quote = None;
            }
            return;
        }
        match c {
            '"' | '\'' => {
                self.args_quote = Some(c);
                self.escaped = false;
            }
            '(' => self.paren_depth += 1,
            ')' => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                if self.paren_depth == 0 {
                    self.state = ScanState::Code;
                }
            }
            _ => {}
        }
    }

    /// Handle a preprocessor line. Returns true when the line was consumed.
    fn skip_directive(&mut self, line: &str, out: &mut Vec<String>) -> bool {
        let trimmed = line.trim();
        if self.directive_continues {
            self.directive_continues = trimmed.ends_with('\\');
            return true;
        }
        let Some(directive) = trimmed.strip_prefix('#') else {
            return false;
        };
        self.directive_continues = trimmed.ends_with('\\');
        if self.rules.keep_includes && directive.trim_start().starts_with("include") {
            out.push(normalize_statement(trimmed));
        }
        true
    }

    fn emit(&mut self, out: &mut Vec<String>) {
        let statement = normalize_statement(&self.pending);
        trace!("statement: {}", statement);
        out.push(statement);
        self.pending.clear();
        self.state = ScanState::StatementComplete;
    }

    /// End of input. An unterminated statement, literal or comment is
    /// discarded. Returns true when something was discarded.
    pub fn finish(&mut self) -> bool {
        let dangling = !self.pending.trim().is_empty()
            || !matches!(self.state, ScanState::Code | ScanState::StatementComplete);
        if dangling {
            trace!("discarding unterminated input in state {:?}", self.state);
        }
        *self = Self::new(self.rules);
        dangling
    }
}

/// Collapse whitespace runs to one space, trim, and turn `", "` into `","`.
pub fn normalize_statement(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(", ", ",")
}

/// Scan a whole source text.
pub fn scan_str(rules: ScannerRules, source: &str) -> Vec<String> {
    let mut scanner = LogicalLineScanner::new(rules);
    let mut statements = Vec::new();
    for line in source.lines() {
        scanner.feed_line(line, &mut statements);
    }
    scanner.finish();
    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn java(source: &str) -> Vec<String> {
        scan_str(ScannerRules::java(), source)
    }

    fn cpp(source: &str) -> Vec<String> {
        scan_str(ScannerRules::cpp(), source)
    }

    #[test]
    fn test_statements_end_at_terminators() {
        assert_eq!(
            java("package a.b; class Foo { int x; }"),
            vec!["package a.b;", "class Foo {", "int x;", "}"]
        );
    }

    #[test]
    fn test_multi_line_statement_is_joined() {
        let source = "public class Foo\n    extends Bar\n    implements Baz, Qux {\n}";
        assert_eq!(
            java(source),
            vec!["public class Foo extends Bar implements Baz,Qux {", "}"]
        );
    }

    #[test]
    fn test_comments_between_tokens() {
        let source = "public /* kind */ class Foo // trailing ; {\n extends/*x*/Bar {";
        assert_eq!(java(source), vec!["public class Foo extends Bar {"]);
    }

    #[test]
    fn test_block_comment_hides_quotes_and_terminators() {
        let source = "/* it's \"quoted\" ; { } \n still comment */ class A {";
        assert_eq!(java(source), vec!["class A {"]);
    }

    #[test]
    fn test_literal_bodies_are_elided() {
        let source = r#"String s = "a;b{c}\"d"; char c = '\''; char d = '{';"#;
        assert_eq!(
            java(source),
            vec![r#"String s = "";"#, "char c = '';", "char d = '';"]
        );
    }

    #[test]
    fn test_escaped_backslash_closes_literal() {
        let source = r#"String s = "\\"; class A {"#;
        assert_eq!(java(source), vec![r#"String s = "";"#, "class A {"]);
    }

    #[test]
    fn test_annotation_arguments_are_kept() {
        let source = "@Config(value = \"a;b\", nested = @Inner(x = {1, 2}))\npublic class Foo {";
        assert_eq!(
            java(source),
            vec![r#"@Config(value = "a;b",nested = @Inner(x = {1,2})) public class Foo {"#]
        );
    }

    #[test]
    fn test_block_comment_inside_annotation_arguments() {
        let source = "@SuppressWarnings(\"x\" /* don't (open */)\npublic class Foo extends Bar {\n}\npublic class Baz extends Qux {\n}";
        assert_eq!(
            java(source),
            vec![
                r#"@SuppressWarnings("x" ) public class Foo extends Bar {"#,
                "}",
                "public class Baz extends Qux {",
                "}",
            ]
        );
    }

    #[test]
    fn test_line_comment_inside_annotation_arguments() {
        let mut scanner = LogicalLineScanner::new(ScannerRules::java());
        let mut out = Vec::new();
        scanner.feed_line("@Config(a = 1, // see (x, it's", &mut out);
        assert_eq!(scanner.state(), ScanState::InAnnotationArgs);
        scanner.feed_line("    b = 2)", &mut out);
        assert_eq!(scanner.state(), ScanState::Code);
        scanner.feed_line("public class Foo extends Bar {", &mut out);
        assert_eq!(
            out,
            vec!["@Config(a = 1,b = 2) public class Foo extends Bar {"]
        );
    }

    #[test]
    fn test_comment_markers_inside_annotation_strings_are_text() {
        assert_eq!(
            java("@Doc(url = \"http://x/*y\") class A {"),
            vec![r#"@Doc(url = "http://x/*y") class A {"#]
        );
    }

    #[test]
    fn test_annotation_without_arguments() {
        assert_eq!(
            java("@Deprecated public class Old {"),
            vec!["@Deprecated public class Old {"]
        );
    }

    #[test]
    fn test_cpp_has_no_annotation_state() {
        // `@` is not special outside Java, so the braces terminate
        assert_eq!(cpp("x = @y({ 1 });"), vec!["x = @y({", "1 }", ");"]);
    }

    #[test]
    fn test_preprocessor_lines_are_dropped() {
        let source = "#include <vector>\n#define X(a) \\\n   a; {\nclass A : public B {";
        assert_eq!(cpp(source), vec!["class A : public B {"]);
    }

    #[test]
    fn test_includes_kept_on_request() {
        let rules = ScannerRules::cpp().with_includes(true);
        let source = "#include <a/b.h>\n#  include \"c.h\"\n#pragma once\nclass A {";
        assert_eq!(
            scan_str(rules, source),
            vec!["#include <a/b.h>", "# include \"c.h\"", "class A {"]
        );
    }

    #[test]
    fn test_hash_inside_block_comment_is_not_a_directive() {
        let source = "/*\n#include <x>\n*/ class A {";
        assert_eq!(cpp(source), vec!["class A {"]);
    }

    #[test]
    fn test_resumable_across_calls() {
        let mut scanner = LogicalLineScanner::new(ScannerRules::java());
        let mut out = Vec::new();
        scanner.feed_line("class Foo /* open", &mut out);
        assert!(out.is_empty());
        assert_eq!(scanner.state(), ScanState::InBlockComment);
        scanner.feed_line("close */ extends Bar", &mut out);
        assert!(out.is_empty());
        scanner.feed_line("{", &mut out);
        assert_eq!(out, vec!["class Foo extends Bar {"]);
        assert_eq!(scanner.state(), ScanState::StatementComplete);
    }

    #[test]
    fn test_unterminated_input_is_discarded() {
        assert_eq!(java("class A { \"open string ; }"), vec!["class A {"]);
        assert_eq!(java("class A {\n/* never closed ; {"), vec!["class A {"]);

        let mut scanner = LogicalLineScanner::new(ScannerRules::java());
        let mut out = Vec::new();
        scanner.feed_line("int dangling", &mut out);
        assert!(scanner.finish());
        assert!(!scanner.finish());
    }

    #[test]
    fn test_normalize_statement() {
        assert_eq!(
            normalize_statement("  class\tFoo<K,  V>  implements A ,  B, C {  "),
            "class Foo<K,V> implements A ,B,C {"
        );
    }
}
