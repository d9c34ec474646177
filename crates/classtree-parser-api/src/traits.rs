use crate::mapper::StatementMapper;
use crate::scanner::{LogicalLineScanner, ScannerRules};
use crate::{config::ParserConfig, errors::ParserError, ir::Statement, metrics::ParserMetrics};
use classtree::{ClassGraph, NodeId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Information about a successfully parsed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Path to the source file
    pub file_path: PathBuf,

    /// Package of the last `package` statement, empty for C++
    pub package: String,

    /// Node IDs of all classes defined in this file
    pub classes: Vec<NodeId>,

    /// Node IDs of all interfaces defined in this file
    pub interfaces: Vec<NodeId>,

    /// Node IDs of import targets (import mode only)
    pub imports: Vec<NodeId>,

    /// Number of logical statements seen
    pub statement_count: usize,

    /// Time taken to parse this file
    #[serde(with = "duration_serde")]
    pub parse_time: Duration,

    /// Number of lines in the file
    pub line_count: usize,

    /// File size in bytes
    pub byte_count: usize,
}

// Helper module for serializing Duration
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis: u64 = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl FileInfo {
    /// Total number of declarations and imports recorded
    pub fn entity_count(&self) -> usize {
        self.classes.len() + self.interfaces.len() + self.imports.len()
    }
}

/// Aggregate information about a parsed project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Information about each successfully parsed file
    pub files: Vec<FileInfo>,

    /// Total number of classes across all files
    pub total_classes: usize,

    /// Total number of interfaces across all files
    pub total_interfaces: usize,

    /// Total parse time for all files
    #[serde(with = "duration_serde")]
    pub total_parse_time: Duration,

    /// Files that failed to parse (path, error message)
    pub failed_files: Vec<(PathBuf, String)>,
}

impl ProjectInfo {
    /// Total number of files processed (success + failure)
    pub fn total_files(&self) -> usize {
        self.files.len() + self.failed_files.len()
    }

    /// Record one parsed file.
    pub fn push(&mut self, info: FileInfo) {
        self.total_classes += info.classes.len();
        self.total_interfaces += info.interfaces.len();
        self.total_parse_time += info.parse_time;
        self.files.push(info);
    }

    /// Record one failed file.
    pub fn push_failure(&mut self, path: PathBuf, error: &ParserError) {
        self.failed_files.push((path, error.to_string()));
    }
}

/// Core trait that every dialect implements
///
/// A dialect supplies its scanner rules and a statement classifier. The
/// default `parse_source` runs the logical-line scanner, classifies each
/// statement and hands the result to a [`StatementMapper`].
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; the registry holding them is
/// shared by reference.
pub trait CodeParser: Send + Sync {
    /// Returns the language identifier (lowercase, e.g., "java", "cpp")
    fn language(&self) -> &str;

    /// Returns supported file extensions (e.g., [".java"])
    fn file_extensions(&self) -> &[&str];

    /// Scanner configuration for this dialect and the current mode
    fn scanner_rules(&self) -> ScannerRules;

    /// Recognize one normalized logical statement
    fn classify(&self, statement: &str) -> Option<Statement>;

    /// Node that imports from `path` hang under in import mode.
    ///
    /// `None` uses the file's package.
    fn import_owner(&self, _path: &Path) -> Option<String> {
        None
    }

    /// Parse a single file and insert declarations into the graph
    ///
    /// **Note on Metrics**: This method updates parser metrics.
    ///
    /// # Errors
    /// Returns `ParserError` if the file cannot be read, exceeds
    /// `max_file_size`, or stops on a missing package in import mode.
    fn parse_file(&self, path: &Path, graph: &mut ClassGraph) -> Result<FileInfo, ParserError>;

    /// Parse source text and insert declarations into the graph
    ///
    /// **Note on Metrics**: This method does NOT update parser metrics.
    fn parse_source(
        &self,
        source: &str,
        file_path: &Path,
        graph: &mut ClassGraph,
    ) -> Result<FileInfo, ParserError> {
        let start = Instant::now();
        let config = self.config();
        let mut scanner = LogicalLineScanner::new(self.scanner_rules());
        let mut mapper = StatementMapper::new(graph, config, file_path, self.import_owner(file_path));
        let mut statements = Vec::new();
        let mut line_count = 0;

        for line in source.lines() {
            line_count += 1;
            scanner.feed_line(line, &mut statements);
            for statement in statements.drain(..) {
                let decl = self.classify(&statement);
                mapper.apply(&statement, decl)?;
            }
        }
        if scanner.finish() {
            debug!("Discarded unterminated text at end of {}", file_path.display());
        }

        let mut info = mapper.finish();
        info.line_count = line_count;
        info.byte_count = source.len();
        info.parse_time = start.elapsed();
        Ok(info)
    }

    /// Parse multiple files sequentially
    fn parse_files(
        &self,
        paths: &[PathBuf],
        graph: &mut ClassGraph,
    ) -> Result<ProjectInfo, ParserError> {
        let mut project = ProjectInfo::default();
        for path in paths {
            match self.parse_file(path, graph) {
                Ok(info) => project.push(info),
                Err(e) => project.push_failure(path.clone(), &e),
            }
        }
        Ok(project)
    }

    /// Check if this parser can handle the given file
    ///
    /// Extensions compare case-insensitively.
    fn can_parse(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_str = format!(".{}", ext.to_string_lossy()).to_lowercase();
            self.file_extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(&ext_str))
        } else {
            false
        }
    }

    /// Get parser configuration
    fn config(&self) -> &ParserConfig;

    /// Get accumulated metrics
    fn metrics(&self) -> ParserMetrics;

    /// Reset metrics
    fn reset_metrics(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeDecl;
    use classtree::ClassKind;

    struct WordParser {
        config: ParserConfig,
    }

    impl CodeParser for WordParser {
        fn language(&self) -> &str {
            "word"
        }

        fn file_extensions(&self) -> &[&str] {
            &[".wd"]
        }

        fn scanner_rules(&self) -> ScannerRules {
            ScannerRules::java()
        }

        fn classify(&self, statement: &str) -> Option<Statement> {
            let name = statement.strip_prefix("class ")?.strip_suffix(" {")?;
            Some(Statement::Type(TypeDecl::new(ClassKind::Class, "class", name)))
        }

        fn parse_file(&self, path: &Path, graph: &mut ClassGraph) -> Result<FileInfo, ParserError> {
            let source = std::fs::read_to_string(path)
                .map_err(|e| ParserError::IoError(path.to_path_buf(), e))?;
            self.parse_source(&source, path, graph)
        }

        fn config(&self) -> &ParserConfig {
            &self.config
        }

        fn metrics(&self) -> ParserMetrics {
            ParserMetrics::default()
        }

        fn reset_metrics(&mut self) {}
    }

    fn parser() -> WordParser {
        WordParser {
            config: ParserConfig::default(),
        }
    }

    #[test]
    fn test_default_parse_source() {
        let mut graph = ClassGraph::new();
        let info = parser()
            .parse_source("class A {\n  class B {\n  }\n}\n", Path::new("a.wd"), &mut graph)
            .unwrap();
        assert_eq!(info.classes.len(), 2);
        assert_eq!(info.line_count, 4);
        assert_eq!(info.entity_count(), 2);
        assert_eq!(graph.find("A.B").len(), 1);
    }

    #[test]
    fn test_can_parse_ignores_case() {
        let parser = parser();
        assert!(parser.can_parse(Path::new("x/Y.wd")));
        assert!(parser.can_parse(Path::new("x/Y.WD")));
        assert!(!parser.can_parse(Path::new("x/Y.java")));
        assert!(!parser.can_parse(Path::new("Makefile")));
    }

    #[test]
    fn test_parse_files_collects_failures() {
        let mut graph = ClassGraph::new();
        let project = parser()
            .parse_files(&[PathBuf::from("/nonexistent/a.wd")], &mut graph)
            .unwrap();
        assert_eq!(project.total_files(), 1);
        assert_eq!(project.failed_files.len(), 1);
        assert!(project.files.is_empty());
    }
}
