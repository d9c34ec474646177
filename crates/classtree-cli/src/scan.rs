//! Directory walking and dialect selection.

use classtree::{ClassGraph, PatternList};
use classtree_cpp::CppParser;
use classtree_java::JavaParser;
use classtree_parser_api::{CodeParser, ParserConfig, ParserError, ParserMetrics, ProjectInfo};
use log::{debug, error, info, trace, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Files handed to a dialect parser and read
    pub files_read: usize,
    /// Distinct class names in the graph after the scan
    pub class_count: usize,
    /// Per-file details and failures
    pub project: ProjectInfo,
}

/// Walks source trees and feeds matching files to the dialect parsers.
pub struct ProjectScanner {
    config: ParserConfig,
    parsers: Vec<Box<dyn CodeParser>>,
    ignore_paths: PatternList,
}

impl ProjectScanner {
    /// Scanner with the Java and C++ dialects.
    pub fn new(config: ParserConfig) -> Self {
        let parsers: Vec<Box<dyn CodeParser>> = vec![
            Box::new(JavaParser::with_config(config.clone())),
            Box::new(CppParser::with_config(config.clone())),
        ];
        Self {
            config,
            parsers,
            ignore_paths: PatternList::default(),
        }
    }

    /// Skip files and directories whose full path matches one of `patterns`.
    pub fn with_ignore_paths(mut self, patterns: PatternList) -> Self {
        self.ignore_paths = patterns;
        self
    }

    /// Dialect parser for `path`, chosen by extension.
    pub fn parser_for(&self, path: &Path) -> Option<&dyn CodeParser> {
        self.parsers
            .iter()
            .find(|parser| parser.can_parse(path))
            .map(|parser| parser.as_ref())
    }

    /// Metrics of all dialects merged.
    pub fn metrics(&self) -> ParserMetrics {
        let mut merged = ParserMetrics::default();
        for parser in &self.parsers {
            merged.merge(&parser.metrics());
        }
        merged
    }

    /// Scan one file or directory tree into `graph`.
    pub fn scan(&self, root: &Path, graph: &mut ClassGraph) -> ScanSummary {
        self.scan_paths(&[root.to_path_buf()], graph)
    }

    /// Scan several files or directory trees into `graph`, in order.
    ///
    /// Directories are walked depth first with entries sorted by name.
    /// Unreadable entries are logged and skipped.
    pub fn scan_paths(&self, roots: &[PathBuf], graph: &mut ClassGraph) -> ScanSummary {
        let mut summary = ScanSummary::default();

        for root in roots {
            info!("Scanning {}", root.display());
            if root.is_file() && self.parser_for(root).is_none() {
                warn!("{}", ParserError::UnsupportedFile(root.clone()));
                continue;
            }
            let walker = WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !self.is_ignored(entry.path()));

            for entry in walker {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file() {
                            self.scan_file(entry.path(), graph, &mut summary);
                        }
                    }
                    Err(e) => error!("Cannot read {}: {}", root.display(), e),
                }
            }
        }

        summary.class_count = graph.name_count();
        if self.config.dump_class_list {
            dump_class_list(graph);
        }
        summary
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.ignore_paths.is_empty() {
            return false;
        }
        let ignored = self.ignore_paths.matches(&path.to_string_lossy());
        if ignored {
            info!("Ignoring path: {}", path.display());
        }
        ignored
    }

    fn scan_file(&self, path: &Path, graph: &mut ClassGraph, summary: &mut ScanSummary) {
        let Some(parser) = self.parser_for(path) else {
            trace!("No dialect for {}", path.display());
            return;
        };

        debug!("Parsing {} as {}", path.display(), parser.language());
        match parser.parse_file(path, graph) {
            Ok(info) => {
                summary.files_read += 1;
                summary.project.push(info);
            }
            Err(e @ ParserError::MissingPackage(..)) => {
                summary.files_read += 1;
                warn!("{}", e);
                summary.project.push_failure(path.to_path_buf(), &e);
            }
            Err(e) => {
                error!("{}", e);
                summary.project.push_failure(path.to_path_buf(), &e);
            }
        }
    }
}

fn dump_class_list(graph: &ClassGraph) {
    for node in graph.nodes() {
        info!(
            "{} {} [{}] file={} package={} defined={} parents={} children={}",
            node.kind,
            node.name,
            node.modifiers,
            node.file,
            node.package,
            node.is_definition,
            node.parents.len(),
            node.children.len()
        );
    }
}
