//! Implementation of the CodeParser trait for C++

use classtree::ClassGraph;
use classtree_parser_api::{
    CodeParser, FileInfo, ParserConfig, ParserError, ParserMetrics, ScannerRules, Statement,
};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::extractor;

/// C++ language parser implementing the CodeParser trait
pub struct CppParser {
    config: ParserConfig,
    metrics: Mutex<ParserMetrics>,
}

impl CppParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            metrics: Mutex::new(ParserMetrics::default()),
        }
    }

    fn update_metrics(&self, success: bool, duration: Duration, info: Option<&FileInfo>) {
        let mut metrics = self.metrics.lock().unwrap_or_else(|e| e.into_inner());
        let (statements, declarations) = info
            .map(|info| (info.statement_count, info.entity_count()))
            .unwrap_or_default();
        metrics.record(success, duration, statements, declarations);
    }
}

impl Default for CppParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeParser for CppParser {
    fn language(&self) -> &str {
        "cpp"
    }

    fn file_extensions(&self) -> &[&str] {
        &[".hpp", ".h", ".cpp"]
    }

    fn scanner_rules(&self) -> ScannerRules {
        ScannerRules::cpp().with_includes(self.config.import_mode())
    }

    fn classify(&self, statement: &str) -> Option<Statement> {
        extractor::classify(statement)
    }

    /// Includes hang under the including file's name.
    fn import_owner(&self, path: &Path) -> Option<String> {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    fn parse_file(&self, path: &Path, graph: &mut ClassGraph) -> Result<FileInfo, ParserError> {
        let start = Instant::now();
        let metadata =
            fs::metadata(path).map_err(|e| ParserError::IoError(path.to_path_buf(), e))?;

        if metadata.len() as usize > self.config.max_file_size {
            self.update_metrics(false, start.elapsed(), None);
            return Err(ParserError::FileTooLarge(
                path.to_path_buf(),
                metadata.len() as usize,
            ));
        }

        // Stray non-UTF-8 bytes only degrade the text around them
        let bytes = fs::read(path).map_err(|e| ParserError::IoError(path.to_path_buf(), e))?;
        let source = String::from_utf8_lossy(&bytes);
        let result = self.parse_source(&source, path, graph);

        self.update_metrics(result.is_ok(), start.elapsed(), result.as_ref().ok());
        result
    }

    fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn metrics(&self) -> ParserMetrics {
        self.metrics
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn reset_metrics(&mut self) {
        *self.metrics.lock().unwrap_or_else(|e| e.into_inner()) = ParserMetrics::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_owner_is_file_name() {
        let parser = CppParser::new();
        assert_eq!(
            parser.import_owner(Path::new("src/ui/widget.hpp")),
            Some("widget.hpp".to_string())
        );
    }

    #[test]
    fn test_scanner_keeps_includes_only_in_import_mode() {
        assert!(!CppParser::new().scanner_rules().keep_includes);
        let parser = CppParser::with_config(ParserConfig::default().with_import_depth(2));
        assert!(parser.scanner_rules().keep_includes);
        assert!(parser.scanner_rules().preprocessor);
    }
}
