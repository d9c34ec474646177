use serde::{Deserialize, Serialize};

/// Configuration for parser behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum file size to parse (in bytes)
    /// Files larger than this will be skipped
    pub max_file_size: usize,

    /// 0 parses class declarations. Any other value parses imports and
    /// includes instead, keeping that many leading dotted segments when
    /// positive or dropping that many trailing segments when negative.
    pub import_depth: i32,

    /// Log every extracted declaration at info level
    pub trace_declarations: bool,

    /// Log the full class list once scanning is done
    pub dump_class_list: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MB
            import_depth: 0,
            trace_declarations: false,
            dump_class_list: false,
        }
    }
}

impl ParserConfig {
    /// Whether imports are parsed instead of class declarations
    pub fn import_mode(&self) -> bool {
        self.import_depth != 0
    }

    /// Set the import depth (0 = class mode)
    pub fn with_import_depth(mut self, depth: i32) -> Self {
        self.import_depth = depth;
        self
    }

    /// Set maximum file size
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Enable per-declaration logging
    pub fn with_trace_declarations(mut self, trace: bool) -> Self {
        self.trace_declarations = trace;
        self
    }

    /// Enable the post-scan class list dump
    pub fn with_dump_class_list(mut self, dump: bool) -> Self {
        self.dump_class_list = dump;
        self
    }
}
