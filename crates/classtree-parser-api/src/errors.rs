use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during parsing
#[derive(Error, Debug)]
pub enum ParserError {
    /// Failed to read file
    #[error("IO error reading {0}: {1}")]
    IoError(PathBuf, #[source] std::io::Error),

    /// File too large
    #[error("File {0} exceeds maximum size ({1} bytes)")]
    FileTooLarge(PathBuf, usize),

    /// A path or class filter could not be compiled
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Import mode needs a package before the first import
    #[error("Missing valid package in {0} at '{1}'")]
    MissingPackage(PathBuf, String),

    /// Graph update error
    #[error("Failed to update graph: {0}")]
    GraphError(String),

    /// No parser handles this file
    #[error("Unsupported file {0}")]
    UnsupportedFile(PathBuf),
}

impl From<classtree::GraphError> for ParserError {
    fn from(err: classtree::GraphError) -> Self {
        match err {
            classtree::GraphError::InvalidPattern { .. } => {
                ParserError::InvalidPattern(err.to_string())
            }
            other => ParserError::GraphError(other.to_string()),
        }
    }
}

/// Result type for parser operations
pub type ParserResult<T> = Result<T, ParserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParserError::FileTooLarge(PathBuf::from("Big.java"), 42);
        assert_eq!(err.to_string(), "File Big.java exceeds maximum size (42 bytes)");

        let err = ParserError::MissingPackage(PathBuf::from("A.java"), "import x;".into());
        assert_eq!(err.to_string(), "Missing valid package in A.java at 'import x;'");
    }

    #[test]
    fn test_graph_error_conversion() {
        let err: ParserError = classtree::GraphError::NodeNotFound { node_id: 3 }.into();
        assert!(matches!(err, ParserError::GraphError(ref msg) if msg == "Node not found: 3"));
    }
}
