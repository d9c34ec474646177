//! Error types for class graph operations.
//!
//! Graph mutation never fails: ambiguities are logged, not returned. Errors
//! surface only from lookups, pattern compilation and export.

use thiserror::Error;

/// Result type alias for class graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for graph lookups, filters and exporters.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Node handle does not belong to this graph
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// Handle that was looked up
        node_id: usize,
    },

    /// A class or path filter could not be compiled
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The glob as given by the user
        pattern: String,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },

    /// Writing rendered output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GraphError {
    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }
}
