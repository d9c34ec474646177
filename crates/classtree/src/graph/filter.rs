//! Glob style name filters.
//!
//! A pattern is a glob where `*` matches any run of characters and every
//! other character is literal. Patterns must match the whole candidate.

use crate::error::{GraphError, Result};
use regex::Regex;

/// An ordered list of compiled glob patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    globs: Vec<String>,
    compiled: Vec<Regex>,
}

impl PatternList {
    /// Create an empty list. An empty list matches nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every glob in `globs`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidPattern`] for the first glob that does
    /// not compile.
    pub fn from_globs<I, S>(globs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for glob in globs {
            list.push_glob(glob.as_ref())?;
        }
        Ok(list)
    }

    /// Append one glob.
    pub fn push_glob(&mut self, glob: &str) -> Result<()> {
        let body = glob
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let compiled =
            Regex::new(&format!("^(?:{body})$")).map_err(|source| GraphError::InvalidPattern {
                pattern: glob.to_string(),
                source,
            })?;
        self.globs.push(glob.to_string());
        self.compiled.push(compiled);
        Ok(())
    }

    /// Whether any pattern matches `candidate` in full.
    pub fn matches(&self, candidate: &str) -> bool {
        self.compiled.iter().any(|re| re.is_match(candidate))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Whether the list has no patterns.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// The globs as given.
    pub fn globs(&self) -> &[String] {
        &self.globs
    }
}
