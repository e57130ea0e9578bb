use std::fmt;

use thiserror::Error;

/// A single schema violation. `path` locates the offending field
/// (e.g. `["input", "priceCents"]`), `message` is what the caller sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    pub fn new(path: &[&str], message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
            message: message.into(),
        }
    }

    /// Dotted path for logs, e.g. `input.imageUrls.0`
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// Ordered collection of issues; rendered as the messages joined by `", "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issues(Vec<Issue>);

impl Issues {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, issue: Issue) {
        self.0.push(issue);
    }

    pub fn add(&mut self, path: &[&str], message: impl Into<String>) {
        self.push(Issue::new(path, message));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|i| i.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON body")]
    InvalidJson,
    /// Well-formed tag that names no known tool
    #[error("Unknown tool request")]
    UnknownTool(String),
    #[error("{0}")]
    Schema(Issues),
}
