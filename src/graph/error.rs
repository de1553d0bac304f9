//! Error types for graph operations.

use thiserror::Error;

/// Errors raised by the node store, relation store and dependency graph.
///
/// All of these are raised before any mutation happens, so a failed call
/// leaves the graph exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node-name-keyed lookup missed.
    #[error("dependency not found: {0}")]
    NotFound(String),

    /// `add_node` / `add_real_dependency` was called with a registered name.
    #[error("dependency already exists: {0}")]
    AlreadyExists(String),

    /// A node was offered under a key that is not its own name.
    #[error("node {node} cannot be stored under {key}")]
    NameMismatch { key: String, node: String },

    /// The version is already one of the node's aliases.
    #[error("version {version} already exists for {name}")]
    VersionAlreadyExists { name: String, version: String },

    /// A `name@version` token could not be split.
    #[error("malformed dependency name: '{0}' (expected <name>@<version>)")]
    MalformedDependencyName(String),
}

impl GraphError {
    /// Returns the dependency name the error refers to.
    pub fn name(&self) -> &str {
        match self {
            GraphError::NotFound(name)
            | GraphError::AlreadyExists(name)
            | GraphError::MalformedDependencyName(name) => name,
            GraphError::VersionAlreadyExists { name, .. } => name,
            GraphError::NameMismatch { key, .. } => key,
        }
    }
}

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            GraphError::NotFound("foo".to_string()).to_string(),
            "dependency not found: foo"
        );
        assert_eq!(
            GraphError::AlreadyExists("foo".to_string()).to_string(),
            "dependency already exists: foo"
        );
        let err = GraphError::VersionAlreadyExists {
            name: "foo".to_string(),
            version: "2".to_string(),
        };
        assert_eq!(err.to_string(), "version 2 already exists for foo");
        let err = GraphError::NameMismatch {
            key: "foo".to_string(),
            node: "bar".to_string(),
        };
        assert_eq!(err.to_string(), "node bar cannot be stored under foo");
        assert_eq!(err.name(), "foo");
    }

    #[test]
    fn test_error_name() {
        assert_eq!(GraphError::NotFound("bar".to_string()).name(), "bar");
        let err = GraphError::VersionAlreadyExists {
            name: "foo".to_string(),
            version: "2".to_string(),
        };
        assert_eq!(err.name(), "foo");
    }
}
