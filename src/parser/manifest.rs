//! Parser for npm and bower package manifests.
//!
//! This module parses `package.json`, `bower.json` and `.bower.json` files
//! and extracts the dependency information used to build the graph.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::types::{Dependency, DependencyType, Manifest};

/// Errors that can occur during manifest parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The manifest is missing fields required to register the package.
    #[error("Invalid manifest: {0}")]
    InvalidPackage(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A manifest together with the raw JSON document it was read from.
///
/// The raw document is kept as the node payload, so callers can reach
/// fields the typed view does not model.
#[derive(Debug, Clone)]
pub struct ParsedManifest {
    pub manifest: Manifest,
    pub raw: Value,
}

/// Parses a manifest file from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use depgraph::parser::manifest::parse_file;
///
/// let parsed = parse_file(Path::new("package.json")).unwrap();
/// println!("Package: {:?}", parsed.manifest.name);
/// ```
pub fn parse_file(path: &Path) -> ParseResult<ParsedManifest> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a manifest from a string.
///
/// # Example
///
/// ```
/// use depgraph::parser::manifest::parse_str;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0", "private": true}"#;
/// let parsed = parse_str(json).unwrap();
/// assert_eq!(parsed.manifest.name, Some("my-app".to_string()));
/// assert_eq!(parsed.raw["private"], true);
/// ```
pub fn parse_str(content: &str) -> ParseResult<ParsedManifest> {
    let raw: Value = serde_json::from_str(content)?;
    parse_value(raw)
}

/// Builds the typed view of an already-parsed JSON document.
pub fn parse_value(raw: Value) -> ParseResult<ParsedManifest> {
    let manifest = Manifest::deserialize(&raw)?;
    Ok(ParsedManifest { manifest, raw })
}

/// Validates that a manifest can become a graph node.
///
/// A node needs a name and a version (`version`, falling back to `_release`).
pub fn validate(manifest: &Manifest) -> ParseResult<()> {
    match &manifest.name {
        None => Err(ParseError::InvalidPackage("missing name".to_string())),
        Some(name) if name.trim().is_empty() => {
            Err(ParseError::InvalidPackage("empty name".to_string()))
        }
        Some(name) if manifest.resolved_version().is_none() => Err(ParseError::InvalidPackage(
            format!("{} has no version or _release", name),
        )),
        Some(_) => Ok(()),
    }
}

/// Extracts all dependencies from a manifest into a flat list.
///
/// Entries keep manifest order within each category; categories come in the
/// order production, development, peer, optional.
///
/// # Example
///
/// ```
/// use depgraph::parser::manifest::{parse_str, extract_dependencies};
/// use depgraph::parser::types::DependencyType;
///
/// let json = r#"{
///     "name": "my-app",
///     "dependencies": {"react": "^18.0.0"},
///     "devDependencies": {"typescript": "^5.0.0"}
/// }"#;
///
/// let parsed = parse_str(json).unwrap();
/// let deps = extract_dependencies(&parsed.manifest);
///
/// assert_eq!(deps.len(), 2);
/// assert_eq!(deps[0].name, "react");
/// assert_eq!(deps[1].dep_type, DependencyType::Development);
/// ```
pub fn extract_dependencies(manifest: &Manifest) -> Vec<Dependency> {
    let categories = [
        (&manifest.dependencies, DependencyType::Production),
        (&manifest.dev_dependencies, DependencyType::Development),
        (&manifest.peer_dependencies, DependencyType::Peer),
        (&manifest.optional_dependencies, DependencyType::Optional),
    ];

    let mut deps = Vec::with_capacity(manifest.dependency_count());
    for (declared, dep_type) in categories {
        if let Some(declared) = declared {
            for (name, version) in declared {
                deps.push(Dependency::new(name, version, dep_type));
            }
        }
    }
    deps
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PACKAGE_JSON: &str = r#"{
        "name": "test-app",
        "version": "1.0.0",
        "description": "A test application",
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
            "lodash": "^4.17.21"
        },
        "devDependencies": {
            "typescript": "^5.0.0",
            "jest": "^29.0.0"
        },
        "peerDependencies": {
            "react": ">=16.8.0"
        },
        "optionalDependencies": {
            "fsevents": "^2.3.0"
        }
    }"#;

    const SAMPLE_BOWER_JSON: &str = r#"{
        "name": "angular-route",
        "homepage": "https://github.com/angular/bower-angular-route",
        "_release": "1.8.3",
        "_resolution": {"type": "version", "tag": "v1.8.3"},
        "dependencies": {"angular": "1.8.3"}
    }"#;

    #[test]
    fn test_parse_str_valid() {
        let parsed = parse_str(SAMPLE_PACKAGE_JSON).unwrap();

        assert_eq!(parsed.manifest.name, Some("test-app".to_string()));
        assert_eq!(parsed.manifest.version, Some("1.0.0".to_string()));
        assert_eq!(parsed.raw["description"], "A test application");
    }

    #[test]
    fn test_parse_bower_release() {
        let parsed = parse_str(SAMPLE_BOWER_JSON).unwrap();

        assert!(parsed.manifest.version.is_none());
        assert_eq!(parsed.manifest.resolved_version(), Some("1.8.3"));
        assert!(validate(&parsed.manifest).is_ok());
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let result = parse_str("{ invalid json }");
        assert!(matches!(result.unwrap_err(), ParseError::JsonError(_)));
    }

    #[test]
    fn test_parse_str_wrong_shape() {
        // Legacy manifests sometimes list dependencies as an array
        let result = parse_str(r#"{"name": "old", "dependencies": ["a", "b"]}"#);
        assert!(matches!(result.unwrap_err(), ParseError::JsonError(_)));
    }

    #[test]
    fn test_validate_missing_name() {
        let parsed = parse_str(r#"{"version": "1.0.0"}"#).unwrap();
        assert!(matches!(
            validate(&parsed.manifest).unwrap_err(),
            ParseError::InvalidPackage(_)
        ));
    }

    #[test]
    fn test_validate_missing_version() {
        let parsed = parse_str(r#"{"name": "unversioned"}"#).unwrap();
        let err = validate(&parsed.manifest).unwrap_err();
        assert!(err.to_string().contains("unversioned"));
    }

    #[test]
    fn test_extract_dependencies_all_types() {
        let parsed = parse_str(SAMPLE_PACKAGE_JSON).unwrap();
        let deps = extract_dependencies(&parsed.manifest);

        // 3 prod + 2 dev + 1 peer + 1 optional = 7
        assert_eq!(deps.len(), 7);
        assert_eq!(
            deps.iter()
                .filter(|d| d.dep_type == DependencyType::Production)
                .count(),
            3
        );
        assert_eq!(deps[0], Dependency::new("react", "^18.2.0", DependencyType::Production));
        assert_eq!(deps[5], Dependency::new("react", ">=16.8.0", DependencyType::Peer));
    }

    #[test]
    fn test_extract_dependencies_empty() {
        let parsed = parse_str(r#"{"name": "empty-deps"}"#).unwrap();
        assert!(extract_dependencies(&parsed.manifest).is_empty());
    }

    #[test]
    fn test_parse_error_display() {
        let io_err = ParseError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(io_err.to_string().contains("Failed to read file"));

        let invalid_err = ParseError::InvalidPackage("missing name".to_string());
        assert!(invalid_err.to_string().contains("Invalid manifest"));
    }
}
