//! Shared types for manifest parsing.
//!
//! This module defines the data structures used to represent installed
//! package manifests (npm `package.json`, bower `bower.json` / `.bower.json`)
//! and the dependencies they declare.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fields of a package manifest that matter for graph building.
///
/// npm and bower manifests share this shape. Bower's installed metadata
/// (`.bower.json`) records the resolved version as `_release`, which is used
/// when `version` is absent.
///
/// # Example
///
/// ```
/// use depgraph::parser::types::Manifest;
///
/// let json = r#"{"name": "jquery", "_release": "3.7.1"}"#;
/// let manifest: Manifest = serde_json::from_str(json).unwrap();
/// assert_eq!(manifest.resolved_version(), Some("3.7.1"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Manifest {
    /// The name of the package.
    pub name: Option<String>,

    /// The version of the package.
    pub version: Option<String>,

    /// The release bower resolved when installing the package.
    #[serde(rename = "_release")]
    pub release: Option<String>,

    /// Dependencies required at runtime.
    pub dependencies: Option<IndexMap<String, String>>,

    /// Development-only dependencies.
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<IndexMap<String, String>>,

    /// Peer dependencies that the host package must provide.
    #[serde(rename = "peerDependencies")]
    pub peer_dependencies: Option<IndexMap<String, String>>,

    /// Optional dependencies that enhance functionality if available.
    #[serde(rename = "optionalDependencies")]
    pub optional_dependencies: Option<IndexMap<String, String>>,
}

impl Manifest {
    /// The first defined of `version` and `_release`.
    pub fn resolved_version(&self) -> Option<&str> {
        self.version.as_deref().or(self.release.as_deref())
    }

    /// Returns the total count of all dependencies.
    pub fn dependency_count(&self) -> usize {
        [
            self.dependencies.as_ref(),
            self.dev_dependencies.as_ref(),
            self.peer_dependencies.as_ref(),
            self.optional_dependencies.as_ref(),
        ]
        .into_iter()
        .map(|deps| deps.map_or(0, IndexMap::len))
        .sum()
    }
}

/// Categorizes the type of dependency relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyType {
    /// Production dependencies - required at runtime.
    Production,

    /// Development dependencies - only needed during development.
    /// Never installed for packages below the project root.
    Development,

    /// Peer dependencies - expected to be provided by the consumer.
    Peer,

    /// Optional dependencies - installed when the platform allows it.
    Optional,
}

impl DependencyType {
    /// Returns true if packages of this type are present in an installed tree
    /// below the project root.
    pub fn is_installed_transitively(&self) -> bool {
        !matches!(self, DependencyType::Development)
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyType::Production => "production",
            DependencyType::Development => "development",
            DependencyType::Peer => "peer",
            DependencyType::Optional => "optional",
        };
        write!(f, "{}", s)
    }
}

/// A single declared dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// The package name (e.g., "react", "lodash").
    pub name: String,

    /// The declared range (e.g., "^18.0.0", "~1.2.3").
    pub version: String,

    /// The category of this dependency.
    pub dep_type: DependencyType,
}

impl Dependency {
    /// Creates a new Dependency instance.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        dep_type: DependencyType,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dep_type,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.dep_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_type_installed_transitively() {
        assert!(DependencyType::Production.is_installed_transitively());
        assert!(!DependencyType::Development.is_installed_transitively());
        assert!(DependencyType::Peer.is_installed_transitively());
        assert!(DependencyType::Optional.is_installed_transitively());
    }

    #[test]
    fn test_dependency_display() {
        let dep = Dependency::new("lodash", "~4.17.21", DependencyType::Development);
        assert_eq!(format!("{}", dep), "lodash@~4.17.21 (development)");
    }

    #[test]
    fn test_resolved_version_prefers_version() {
        let manifest = Manifest {
            version: Some("1.0.0".to_string()),
            release: Some("1.0.1".to_string()),
            ..Manifest::default()
        };
        assert_eq!(manifest.resolved_version(), Some("1.0.0"));

        let bower = Manifest {
            release: Some("2.0.0".to_string()),
            ..Manifest::default()
        };
        assert_eq!(bower.resolved_version(), Some("2.0.0"));
        assert_eq!(Manifest::default().resolved_version(), None);
    }

    #[test]
    fn test_manifest_dependency_count() {
        let mut manifest = Manifest::default();
        assert_eq!(manifest.dependency_count(), 0);

        let mut deps = IndexMap::new();
        deps.insert("react".to_string(), "^18.0.0".to_string());
        manifest.dependencies = Some(deps.clone());
        manifest.peer_dependencies = Some(deps);

        assert_eq!(manifest.dependency_count(), 2);
    }
}
