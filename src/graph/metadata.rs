//! `name@version` dependency identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::GraphError;

/// A package name paired with a version or version range.
///
/// The string form is `"<name>@<version>"`. Parsing splits on the last `@`,
/// which keeps scoped npm names such as `@babel/core@7.0.0` intact. The
/// version half must therefore never contain `@` itself.
///
/// # Example
///
/// ```rust
/// use depgraph::graph::DependencyMetadata;
///
/// let meta = DependencyMetadata::new("@babel/core", "7.0.0");
/// let token = meta.to_string();
/// assert_eq!(token, "@babel/core@7.0.0");
/// assert_eq!(token.parse::<DependencyMetadata>().unwrap(), meta);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyMetadata {
    /// Package name (e.g., "react", "@types/node")
    pub name: String,
    /// Version or declared range (e.g., "18.2.0", "^2.0.0")
    pub version: String,
}

impl DependencyMetadata {
    /// Creates a new name/version pair.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Writes `name@version`. The result parses back only when `version` has
/// no `@` of its own.
impl fmt::Display for DependencyMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

impl FromStr for DependencyMetadata {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((name, version)) = s.rsplit_once('@') else {
            return Err(GraphError::MalformedDependencyName(s.to_string()));
        };
        if name.is_empty() || version.is_empty() {
            return Err(GraphError::MalformedDependencyName(s.to_string()));
        }
        Ok(Self::new(name, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify() {
        let meta = DependencyMetadata::new("foo", "1.0.0");
        assert_eq!(meta.to_string(), "foo@1.0.0");
    }

    #[test]
    fn test_parse_plain() {
        let meta: DependencyMetadata = "lodash@^4.17.21".parse().unwrap();
        assert_eq!(meta.name, "lodash");
        assert_eq!(meta.version, "^4.17.21");
    }

    #[test]
    fn test_parse_scoped_package() {
        let meta: DependencyMetadata = "@types/node@20.1.0".parse().unwrap();
        assert_eq!(meta.name, "@types/node");
        assert_eq!(meta.version, "20.1.0");
    }

    #[test]
    fn test_round_trip() {
        for (name, version) in [
            ("foo", "1"),
            ("react-dom", ">=16.8.0 <19"),
            ("@scope/pkg", "~0.1.0"),
            ("Mixed-Case", "latest"),
        ] {
            let meta = DependencyMetadata::new(name, version);
            let parsed: DependencyMetadata = meta.to_string().parse().unwrap();
            assert_eq!(parsed, meta);
        }
    }

    #[test]
    fn test_version_with_separator_does_not_round_trip() {
        let meta = DependencyMetadata::new("a", "1@2");
        let parsed: DependencyMetadata = meta.to_string().parse().unwrap();
        assert_eq!(parsed, DependencyMetadata::new("a@1", "2"));
    }

    #[test]
    fn test_parse_without_separator() {
        let err = "foo".parse::<DependencyMetadata>().unwrap_err();
        assert_eq!(err, GraphError::MalformedDependencyName("foo".to_string()));
    }

    #[test]
    fn test_parse_empty_halves() {
        assert!("@1.0.0".parse::<DependencyMetadata>().is_err());
        assert!("foo@".parse::<DependencyMetadata>().is_err());
        assert!("".parse::<DependencyMetadata>().is_err());
    }
}
