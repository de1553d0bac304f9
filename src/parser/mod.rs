//! Parser module for installed package manifests.
//!
//! # Supported Formats
//!
//! - **package.json** (npm/Node.js)
//! - **bower.json** / **.bower.json** (bower); the resolved version is read
//!   from `_release` when `version` is absent
//!
//! # Example
//!
//! ```
//! use depgraph::parser::{extract_dependencies, parse_str, validate};
//!
//! let parsed = parse_str(r#"{"name": "a", "version": "1.0.0", "dependencies": {"b": "^2.0.0"}}"#).unwrap();
//! validate(&parsed.manifest).unwrap();
//!
//! let deps = extract_dependencies(&parsed.manifest);
//! assert_eq!(deps[0].to_string(), "b@^2.0.0 (production)");
//! ```

pub mod manifest;
pub mod types;

pub use manifest::{
    extract_dependencies, parse_file, parse_str, parse_value, validate, ParseError, ParseResult,
    ParsedManifest,
};

pub use types::{Dependency, DependencyType, Manifest};
