//! Package records produced by the scanner.

use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::graph::DependencyMetadata;
use crate::parser::{self, Dependency, ParseError, ParseResult};

/// Where a manifest was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// The project's own manifest at the scan root.
    Root,
    /// `node_modules/<pkg>/package.json`
    Npm,
    /// `bower_components/<pkg>/.bower.json` or `bower.json`
    Bower,
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Npm => write!(f, "npm"),
            Self::Bower => write!(f, "bower"),
        }
    }
}

/// One installed package, ready to be fed into the graph.
#[derive(Debug, Clone)]
pub struct PackageRecord {
    /// Package name from the manifest
    pub name: String,
    /// `version`, or `_release` for bower installs
    pub version: String,
    /// Every dependency the manifest declares
    pub dependencies: Vec<Dependency>,
    /// The raw manifest document
    pub data: Value,
    /// Path of the manifest file
    pub path: PathBuf,
    /// Number of `node_modules` / `bower_components` levels above the package
    pub depth: usize,
    pub kind: ManifestKind,
}

impl PackageRecord {
    /// Reads and validates the manifest at `path`.
    pub fn read(path: &Path, kind: ManifestKind, depth: usize) -> ParseResult<Self> {
        let parsed = parser::parse_file(path)?;
        parser::validate(&parsed.manifest)?;

        let manifest = parsed.manifest;
        let (Some(name), Some(version)) = (
            manifest.name.clone(),
            manifest.resolved_version().map(str::to_string),
        ) else {
            return Err(ParseError::InvalidPackage(path.display().to_string()));
        };

        Ok(Self {
            name,
            version,
            dependencies: parser::extract_dependencies(&manifest),
            data: parsed.raw,
            path: path.to_path_buf(),
            depth,
            kind,
        })
    }

    /// The `{name, version}` pair this record registers.
    pub fn metadata(&self) -> DependencyMetadata {
        DependencyMetadata::new(self.name.clone(), self.version.clone())
    }

    /// Dependencies that the installed tree is expected to satisfy.
    ///
    /// Development dependencies count only for the root manifest, and only
    /// when `include_dev` is set.
    pub fn installed_dependencies(&self, include_dev: bool) -> impl Iterator<Item = &Dependency> {
        let include_dev = include_dev && self.kind == ManifestKind::Root;
        self.dependencies
            .iter()
            .filter(move |d| include_dev || d.dep_type.is_installed_transitively())
    }
}
