//! Installed-tree scanner.
//!
//! Walks a project directory and reads the manifest of every package
//! installed under `node_modules` (including scoped `@scope/pkg` packages and
//! nested installs) and, optionally, `bower_components`.

mod record;

pub use record::{ManifestKind, PackageRecord};

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

const NODE_MODULES: &str = "node_modules";
const BOWER_COMPONENTS: &str = "bower_components";

/// Errors that abort a scan.
///
/// Individual unreadable manifests never abort a scan; they are logged and
/// skipped.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Project directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Controls which manifests a scan picks up.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Include the project's own `package.json` (or `bower.json`).
    pub include_root: bool,
    /// Also scan `bower_components`.
    pub include_bower: bool,
    /// Deepest install level to read; `None` reads everything.
    pub max_depth: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_root: true,
            include_bower: true,
            max_depth: None,
        }
    }
}

/// Scans `root` and returns one record per readable manifest.
///
/// Records are ordered by install depth (root first, then top-level
/// packages, then nested ones); packages at the same depth keep file-name
/// order. Symlinked packages (workspaces, `npm link`, pnpm) are followed and
/// recorded at the depth of the link.
pub fn scan(root: &Path, options: &ScanOptions) -> ScanResult<Vec<PackageRecord>> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let mut records = Vec::new();

    if options.include_root {
        if let Some(path) = root_manifest(root) {
            push_record(&mut records, &path, ManifestKind::Root, 0);
        }
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e, root, options));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(ScanError::Walk {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            // Broken links and link loops land here too
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let Some(kind) = classify(relative) else {
            continue;
        };
        if kind == ManifestKind::Bower && shadowed_by_bower_metadata(path) {
            continue;
        }

        push_record(&mut records, path, kind, install_depth(relative));
    }

    records.sort_by_key(|r| r.depth);
    debug!(count = records.len(), root = %root.display(), "scan finished");
    Ok(records)
}

fn push_record(records: &mut Vec<PackageRecord>, path: &Path, kind: ManifestKind, depth: usize) {
    match PackageRecord::read(path, kind, depth) {
        Ok(record) => {
            debug!(
                name = %record.name,
                version = %record.version,
                kind = %kind,
                depth,
                "found package"
            );
            records.push(record);
        }
        Err(err) => warn!(path = %path.display(), error = %err, "skipping manifest"),
    }
}

fn root_manifest(root: &Path) -> Option<PathBuf> {
    ["package.json", "bower.json"]
        .into_iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

fn is_ignored_dir(entry: &DirEntry, root: &Path, options: &ScanOptions) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name();
    if name == ".git" || name == ".bin" {
        return true;
    }
    if !options.include_bower && name == BOWER_COMPONENTS {
        return true;
    }

    // An install dir counts itself, so the one that would open level
    // max + 1 is pruned along with everything below it.
    match (options.max_depth, entry.path().strip_prefix(root)) {
        (Some(max), Ok(relative)) => install_depth(relative) > max,
        _ => false,
    }
}

fn is_install_dir(name: &OsStr) -> bool {
    name == NODE_MODULES || name == BOWER_COMPONENTS
}

/// Number of install directories in a path relative to the scan root.
fn install_depth(relative: &Path) -> usize {
    relative
        .components()
        .filter(|c| matches!(c, Component::Normal(name) if is_install_dir(name)))
        .count()
}

/// Decides whether a file path (relative to the scan root) is a package
/// manifest inside an install directory.
fn classify(relative: &Path) -> Option<ManifestKind> {
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;

    let (file, dirs) = parts.split_last()?;
    let (package, dirs) = dirs.split_last()?;
    let (parent, dirs) = dirs.split_last()?;

    if package.starts_with('.') {
        return None;
    }

    match *file {
        "package.json" => {
            if *parent == NODE_MODULES && !package.starts_with('@') {
                return Some(ManifestKind::Npm);
            }
            // node_modules/@scope/pkg/package.json
            match dirs.last() {
                Some(&NODE_MODULES) if parent.starts_with('@') => Some(ManifestKind::Npm),
                _ => None,
            }
        }
        ".bower.json" | "bower.json" if *parent == BOWER_COMPONENTS => Some(ManifestKind::Bower),
        _ => None,
    }
}

/// `.bower.json` carries the installed `_release`, so it wins over the
/// package's own `bower.json`.
fn shadowed_by_bower_metadata(path: &Path) -> bool {
    path.file_name() == Some(OsStr::new("bower.json"))
        && path.with_file_name(".bower.json").is_file()
}
