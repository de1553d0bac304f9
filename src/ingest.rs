//! Builds a [`DependencyGraph`] from scanned package records.
//!
//! Every record becomes a real node first. Declared dependencies are then
//! resolved against those nodes: each new declared range is added as an
//! alias of the installed package, and an edge carrying the range is
//! recorded from the declaring package to the bare dependency name.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::graph::{DependencyGraph, DependencyMetadata, GraphError, GraphResult};
use crate::scanner::PackageRecord;

/// Options for graph construction.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Follow the root manifest's `devDependencies` too.
    pub include_dev: bool,
}

/// A declared dependency with no installed package to point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDependency {
    /// Name of the declaring package
    pub from: String,
    /// The declared name and range
    pub dependency: DependencyMetadata,
}

/// What happened while building the graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Nodes created from records
    pub real: usize,
    /// Aliases appended to existing nodes
    pub implied: usize,
    /// Edges in the finished graph
    pub edges: usize,
    /// Records skipped because a package with that name was already registered
    pub duplicates: Vec<DependencyMetadata>,
    /// Declarations whose target is not installed
    pub missing: Vec<MissingDependency>,
}

/// Builds the graph from `records`, in order.
///
/// The first record for a package name wins; later copies (nested installs
/// of another version) are reported as duplicates. Graph errors other than
/// those two expected cases propagate unchanged.
pub fn build_graph(
    records: &[PackageRecord],
    options: &IngestOptions,
) -> GraphResult<(DependencyGraph<Value>, IngestReport)> {
    let mut graph = DependencyGraph::new();
    let mut report = IngestReport::default();
    let mut registered = Vec::with_capacity(records.len());

    for record in records {
        let meta = record.metadata();
        match graph.add_real_dependency(&meta, record.data.clone()) {
            Ok(()) => {
                report.real += 1;
                registered.push(record);
            }
            Err(GraphError::AlreadyExists(_)) => {
                debug!(package = %meta, path = %record.path.display(), "duplicate install skipped");
                report.duplicates.push(meta);
            }
            Err(err) => return Err(err),
        }
    }

    for record in registered {
        for dep in record.installed_dependencies(options.include_dev) {
            let declared = DependencyMetadata::new(dep.name.clone(), dep.version.clone());

            if !graph.has_node(&dep.name) {
                warn!(from = %record.name, dependency = %declared, "declared dependency is not installed");
                report.missing.push(MissingDependency {
                    from: record.name.clone(),
                    dependency: declared,
                });
                continue;
            }

            if !graph.has_version(&dep.name, &dep.version)? {
                graph.add_implied_dependency(&declared)?;
                report.implied += 1;
            }
            graph.create_inter_dependency(&record.name, &declared)?;
        }
    }

    report.edges = graph.edge_count();
    info!(
        real = report.real,
        implied = report.implied,
        edges = report.edges,
        duplicates = report.duplicates.len(),
        missing = report.missing.len(),
        "dependency graph built"
    );

    Ok((graph, report))
}
