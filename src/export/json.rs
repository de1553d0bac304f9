//! JSON export implementation.
//!
//! Exports the dependency graph in JSON format for machine-readable output.

use super::{Exporter, GraphReport, PackageEntry};
use crate::graph::DependencyMetadata;
use crate::ingest::MissingDependency;
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    packages: usize,
    edges: usize,
    implied_aliases: usize,
    duplicates: usize,
    missing: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a str>,
    summary: JsonSummary,
    packages: &'a [PackageEntry],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    duplicates: &'a [DependencyMetadata],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    missing: &'a [MissingDependency],
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, report: &GraphReport, writer: &mut W) -> io::Result<()> {
        let export = JsonExport {
            project: report.project_name.as_deref(),
            summary: JsonSummary {
                packages: report.packages.len(),
                edges: report.edge_count(),
                implied_aliases: report.ingest.implied,
                duplicates: report.ingest.duplicates.len(),
                missing: report.ingest.missing.len(),
            },
            packages: &report.packages,
            duplicates: &report.ingest.duplicates,
            missing: &report.ingest.missing,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
