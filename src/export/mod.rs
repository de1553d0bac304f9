//! Export functionality for dependency graph reports.
//!
//! This module provides exporters for writing a finished graph out in
//! JSON, Markdown, or Graphviz DOT format.

pub mod dot;
pub mod json;
pub mod markdown;

use crate::graph::{DependencyGraph, GraphResult};
use crate::ingest::IngestReport;
use indexmap::IndexMap;
use petgraph::graph::DiGraph;
use serde::Serialize;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    #[default]
    Json,
    /// Markdown format - documentation/reporting
    Markdown,
    /// Graphviz DOT - for rendering with `dot -Tsvg`
    Dot,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, markdown, dot",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Dot => write!(f, "dot"),
        }
    }
}

/// One package as it appears in a report.
#[derive(Debug, Clone, Serialize)]
pub struct PackageEntry {
    pub name: String,
    pub version: String,
    pub aliases: Vec<String>,
    /// Target name -> declared range
    pub dependencies: IndexMap<String, String>,
    /// Dependant name -> declared range
    pub dependants: IndexMap<String, String>,
}

/// Everything an exporter needs, collected from a finished graph.
#[derive(Debug, Clone)]
pub struct GraphReport {
    /// Project name, from the root manifest when there is one
    pub project_name: Option<String>,
    /// Packages in registration order
    pub packages: Vec<PackageEntry>,
    /// Outcome of graph construction
    pub ingest: IngestReport,
    /// Node/edge snapshot for graph renderers
    pub topology: DiGraph<String, String>,
}

impl GraphReport {
    /// Collects a report from the graph's read queries.
    pub fn new<D>(
        project_name: Option<String>,
        graph: &DependencyGraph<D>,
        ingest: IngestReport,
    ) -> GraphResult<Self> {
        let packages = graph
            .list_nodes()
            .into_iter()
            .map(|name| -> GraphResult<PackageEntry> {
                Ok(PackageEntry {
                    version: graph.get_dependency_version(&name)?.to_string(),
                    aliases: graph.get_dependency_aliases(&name)?.to_vec(),
                    dependencies: graph.list_dependencies_of_dependency(&name)?,
                    dependants: graph.list_dependants_of_dependency(&name),
                    name,
                })
            })
            .collect::<GraphResult<Vec<_>>>()?;

        Ok(Self {
            project_name,
            packages,
            ingest,
            topology: graph.to_petgraph(),
        })
    }

    /// Number of packages carrying at least one alias besides their version.
    pub fn aliased_count(&self) -> usize {
        self.packages.iter().filter(|p| p.aliases.len() > 1).count()
    }

    pub fn edge_count(&self) -> usize {
        self.packages.iter().map(|p| p.dependencies.len()).sum()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &GraphReport, writer: &mut W) -> io::Result<()>;
}

/// Export a report in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    report: &GraphReport,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(report, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(report, writer),
        ExportFormat::Dot => dot::DotExporter.export(report, writer),
    }
}

/// Export a report to a string.
pub fn export_to_string(format: ExportFormat, report: &GraphReport) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!(
            "md".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert_eq!("dot".parse::<ExportFormat>().unwrap(), ExportFormat::Dot);
        assert!("csv".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Json), "json");
        assert_eq!(format!("{}", ExportFormat::Markdown), "markdown");
        assert_eq!(format!("{}", ExportFormat::Dot), "dot");
    }

    #[test]
    fn test_graph_report_collects_queries() {
        let report = test_support::sample_report();

        assert_eq!(report.packages.len(), 3);
        let react = &report.packages[1];
        assert_eq!(react.name, "react");
        assert_eq!(react.aliases, vec!["18.2.0", "^18.0.0", "^18.2.0"]);
        assert_eq!(react.dependants.len(), 2);
        assert_eq!(report.edge_count(), 3);
        assert_eq!(report.aliased_count(), 2);
        assert_eq!(report.topology.edge_count(), 3);
    }

    #[test]
    fn test_export_to_string_all_formats() {
        let report = test_support::sample_report();
        for format in [ExportFormat::Json, ExportFormat::Markdown, ExportFormat::Dot] {
            let out = export_to_string(format, &report).unwrap();
            assert!(out.contains("react-dom"), "{} output missing node", format);
        }
    }
}
