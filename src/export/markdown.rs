//! Markdown export implementation.
//!
//! Exports the dependency graph in Markdown format for documentation and reporting.

use super::{Exporter, GraphReport};
use indexmap::IndexMap;
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

/// Renders `name (range)` pairs as a comma-separated cell.
fn format_edges(edges: &IndexMap<String, String>) -> String {
    if edges.is_empty() {
        return "-".to_string();
    }
    edges
        .iter()
        .map(|(name, range)| format!("{} ({})", escape_cell(name), escape_cell(range)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Version ranges like `1.x || 2.x` contain pipes.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, report: &GraphReport, writer: &mut W) -> io::Result<()> {
        // Title
        writeln!(writer, "# Dependency Graph Report")?;
        writeln!(writer)?;
        if let Some(name) = &report.project_name {
            writeln!(writer, "**Project:** {}", name)?;
            writeln!(writer)?;
        }

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Packages | {} |", report.packages.len())?;
        writeln!(writer, "| Dependency Edges | {} |", report.edge_count())?;
        writeln!(writer, "| Implied Aliases | {} |", report.ingest.implied)?;
        writeln!(writer, "| Aliased Packages | {} |", report.aliased_count())?;
        writeln!(
            writer,
            "| Duplicate Installs | {} |",
            report.ingest.duplicates.len()
        )?;
        writeln!(
            writer,
            "| Missing Dependencies | {} |",
            report.ingest.missing.len()
        )?;
        writeln!(writer)?;

        // Packages
        writeln!(writer, "## Packages ({})", report.packages.len())?;
        writeln!(writer)?;
        writeln!(
            writer,
            "| Package | Version | Aliases | Depends On | Depended On By |"
        )?;
        writeln!(
            writer,
            "|---------|---------|---------|------------|----------------|"
        )?;
        for package in &report.packages {
            let aliases: Vec<String> = package
                .aliases
                .iter()
                .skip(1)
                .map(|alias| format!("`{}`", escape_cell(alias)))
                .collect();
            writeln!(
                writer,
                "| {} | {} | {} | {} | {} |",
                escape_cell(&package.name),
                escape_cell(&package.version),
                if aliases.is_empty() {
                    "-".to_string()
                } else {
                    aliases.join(", ")
                },
                format_edges(&package.dependencies),
                format_edges(&package.dependants),
            )?;
        }
        writeln!(writer)?;

        if !report.ingest.missing.is_empty() {
            writeln!(writer, "## Missing Dependencies")?;
            writeln!(writer)?;
            writeln!(writer, "| Declared By | Package | Range |")?;
            writeln!(writer, "|-------------|---------|-------|")?;
            for missing in &report.ingest.missing {
                writeln!(
                    writer,
                    "| {} | {} | {} |",
                    escape_cell(&missing.from),
                    escape_cell(&missing.dependency.name),
                    escape_cell(&missing.dependency.version)
                )?;
            }
            writeln!(writer)?;
        }

        if !report.ingest.duplicates.is_empty() {
            writeln!(writer, "## Duplicate Installs")?;
            writeln!(writer)?;
            for duplicate in &report.ingest.duplicates {
                writeln!(writer, "- {}", duplicate)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
