//! Graphviz DOT export implementation.
//!
//! Renders the dependency topology with petgraph's DOT writer; edges are
//! labelled with the declared range.

use super::{Exporter, GraphReport};
use petgraph::dot::Dot;
use std::io::{self, Write};

/// DOT exporter implementation.
pub struct DotExporter;

impl Exporter for DotExporter {
    fn export<W: Write>(&self, report: &GraphReport, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", Dot::new(&report.topology))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_report;

    #[test]
    fn test_dot_export() {
        let mut output = Vec::new();
        DotExporter.export(&sample_report(), &mut output).unwrap();
        let dot = String::from_utf8(output).unwrap();

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"react-dom\""));
        assert!(dot.contains("label = \"^18.2.0\""));
        assert_eq!(dot.matches(" -> ").count(), 3);
    }
}
