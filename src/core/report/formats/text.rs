//! Console statistics block

use crate::core::error::Result;
use crate::core::report::{GraphSummary, ReportGenerator};
use std::fmt::Write;

/// Plain-text reporter producing the statistics block printed after rendering
pub struct TextReporter;

impl ReportGenerator for TextReporter {
    fn render(&self, summary: &GraphSummary) -> Result<String> {
        let stats = &summary.statistics;
        let mut out = String::from("📊 Graph Statistics:\n");

        let _ = writeln!(out, "   Total Nodes: {}", stats.node_count);
        let _ = writeln!(out, "   Total Edges: {}", stats.edge_count);
        let _ = writeln!(out, "   Graph Density: {:.4}", stats.density);
        let connected = if stats.is_connected { "True" } else { "False" };
        let _ = writeln!(out, "   Is Connected: {connected}");
        if let Some(average) = stats.average_shortest_path {
            let _ = writeln!(out, "   Average Shortest Path: {average:.2}");
        }
        let _ = writeln!(out, "   Average Degree: {:.2}", stats.average_degree);

        Ok(out)
    }
}
