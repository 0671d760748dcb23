//! Markdown report generator
//!
//! Fills an embedded template with the statistics table, the layout strategy
//! and a per-type node count table. Renders well in GitHub, GitLab and VS Code.

use crate::core::error::Result;
use crate::core::layout::LayoutSource;
use crate::core::report::{GraphSummary, ReportGenerator};
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/summary.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Render the report using template substitution
    fn render_template(summary: &GraphSummary) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{input}}", &summary.input);
        output = output.replace("{{statistics_rows}}", &Self::statistics_rows(summary));
        output = output.replace("{{layout}}", &Self::layout_paragraph(summary));
        output = output.replace("{{node_kind_rows}}", &Self::node_kind_rows(summary));

        output
    }

    fn statistics_rows(summary: &GraphSummary) -> String {
        let stats = &summary.statistics;
        let mut rows = String::new();

        let _ = writeln!(rows, "| Nodes | {} |", stats.node_count);
        let _ = writeln!(rows, "| Edges | {} |", stats.edge_count);
        let _ = writeln!(rows, "| Density | {:.4} |", stats.density);
        let _ = writeln!(rows, "| Connected | {} |", stats.is_connected);
        if let Some(average) = stats.average_shortest_path {
            let _ = writeln!(rows, "| Average shortest path | {average:.2} |");
        }
        let _ = write!(rows, "| Average degree | {:.2} |", stats.average_degree);

        rows
    }

    fn layout_paragraph(summary: &GraphSummary) -> String {
        let mut text = match summary.layout {
            LayoutSource::Coordinates => {
                "Every node carries image coordinates; renderings preserve the original layout."
                    .to_string()
            }
            LayoutSource::Spring => {
                "Some nodes lack coordinates; renderings use a seeded spring layout.".to_string()
            }
        };
        if let Some(image) = summary.image {
            let _ = write!(
                text,
                " Source image: {}x{} px.",
                image.width, image.height
            );
        }
        text
    }

    fn node_kind_rows(summary: &GraphSummary) -> String {
        summary
            .node_kinds
            .iter()
            .map(|entry| {
                format!(
                    "| {} | `{}` | {} |",
                    entry.kind.display_name(),
                    entry.color,
                    entry.count
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, summary: &GraphSummary) -> Result<String> {
        Ok(Self::render_template(summary))
    }
}
