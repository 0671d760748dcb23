//! Summary reports for campus graphs
//!
//! A [`GraphSummary`] gathers everything worth reporting about a loaded graph;
//! the reporters in [`formats`] turn it into console text, JSON or Markdown.

pub mod formats;

use crate::core::error::Result;
use crate::core::layout::LayoutSource;
use crate::core::models::{CampusGraph, ImageMetadata, NodeKind};
use crate::core::palette;
use crate::core::stats::GraphStats;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub use formats::{JsonReporter, MarkdownReporter, ReportFormat, TextReporter};

/// Number of nodes of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCount {
    /// Node kind
    pub kind: NodeKind,
    /// Fill color used in renderings, `#RRGGBB`
    pub color: String,
    /// Nodes of that kind
    pub count: usize,
}

/// Data context for report generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    /// Where the graph was loaded from
    pub input: String,
    /// Graph statistics
    pub statistics: GraphStats,
    /// Strategy the renderer uses for this graph
    pub layout: LayoutSource,
    /// Source image dimensions, if declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageMetadata>,
    /// Node counts per kind, known kinds in legend order, then unknown
    pub node_kinds: Vec<KindCount>,
}

impl GraphSummary {
    /// Summarize a graph loaded from `input`.
    ///
    /// # Errors
    /// Propagates errors from [`GraphStats::compute`].
    pub fn new(input: impl Into<String>, graph: &CampusGraph) -> Result<Self> {
        let layout = if graph.has_coordinates() {
            LayoutSource::Coordinates
        } else {
            LayoutSource::Spring
        };

        let node_kinds = NodeKind::KNOWN
            .into_iter()
            .chain(std::iter::once(NodeKind::Unknown))
            .map(|kind| KindCount {
                kind,
                color: palette::color_for(kind).hex(),
                count: graph.nodes().filter(|(_, node)| node.kind == kind).count(),
            })
            .filter(|entry| entry.count > 0)
            .collect();

        Ok(Self {
            input: input.into(),
            statistics: GraphStats::compute(graph)?,
            layout,
            image: graph.metadata(),
            node_kinds,
        })
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if the summary cannot be rendered in this format
    fn render(&self, summary: &GraphSummary) -> Result<String>;

    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, summary: &GraphSummary, output_path: &Path) -> Result<()> {
        let content = self.render(summary)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}

/// Reporter for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Text => Box::new(TextReporter),
        ReportFormat::Json => Box::new(JsonReporter),
        ReportFormat::Markdown => Box::new(MarkdownReporter),
    }
}
