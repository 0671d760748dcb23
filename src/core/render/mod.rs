//! PNG rendering of campus graphs
//!
//! Rendering happens in two steps: [`Scene::build`] turns a graph and its layout
//! into pixel geometry for one [`View`], then [`png::draw_png`] rasterizes that
//! scene with `plotters`. Sizes in [`RenderStyle`] are expressed in typographic
//! points and scaled by the output DPI. Images are cropped to their content.

pub mod png;
pub mod scene;

use crate::core::error::{GraphError, Result};
use crate::core::layout::Layout;
use crate::core::models::CampusGraph;
use crate::debug;
use std::path::{Path, PathBuf};

pub use scene::Scene;

/// Default output resolution
pub const DEFAULT_DPI: u32 = 300;

/// Highest accepted resolution; larger values exhaust memory on the detailed view
pub const MAX_DPI: u32 = 1200;

/// Visual parameters of one rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Figure size in inches (width, height) the drawing is laid out in,
    /// before cropping
    pub figure_size: (f64, f64),
    /// Node marker area in square points
    pub node_size: f64,
    /// Node fill opacity
    pub node_alpha: f64,
    /// Node outline width in points
    pub node_outline: f64,
    /// Edge opacity
    pub edge_alpha: f64,
    /// Edge width in points
    pub edge_width: f64,
    /// Node label font size in points
    pub node_font: f64,
    /// Edge weight label font size in points; `None` hides weights
    pub edge_label_font: Option<f64>,
    /// Legend marker area in square points
    pub legend_marker: f64,
    /// Legend font size in points
    pub legend_font: f64,
    /// Title text
    pub title: &'static str,
    /// Title font size in points
    pub title_font: f64,
    /// Whether to show the node/edge count banner
    pub info_banner: bool,
}

/// The two renderings produced for every graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Overview with an info banner
    Simple,
    /// Larger canvas with edge weight labels
    Detailed,
}

impl View {
    /// Style preset for this view
    #[must_use]
    pub const fn style(self) -> RenderStyle {
        match self {
            Self::Simple => RenderStyle {
                figure_size: (20.0, 16.0),
                node_size: 800.0,
                node_alpha: 0.9,
                node_outline: 2.0,
                edge_alpha: 0.3,
                edge_width: 1.0,
                node_font: 10.0,
                edge_label_font: None,
                legend_marker: 100.0,
                legend_font: 10.0,
                title: "Campus Map Graph Visualization (Preserving Original Layout)",
                title_font: 18.0,
                info_banner: true,
            },
            Self::Detailed => RenderStyle {
                figure_size: (24.0, 20.0),
                node_size: 1000.0,
                node_alpha: 0.9,
                node_outline: 2.0,
                edge_alpha: 0.2,
                edge_width: 2.0,
                node_font: 8.0,
                edge_label_font: Some(6.0),
                legend_marker: 150.0,
                legend_font: 12.0,
                title: "Campus Map Graph - Detailed View with Original Layout",
                title_font: 20.0,
                info_banner: false,
            },
        }
    }
}

/// Output settings shared by both views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per inch
    pub dpi: u32,
    /// TrueType font for labels; `None` searches common system locations
    pub font: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            font: None,
        }
    }
}

/// Render one view of a graph to a PNG file.
///
/// Labels are skipped (with a warning) when no usable font is found. The
/// output directory must already exist.
///
/// # Errors
/// Returns an error if the image cannot be drawn or written.
pub fn render_view(
    graph: &CampusGraph,
    layout: &Layout,
    view: View,
    options: &RenderOptions,
    output: &Path,
) -> Result<()> {
    if let Some(dir) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.is_dir() {
            return Err(GraphError::Render(format!(
                "output directory {} does not exist",
                dir.display()
            )));
        }
    }

    let scene = Scene::build(graph, layout, &view.style(), options.dpi);
    debug!(
        "Rendering {view:?} view: {}x{} px, {} nodes, {} edges",
        scene.width,
        scene.height,
        scene.nodes.len(),
        scene.edges.len()
    );
    let with_text = png::ensure_font(options.font.as_deref());
    png::draw_png(&scene, output, with_text)
}
