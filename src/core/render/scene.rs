//! Pixel geometry for one rendering
//!
//! A [`Scene`] holds everything the rasterizer needs in canvas pixels: node
//! centres, edge segments, labels, the legend and the title block. Layout space
//! is mapped onto the plot area with a single scale factor for both axes so
//! distances keep their proportions. The finished scene is cropped to the
//! extent of what it draws plus a [`CROP_MARGIN_INCHES`] margin.

use super::RenderStyle;
use crate::core::layout::{Layout, LayoutSource, Point};
use crate::core::models::CampusGraph;
use crate::core::palette::{self, Rgb};

/// A canvas position; `y` grows downwards
pub type Pixel = (i32, i32);

const POINTS_PER_INCH: f64 = 72.0;

/// Approximate glyph advance as a fraction of the font size
const GLYPH_WIDTH: f64 = 0.6;
const BOLD_GLYPH_WIDTH: f64 = 0.68;

/// White space kept around the drawn content when cropping
pub const CROP_MARGIN_INCHES: f64 = 0.1;

/// Horizontal anchoring of a label relative to its anchor pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Anchor is the centre of the text
    Center,
    /// Anchor is the left edge, vertically centred
    Left,
}

/// A piece of text placed on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Text to draw
    pub text: String,
    /// Anchor position
    pub anchor: Pixel,
    /// Font size in pixels
    pub font_px: f64,
    /// How the text sits on the anchor
    pub align: Align,
    /// Bold face
    pub bold: bool,
}

impl Label {
    /// Gap between the text and a backdrop box drawn behind it
    #[must_use]
    pub fn box_padding(&self) -> f64 {
        self.font_px * 0.3
    }

    /// Estimated area covered by the text, grown by `padding` on every side
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn extent(&self, padding: f64) -> Extent {
        let glyph = if self.bold { BOLD_GLYPH_WIDTH } else { GLYPH_WIDTH };
        let width = self.text.chars().count() as f64 * self.font_px * glyph;
        let (x, y) = (f64::from(self.anchor.0), f64::from(self.anchor.1));
        let left = match self.align {
            Align::Center => x - width / 2.0,
            Align::Left => x,
        };
        Extent {
            left: left - padding,
            top: y - self.font_px / 2.0 - padding,
            right: left + width + padding,
            bottom: y + self.font_px / 2.0 + padding,
        }
    }
}

/// An axis-aligned area in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Smallest x
    pub left: f64,
    /// Smallest y
    pub top: f64,
    /// Largest x
    pub right: f64,
    /// Largest y
    pub bottom: f64,
}

impl Extent {
    /// Square of half-width `radius` around `center`
    #[must_use]
    pub fn around(center: Pixel, radius: f64) -> Self {
        let (x, y) = (f64::from(center.0), f64::from(center.1));
        Self {
            left: x - radius,
            top: y - radius,
            right: x + radius,
            bottom: y + radius,
        }
    }

    /// Smallest extent covering both
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Width in pixels
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height in pixels
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// One edge segment
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEdge {
    /// First endpoint
    pub from: Pixel,
    /// Second endpoint
    pub to: Pixel,
    /// Weight label at the midpoint, detailed view only
    pub label: Option<Label>,
}

/// One node marker
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Node identifier
    pub id: String,
    /// Marker centre
    pub center: Pixel,
    /// Fill color from the palette
    pub fill: Rgb,
    /// Identifier label centred on the marker
    pub label: Label,
}

/// One legend row
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Swatch color
    pub color: Rgb,
    /// Swatch centre
    pub marker: Pixel,
    /// Kind name to the right of the swatch
    pub label: Label,
}

/// Legend block in the upper-left corner of the plot area
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Frame corners (top-left, bottom-right)
    pub frame: (Pixel, Pixel),
    /// Swatch radius in pixels
    pub marker_radius: u32,
    /// Swatch outline width in pixels
    pub marker_outline_px: u32,
    /// Rows in legend order
    pub entries: Vec<LegendEntry>,
}

/// Everything needed to draw one image
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Node marker radius in pixels
    pub node_radius: u32,
    /// Node fill opacity
    pub node_alpha: f64,
    /// Node outline width in pixels
    pub outline_px: u32,
    /// Edge stroke width in pixels
    pub edge_width_px: u32,
    /// Edge opacity
    pub edge_alpha: f64,
    /// Figure title
    pub title: Label,
    /// Node/edge count banner, drawn on a rounded box
    pub banner: Option<Label>,
    /// Edges, drawn first
    pub edges: Vec<SceneEdge>,
    /// Nodes in graph order, drawn over the edges
    pub nodes: Vec<SceneNode>,
    /// Node kind legend
    pub legend: Legend,
}

/// Uniform mapping from layout space into a pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    min: Point,
    max: Point,
    scale: f64,
    offset: (f64, f64),
}

impl Viewport {
    /// Fit `bounds` into the rectangle `(left, top, right, bottom)`, centred,
    /// with the same scale on both axes.
    ///
    /// Coincident points (or no points) land in the middle of the rectangle.
    #[must_use]
    pub fn fit(bounds: Option<(Point, Point)>, area: (f64, f64, f64, f64)) -> Self {
        let (min, max) = bounds.unwrap_or(((0.0, 0.0), (0.0, 0.0)));
        let (left, top, right, bottom) = area;
        let (width, height) = ((right - left).max(0.0), (bottom - top).max(0.0));
        let span = (max.0 - min.0, max.1 - min.1);

        let axis_scale = |available: f64, extent: f64| {
            if extent > 0.0 {
                available / extent
            } else {
                f64::INFINITY
            }
        };
        let scale = axis_scale(width, span.0).min(axis_scale(height, span.1));
        let scale = if scale.is_finite() { scale } else { 1.0 };

        Self {
            min,
            max,
            scale,
            offset: (
                left + (width - span.0 * scale) / 2.0,
                top + (height - span.1 * scale) / 2.0,
            ),
        }
    }

    /// Map a layout point to a canvas pixel, flipping the vertical axis
    #[must_use]
    pub fn to_canvas(&self, point: Point) -> Pixel {
        (
            to_i32(self.offset.0 + (point.0 - self.min.0) * self.scale),
            to_i32(self.offset.1 + (self.max.1 - point.1) * self.scale),
        )
    }
}

impl Scene {
    /// Lay out a graph for the given style at `dpi` pixels per inch.
    ///
    /// The figure size of `style` bounds the drawing; the returned canvas is
    /// cropped to the drawn content.
    #[must_use]
    pub fn build(graph: &CampusGraph, layout: &Layout, style: &RenderStyle, dpi: u32) -> Self {
        let dpi = f64::from(dpi.max(1));
        let pt = |points: f64| points * dpi / POINTS_PER_INCH;

        let width = style.figure_size.0 * dpi;
        let height = style.figure_size.1 * dpi;
        let node_radius = pt(style.node_size.sqrt() / 2.0);
        let outline = pt(style.node_outline);

        let title_px = pt(style.title_font);
        let title = Label {
            text: style.title.to_string(),
            anchor: (to_i32(width / 2.0), to_i32(title_px * 1.25)),
            font_px: title_px,
            align: Align::Center,
            bold: true,
        };
        let mut top = title_px * 2.5;

        let banner = style.info_banner.then(|| {
            let font_px = pt(12.0);
            let label = Label {
                text: banner_text(graph, layout.source()),
                anchor: (to_i32(width / 2.0), to_i32(top + font_px)),
                font_px,
                align: Align::Center,
                bold: false,
            };
            top += font_px * 2.5;
            label
        });

        let legend = build_legend(style, pt, (width * 0.01, top));

        let pad = node_radius + outline + width.min(height) * 0.02;
        let viewport = Viewport::fit(
            layout.bounds(),
            (pad, top + pad, width - pad, height - pad),
        );

        let node_font = pt(style.node_font);
        let nodes = graph
            .nodes()
            .map(|(idx, node)| {
                let center = viewport.to_canvas(layout.position(idx));
                SceneNode {
                    id: node.id.clone(),
                    center,
                    fill: palette::color_for(node.kind),
                    label: Label {
                        text: node.id.clone(),
                        anchor: center,
                        font_px: node_font,
                        align: Align::Center,
                        bold: true,
                    },
                }
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(a, b, weight)| {
                let from = viewport.to_canvas(layout.position(a));
                let to = viewport.to_canvas(layout.position(b));
                let label = style.edge_label_font.map(|size| Label {
                    text: weight_label(weight),
                    anchor: ((from.0 + to.0) / 2, (from.1 + to.1) / 2),
                    font_px: pt(size),
                    align: Align::Center,
                    bold: false,
                });
                SceneEdge { from, to, label }
            })
            .collect();

        let mut scene = Self {
            width: to_u32(width),
            height: to_u32(height),
            node_radius: to_u32(node_radius),
            node_alpha: style.node_alpha,
            outline_px: to_u32(outline),
            edge_width_px: to_u32(pt(style.edge_width)),
            edge_alpha: style.edge_alpha,
            title,
            banner,
            edges,
            nodes,
            legend,
        };
        scene.crop_to_content(CROP_MARGIN_INCHES * dpi);
        scene
    }

    /// Area covered by everything this scene draws
    #[must_use]
    pub fn content_extent(&self) -> Extent {
        let mut extent = self.title.extent(0.0);
        if let Some(banner) = &self.banner {
            extent = extent.union(banner.extent(banner.box_padding()));
        }

        let (top_left, bottom_right) = self.legend.frame;
        extent = extent
            .union(Extent::around(top_left, 0.0))
            .union(Extent::around(bottom_right, 0.0));

        let node_reach = f64::from(self.node_radius) + f64::from(self.outline_px);
        for node in &self.nodes {
            extent = extent
                .union(Extent::around(node.center, node_reach))
                .union(node.label.extent(0.0));
        }

        let stroke = f64::from(self.edge_width_px) / 2.0;
        for edge in &self.edges {
            extent = extent
                .union(Extent::around(edge.from, stroke))
                .union(Extent::around(edge.to, stroke));
            if let Some(label) = &edge.label {
                extent = extent.union(label.extent(label.box_padding()));
            }
        }

        extent
    }

    /// Shrink the canvas to the drawn content plus `margin` pixels per side
    fn crop_to_content(&mut self, margin: f64) {
        let extent = self.content_extent();
        self.translate(
            to_i32(margin - extent.left),
            to_i32(margin - extent.top),
        );
        self.width = to_u32(extent.width() + 2.0 * margin);
        self.height = to_u32(extent.height() + 2.0 * margin);
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        let shift = |pixel: &mut Pixel| {
            pixel.0 += dx;
            pixel.1 += dy;
        };

        shift(&mut self.title.anchor);
        if let Some(banner) = &mut self.banner {
            shift(&mut banner.anchor);
        }
        shift(&mut self.legend.frame.0);
        shift(&mut self.legend.frame.1);
        for entry in &mut self.legend.entries {
            shift(&mut entry.marker);
            shift(&mut entry.label.anchor);
        }
        for node in &mut self.nodes {
            shift(&mut node.center);
            shift(&mut node.label.anchor);
        }
        for edge in &mut self.edges {
            shift(&mut edge.from);
            shift(&mut edge.to);
            if let Some(label) = &mut edge.label {
                shift(&mut label.anchor);
            }
        }
    }
}

/// `Nodes: N | Edges: M`, noting when stored coordinates were used
#[must_use]
pub fn banner_text(graph: &CampusGraph, source: LayoutSource) -> String {
    let mut text = format!("Nodes: {} | Edges: {}", graph.node_count(), graph.edge_count());
    if source == LayoutSource::Coordinates {
        text.push_str(" | Using Absolute Coordinates ✓");
    }
    text
}

/// Edge weight as printed on the detailed view; whole numbers have no decimals
#[must_use]
pub fn weight_label(weight: f64) -> String {
    weight.to_string()
}

fn build_legend(style: &RenderStyle, pt: impl Fn(f64) -> f64, origin: (f64, f64)) -> Legend {
    let marker_radius = pt(style.legend_marker.sqrt() / 2.0);
    let font_px = pt(style.legend_font);
    let row = (marker_radius * 2.0).max(font_px) * 1.5;
    let inset = font_px * 0.6;

    let entries: Vec<LegendEntry> = palette::legend()
        .into_iter()
        .enumerate()
        .map(|(i, (kind, color))| {
            let y = origin.1 + inset + row * (i as f64 + 0.5);
            let marker_x = origin.0 + inset + marker_radius;
            LegendEntry {
                color,
                marker: (to_i32(marker_x), to_i32(y)),
                label: Label {
                    text: kind.display_name(),
                    anchor: (to_i32(marker_x + marker_radius + font_px * 0.6), to_i32(y)),
                    font_px,
                    align: Align::Left,
                    bold: false,
                },
            }
        })
        .collect();

    let longest = entries
        .iter()
        .map(|entry| entry.label.text.chars().count())
        .max()
        .unwrap_or(0);
    let frame_width =
        inset * 2.0 + marker_radius * 2.0 + font_px * 0.6 + longest as f64 * font_px * GLYPH_WIDTH;
    let frame_height = inset * 2.0 + row * entries.len() as f64;

    Legend {
        frame: (
            (to_i32(origin.0), to_i32(origin.1)),
            (to_i32(origin.0 + frame_width), to_i32(origin.1 + frame_height)),
        ),
        marker_radius: to_u32(marker_radius),
        marker_outline_px: to_u32(pt(1.0)),
        entries,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_i32(value: f64) -> i32 {
    value.round() as i32
}

/// Rounded, never below one pixel
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u32(value: f64) -> u32 {
    value.round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::{resolve_layout, SpringParams};
    use crate::core::models::{Node, NodeKind};
    use crate::core::render::View;

    fn positioned_graph() -> CampusGraph {
        let mut graph = CampusGraph::new();
        graph.add_node(Node::new("E1".into(), NodeKind::Entrance).with_coordinates(0.0, 0.0));
        graph.add_node(Node::new("H1".into(), NodeKind::Hallway).with_coordinates(100.0, 0.0));
        graph.add_node(Node::new("R1".into(), NodeKind::Room).with_coordinates(100.0, 50.0));
        graph.add_edge("E1", "H1", 35.0).expect("edge");
        graph.add_edge("H1", "R1", 12.5).expect("edge");
        graph
    }

    fn scene(graph: &CampusGraph, view: View, dpi: u32) -> Scene {
        let layout = resolve_layout(graph, &SpringParams::default());
        Scene::build(graph, &layout, &view.style(), dpi)
    }

    fn center(scene: &Scene, id: &str) -> Pixel {
        scene
            .nodes
            .iter()
            .find(|node| node.id == id)
            .map(|node| node.center)
            .expect("node in scene")
    }

    fn assert_margin(scene: &Scene, dpi: u32) {
        let margin = CROP_MARGIN_INCHES * f64::from(dpi);
        let extent = scene.content_extent();
        assert!((extent.left - margin).abs() <= 1.5, "left {}", extent.left);
        assert!((extent.top - margin).abs() <= 1.5, "top {}", extent.top);
        assert!((f64::from(scene.width) - extent.right - margin).abs() <= 1.5);
        assert!((f64::from(scene.height) - extent.bottom - margin).abs() <= 1.5);
    }

    #[test]
    fn canvas_is_cropped_to_content() {
        let graph = positioned_graph();
        for (view, dpi) in [(View::Simple, 300), (View::Detailed, 72), (View::Simple, 20)] {
            let scene = scene(&graph, view, dpi);
            let (figure_w, figure_h) = view.style().figure_size;
            assert!(f64::from(scene.width) < figure_w * f64::from(dpi));
            assert!(f64::from(scene.height) < figure_h * f64::from(dpi));
            assert_margin(&scene, dpi);
        }
    }

    #[test]
    fn marker_sizes_scale_with_dpi() {
        let graph = positioned_graph();
        // sqrt(800) / 2 points at one pixel per point
        assert_eq!(scene(&graph, View::Simple, 72).node_radius, 14);
        assert_eq!(scene(&graph, View::Simple, 144).node_radius, 28);
        assert_eq!(scene(&graph, View::Detailed, 72).edge_width_px, 2);
    }

    #[test]
    fn image_coordinates_keep_their_orientation() {
        let graph = positioned_graph();
        let scene = scene(&graph, View::Simple, 72);

        let e1 = center(&scene, "E1");
        let h1 = center(&scene, "H1");
        let r1 = center(&scene, "R1");
        assert!(h1.0 > e1.0);
        assert_eq!(h1.1, e1.1);
        // R1 sits lower in the source image, so lower on the canvas too
        assert!(r1.1 > h1.1);
        assert_eq!(r1.0, h1.0);
    }

    #[test]
    fn both_axes_share_one_scale() {
        let graph = positioned_graph();
        let scene = scene(&graph, View::Detailed, 72);

        let e1 = center(&scene, "E1");
        let h1 = center(&scene, "H1");
        let r1 = center(&scene, "R1");
        let horizontal = f64::from(h1.0 - e1.0);
        let vertical = f64::from(r1.1 - h1.1);
        assert!((horizontal / vertical - 2.0).abs() < 0.02);
    }

    #[test]
    fn nodes_stay_inside_the_canvas() {
        let graph = positioned_graph();
        let scene = scene(&graph, View::Simple, 50);
        let r = i32::try_from(scene.node_radius).expect("radius");
        for node in &scene.nodes {
            assert!(node.center.0 - r >= 0 && node.center.0 + r <= scene.width as i32);
            assert!(node.center.1 - r >= 0 && node.center.1 + r <= scene.height as i32);
        }
    }

    #[test]
    fn edge_weights_only_on_detailed_view() {
        let graph = positioned_graph();
        assert!(scene(&graph, View::Simple, 72)
            .edges
            .iter()
            .all(|edge| edge.label.is_none()));

        let detailed = scene(&graph, View::Detailed, 72);
        let labels: Vec<&str> = detailed
            .edges
            .iter()
            .filter_map(|edge| edge.label.as_ref().map(|l| l.text.as_str()))
            .collect();
        assert_eq!(labels, vec!["35", "12.5"]);

        let edge = &detailed.edges[0];
        let label = edge.label.as_ref().expect("label");
        assert_eq!(label.anchor.0, (edge.from.0 + edge.to.0) / 2);
    }

    #[test]
    fn banner_mentions_coordinates_only_when_used() {
        let graph = positioned_graph();
        let simple = scene(&graph, View::Simple, 72);
        let banner = simple.banner.expect("banner");
        assert_eq!(banner.text, "Nodes: 3 | Edges: 2 | Using Absolute Coordinates ✓");
        assert!(scene(&graph, View::Detailed, 72).banner.is_none());

        assert_eq!(
            banner_text(&graph, LayoutSource::Spring),
            "Nodes: 3 | Edges: 2"
        );
    }

    #[test]
    fn nodes_take_palette_colors_and_legend_lists_all_kinds() {
        let graph = positioned_graph();
        let scene = scene(&graph, View::Simple, 72);

        assert_eq!(scene.nodes[0].fill, palette::color_for(NodeKind::Entrance));
        assert_eq!(scene.legend.entries.len(), 9);
        assert_eq!(scene.legend.entries[0].label.text, "Entrance");
        assert!(scene
            .legend
            .entries
            .windows(2)
            .all(|pair| pair[0].marker.1 < pair[1].marker.1));
    }

    #[test]
    fn single_node_lands_under_the_title() {
        let mut graph = CampusGraph::new();
        graph.add_node(Node::new("only".into(), NodeKind::Room).with_coordinates(5.0, 5.0));
        let scene = scene(&graph, View::Simple, 72);

        let (x, y) = scene.nodes[0].center;
        assert!((x - scene.title.anchor.0).abs() <= 1);
        assert!(y > scene.title.anchor.1);
    }

    #[test]
    fn node_labels_and_title_are_bold() {
        let graph = positioned_graph();
        let scene = scene(&graph, View::Detailed, 72);
        assert!(scene.title.bold);
        assert!(scene.nodes.iter().all(|node| node.label.bold));
        assert!(scene.legend.entries.iter().all(|entry| !entry.label.bold));
        assert_eq!(scene.legend.marker_outline_px, 1);
    }

    #[test]
    fn viewport_centres_the_narrow_axis() {
        let viewport = Viewport::fit(Some(((0.0, 0.0), (10.0, 1.0))), (0.0, 0.0, 100.0, 100.0));
        assert_eq!(viewport.to_canvas((0.0, 1.0)), (0, 45));
        assert_eq!(viewport.to_canvas((10.0, 0.0)), (100, 55));
    }
}
