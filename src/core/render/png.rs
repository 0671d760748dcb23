//! Rasterize a [`Scene`] into a PNG with the `plotters` bitmap backend

use super::scene::{Align, Label, Scene};
use crate::core::error::{GraphError, Result};
use crate::core::palette::{Rgb, BANNER_COLOR, EDGE_COLOR};
use crate::{debug, warn};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Family name labels are drawn with
const FONT_FAMILY: &str = "sans-serif";

/// Locations searched when no font is configured
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Bold faces tried next to a regular font file, by file-name suffix
const BOLD_SUFFIXES: &[(&str, &str)] = &[
    ("-Regular.ttf", "-Bold.ttf"),
    (".ttf", "-Bold.ttf"),
    (".ttf", "bd.ttf"),
    (".ttf", " Bold.ttf"),
];

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// Register label fonts once per process.
///
/// `preferred` is tried before the built-in list of system locations. A bold
/// face is looked up next to the chosen file; without one the regular face
/// doubles as bold. The first call decides; later calls return the same answer.
pub fn ensure_font(preferred: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            let Some(regular) = load_font(&path, FontStyle::Normal) else {
                continue;
            };
            debug!("Using label font {}", path.display());

            let bold = bold_candidates(&path)
                .into_iter()
                .find(|candidate| load_font(candidate, FontStyle::Bold).is_some());
            match bold {
                Some(bold) => debug!("Using bold label font {}", bold.display()),
                None => {
                    if register_font(FONT_FAMILY, FontStyle::Bold, regular).is_err() {
                        warn!("No bold face for {}", path.display());
                    }
                }
            }
            return true;
        }

        warn!("No usable TrueType font found; images will be drawn without text");
        false
    })
}

/// Read and register one font file, returning its bytes on success
fn load_font(path: &Path, style: FontStyle) -> Option<&'static [u8]> {
    let bytes = fs::read(path).ok()?;
    // plotters keeps registered font data for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    if register_font(FONT_FAMILY, style, bytes).is_ok() {
        Some(bytes)
    } else {
        warn!("Ignoring unreadable font {}", path.display());
        None
    }
}

fn bold_candidates(regular: &Path) -> Vec<PathBuf> {
    let Some(name) = regular.file_name().and_then(|name| name.to_str()) else {
        return Vec::new();
    };
    BOLD_SUFFIXES
        .iter()
        .filter_map(|(suffix, bold_suffix)| {
            name.strip_suffix(suffix)
                .map(|stem| regular.with_file_name(format!("{stem}{bold_suffix}")))
        })
        .filter(|candidate| candidate.is_file())
        .collect()
}

/// Draw a scene and write it to `output` as PNG.
///
/// Text is only drawn when `with_text` is set, i.e. a font has been registered.
///
/// # Errors
/// Returns [`GraphError::Render`] if drawing fails or the file cannot be written.
pub fn draw_png(scene: &Scene, output: &Path, with_text: bool) -> Result<()> {
    let root = BitMapBackend::new(output, (scene.width, scene.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let edge_style = color(EDGE_COLOR)
        .mix(scene.edge_alpha)
        .stroke_width(scene.edge_width_px);
    for edge in &scene.edges {
        root.draw(&PathElement::new(vec![edge.from, edge.to], edge_style))
            .map_err(render_error)?;
    }

    let radius = scene.node_radius;
    let outline = BLACK.stroke_width(scene.outline_px);
    for node in &scene.nodes {
        let fill = color(node.fill).mix(scene.node_alpha).filled();
        root.draw(&Circle::new(node.center, radius, fill))
            .map_err(render_error)?;
        root.draw(&Circle::new(node.center, radius, outline))
            .map_err(render_error)?;
    }

    let (top_left, bottom_right) = scene.legend.frame;
    root.draw(&Rectangle::new(
        [top_left, bottom_right],
        WHITE.mix(0.9).filled(),
    ))
    .map_err(render_error)?;
    root.draw(&Rectangle::new(
        [top_left, bottom_right],
        color(EDGE_COLOR).stroke_width(1),
    ))
    .map_err(render_error)?;
    let swatch_outline = BLACK.stroke_width(scene.legend.marker_outline_px);
    for entry in &scene.legend.entries {
        root.draw(&Circle::new(
            entry.marker,
            scene.legend.marker_radius,
            color(entry.color).mix(scene.node_alpha).filled(),
        ))
        .map_err(render_error)?;
        root.draw(&Circle::new(
            entry.marker,
            scene.legend.marker_radius,
            swatch_outline,
        ))
        .map_err(render_error)?;
    }

    if with_text {
        for edge in &scene.edges {
            if let Some(label) = &edge.label {
                draw_boxed_label(&root, label, WHITE.filled())?;
            }
        }
        for node in &scene.nodes {
            draw_label(&root, &node.label)?;
        }
        for entry in &scene.legend.entries {
            draw_label(&root, &entry.label)?;
        }
        draw_label(&root, &scene.title)?;
        if let Some(banner) = &scene.banner {
            let fill = color(BANNER_COLOR).mix(0.5).filled();
            draw_boxed_label(&root, banner, fill)?;
        }
    }

    root.present().map_err(render_error)?;
    Ok(())
}

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

fn text_style(label: &Label) -> TextStyle<'static> {
    let hpos = match label.align {
        Align::Center => HPos::Center,
        Align::Left => HPos::Left,
    };
    let face = if label.bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    (FONT_FAMILY, label.font_px, face)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(hpos, VPos::Center))
}

fn draw_label(root: &Canvas<'_>, label: &Label) -> Result<()> {
    root.draw(&Text::new(label.text.as_str(), label.anchor, text_style(label)))
        .map_err(render_error)
}

/// Label on a rounded box so it stays legible over edges
fn draw_boxed_label(root: &Canvas<'_>, label: &Label, fill: ShapeStyle) -> Result<()> {
    let style = text_style(label);
    let (w, h) = root
        .estimate_text_size(&label.text, &style)
        .map_err(render_error)?;
    let pad = label.box_padding();
    let left = match label.align {
        Align::Center => f64::from(label.anchor.0) - f64::from(w) / 2.0,
        Align::Left => f64::from(label.anchor.0),
    };
    let top = f64::from(label.anchor.1) - f64::from(h) / 2.0;
    let corners = (
        (left - pad, top - pad),
        (left + f64::from(w) + pad, top + f64::from(h) + pad),
    );
    root.draw(&Polygon::new(rounded_rect(corners, pad), fill))
        .map_err(render_error)?;
    draw_label(root, label)
}

/// Outline of a rectangle with corners rounded to `radius`
fn rounded_rect(corners: ((f64, f64), (f64, f64)), radius: f64) -> Vec<(i32, i32)> {
    const STEPS: u32 = 6;
    let ((left, top), (right, bottom)) = corners;
    let radius = radius.min((right - left) / 2.0).min((bottom - top) / 2.0).max(0.0);
    // Corner centres with the start angle of each quarter arc, clockwise from top-right
    let arcs = [
        (right - radius, top + radius, -FRAC_PI_2),
        (right - radius, bottom - radius, 0.0),
        (left + radius, bottom - radius, FRAC_PI_2),
        (left + radius, top + radius, PI),
    ];
    arcs.iter()
        .flat_map(|&(cx, cy, start)| {
            (0..=STEPS).map(move |step| {
                let angle = start + FRAC_PI_2 * f64::from(step) / f64::from(STEPS);
                (to_px(cx + radius * angle.cos()), to_px(cy + radius * angle.sin()))
            })
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn to_px(value: f64) -> i32 {
    value.round() as i32
}

const fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn render_error<E: std::fmt::Display>(err: E) -> GraphError {
    GraphError::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_rect_stays_inside_its_corners() {
        let points = rounded_rect(((10.0, 20.0), (50.0, 40.0)), 4.0);
        assert_eq!(points.len(), 28);
        assert!(points
            .iter()
            .all(|&(x, y)| (10..=50).contains(&x) && (20..=40).contains(&y)));
        // Corners are cut off
        assert!(!points.contains(&(10, 20)));
        assert!(points.contains(&(50, 24)));
    }

    #[test]
    fn corner_radius_is_clamped_to_the_box() {
        let points = rounded_rect(((0.0, 0.0), (10.0, 2.0)), 5.0);
        assert!(points.iter().all(|&(_, y)| (0..=2).contains(&y)));
    }

    #[test]
    fn bold_face_is_found_next_to_the_regular_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let regular = dir.path().join("LiberationSans-Regular.ttf");
        let bold = dir.path().join("LiberationSans-Bold.ttf");
        fs::write(&regular, b"regular").expect("write");
        fs::write(&bold, b"bold").expect("write");

        assert_eq!(bold_candidates(&regular), vec![bold]);
        assert!(bold_candidates(&dir.path().join("Missing.ttf")).is_empty());
    }
}
