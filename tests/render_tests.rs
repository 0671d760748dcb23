//! PNG output tests; rendered at low resolution to keep them fast

use campus_graph::core::layout::{resolve_layout, SpringParams};
use campus_graph::core::loader::load_graph;
use campus_graph::core::render::{render_view, RenderOptions, Scene, View};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

/// Width and height from the IHDR chunk
fn png_size(bytes: &[u8]) -> (u32, u32) {
    let read = |at: usize| {
        u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    };
    (read(16), read(20))
}

fn render_both(sample: &str, dpi: u32) -> (TempDir, PathBuf, PathBuf) {
    let graph = load_graph(sample_path(sample)).expect("load sample");
    let layout = resolve_layout(&graph, &SpringParams::default());
    let options = RenderOptions { dpi, font: None };

    let dir = TempDir::new().expect("temp dir");
    let simple = dir.path().join("simple.png");
    let detailed = dir.path().join("detailed.png");
    render_view(&graph, &layout, View::Simple, &options, &simple).expect("simple view");
    render_view(&graph, &layout, View::Detailed, &options, &detailed).expect("detailed view");
    (dir, simple, detailed)
}

#[test]
fn writes_both_views_cropped_to_their_content() {
    let (_dir, simple, detailed) = render_both("campus_sample.json", 20);
    let graph = load_graph(sample_path("campus_sample.json")).expect("load sample");
    let layout = resolve_layout(&graph, &SpringParams::default());

    for (path, view) in [(simple, View::Simple), (detailed, View::Detailed)] {
        let bytes = fs::read(&path).expect("png");
        assert_eq!(bytes[..8], PNG_SIGNATURE);

        let scene = Scene::build(&graph, &layout, &view.style(), 20);
        let (width, height) = png_size(&bytes);
        assert_eq!((width, height), (scene.width, scene.height));

        // Smaller than the full figure, which would be 20 px per inch
        let (figure_w, figure_h) = view.style().figure_size;
        assert!(f64::from(width) < figure_w * 20.0, "{view:?} width {width}");
        assert!(f64::from(height) <= figure_h * 20.0, "{view:?} height {height}");
    }
}

#[test]
fn renders_spring_layout_graphs() {
    let (_dir, simple, detailed) = render_both("no_coords.json", 10);
    assert!(simple.exists());
    assert!(detailed.exists());
}

#[test]
fn unwritable_destination_is_a_render_error() {
    let graph = load_graph(sample_path("disconnected.json")).expect("load sample");
    let layout = resolve_layout(&graph, &SpringParams::default());
    let dir = TempDir::new().expect("temp dir");
    let target = dir.path().join("missing").join("out.png");

    let result = render_view(
        &graph,
        &layout,
        View::Simple,
        &RenderOptions { dpi: 10, font: None },
        &target,
    );
    assert!(result.is_err());
}
