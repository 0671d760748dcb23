//! Render command handler
//!
//! Loads a graph, resolves node positions, writes the simple and detailed PNG
//! renderings and prints the statistics block.

use super::{fail, input_path, load_input};
use campus_graph::config::Config;
use campus_graph::core::layout::{resolve_layout, LayoutSource};
use campus_graph::core::render::{render_view, View};
use campus_graph::core::report::{GraphSummary, ReportGenerator, TextReporter};
use campus_graph::{error, info, verbose};
use std::fs;
use std::path::Path;

/// Run the render command.
///
/// # Arguments
/// * `input_file` - Graph JSON file; the configured input when `None`
/// * `config` - Configuration with output paths, DPI and layout settings
pub fn run(input_file: Option<&Path>, config: &Config) {
    if let Err(message) = render(input_file, config) {
        fail(&message);
    }
}

fn render(input_file: Option<&Path>, config: &Config) -> Result<(), String> {
    let input = input_path(input_file, config);
    let graph = load_input(&input)?;

    let params = config.spring_params();
    let layout = resolve_layout(&graph, &params);
    match layout.source() {
        LayoutSource::Coordinates => {
            println!("✅ Using absolute coordinates from graph data");
            if let Some(image) = graph.metadata() {
                println!("📐 Original image size: {}x{}px", image.width, image.height);
            }
        }
        LayoutSource::Spring => {
            println!("⚠️ No coordinates found, using spring layout");
            verbose!(
                "  Spring layout: k = {}, iterations = {}, seed = {}",
                params.k,
                params.iterations,
                params.seed
            );
        }
    }

    let output_dir = Path::new(&config.paths.output_dir);
    fs::create_dir_all(output_dir).map_err(|e| {
        error!("Cannot create output directory {}: {e}", output_dir.display());
        format!(
            "✗ Failed to create output directory {}: {e}",
            output_dir.display()
        )
    })?;

    let options = config.render_options();
    let views = [
        (View::Simple, config.simple_image_path(), "\n✅ Graph visualization"),
        (
            View::Detailed,
            config.detailed_image_path(),
            "✅ Detailed graph visualization",
        ),
    ];
    for (view, path, label) in views {
        render_view(&graph, &layout, view, &options, &path).map_err(|e| {
            error!("Rendering {} failed: {e}", path.display());
            format!("✗ Failed to render {}: {e}", path.display())
        })?;
        info!("Wrote {view:?} view at {} dpi", options.dpi);
        println!("{label} saved as '{}'", path.display());
    }

    let summary = GraphSummary::new(input.display().to_string(), &graph)
        .and_then(|summary| TextReporter.render(&summary))
        .map_err(|e| {
            error!("Statistics failed for {}: {e}", input.display());
            format!("✗ Failed to compute statistics: {e}")
        })?;
    print!("\n{summary}");

    if layout.source() == LayoutSource::Coordinates {
        println!(
            "\n✅ Layout Preserved: Your graph maintains the exact same layout as in the graph builder!"
        );
    }
    Ok(())
}
