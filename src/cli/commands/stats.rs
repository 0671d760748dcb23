//! Stats command handler

use super::{fail, input_path, load_input};
use campus_graph::config::Config;
use campus_graph::core::report::{reporter_for, GraphSummary, ReportFormat};
use campus_graph::{error, info};
use std::path::Path;

/// Run the stats command.
///
/// # Arguments
/// * `input_file` - Graph JSON file; the configured input when `None`
/// * `format_str` - Report format (text, json, markdown)
/// * `output_file` - Report destination; stdout when `None`. A path without
///   an extension gets the format's extension.
/// * `config` - Configuration with the default input path
pub fn run(
    input_file: Option<&Path>,
    format_str: &str,
    output_file: Option<&Path>,
    config: &Config,
) {
    if let Err(message) = report(input_file, format_str, output_file, config) {
        fail(&message);
    }
}

fn report(
    input_file: Option<&Path>,
    format_str: &str,
    output_file: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let format: ReportFormat = format_str.parse().map_err(|e| format!("✗ {e}"))?;
    let input = input_path(input_file, config);
    let graph = load_input(&input)?;

    let summary = GraphSummary::new(input.display().to_string(), &graph).map_err(|e| {
        error!("Statistics failed for {}: {e}", input.display());
        format!("✗ Failed to compute statistics: {e}")
    })?;
    let reporter = reporter_for(format);

    match output_file {
        Some(requested) => {
            let path = &format.output_path(requested);
            reporter.generate(&summary, path).map_err(|e| {
                error!("Writing {format} report to {} failed: {e}", path.display());
                format!("✗ Failed to write report {}: {e}", path.display())
            })?;
            info!("Report written in {format} format");
            println!("✓ Report generated: {}", path.display());
        }
        None => {
            let content = reporter
                .render(&summary)
                .map_err(|e| format!("✗ Failed to render report: {e}"))?;
            print!("{content}");
        }
    }
    Ok(())
}
