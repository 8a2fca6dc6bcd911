//! Silhouette command: render the parametric body figure to a PNG.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use dressform_render::png_io::{write_rgba, PngConfig};
use dressform_spec::Measurements;
use dressform_tryon::{render_silhouette, BodyModel};

use super::build_classifier;

#[allow(clippy::too_many_arguments)]
pub fn run(
    measurements: &Measurements,
    out: &Path,
    width: u32,
    height: u32,
    classifier_artifact: Option<&Path>,
    snapshot: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    let classifier = build_classifier(classifier_artifact)?;
    let model = BodyModel::with_canvas(measurements, classifier.as_ref(), width, height)?;

    let canvas = render_silhouette(&model);
    let hash = write_rgba(&canvas, out, &PngConfig::default())
        .with_context(|| format!("failed to write {}", out.display()))?;

    if let Some(snapshot_path) = snapshot {
        model
            .snapshot()
            .save(snapshot_path)
            .with_context(|| format!("failed to write {}", snapshot_path.display()))?;
    }

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "path": out,
                "hash": hash,
                "body_shape": model.shape,
                "size": model.size,
                "canvas": [width, height],
                "warnings": model.warnings,
            }))?
        );
    } else {
        println!(
            "{} {} ({}, size {})",
            "Silhouette written:".green().bold(),
            out.display(),
            model.shape,
            model.size
        );
        for warning in &model.warnings {
            println!(
                "{} [{}] {}",
                "Warning:".yellow().bold(),
                warning.code,
                warning.message
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
