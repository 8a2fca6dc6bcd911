//! Classify command: body shape and size from measurements.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use dressform_spec::{size_for_bust, Measurements};
use dressform_tryon::ShapeClassifier;

use super::build_classifier;

pub fn run(
    measurements: &Measurements,
    classifier_artifact: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    measurements.validate()?;
    let classifier = build_classifier(classifier_artifact)?;
    let resolved = measurements.resolve();
    let (shape, warning) = classifier.classify_traced(&resolved);
    let size = size_for_bust(resolved.bust);

    if json_output {
        let mut value = serde_json::json!({
            "body_shape": shape,
            "size": size,
            "measurements": resolved,
        });
        if let Some(w) = &warning {
            value["warnings"] = serde_json::json!([w]);
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{} {}", "Body shape:".cyan().bold(), shape);
        println!("{} {}", "Size:".cyan().bold(), size);
        println!(
            "{} bust {:.1} / waist {:.1} / hips {:.1}",
            "Resolved:".dimmed(),
            resolved.bust,
            resolved.waist,
            resolved.hips
        );
        if let Some(w) = &warning {
            println!("{} [{}] {}", "Warning:".yellow().bold(), w.code, w.message);
        }
    }

    Ok(ExitCode::SUCCESS)
}
