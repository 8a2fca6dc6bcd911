//! Try-on command: composite a garment onto the rendered body, or onto
//! a caller-supplied base image via `--base`.

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dressform_spec::Measurements;
use dressform_tryon::GarmentSource;

use super::build_fitting_room;

#[allow(clippy::too_many_arguments)]
pub fn run(
    measurements: &Measurements,
    garment_id: Option<&str>,
    image: Option<&Path>,
    base: Option<&Path>,
    data_dir: &Path,
    catalog: Option<&Path>,
    classifier_artifact: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    let source = match (garment_id, image) {
        (Some(id), None) => GarmentSource::CatalogId(id.to_string()),
        (None, Some(path)) => GarmentSource::Path(PathBuf::from(path)),
        (Some(_), Some(_)) => bail!("use either --garment-id or --image, not both"),
        (None, None) => bail!("a garment is required: pass --garment-id or --image"),
    };

    let room = build_fitting_room(data_dir, catalog, classifier_artifact)?;
    let outcome = match base {
        Some(base_path) => room.try_on_over(base_path, measurements, &source)?,
        None => room.try_on(measurements, &source)?,
    };

    if json_output {
        println!("{}", outcome.report.to_json_pretty()?);
    } else {
        println!(
            "{} {}",
            "Try-on written:".green().bold(),
            outcome.image_path.display()
        );
        if let Some(shape) = outcome.report.body_shape {
            println!("{} {}", "Body shape:".dimmed(), shape);
        }
        if let Some(garment_type) = outcome.report.garment_type {
            println!("{} {}", "Garment type:".dimmed(), garment_type);
        }
        for warning in &outcome.report.warnings {
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
