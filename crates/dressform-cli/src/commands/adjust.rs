//! Adjust command: re-shape a finished try-on render.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use dressform_spec::FitAdjustments;

use super::build_fitting_room;

pub fn run(
    input: &Path,
    adjustments: &FitAdjustments,
    data_dir: &Path,
    json_output: bool,
) -> Result<ExitCode> {
    let room = build_fitting_room(data_dir, None, None)?;
    let outcome = room.adjust(input, adjustments)?;

    if json_output {
        println!("{}", outcome.report.to_json_pretty()?);
    } else {
        println!(
            "{} {}",
            "Adjusted image written:".green().bold(),
            outcome.image_path.display()
        );
        println!("{} {}", "Applied:".dimmed(), adjustments.describe());
    }

    Ok(ExitCode::SUCCESS)
}
