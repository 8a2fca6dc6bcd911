//! Recommend command: score the catalog against a measurement set.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use dressform_spec::Measurements;

use super::build_fitting_room;

pub fn run(
    measurements: &Measurements,
    style: Option<&str>,
    limit: usize,
    data_dir: &Path,
    catalog: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    let room = build_fitting_room(data_dir, catalog, None)?;
    let recommendations = room.recommend(measurements, style, limit)?;

    if json_output {
        let rows: Vec<serde_json::Value> = recommendations
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id,
                    "name": r.name,
                    "score": r.score,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if recommendations.is_empty() {
        println!("{}", "No garments fit well enough to recommend.".yellow());
    } else {
        println!("{}", "Recommended garments:".cyan().bold());
        for r in &recommendations {
            println!("  {:.2}  {}  {}", r.score, r.id.bold(), r.name.dimmed());
        }
    }

    Ok(ExitCode::SUCCESS)
}
