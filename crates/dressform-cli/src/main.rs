//! Dressform CLI - virtual dressing room from the command line
//!
//! Subcommands cover the whole pipeline: classify a body shape, render
//! a silhouette, try a garment on, adjust a finished render, and ask
//! for catalog recommendations.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use dressform_cli::commands;
use dressform_cli::measurement_args::MeasurementArgs;
use dressform_spec::FitAdjustments;

/// Dressform - measurement-driven virtual try-on
#[derive(Parser)]
#[command(name = "dressform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a body shape and size band from measurements
    Classify {
        #[command(flatten)]
        measurements: MeasurementArgs,

        /// Path to a trained classifier artifact (JSON)
        #[arg(long)]
        classifier: Option<PathBuf>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a parametric body silhouette PNG
    Silhouette {
        #[command(flatten)]
        measurements: MeasurementArgs,

        /// Output PNG path
        #[arg(short, long)]
        out: PathBuf,

        /// Canvas width in pixels
        #[arg(long, default_value = "600")]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value = "800")]
        height: u32,

        /// Path to a trained classifier artifact (JSON)
        #[arg(long)]
        classifier: Option<PathBuf>,

        /// Also write a body-model snapshot JSON here
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Try a garment on: render, warp, and composite
    TryOn {
        #[command(flatten)]
        measurements: MeasurementArgs,

        /// Catalog id of the garment to try on
        #[arg(long)]
        garment_id: Option<String>,

        /// Direct path to a garment PNG (bypasses the catalog)
        #[arg(long)]
        image: Option<PathBuf>,

        /// Composite onto this base PNG instead of a rendered silhouette
        #[arg(long)]
        base: Option<PathBuf>,

        /// Data directory (results/, temp/, templates/)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Path to the garment catalog (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Path to a trained classifier artifact (JSON)
        #[arg(long)]
        classifier: Option<PathBuf>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Adjust the fit of a previously rendered try-on image
    Adjust {
        /// Path to the try-on image to adjust
        #[arg(short, long)]
        input: PathBuf,

        /// Tightness in [-10, 10]; positive narrows
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        tightness: f64,

        /// Length in [-10, 10]; positive lengthens the lower half
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        length: f64,

        /// Shoulder width in [-10, 10]; positive widens the band
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        shoulder_width: f64,

        /// Data directory (results/, temp/, templates/)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Recommend catalog garments for a measurement set
    Recommend {
        #[command(flatten)]
        measurements: MeasurementArgs,

        /// Only consider garments with this style tag
        #[arg(long)]
        style: Option<String>,

        /// Maximum number of recommendations to print
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Data directory (results/, temp/, templates/)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Path to the garment catalog (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            measurements,
            classifier,
            json,
        } => commands::classify::run(&measurements.to_measurements(), classifier.as_deref(), json),
        Commands::Silhouette {
            measurements,
            out,
            width,
            height,
            classifier,
            snapshot,
            json,
        } => commands::silhouette::run(
            &measurements.to_measurements(),
            &out,
            width,
            height,
            classifier.as_deref(),
            snapshot.as_deref(),
            json,
        ),
        Commands::TryOn {
            measurements,
            garment_id,
            image,
            base,
            data_dir,
            catalog,
            classifier,
            json,
        } => commands::try_on::run(
            &measurements.to_measurements(),
            garment_id.as_deref(),
            image.as_deref(),
            base.as_deref(),
            &data_dir.unwrap_or_else(commands::default_data_dir),
            catalog.as_deref(),
            classifier.as_deref(),
            json,
        ),
        Commands::Adjust {
            input,
            tightness,
            length,
            shoulder_width,
            data_dir,
            json,
        } => commands::adjust::run(
            &input,
            &FitAdjustments {
                tightness,
                length,
                shoulder_width,
            },
            &data_dir.unwrap_or_else(commands::default_data_dir),
            json,
        ),
        Commands::Recommend {
            measurements,
            style,
            limit,
            data_dir,
            catalog,
            json,
        } => commands::recommend::run(
            &measurements.to_measurements(),
            style.as_deref(),
            limit,
            &data_dir.unwrap_or_else(commands::default_data_dir),
            catalog.as_deref(),
            json,
        ),
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{} {:#}", "error:".red().bold(), error);
            ExitCode::FAILURE
        }
    }
}
