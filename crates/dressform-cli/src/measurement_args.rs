//! Shared measurement flags for every body-facing subcommand.

use clap::Args;
use dressform_spec::Measurements;

/// Body measurements in centimeters. Missing values fall back to the
/// documented defaults.
#[derive(Args, Debug, Clone)]
pub struct MeasurementArgs {
    /// Body height in cm
    #[arg(id = "body_height", long = "body-height")]
    pub height: Option<f64>,

    /// Bust circumference in cm
    #[arg(long)]
    pub bust: Option<f64>,

    /// Waist circumference in cm
    #[arg(long)]
    pub waist: Option<f64>,

    /// Hip circumference in cm
    #[arg(long)]
    pub hips: Option<f64>,

    /// Shoulder width in cm
    #[arg(long)]
    pub shoulder_width: Option<f64>,

    /// Arm length in cm
    #[arg(long)]
    pub arm_length: Option<f64>,

    /// Leg length in cm
    #[arg(long)]
    pub leg_length: Option<f64>,

    /// Inseam length in cm
    #[arg(long)]
    pub inseam: Option<f64>,
}

impl MeasurementArgs {
    pub fn to_measurements(&self) -> Measurements {
        Measurements {
            height: self.height,
            bust: self.bust,
            waist: self.waist,
            hips: self.hips,
            shoulder_width: self.shoulder_width,
            arm_length: self.arm_length,
            leg_length: self.leg_length,
            inseam: self.inseam,
        }
    }
}
