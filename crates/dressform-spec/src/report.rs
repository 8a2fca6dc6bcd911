//! Report types for try-on and adjustment results.
//!
//! A report documents one try-on or fit-adjustment call: the body shape
//! used, the garment reference, any adjustment parameters, the written
//! outputs with their hashes, and recoverable warnings (classifier
//! fallback, warp degeneracy).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Warning code: statistical classifier fell back to the rule-based one.
pub const WARN_CLASSIFIER_FALLBACK: &str = "W201";
/// Warning code: warp degenerated to a resize-only transform.
pub const WARN_WARP_FALLBACK: &str = "W202";

/// Provenance and outcome of a single try-on or adjustment call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryOnReport {
    /// Report schema version (always 1).
    pub report_version: u32,
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Body shape the pipeline used, when one was involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_shape: Option<crate::shape::BodyShape>,
    /// Garment id or source path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garment: Option<String>,
    /// Garment type after detection or catalog override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garment_type: Option<crate::garment::GarmentType>,
    /// Adjustment parameters, for adjustment calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustments: Option<FitAdjustments>,
    /// Written artifacts with their BLAKE3 hashes.
    pub outputs: Vec<OutputRecord>,
    /// Recoverable conditions encountered along the way.
    pub warnings: Vec<ReportWarning>,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
}

impl TryOnReport {
    /// An empty successful report skeleton.
    pub fn new() -> Self {
        Self {
            report_version: REPORT_VERSION,
            ok: true,
            body_shape: None,
            garment: None,
            garment_type: None,
            adjustments: None,
            outputs: Vec::new(),
            warnings: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Standard report filename next to a result image.
    pub fn filename(stem: &str) -> String {
        format!("{}.report.json", stem)
    }
}

impl Default for TryOnReport {
    fn default() -> Self {
        Self::new()
    }
}

/// A written artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub path: PathBuf,
    /// Hex-encoded BLAKE3 hash of the file bytes.
    pub hash: String,
}

/// Recoverable condition noted in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// Warning code (e.g. "W201").
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ReportWarning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Post-hoc fit adjustment parameters. Each value is clamped to
/// [-10, 10] by the adjustment engine; 0 means no change on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FitAdjustments {
    /// Positive narrows the garment.
    pub tightness: f64,
    /// Positive lengthens the lower body.
    pub length: f64,
    /// Positive widens the shoulder band.
    pub shoulder_width: f64,
}

impl FitAdjustments {
    pub fn is_zero(&self) -> bool {
        self.tightness == 0.0 && self.length == 0.0 && self.shoulder_width == 0.0
    }

    /// Human description of the applied adjustments.
    pub fn describe(&self) -> String {
        format!(
            "fit adjusted with {:+} tightness, {:+} length, and {:+} shoulder width",
            self.tightness, self.length, self.shoulder_width
        )
    }
}
