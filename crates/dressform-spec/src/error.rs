//! Error taxonomy for the try-on pipeline.
//!
//! Every caller-visible failure is one of these variants; each carries a
//! stable string code for machine consumers. Recoverable conditions
//! (classifier fallback, warp degeneracy) are report warnings, not errors
//! — see [`crate::report`].

use thiserror::Error;

/// A request-scoped failure. One failed try-on never affects subsequent
/// requests or persisted state.
#[derive(Debug, Error)]
pub enum TryOnError {
    /// Missing or invalid caller input (bad measurement, bad parameter).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A referenced resource does not exist (image path, garment id).
    /// No fallback image is synthesized.
    #[error("not found: {0}")]
    NotFound(String),

    /// A region of interest collapsed to nothing, or buffers could not be
    /// brought to compatible dimensions. Carries the offending dimensions.
    #[error("dimension mismatch in {context}: {width}x{height}")]
    DimensionMismatch {
        context: String,
        width: i64,
        height: i64,
    },

    /// A classifier or catalog artifact is malformed. Recovered internally
    /// by the classifier (rule-based fallback); only surfaced when an
    /// artifact is loaded explicitly.
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Image decode or encode failure.
    #[error("image error: {0}")]
    Image(String),

    /// Filesystem failure while reading or writing an image or artifact.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TryOnError {
    /// Stable error code for reports and machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            TryOnError::InvalidInput(_) => "E101",
            TryOnError::NotFound(_) => "E102",
            TryOnError::DimensionMismatch { .. } => "E103",
            TryOnError::Artifact(_) => "E104",
            TryOnError::Image(_) => "E105",
            TryOnError::Io(_) => "E106",
        }
    }
}
