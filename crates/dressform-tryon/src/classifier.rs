//! Body shape classification.
//!
//! Two implementations sit behind [`ShapeClassifier`]: a rule-based
//! classifier over measurement ratios, and a nearest-centroid classifier
//! loaded from a trained artifact. The artifact path always degrades to
//! the rules rather than failing a request: a malformed artifact or a
//! non-finite feature vector produces the rule answer plus a report
//! warning.

use serde::{Deserialize, Serialize};
use std::path::Path;

use dressform_spec::report::WARN_CLASSIFIER_FALLBACK;
use dressform_spec::{classify_proportions, BodyShape, ReportWarning, ResolvedMeasurements, TryOnError};

/// Number of features the statistical classifier consumes.
const FEATURE_COUNT: usize = 6;

/// Maps resolved measurements to a body shape.
pub trait ShapeClassifier {
    fn classify(&self, measurements: &ResolvedMeasurements) -> BodyShape;

    /// Classify and report whether a fallback path was taken.
    fn classify_traced(
        &self,
        measurements: &ResolvedMeasurements,
    ) -> (BodyShape, Option<ReportWarning>) {
        (self.classify(measurements), None)
    }
}

/// Threshold-based classifier over bust/waist/hips ratios.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl ShapeClassifier for RuleClassifier {
    fn classify(&self, measurements: &ResolvedMeasurements) -> BodyShape {
        classify_proportions(measurements.bust, measurements.waist, measurements.hips)
    }
}

/// Serialized nearest-centroid model: a standard scaler plus one
/// centroid per class in scaled feature space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub feature_means: Vec<f64>,
    pub feature_stds: Vec<f64>,
    pub classes: Vec<BodyShape>,
    pub centroids: Vec<Vec<f64>>,
}

impl ClassifierArtifact {
    /// Structural validation: consistent dimensions, finite values,
    /// strictly positive stds, at least one class.
    pub fn validate(&self) -> Result<(), TryOnError> {
        if self.feature_means.len() != FEATURE_COUNT || self.feature_stds.len() != FEATURE_COUNT {
            return Err(TryOnError::Artifact(format!(
                "expected {} features, artifact has {} means and {} stds",
                FEATURE_COUNT,
                self.feature_means.len(),
                self.feature_stds.len()
            )));
        }
        if self.classes.is_empty() {
            return Err(TryOnError::Artifact("artifact has no classes".into()));
        }
        if self.centroids.len() != self.classes.len() {
            return Err(TryOnError::Artifact(format!(
                "{} classes but {} centroids",
                self.classes.len(),
                self.centroids.len()
            )));
        }
        for centroid in &self.centroids {
            if centroid.len() != FEATURE_COUNT {
                return Err(TryOnError::Artifact(format!(
                    "centroid has {} features, expected {}",
                    centroid.len(),
                    FEATURE_COUNT
                )));
            }
            if centroid.iter().any(|v| !v.is_finite()) {
                return Err(TryOnError::Artifact("non-finite centroid value".into()));
            }
        }
        if self.feature_means.iter().any(|v| !v.is_finite()) {
            return Err(TryOnError::Artifact("non-finite feature mean".into()));
        }
        if self.feature_stds.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(TryOnError::Artifact(
                "feature stds must be finite and positive".into(),
            ));
        }
        Ok(())
    }
}

/// Nearest-centroid classifier backed by a validated artifact. Falls
/// back to [`RuleClassifier`] whenever prediction cannot produce a
/// well-defined answer.
#[derive(Debug, Clone)]
pub struct ArtifactClassifier {
    artifact: ClassifierArtifact,
    rules: RuleClassifier,
}

impl ArtifactClassifier {
    pub fn new(artifact: ClassifierArtifact) -> Result<Self, TryOnError> {
        artifact.validate()?;
        Ok(Self {
            artifact,
            rules: RuleClassifier,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, TryOnError> {
        let artifact: ClassifierArtifact = serde_json::from_str(json)
            .map_err(|e| TryOnError::Artifact(format!("classifier parse error: {}", e)))?;
        Self::new(artifact)
    }

    pub fn load(path: &Path) -> Result<Self, TryOnError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TryOnError::NotFound(format!("classifier {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Raw feature vector: absolute measurements plus pairwise ratios.
    fn features(measurements: &ResolvedMeasurements) -> [f64; FEATURE_COUNT] {
        [
            measurements.bust,
            measurements.waist,
            measurements.hips,
            measurements.bust_to_waist(),
            measurements.waist_to_hips(),
            measurements.bust_to_hips(),
        ]
    }

    /// Nearest-centroid prediction in scaled feature space, or `None`
    /// when the scaled features are not finite.
    pub fn predict(&self, measurements: &ResolvedMeasurements) -> Option<BodyShape> {
        let raw = Self::features(measurements);
        let mut scaled = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            scaled[i] = (raw[i] - self.artifact.feature_means[i]) / self.artifact.feature_stds[i];
            if !scaled[i].is_finite() {
                return None;
            }
        }

        let mut best: Option<(BodyShape, f64)> = None;
        for (class, centroid) in self.artifact.classes.iter().zip(&self.artifact.centroids) {
            let distance: f64 = scaled
                .iter()
                .zip(centroid)
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            match best {
                Some((_, d)) if d <= distance => {}
                _ => best = Some((*class, distance)),
            }
        }
        best.map(|(class, _)| class)
    }
}

impl ShapeClassifier for ArtifactClassifier {
    fn classify(&self, measurements: &ResolvedMeasurements) -> BodyShape {
        self.classify_traced(measurements).0
    }

    fn classify_traced(
        &self,
        measurements: &ResolvedMeasurements,
    ) -> (BodyShape, Option<ReportWarning>) {
        match self.predict(measurements) {
            Some(shape) => (shape, None),
            None => {
                log::warn!("classifier produced no prediction, using measurement rules");
                (
                    self.rules.classify(measurements),
                    Some(ReportWarning::new(
                        WARN_CLASSIFIER_FALLBACK,
                        "statistical classifier unavailable, used rule-based classification",
                    )),
                )
            }
        }
    }
}
