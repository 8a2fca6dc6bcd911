//! Round-trippable body-model snapshot format.
//!
//! A snapshot captures everything needed to reconstruct a body model:
//! measurements, derived segments, shape, size, and canvas dimensions.
//! Loading reuses the stored segments only when every derived field is
//! present; otherwise the loader recomputes from measurements (that logic
//! lives in `dressform-tryon`, which owns segment computation).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TryOnError;
use crate::measurements::Measurements;
use crate::shape::BodyShape;

/// One horizontal body cross-section (canvas pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Horizontal center.
    pub x: f64,
    /// Vertical anchor.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Arm geometry shared by both arms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmSegments {
    pub length: f64,
    pub width: f64,
}

/// Leg geometry shared by both legs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegSegments {
    pub length: f64,
    pub width: f64,
    /// Extra width multiplier over the thigh portion.
    pub thigh_factor: f64,
}

/// Derived body geometry, keyed by part. Owned by the body model and
/// recomputed on every measurement update; consumers receive copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySegments {
    pub shoulders: Segment,
    pub bust: Segment,
    pub waist: Segment,
    pub hips: Segment,
    pub arms: ArmSegments,
    pub legs: LegSegments,
}

/// Persisted body-model state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyModelSnapshot {
    pub measurements: Measurements,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_segments: Option<BodySegments>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_shape: Option<BodyShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Canvas [width, height] the segments were computed for.
    pub canvas_size: [u32; 2],
}

impl BodyModelSnapshot {
    /// True when every derived field is present, meaning the loader can
    /// reuse the stored segments without recomputation.
    pub fn is_complete(&self) -> bool {
        self.body_segments.is_some() && self.body_shape.is_some() && self.size.is_some()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, TryOnError> {
        serde_json::from_str(json)
            .map_err(|e| TryOnError::Artifact(format!("snapshot parse error: {}", e)))
    }

    pub fn save(&self, path: &Path) -> Result<(), TryOnError> {
        let json = self
            .to_json_pretty()
            .map_err(|e| TryOnError::Artifact(format!("snapshot encode error: {}", e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, TryOnError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TryOnError::NotFound(format!("snapshot {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_segments() -> BodySegments {
        BodySegments {
            shoulders: Segment {
                x: 300.0,
                y: 120.0,
                width: 168.0,
                height: 34.0,
            },
            bust: Segment {
                x: 300.0,
                y: 201.6,
                width: 360.0,
                height: 54.4,
            },
            waist: Segment {
                x: 300.0,
                y: 303.6,
                width: 285.0,
                height: 34.0,
            },
            hips: Segment {
                x: 300.0,
                y: 405.6,
                width: 380.0,
                height: 54.4,
            },
            arms: ArmSegments {
                length: 240.0,
                width: 64.8,
            },
            legs: LegSegments {
                length: 320.0,
                width: 95.0,
                thigh_factor: 1.0,
            },
        }
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = BodyModelSnapshot {
            measurements: Measurements {
                height: Some(170.0),
                bust: Some(90.0),
                waist: Some(70.0),
                hips: Some(95.0),
                ..Default::default()
            },
            body_segments: Some(sample_segments()),
            body_shape: Some(BodyShape::Hourglass),
            size: Some("M".to_string()),
            canvas_size: [600, 800],
        };

        let json = snapshot.to_json_pretty().unwrap();
        let back = BodyModelSnapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, back);
        assert!(back.is_complete());
    }

    #[test]
    fn test_incomplete_snapshot_detected() {
        let snapshot = BodyModelSnapshot {
            measurements: Measurements::default(),
            body_segments: None,
            body_shape: Some(BodyShape::Apple),
            size: None,
            canvas_size: [600, 800],
        };
        assert!(!snapshot.is_complete());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body_model.json");

        let snapshot = BodyModelSnapshot {
            measurements: Measurements {
                bust: Some(88.0),
                ..Default::default()
            },
            body_segments: None,
            body_shape: None,
            size: None,
            canvas_size: [600, 800],
        };
        snapshot.save(&path).unwrap();

        let back = BodyModelSnapshot::load(&path).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = BodyModelSnapshot::load(Path::new("/nonexistent/body.json")).unwrap_err();
        assert!(matches!(err, TryOnError::NotFound(_)));
    }
}
