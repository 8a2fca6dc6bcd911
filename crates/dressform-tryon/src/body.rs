//! Body model: canvas-space geometry derived from measurements.
//!
//! The model owns everything the silhouette renderer and the garment
//! placement logic need: resolved measurements, the classified shape,
//! the size band, and the per-part segments in canvas pixels. Segments
//! are recomputed from scratch whenever measurements change; nothing is
//! patched incrementally.

use dressform_spec::snapshot::{ArmSegments, BodyModelSnapshot, BodySegments, LegSegments, Segment};
use dressform_spec::{size_for_bust, BodyShape, Measurements, ReportWarning, ResolvedMeasurements, TryOnError};

use crate::classifier::ShapeClassifier;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 600;
/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 800;

/// Fraction of the canvas height the figure occupies.
const FIGURE_HEIGHT_FRACTION: f64 = 0.85;
/// Fraction of the canvas height above the shoulders.
const SHOULDER_Y_FRACTION: f64 = 0.15;

/// A body ready for rendering and garment fitting.
#[derive(Debug, Clone)]
pub struct BodyModel {
    measurements: Measurements,
    resolved: ResolvedMeasurements,
    pub shape: BodyShape,
    pub size: String,
    pub segments: BodySegments,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Warnings raised while building (classifier fallback).
    pub warnings: Vec<ReportWarning>,
}

impl BodyModel {
    /// Build a model on the default canvas.
    pub fn from_measurements(
        measurements: &Measurements,
        classifier: &dyn ShapeClassifier,
    ) -> Result<Self, TryOnError> {
        Self::with_canvas(
            measurements,
            classifier,
            DEFAULT_CANVAS_WIDTH,
            DEFAULT_CANVAS_HEIGHT,
        )
    }

    /// Build a model on an explicit canvas.
    pub fn with_canvas(
        measurements: &Measurements,
        classifier: &dyn ShapeClassifier,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<Self, TryOnError> {
        if canvas_width == 0 || canvas_height == 0 {
            return Err(TryOnError::InvalidInput(format!(
                "canvas must be non-empty, got {}x{}",
                canvas_width, canvas_height
            )));
        }
        measurements.validate()?;
        let resolved = measurements.resolve();
        let (shape, warning) = classifier.classify_traced(&resolved);
        let segments = compute_segments(&resolved, shape, canvas_width, canvas_height);

        Ok(Self {
            measurements: measurements.clone(),
            resolved,
            shape,
            size: size_for_bust(resolved.bust).to_string(),
            segments,
            canvas_width,
            canvas_height,
            warnings: warning.into_iter().collect(),
        })
    }

    /// Rebuild from a snapshot. Complete snapshots reuse the stored
    /// segments verbatim; incomplete ones recompute from measurements.
    pub fn from_snapshot(
        snapshot: &BodyModelSnapshot,
        classifier: &dyn ShapeClassifier,
    ) -> Result<Self, TryOnError> {
        let [canvas_width, canvas_height] = snapshot.canvas_size;
        if snapshot.is_complete() {
            let resolved = snapshot.measurements.resolve();
            // is_complete guarantees all three are present.
            let segments = snapshot.body_segments.ok_or_else(|| {
                TryOnError::Artifact("complete snapshot missing segments".into())
            })?;
            let shape = snapshot.body_shape.ok_or_else(|| {
                TryOnError::Artifact("complete snapshot missing shape".into())
            })?;
            let size = snapshot
                .size
                .clone()
                .ok_or_else(|| TryOnError::Artifact("complete snapshot missing size".into()))?;
            return Ok(Self {
                measurements: snapshot.measurements.clone(),
                resolved,
                shape,
                size,
                segments,
                canvas_width,
                canvas_height,
                warnings: Vec::new(),
            });
        }
        Self::with_canvas(
            &snapshot.measurements,
            classifier,
            canvas_width,
            canvas_height,
        )
    }

    /// Canonical model for a shape at default proportions, on the
    /// default canvas. Serves as the warp template when a caller
    /// supplies no girth measurements.
    pub fn template_for_shape(shape: BodyShape) -> Self {
        let measurements = Measurements::default();
        let resolved = measurements.resolve();
        let segments =
            compute_segments(&resolved, shape, DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT);
        Self {
            measurements,
            resolved,
            shape,
            size: size_for_bust(resolved.bust).to_string(),
            segments,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            warnings: Vec::new(),
        }
    }

    /// Snapshot the full derived state.
    pub fn snapshot(&self) -> BodyModelSnapshot {
        BodyModelSnapshot {
            measurements: self.measurements.clone(),
            body_segments: Some(self.segments),
            body_shape: Some(self.shape),
            size: Some(self.size.clone()),
            canvas_size: [self.canvas_width, self.canvas_height],
        }
    }

    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    pub fn resolved(&self) -> &ResolvedMeasurements {
        &self.resolved
    }

    /// Horizontal center of the figure.
    pub fn center_x(&self) -> f64 {
        self.canvas_width as f64 / 2.0
    }
}

/// Derive canvas-space segments from resolved measurements.
///
/// The figure occupies 85% of the canvas height; widths scale linearly
/// with the measurements and the per-shape factor table.
pub fn compute_segments(
    m: &ResolvedMeasurements,
    shape: BodyShape,
    canvas_width: u32,
    canvas_height: u32,
) -> BodySegments {
    let canvas_h = canvas_height as f64;
    let scale = canvas_h * FIGURE_HEIGHT_FRACTION / m.height;
    let center_x = canvas_width as f64 / 2.0;
    let shoulder_y = canvas_h * SHOULDER_Y_FRACTION;
    let f = shape.factors();

    let thin_band = 0.05 * m.height * scale;
    let wide_band = 0.08 * m.height * scale;

    let shoulders = Segment {
        x: center_x,
        y: shoulder_y,
        width: m.shoulder_width * scale * f.shoulder,
        height: thin_band,
    };
    let bust = Segment {
        x: center_x,
        y: shoulder_y + 0.12 * m.height * scale,
        width: m.bust * scale * f.bust,
        height: wide_band,
    };
    let waist = Segment {
        x: center_x,
        y: bust.y + 0.15 * m.height * scale * f.waist_y,
        width: m.waist * scale * f.waist,
        height: thin_band,
    };
    let hips = Segment {
        x: center_x,
        y: waist.y + 0.15 * m.height * scale,
        width: m.hips * scale * f.hips,
        height: wide_band,
    };

    BodySegments {
        shoulders,
        bust,
        waist,
        hips,
        arms: ArmSegments {
            length: m.arm_length * scale,
            width: m.bust * 0.18 * scale * f.arm_width,
        },
        legs: LegSegments {
            length: m.leg_length * scale,
            width: m.hips * 0.25 * scale * f.leg_width,
            thigh_factor: f.thigh,
        },
    }
}
