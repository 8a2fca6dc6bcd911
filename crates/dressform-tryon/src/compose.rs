//! Garment placement and alpha compositing.
//!
//! Placement turns a garment type plus body segments into a canvas
//! rectangle; compositing blends the warped garment into that rectangle
//! through its coverage mask. The region of interest is clipped to the
//! canvas, and a region that clips away entirely is an error rather
//! than a silent no-op.

use dressform_render::PixelBuffer;
use dressform_spec::{GarmentType, TryOnError};

use crate::body::BodyModel;
use crate::garment::GarmentImage;

/// Canvas-space placement for a garment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Compute where a garment of the given type sits on the body.
///
/// Tops hang from the shoulders to the hips, bottoms from the waist to
/// mid-calf, full pieces from the shoulders to mid-calf. Widths leave a
/// drape margin beyond the widest covered segment.
pub fn placement_for(garment_type: GarmentType, model: &BodyModel) -> Placement {
    let s = &model.segments;
    let hem_y = s.hips.y + s.hips.height;

    let (top, bottom, width) = match garment_type {
        GarmentType::Top => (s.shoulders.y, s.hips.y, s.bust.width * 1.15),
        GarmentType::Bottom => (
            s.waist.y,
            hem_y + s.legs.length * 0.7,
            s.hips.width * 1.15,
        ),
        GarmentType::Full => (
            s.shoulders.y,
            hem_y + s.legs.length * 0.6,
            s.hips.width.max(s.bust.width) * 1.15,
        ),
    };

    let width = width.round().max(1.0) as u32;
    let height = (bottom - top).round().max(1.0) as u32;
    Placement {
        x: (model.center_x() - width as f64 / 2.0).round() as i64,
        y: top.round() as i64,
        width,
        height,
    }
}

/// Blend a garment into the canvas at an offset, masked by its
/// coverage. Pixels outside the canvas are clipped; if nothing of the
/// garment remains visible the call fails with a dimension mismatch.
pub fn blend_garment(
    canvas: &mut PixelBuffer,
    garment: &GarmentImage,
    offset_x: i64,
    offset_y: i64,
) -> Result<(), TryOnError> {
    let x0 = offset_x.max(0);
    let y0 = offset_y.max(0);
    let x1 = (offset_x + garment.width() as i64).min(canvas.width as i64);
    let y1 = (offset_y + garment.height() as i64).min(canvas.height as i64);

    if x1 <= x0 || y1 <= y0 {
        return Err(TryOnError::DimensionMismatch {
            context: "garment overlay".into(),
            width: x1 - x0,
            height: y1 - y0,
        });
    }

    for y in y0..y1 {
        for x in x0..x1 {
            let gx = x - offset_x;
            let gy = y - offset_y;
            let alpha = garment.mask.get(gx, gy).clamp(0.0, 1.0);
            if alpha <= 0.0 {
                continue;
            }
            let mut source = garment.pixels.get(gx, gy);
            source.a = alpha;
            let blended = source.over(&canvas.get(x, y));
            canvas.set(x, y, blended);
        }
    }
    Ok(())
}

/// Place and blend a garment in one step. A garment that does not match
/// its placement rectangle is resized to it first; the warp already
/// emits placement-sized rasters, so that path only runs for mismatches.
pub fn compose_try_on(
    canvas: &mut PixelBuffer,
    garment: &GarmentImage,
    garment_type: GarmentType,
    model: &BodyModel,
) -> Result<Placement, TryOnError> {
    let placement = placement_for(garment_type, model);
    if garment.width() == placement.width && garment.height() == placement.height {
        blend_garment(canvas, garment, placement.x, placement.y)?;
    } else {
        let fitted = GarmentImage {
            pixels: garment.pixels.resize(placement.width, placement.height),
            mask: garment.mask.resize(placement.width, placement.height),
        };
        blend_garment(canvas, &fitted, placement.x, placement.y)?;
    }
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyModel;
    use crate::classifier::RuleClassifier;
    use dressform_render::{Color, MaskBuffer};
    use dressform_spec::Measurements;

    fn default_model() -> BodyModel {
        BodyModel::from_measurements(&Measurements::default(), &RuleClassifier).unwrap()
    }

    fn opaque_garment(width: u32, height: u32, color: Color) -> GarmentImage {
        GarmentImage {
            pixels: PixelBuffer::new(width, height, color),
            mask: MaskBuffer::new(width, height, 1.0),
        }
    }

    #[test]
    fn test_placements_are_ordered_and_on_canvas() {
        let model = default_model();
        let top = placement_for(GarmentType::Top, &model);
        let bottom = placement_for(GarmentType::Bottom, &model);
        let full = placement_for(GarmentType::Full, &model);

        assert!(top.y < bottom.y);
        assert_eq!(full.y, top.y);
        assert!(full.height > top.height);
        assert!(bottom.y as f64 > model.segments.bust.y);
        assert!(full.x >= 0);
        assert!(full.x + (full.width as i64) <= model.canvas_width as i64);
    }

    #[test]
    fn test_blend_replaces_covered_pixels() {
        let mut canvas = PixelBuffer::new(20, 20, Color::white());
        let garment = opaque_garment(4, 4, Color::rgb(0.1, 0.2, 0.3));
        blend_garment(&mut canvas, &garment, 5, 5).unwrap();

        let blended = canvas.get(6, 6);
        assert!((blended.r - 0.1).abs() < 1e-9);
        assert_eq!(canvas.get(0, 0), Color::white());
    }

    #[test]
    fn test_full_opacity_same_size_overlay_returns_the_garment() {
        let mut canvas = PixelBuffer::new(12, 16, Color::rgb(0.9, 0.9, 0.9));
        let garment = opaque_garment(12, 16, Color::rgb(0.3, 0.5, 0.7));
        blend_garment(&mut canvas, &garment, 0, 0).unwrap();
        assert_eq!(canvas, garment.pixels);
    }

    #[test]
    fn test_blend_respects_partial_alpha() {
        let mut canvas = PixelBuffer::new(8, 8, Color::black());
        let mut garment = opaque_garment(2, 2, Color::white());
        garment.mask.set(0, 0, 0.5);
        garment.mask.set(1, 1, 0.0);
        blend_garment(&mut canvas, &garment, 0, 0).unwrap();

        assert!((canvas.get(0, 0).r - 0.5).abs() < 1e-9);
        assert_eq!(canvas.get(1, 1), Color::black());
    }

    #[test]
    fn test_blend_clips_at_canvas_edge() {
        let mut canvas = PixelBuffer::new(10, 10, Color::white());
        let garment = opaque_garment(6, 6, Color::black());
        // Half off the right edge: the visible half still blends.
        blend_garment(&mut canvas, &garment, 7, 2).unwrap();
        assert_eq!(canvas.get(8, 4), Color::black());
        assert_eq!(canvas.get(5, 4), Color::white());
    }

    #[test]
    fn test_fully_off_canvas_is_dimension_mismatch() {
        let mut canvas = PixelBuffer::new(10, 10, Color::white());
        let garment = opaque_garment(4, 4, Color::black());
        let err = blend_garment(&mut canvas, &garment, 50, 50).unwrap_err();
        assert!(matches!(err, TryOnError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_compose_paints_the_torso_region() {
        let model = default_model();
        let mut canvas = PixelBuffer::new(model.canvas_width, model.canvas_height, Color::white());
        let garment = opaque_garment(60, 90, Color::rgb(0.8, 0.1, 0.1));

        let placement = compose_try_on(&mut canvas, &garment, GarmentType::Full, &model).unwrap();
        let cx = model.center_x() as i64;
        let cy = placement.y + placement.height as i64 / 2;
        let pixel = canvas.get(cx, cy);
        assert!((pixel.r - 0.8).abs() < 1e-9);
    }
}
