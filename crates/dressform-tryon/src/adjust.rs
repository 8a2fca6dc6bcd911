//! Post-hoc fit adjustment of a rendered try-on image.
//!
//! Three sequential transforms, each driven by one parameter in
//! [-10, 10] and scaled by a common divisor of 40:
//!
//! 1. tightness: horizontal scale of the whole image about its center
//! 2. length: vertical scale of the lower half, extending or cropping
//!    the canvas
//! 3. shoulder width: horizontal scale of the shoulder band only
//!
//! All-zero adjustments return a bit-identical copy of the input.
//! Revealed areas stay transparent, matching the try-on background.

use dressform_render::{Color, PixelBuffer};
use dressform_spec::FitAdjustments;

/// Adjustment parameter range.
pub const ADJUSTMENT_RANGE: f64 = 10.0;
/// Divisor mapping a parameter to a scale delta (10 -> 25%).
const DIVISOR: f64 = 40.0;

/// Shoulder band as fractions of the image height.
const SHOULDER_BAND_TOP: f64 = 0.2;
const SHOULDER_BAND_BOTTOM: f64 = 0.3;

const FILL: Color = Color::transparent();

/// Clamp every parameter into the supported range.
pub fn clamp_adjustments(adjustments: &FitAdjustments) -> FitAdjustments {
    FitAdjustments {
        tightness: adjustments.tightness.clamp(-ADJUSTMENT_RANGE, ADJUSTMENT_RANGE),
        length: adjustments.length.clamp(-ADJUSTMENT_RANGE, ADJUSTMENT_RANGE),
        shoulder_width: adjustments
            .shoulder_width
            .clamp(-ADJUSTMENT_RANGE, ADJUSTMENT_RANGE),
    }
}

/// Apply fit adjustments to a rendered image.
pub fn adjust_fit(image: &PixelBuffer, adjustments: &FitAdjustments) -> PixelBuffer {
    let adjustments = clamp_adjustments(adjustments);
    if adjustments.is_zero() {
        return image.clone();
    }

    let mut result = image.clone();
    if adjustments.tightness != 0.0 {
        result = apply_tightness(&result, adjustments.tightness);
    }
    if adjustments.length != 0.0 {
        result = apply_length(&result, adjustments.length);
    }
    if adjustments.shoulder_width != 0.0 {
        result = apply_shoulder_width(&result, adjustments.shoulder_width);
    }
    result
}

/// Horizontal scale about the image center. Positive tightness narrows.
fn apply_tightness(image: &PixelBuffer, tightness: f64) -> PixelBuffer {
    let scale = 1.0 - tightness / DIVISOR;
    let center = image.width as f64 / 2.0;
    let mut out = PixelBuffer::new(image.width, image.height, FILL);

    for y in 0..image.height as i64 {
        for x in 0..image.width as i64 {
            let src_x = center + (x as f64 - center) / scale;
            if src_x < 0.0 || src_x > image.width as f64 - 1.0 {
                continue;
            }
            out.set(x, y, image.sample_bilinear(src_x, y as f64));
        }
    }
    out
}

/// Vertical scale of the lower half. Positive length stretches the
/// bottom of the image onto a taller canvas; negative crops it shorter.
fn apply_length(image: &PixelBuffer, length: f64) -> PixelBuffer {
    let scale = 1.0 + length / DIVISOR;
    let split = image.height as i64 / 2;
    let lower = image.height as i64 - split;
    let new_lower = (lower as f64 * scale).round().max(0.0) as i64;
    let new_height = (split + new_lower).max(1) as u32;

    let mut out = PixelBuffer::new(image.width, new_height, FILL);
    for y in 0..new_height as i64 {
        let src_y = if y < split {
            y as f64
        } else {
            split as f64 + (y - split) as f64 / scale
        };
        if src_y > image.height as f64 - 1.0 {
            continue;
        }
        for x in 0..image.width as i64 {
            out.set(x, y, image.sample_bilinear(x as f64, src_y));
        }
    }
    out
}

/// Horizontal scale of the shoulder band only, re-centered so the
/// figure stays in place. Positive widens the band.
fn apply_shoulder_width(image: &PixelBuffer, shoulder_width: f64) -> PixelBuffer {
    let scale = 1.0 + shoulder_width / DIVISOR;
    let center = image.width as f64 / 2.0;
    let band_top = (image.height as f64 * SHOULDER_BAND_TOP) as i64;
    let band_bottom = (image.height as f64 * SHOULDER_BAND_BOTTOM) as i64;

    let mut out = image.clone();
    for y in band_top..band_bottom {
        for x in 0..image.width as i64 {
            let src_x = center + (x as f64 - center) / scale;
            if src_x < 0.0 || src_x > image.width as f64 - 1.0 {
                out.set(x, y, FILL);
                continue;
            }
            out.set(x, y, image.sample_bilinear(src_x, y as f64));
        }
    }
    out
}
