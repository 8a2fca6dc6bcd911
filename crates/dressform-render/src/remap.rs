//! Coordinate-field remapping.
//!
//! A [`CoordField`] stores, for every destination pixel, the fractional
//! source coordinate to sample. Warps build the whole field first, then
//! remap in one pass; pixels whose source coordinate falls outside the
//! source raster come out transparent.

use crate::buffer::{MaskBuffer, PixelBuffer};
use crate::color::Color;

/// Dense per-pixel source coordinates for a destination raster.
#[derive(Debug, Clone)]
pub struct CoordField {
    pub width: u32,
    pub height: u32,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl CoordField {
    /// The identity field: every destination pixel samples itself.
    pub fn identity(width: u32, height: u32) -> Self {
        let mut xs = Vec::with_capacity((width * height) as usize);
        let mut ys = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                xs.push(x as f64);
                ys.push(y as f64);
            }
        }
        Self {
            width,
            height,
            xs,
            ys,
        }
    }

    /// Build from a closure mapping destination (x, y) to source (x, y).
    pub fn from_fn(width: u32, height: u32, f: impl Fn(f64, f64) -> (f64, f64)) -> Self {
        let mut xs = Vec::with_capacity((width * height) as usize);
        let mut ys = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = f(x as f64, y as f64);
                xs.push(sx);
                ys.push(sy);
            }
        }
        Self {
            width,
            height,
            xs,
            ys,
        }
    }

    /// Source coordinate for destination pixel (x, y).
    pub fn get(&self, x: u32, y: u32) -> (f64, f64) {
        let i = (y * self.width + x) as usize;
        (self.xs[i], self.ys[i])
    }

    /// True when any stored coordinate is NaN or infinite.
    pub fn has_non_finite(&self) -> bool {
        self.xs.iter().chain(self.ys.iter()).any(|v| !v.is_finite())
    }
}

/// Remap a pixel buffer through a coordinate field with bilinear
/// sampling. Destination pixels whose source falls outside the raster
/// are transparent.
pub fn remap_pixels(source: &PixelBuffer, field: &CoordField) -> PixelBuffer {
    let mut out = PixelBuffer::new(field.width, field.height, Color::transparent());
    for y in 0..field.height {
        for x in 0..field.width {
            let (sx, sy) = field.get(x, y);
            if sx < 0.0
                || sy < 0.0
                || sx > source.width as f64 - 1.0
                || sy > source.height as f64 - 1.0
            {
                continue;
            }
            out.set(x as i64, y as i64, source.sample_bilinear(sx, sy));
        }
    }
    out
}

/// Remap a mask through a coordinate field. Masks use nearest-neighbor
/// sampling so the warped coverage stays binary where the input was.
pub fn remap_mask(source: &MaskBuffer, field: &CoordField) -> MaskBuffer {
    let mut out = MaskBuffer::new(field.width, field.height, 0.0);
    for y in 0..field.height {
        for x in 0..field.width {
            let (sx, sy) = field.get(x, y);
            let nx = sx.round() as i64;
            let ny = sy.round() as i64;
            if nx < 0 || ny < 0 || nx >= source.width as i64 || ny >= source.height as i64 {
                continue;
            }
            out.set(x as i64, y as i64, source.get(nx, ny));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_remap_is_lossless() {
        let mut source = PixelBuffer::new(4, 4, Color::black());
        source.set(1, 2, Color::white());
        source.set(3, 0, Color::rgb(0.5, 0.25, 0.125));

        let field = CoordField::identity(4, 4);
        let out = remap_pixels(&source, &field);
        assert_eq!(out, source);
    }

    #[test]
    fn test_horizontal_shift() {
        let mut source = PixelBuffer::new(4, 1, Color::black());
        source.set(0, 0, Color::white());

        // Destination x samples source x - 1.
        let field = CoordField::from_fn(4, 1, |x, y| (x - 1.0, y));
        let out = remap_pixels(&source, &field);

        assert_eq!(out.get(1, 0), Color::white());
        // Destination 0 sampled source -1, which is out of range.
        assert_eq!(out.get(0, 0), Color::transparent());
    }

    #[test]
    fn test_out_of_range_source_is_transparent() {
        let source = PixelBuffer::new(2, 2, Color::white());
        let field = CoordField::from_fn(2, 2, |x, y| (x + 10.0, y));
        let out = remap_pixels(&source, &field);
        assert_eq!(out.get(0, 0), Color::transparent());
        assert_eq!(out.get(1, 1), Color::transparent());
    }

    #[test]
    fn test_mask_remap_nearest_keeps_binary() {
        let mut mask = MaskBuffer::new(3, 1, 0.0);
        mask.set(1, 0, 1.0);

        let field = CoordField::from_fn(3, 1, |x, y| (x + 0.4, y));
        let out = remap_mask(&mask, &field);

        // 0.4 rounds to the same column, 1.4 rounds to 1.
        assert_eq!(out.get(1, 0), 1.0);
        assert_eq!(out.get(2, 0), 0.0);
    }

    #[test]
    fn test_non_finite_detection() {
        let mut field = CoordField::identity(2, 2);
        assert!(!field.has_non_finite());
        field.xs[1] = f64::NAN;
        assert!(field.has_non_finite());
    }
}
