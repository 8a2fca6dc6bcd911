//! Pixel and mask buffers.
//!
//! [`PixelBuffer`] is a row-major RGBA raster with f64 components;
//! [`MaskBuffer`] is a single-channel alpha raster in [0, 1]. Both use
//! the same coordinate convention: (0, 0) is the top-left pixel, x grows
//! right, y grows down.

use crate::color::Color;

/// Row-major RGBA raster.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a buffer filled with one color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width * height) as usize],
        }
    }

    /// Pixel at (x, y). Out-of-bounds reads are transparent, so samplers
    /// near the edges need no special casing.
    pub fn get(&self, x: i64, y: i64) -> Color {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Color::transparent();
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize]
    }

    /// Set pixel at (x, y). Out-of-bounds writes are discarded.
    pub fn set(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
    }

    /// Bilinear sample at a fractional pixel coordinate.
    pub fn sample_bilinear(&self, x: f64, y: f64) -> Color {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let x0 = x0 as i64;
        let y0 = y0 as i64;

        let top = self.get(x0, y0).lerp(&self.get(x0 + 1, y0), fx);
        let bottom = self.get(x0, y0 + 1).lerp(&self.get(x0 + 1, y0 + 1), fx);
        top.lerp(&bottom, fy)
    }

    /// Resize with bilinear sampling.
    pub fn resize(&self, width: u32, height: u32) -> PixelBuffer {
        let mut out = PixelBuffer::new(width, height, Color::transparent());
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            return out;
        }
        let sx = self.width as f64 / width as f64;
        let sy = self.height as f64 / height as f64;
        for y in 0..height {
            for x in 0..width {
                let src_x = (x as f64 + 0.5) * sx - 0.5;
                let src_y = (y as f64 + 0.5) * sy - 0.5;
                out.set(x as i64, y as i64, self.sample_bilinear(src_x, src_y));
            }
        }
        out
    }

    /// Flatten into 8-bit RGBA bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            data.extend_from_slice(&pixel.to_rgba8());
        }
        data
    }

    /// Build from 8-bit RGBA bytes, row-major.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for chunk in data.chunks_exact(4).take((width * height) as usize) {
            pixels.push(Color::from_rgba8([chunk[0], chunk[1], chunk[2], chunk[3]]));
        }
        pixels.resize((width * height) as usize, Color::transparent());
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Single-channel alpha raster, values in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBuffer {
    pub width: u32,
    pub height: u32,
    values: Vec<f64>,
}

impl MaskBuffer {
    pub fn new(width: u32, height: u32, fill: f64) -> Self {
        Self {
            width,
            height,
            values: vec![fill; (width * height) as usize],
        }
    }

    /// Value at (x, y); out of bounds is 0 (fully transparent).
    pub fn get(&self, x: i64, y: i64) -> f64 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0.0;
        }
        self.values[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: i64, y: i64, value: f64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.values[(y as u32 * self.width + x as u32) as usize] = value;
    }

    /// Bilinear sample at a fractional pixel coordinate.
    pub fn sample_bilinear(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let x0 = x0 as i64;
        let y0 = y0 as i64;

        let top = self.get(x0, y0) * (1.0 - fx) + self.get(x0 + 1, y0) * fx;
        let bottom = self.get(x0, y0 + 1) * (1.0 - fx) + self.get(x0 + 1, y0 + 1) * fx;
        top * (1.0 - fy) + bottom * fy
    }

    /// Resize with bilinear sampling.
    pub fn resize(&self, width: u32, height: u32) -> MaskBuffer {
        let mut out = MaskBuffer::new(width, height, 0.0);
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            return out;
        }
        let sx = self.width as f64 / width as f64;
        let sy = self.height as f64 / height as f64;
        for y in 0..height {
            for x in 0..width {
                let src_x = (x as f64 + 0.5) * sx - 0.5;
                let src_y = (y as f64 + 0.5) * sy - 0.5;
                out.set(x as i64, y as i64, self.sample_bilinear(src_x, src_y));
            }
        }
        out
    }

    /// Count of values above a threshold within one row. Used by column
    /// scans that locate garment extents.
    pub fn row_coverage(&self, y: u32, threshold: f64) -> usize {
        if y >= self.height {
            return 0;
        }
        let start = (y * self.width) as usize;
        self.values[start..start + self.width as usize]
            .iter()
            .filter(|&&v| v > threshold)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_transparent() {
        let buffer = PixelBuffer::new(4, 4, Color::white());
        assert_eq!(buffer.get(-1, 0), Color::transparent());
        assert_eq!(buffer.get(0, 4), Color::transparent());
        assert_eq!(buffer.get(2, 2), Color::white());
    }

    #[test]
    fn test_out_of_bounds_writes_discarded() {
        let mut buffer = PixelBuffer::new(2, 2, Color::black());
        buffer.set(5, 5, Color::white());
        assert_eq!(buffer.get(0, 0), Color::black());
    }

    #[test]
    fn test_bilinear_at_pixel_center_is_exact() {
        let mut buffer = PixelBuffer::new(3, 3, Color::black());
        buffer.set(1, 1, Color::white());
        let sampled = buffer.sample_bilinear(1.0, 1.0);
        assert_eq!(sampled, Color::white());
    }

    #[test]
    fn test_bilinear_midpoint_averages() {
        let mut buffer = PixelBuffer::new(2, 1, Color::black());
        buffer.set(1, 0, Color::white());
        let sampled = buffer.sample_bilinear(0.5, 0.0);
        assert!((sampled.r - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_resize_preserves_flat_fill() {
        let buffer = PixelBuffer::new(8, 8, Color::rgb(0.25, 0.5, 0.75));
        let resized = buffer.resize(16, 4);
        assert_eq!(resized.width, 16);
        assert_eq!(resized.height, 4);
        let c = resized.get(7, 2);
        assert!((c.r - 0.25).abs() < 1e-9);
        assert!((c.b - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_rgba8_round_trip() {
        let mut buffer = PixelBuffer::new(2, 2, Color::transparent());
        buffer.set(0, 0, Color::from_rgba8([255, 230, 210, 255]));
        buffer.set(1, 1, Color::from_rgba8([10, 20, 30, 128]));

        let bytes = buffer.to_rgba8();
        let back = PixelBuffer::from_rgba8(2, 2, &bytes);
        assert_eq!(buffer, back);
    }

    #[test]
    fn test_mask_row_coverage() {
        let mut mask = MaskBuffer::new(4, 2, 0.0);
        mask.set(1, 0, 1.0);
        mask.set(2, 0, 0.6);
        mask.set(3, 0, 0.05);
        assert_eq!(mask.row_coverage(0, 0.1), 2);
        assert_eq!(mask.row_coverage(1, 0.1), 0);
        assert_eq!(mask.row_coverage(9, 0.1), 0);
    }
}
