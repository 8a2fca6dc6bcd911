//! Garment image loading, alpha keying, and type detection.
//!
//! Garment sources are PNG files with or without an alpha channel.
//! Sources without one get their coverage mask derived by background
//! keying: near-white pixels are treated as backdrop. Vertical coverage
//! of the resulting mask then decides whether the garment is a top, a
//! bottom, or a full-body piece.

use std::path::Path;

use dressform_render::png_io::{read_rgba, PngError};
use dressform_render::{MaskBuffer, PixelBuffer};
use dressform_spec::{GarmentType, TryOnError};

/// Luminance at or above this (8-bit) counts as backdrop when keying.
const BACKGROUND_LUMINANCE: f64 = 240.0 / 255.0;

/// Mask values above this count as covered in row scans.
const COVERAGE_THRESHOLD: f64 = 0.1;

/// A garment raster plus its coverage mask.
#[derive(Debug, Clone)]
pub struct GarmentImage {
    pub pixels: PixelBuffer,
    pub mask: MaskBuffer,
}

impl GarmentImage {
    /// Load a garment PNG. Missing files are `NotFound`; undecodable
    /// files are `Image` errors.
    pub fn load(path: &Path) -> Result<Self, TryOnError> {
        let decoded = read_rgba(path).map_err(|e| match e {
            PngError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                TryOnError::NotFound(format!("garment image {}", path.display()))
            }
            PngError::Io(io) => TryOnError::Io(io),
            other => TryOnError::Image(format!("{}: {}", path.display(), other)),
        })?;
        Ok(Self::from_decoded(decoded.pixels, decoded.had_alpha))
    }

    /// Build from decoded pixels. When the source carried alpha, the
    /// mask is that channel; otherwise near-white pixels are keyed out.
    pub fn from_decoded(pixels: PixelBuffer, had_alpha: bool) -> Self {
        let mut mask = MaskBuffer::new(pixels.width, pixels.height, 0.0);
        for y in 0..pixels.height as i64 {
            for x in 0..pixels.width as i64 {
                let pixel = pixels.get(x, y);
                let value = if had_alpha {
                    pixel.a
                } else if pixel.luminance() >= BACKGROUND_LUMINANCE {
                    0.0
                } else {
                    1.0
                };
                mask.set(x, y, value);
            }
        }
        Self { pixels, mask }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width
    }

    pub fn height(&self) -> u32 {
        self.pixels.height
    }

    /// Classify by vertical coverage of the mask.
    ///
    /// Coverage reaching both the top and bottom fifth of the image is a
    /// full-body garment; top-anchored coverage ending above 70% height
    /// is a top; coverage starting below 30% and reaching the bottom is
    /// a bottom. Anything ambiguous, including an empty mask, defaults
    /// to full.
    pub fn detect_type(&self) -> GarmentType {
        let height = self.mask.height;
        if height == 0 {
            return GarmentType::Full;
        }

        let mut first_row = None;
        let mut last_row = None;
        for y in 0..height {
            if self.mask.row_coverage(y, COVERAGE_THRESHOLD) > 0 {
                if first_row.is_none() {
                    first_row = Some(y);
                }
                last_row = Some(y);
            }
        }
        let (first, last) = match (first_row, last_row) {
            (Some(f), Some(l)) => (f, l),
            _ => return GarmentType::Full,
        };

        let top = first as f64 / height as f64;
        let bottom = last as f64 / height as f64;

        if top < 0.2 && bottom > 0.8 {
            GarmentType::Full
        } else if top < 0.2 && bottom < 0.7 {
            GarmentType::Top
        } else if top > 0.3 && bottom > 0.8 {
            GarmentType::Bottom
        } else {
            GarmentType::Full
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dressform_render::Color;

    /// A garment raster covering rows [start, end) across most columns.
    fn banded_garment(height: u32, start: u32, end: u32) -> GarmentImage {
        let mut pixels = PixelBuffer::new(40, height, Color::white());
        for y in start..end {
            for x in 4..36 {
                pixels.set(x as i64, y as i64, Color::rgb(0.8, 0.1, 0.2));
            }
        }
        GarmentImage::from_decoded(pixels, false)
    }

    #[test]
    fn test_keying_marks_colored_pixels_only() {
        let garment = banded_garment(100, 10, 60);
        assert_eq!(garment.mask.get(10, 30), 1.0);
        assert_eq!(garment.mask.get(10, 80), 0.0);
        assert_eq!(garment.mask.get(0, 30), 0.0);
    }

    #[test]
    fn test_alpha_channel_is_used_directly() {
        let mut pixels = PixelBuffer::new(4, 4, Color::white());
        pixels.set(1, 1, Color::rgba(1.0, 1.0, 1.0, 0.9));
        let garment = GarmentImage::from_decoded(pixels, true);
        // White but opaque stays covered when the source had alpha.
        assert_eq!(garment.mask.get(1, 1), 0.9);
        assert_eq!(garment.mask.get(0, 0), 1.0);
    }

    #[test]
    fn test_detect_full_body() {
        let garment = banded_garment(100, 5, 95);
        assert_eq!(garment.detect_type(), GarmentType::Full);
    }

    #[test]
    fn test_detect_top() {
        let garment = banded_garment(100, 5, 55);
        assert_eq!(garment.detect_type(), GarmentType::Top);
    }

    #[test]
    fn test_detect_bottom() {
        let garment = banded_garment(100, 45, 100);
        assert_eq!(garment.detect_type(), GarmentType::Bottom);
    }

    #[test]
    fn test_ambiguous_coverage_defaults_to_full() {
        // Starts in the middle band and ends before the bottom fifth.
        let garment = banded_garment(100, 25, 75);
        assert_eq!(garment.detect_type(), GarmentType::Full);

        let empty = banded_garment(100, 0, 0);
        assert_eq!(empty.detect_type(), GarmentType::Full);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = GarmentImage::load(Path::new("/nonexistent/garment.png")).unwrap_err();
        assert!(matches!(err, TryOnError::NotFound(_)));
    }
}
