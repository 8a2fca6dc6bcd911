//! Color utilities for silhouette rendering and compositing.

/// RGBA color with f64 components (0.0 to 1.0 range).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha = 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create a grayscale color.
    pub const fn gray(value: f64) -> Self {
        Self::rgb(value, value, value)
    }

    /// Create black.
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Create white.
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Create a color from 8-bit channel values with alpha = 255.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Create a color from 8-bit RGBA channel values.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::rgba(
            rgba[0] as f64 / 255.0,
            rgba[1] as f64 / 255.0,
            rgba[2] as f64 / 255.0,
            rgba[3] as f64 / 255.0,
        )
    }

    /// Linearly interpolate between two colors.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Alpha-composite `self` over `base` using `self`'s alpha. Color
    /// channels blend linearly; alpha accumulates, so opaque garment
    /// pixels stay visible over a transparent canvas.
    pub fn over(&self, base: &Color) -> Color {
        let a = self.a.clamp(0.0, 1.0);
        Color {
            r: base.r * (1.0 - a) + self.r * a,
            g: base.g * (1.0 - a) + self.g * a,
            b: base.b * (1.0 - a) + self.b * a,
            a: a + base.a * (1.0 - a),
        }
    }

    /// Perceptual luminance (Rec. 601 weights), in [0, 1].
    pub fn luminance(&self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_round_trip() {
        let c = Color::from_rgba8([255, 230, 210, 128]);
        let back = c.to_rgba8();
        assert_eq!(back, [255, 230, 210, 128]);
    }

    #[test]
    fn test_over_opaque_replaces_base() {
        let base = Color::white();
        let garment = Color::rgba(0.2, 0.4, 0.6, 1.0);
        let out = garment.over(&base);
        assert!((out.r - 0.2).abs() < 1e-12);
        assert!((out.g - 0.4).abs() < 1e-12);
        assert!((out.b - 0.6).abs() < 1e-12);
        assert_eq!(out.a, 1.0);
    }

    #[test]
    fn test_over_transparent_keeps_base() {
        let base = Color::rgb(0.9, 0.1, 0.5);
        let out = Color::transparent().over(&base);
        assert_eq!(out, base);
    }

    #[test]
    fn test_over_half_alpha_blends() {
        let base = Color::black();
        let garment = Color::rgba(1.0, 1.0, 1.0, 0.5);
        let out = garment.over(&base);
        assert!((out.r - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_luminance_of_white_is_one() {
        assert!((Color::white().luminance() - 1.0).abs() < 1e-12);
        assert_eq!(Color::black().luminance(), 0.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::black();
        let b = Color::white();
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }
}
