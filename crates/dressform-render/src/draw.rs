//! Vector drawing onto pixel buffers.
//!
//! Everything here rasterizes with hard edges (no anti-aliasing); the
//! silhouette look comes from the outline stroke, not edge smoothing.

use crate::buffer::PixelBuffer;
use crate::color::Color;

/// A 2D point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fill a closed polygon with even-odd scanline rasterization. Vertices
/// are taken in order; the polygon closes from the last vertex back to
/// the first. Fewer than 3 vertices draws nothing.
pub fn fill_polygon(buffer: &mut PixelBuffer, vertices: &[Point], color: Color) {
    if vertices.len() < 3 {
        return;
    }

    let min_y = vertices
        .iter()
        .map(|p| p.y)
        .fold(f64::INFINITY, f64::min)
        .floor()
        .max(0.0) as i64;
    let max_y = vertices
        .iter()
        .map(|p| p.y)
        .fold(f64::NEG_INFINITY, f64::max)
        .ceil()
        .min(buffer.height as f64) as i64;

    let mut crossings: Vec<f64> = Vec::with_capacity(vertices.len());
    for y in min_y..max_y {
        let scan_y = y as f64 + 0.5;
        crossings.clear();

        for i in 0..vertices.len() {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            // Half-open edge test keeps shared vertices from double counting.
            if (a.y <= scan_y && b.y > scan_y) || (b.y <= scan_y && a.y > scan_y) {
                let t = (scan_y - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }

        crossings.sort_by(|p, q| p.partial_cmp(q).unwrap_or(std::cmp::Ordering::Equal));

        for pair in crossings.chunks_exact(2) {
            let start = pair[0].ceil().max(0.0) as i64;
            let end = pair[1].floor().min(buffer.width as f64 - 1.0) as i64;
            for x in start..=end {
                buffer.set(x, y, color);
            }
        }
    }
}

/// Fill a disc centered at (cx, cy).
pub fn fill_circle(buffer: &mut PixelBuffer, cx: f64, cy: f64, radius: f64, color: Color) {
    if radius <= 0.0 {
        return;
    }
    let min_x = (cx - radius).floor().max(0.0) as i64;
    let max_x = (cx + radius).ceil().min(buffer.width as f64 - 1.0) as i64;
    let min_y = (cy - radius).floor().max(0.0) as i64;
    let max_y = (cy + radius).ceil().min(buffer.height as f64 - 1.0) as i64;

    let r2 = radius * radius;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                buffer.set(x, y, color);
            }
        }
    }
}

/// Stroke a circle outline with the given line thickness.
pub fn stroke_circle(
    buffer: &mut PixelBuffer,
    cx: f64,
    cy: f64,
    radius: f64,
    thickness: f64,
    color: Color,
) {
    if radius <= 0.0 || thickness <= 0.0 {
        return;
    }
    let outer = radius + thickness * 0.5;
    let inner = (radius - thickness * 0.5).max(0.0);
    let min_x = (cx - outer).floor().max(0.0) as i64;
    let max_x = (cx + outer).ceil().min(buffer.width as f64 - 1.0) as i64;
    let min_y = (cy - outer).floor().max(0.0) as i64;
    let max_y = (cy + outer).ceil().min(buffer.height as f64 - 1.0) as i64;

    let outer2 = outer * outer;
    let inner2 = inner * inner;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let d2 = dx * dx + dy * dy;
            if d2 <= outer2 && d2 >= inner2 {
                buffer.set(x, y, color);
            }
        }
    }
}

/// Stroke an open polyline by stamping discs along each segment. Disc
/// spacing is half the stroke radius, which keeps the line solid without
/// visible beading.
pub fn stroke_path(buffer: &mut PixelBuffer, points: &[Point], thickness: f64, color: Color) {
    if points.is_empty() || thickness <= 0.0 {
        return;
    }
    let radius = thickness * 0.5;
    let step = (radius * 0.5).max(0.25);

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let length = (dx * dx + dy * dy).sqrt();
        let samples = (length / step).ceil().max(1.0) as usize;
        for i in 0..=samples {
            let t = i as f64 / samples as f64;
            fill_circle(buffer, a.x + dx * t, a.y + dy * t, radius, color);
        }
    }
    if points.len() == 1 {
        fill_circle(buffer, points[0].x, points[0].y, radius, color);
    }
}

/// Stroke a closed polygon outline.
pub fn stroke_polygon(buffer: &mut PixelBuffer, vertices: &[Point], thickness: f64, color: Color) {
    if vertices.len() < 2 {
        return;
    }
    let mut closed: Vec<Point> = vertices.to_vec();
    closed.push(vertices[0]);
    stroke_path(buffer, &closed, thickness, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_polygon_square() {
        let mut buffer = PixelBuffer::new(10, 10, Color::black());
        let square = [
            Point::new(2.0, 2.0),
            Point::new(8.0, 2.0),
            Point::new(8.0, 8.0),
            Point::new(2.0, 8.0),
        ];
        fill_polygon(&mut buffer, &square, Color::white());

        assert_eq!(buffer.get(5, 5), Color::white());
        assert_eq!(buffer.get(0, 0), Color::black());
        assert_eq!(buffer.get(9, 9), Color::black());
    }

    #[test]
    fn test_fill_polygon_degenerate_draws_nothing() {
        let mut buffer = PixelBuffer::new(4, 4, Color::black());
        fill_polygon(
            &mut buffer,
            &[Point::new(1.0, 1.0), Point::new(3.0, 3.0)],
            Color::white(),
        );
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(buffer.get(x, y), Color::black());
            }
        }
    }

    #[test]
    fn test_fill_polygon_clips_to_canvas() {
        let mut buffer = PixelBuffer::new(4, 4, Color::black());
        let huge = [
            Point::new(-10.0, -10.0),
            Point::new(20.0, -10.0),
            Point::new(20.0, 20.0),
            Point::new(-10.0, 20.0),
        ];
        fill_polygon(&mut buffer, &huge, Color::white());
        assert_eq!(buffer.get(0, 0), Color::white());
        assert_eq!(buffer.get(3, 3), Color::white());
    }

    #[test]
    fn test_fill_circle_center_and_outside() {
        let mut buffer = PixelBuffer::new(20, 20, Color::black());
        fill_circle(&mut buffer, 10.0, 10.0, 4.0, Color::white());
        assert_eq!(buffer.get(10, 10), Color::white());
        assert_eq!(buffer.get(1, 1), Color::black());
    }

    #[test]
    fn test_stroke_circle_hollow() {
        let mut buffer = PixelBuffer::new(30, 30, Color::black());
        stroke_circle(&mut buffer, 15.0, 15.0, 8.0, 2.0, Color::white());
        // Center stays empty; the ring itself is painted.
        assert_eq!(buffer.get(15, 15), Color::black());
        assert_eq!(buffer.get(15 + 8, 15), Color::white());
    }

    #[test]
    fn test_stroke_path_covers_segment() {
        let mut buffer = PixelBuffer::new(20, 20, Color::black());
        let line = [Point::new(2.0, 10.0), Point::new(18.0, 10.0)];
        stroke_path(&mut buffer, &line, 3.0, Color::white());
        assert_eq!(buffer.get(10, 10), Color::white());
        assert_eq!(buffer.get(10, 2), Color::black());
    }
}
