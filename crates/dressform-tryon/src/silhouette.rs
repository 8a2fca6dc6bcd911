//! Parametric 2D body silhouette rendering.
//!
//! The silhouette is a front-facing figure built from the body segments:
//! a torso polygon with shape-specific control points, a head and neck,
//! tapered arms and legs, bust contour circles, and a text label naming
//! the shape and size. Colors and proportions are fixed; everything else
//! follows the measurements.

use dressform_render::draw::{fill_circle, fill_polygon, stroke_circle, stroke_polygon, Point};
use dressform_render::font::{draw_label, measure_label};
use dressform_render::{Color, PixelBuffer};
use dressform_spec::BodyShape;

use crate::body::BodyModel;

/// Skin fill.
const BODY_COLOR: Color = Color::rgb(255.0 / 255.0, 230.0 / 255.0, 210.0 / 255.0);
/// Outline and label ink.
const OUTLINE_COLOR: Color = Color::rgb(120.0 / 255.0, 80.0 / 255.0, 60.0 / 255.0);
/// Canvas background: alpha 0 outside the figure.
const BACKGROUND: Color = Color::transparent();

const OUTLINE_THICKNESS: f64 = 2.0;
const ARM_ANGLE_DEG: f64 = 30.0;
const LEG_ANGLE_DEG: f64 = 5.0;
const ARM_SAMPLES: usize = 10;
const LEG_SAMPLES: usize = 15;

/// Render the full silhouette onto a fresh canvas.
pub fn render_silhouette(model: &BodyModel) -> PixelBuffer {
    let mut canvas = PixelBuffer::new(model.canvas_width, model.canvas_height, BACKGROUND);

    draw_legs(&mut canvas, model);
    draw_arms(&mut canvas, model);
    draw_torso(&mut canvas, model);
    draw_head(&mut canvas, model);
    draw_bust_contours(&mut canvas, model);
    draw_shape_label(&mut canvas, model);

    canvas
}

/// Torso outline as a closed polygon: left edge top to bottom, then the
/// right edge mirrored bottom to top. Shape-specific control points bend
/// the edge between the fixed cross-sections.
fn torso_outline(model: &BodyModel) -> Vec<Point> {
    let s = &model.segments;
    let cx = model.center_x();
    let hem_y = s.hips.y + s.hips.height;

    // (y, half-width) pairs for the left edge, top to bottom.
    let mut edge: Vec<(f64, f64)> = Vec::with_capacity(8);
    edge.push((s.shoulders.y, s.shoulders.width / 2.0));

    if model.shape == BodyShape::Apple {
        // Fuller upper torso: bulge halfway between shoulders and bust.
        let y = s.shoulders.y + 0.5 * (s.bust.y - s.shoulders.y);
        edge.push((y, s.bust.width / 2.0 * 1.02));
    }

    edge.push((s.bust.y, s.bust.width / 2.0));

    if model.shape == BodyShape::Hourglass {
        // Early pull-in so the waist reads as a pinch, not a kink.
        let y = s.bust.y + 0.6 * (s.waist.y - s.bust.y);
        edge.push((y, s.waist.width / 2.0 * 1.02));
    }

    edge.push((s.waist.y, s.waist.width / 2.0));

    if model.shape == BodyShape::Pear {
        // Hip shelf: push out before the widest point.
        let y = s.waist.y + 0.7 * (s.hips.y - s.waist.y);
        edge.push((y, s.hips.width / 2.0 * 1.03));
    }

    edge.push((s.hips.y, s.hips.width / 2.0));
    edge.push((hem_y, s.hips.width / 2.0 * 0.95));

    let mut outline: Vec<Point> = edge.iter().map(|&(y, hw)| Point::new(cx - hw, y)).collect();
    outline.extend(edge.iter().rev().map(|&(y, hw)| Point::new(cx + hw, y)));
    outline
}

fn draw_torso(canvas: &mut PixelBuffer, model: &BodyModel) {
    let outline = torso_outline(model);
    fill_polygon(canvas, &outline, BODY_COLOR);
    stroke_polygon(canvas, &outline, OUTLINE_THICKNESS, OUTLINE_COLOR);
}

fn draw_head(canvas: &mut PixelBuffer, model: &BodyModel) {
    let s = &model.segments;
    let cx = model.center_x();
    let radius = s.shoulders.width * 0.2;
    let neck_height = radius * 0.4;
    let neck_width = radius * 0.8;
    let head_cy = s.shoulders.y - neck_height - radius;

    let neck = [
        Point::new(cx - neck_width / 2.0, head_cy + radius * 0.8),
        Point::new(cx + neck_width / 2.0, head_cy + radius * 0.8),
        Point::new(cx + neck_width / 2.0, s.shoulders.y + 2.0),
        Point::new(cx - neck_width / 2.0, s.shoulders.y + 2.0),
    ];
    fill_polygon(canvas, &neck, BODY_COLOR);

    fill_circle(canvas, cx, head_cy, radius, BODY_COLOR);
    stroke_circle(canvas, cx, head_cy, radius, OUTLINE_THICKNESS, OUTLINE_COLOR);
}

/// Arm width multiplier along the arm, t in [0, 1] from shoulder to
/// wrist. Apple arms start fuller and taper harder.
fn arm_profile(shape: BodyShape, t: f64) -> f64 {
    match shape {
        BodyShape::Apple => 1.2 - 0.7 * t,
        _ => 1.0 - 0.5 * t,
    }
}

fn draw_arms(canvas: &mut PixelBuffer, model: &BodyModel) {
    let s = &model.segments;
    let cx = model.center_x();
    let angle = ARM_ANGLE_DEG.to_radians();

    for side in [-1.0, 1.0] {
        let shoulder = Point::new(cx + side * s.shoulders.width / 2.0, s.shoulders.y + 4.0);
        let dir_x = side * angle.sin();
        let dir_y = angle.cos();

        // Tapered polygon: left rim down, right rim back up.
        let mut left = Vec::with_capacity(ARM_SAMPLES + 1);
        let mut right = Vec::with_capacity(ARM_SAMPLES + 1);
        for i in 0..=ARM_SAMPLES {
            let t = i as f64 / ARM_SAMPLES as f64;
            let half = s.arms.width / 2.0 * arm_profile(model.shape, t);
            let px = shoulder.x + dir_x * s.arms.length * t;
            let py = shoulder.y + dir_y * s.arms.length * t;
            // Perpendicular to the arm direction.
            left.push(Point::new(px - dir_y * half, py + dir_x * half));
            right.push(Point::new(px + dir_y * half, py - dir_x * half));
        }
        right.reverse();
        left.extend(right);
        fill_polygon(canvas, &left, BODY_COLOR);
        stroke_polygon(canvas, &left, OUTLINE_THICKNESS, OUTLINE_COLOR);

        // Hand.
        let hand_x = shoulder.x + dir_x * s.arms.length;
        let hand_y = shoulder.y + dir_y * s.arms.length;
        let hand_r = s.arms.width * 0.3 * arm_profile(model.shape, 1.0);
        fill_circle(canvas, hand_x, hand_y, hand_r, BODY_COLOR);
        stroke_circle(canvas, hand_x, hand_y, hand_r, OUTLINE_THICKNESS, OUTLINE_COLOR);
    }
}

/// Leg width multiplier along the leg, t in [0, 1] from hip to ankle.
/// Thigh, calf, and ankle bands taper in turn.
fn leg_profile(thigh_factor: f64, t: f64) -> f64 {
    if t < 0.4 {
        thigh_factor * (1.0 - 0.25 * t)
    } else if t < 0.9 {
        0.88 - 0.4 * t
    } else {
        0.5
    }
}

fn draw_legs(canvas: &mut PixelBuffer, model: &BodyModel) {
    let s = &model.segments;
    let cx = model.center_x();
    let hem_y = s.hips.y + s.hips.height;
    let angle = LEG_ANGLE_DEG.to_radians();

    for side in [-1.0, 1.0] {
        let hip = Point::new(cx + side * s.hips.width / 4.0, hem_y - 2.0);
        let dir_x = side * angle.sin();
        let dir_y = angle.cos();

        let mut left = Vec::with_capacity(LEG_SAMPLES + 1);
        let mut right = Vec::with_capacity(LEG_SAMPLES + 1);
        for i in 0..=LEG_SAMPLES {
            let t = i as f64 / LEG_SAMPLES as f64;
            let half = s.legs.width / 4.0 * leg_profile(s.legs.thigh_factor, t);
            let px = hip.x + dir_x * s.legs.length * t;
            let py = hip.y + dir_y * s.legs.length * t;
            left.push(Point::new(px - half, py));
            right.push(Point::new(px + half, py));
        }
        right.reverse();
        left.extend(right);
        fill_polygon(canvas, &left, BODY_COLOR);
        stroke_polygon(canvas, &left, OUTLINE_THICKNESS, OUTLINE_COLOR);

        // Foot: a small triangle pointing outward from the ankle.
        let ankle_x = hip.x + dir_x * s.legs.length;
        let ankle_y = hip.y + dir_y * s.legs.length;
        let foot_len = s.legs.width * 0.35;
        let foot = [
            Point::new(ankle_x - s.legs.width * 0.1, ankle_y),
            Point::new(ankle_x + side * foot_len, ankle_y + s.legs.width * 0.08),
            Point::new(ankle_x + s.legs.width * 0.1, ankle_y + s.legs.width * 0.12),
        ];
        fill_polygon(canvas, &foot, BODY_COLOR);
        stroke_polygon(canvas, &foot, OUTLINE_THICKNESS, OUTLINE_COLOR);
    }
}

/// Bust contour circles, enlarged for the fuller shapes.
fn draw_bust_contours(canvas: &mut PixelBuffer, model: &BodyModel) {
    let s = &model.segments;
    let cx = model.center_x();
    let scale = match model.shape {
        BodyShape::Hourglass | BodyShape::Apple => 1.2,
        _ => 1.0,
    };
    let radius = s.bust.width / 6.0 * scale;
    for side in [-1.0, 1.0] {
        stroke_circle(
            canvas,
            cx + side * s.bust.width / 4.0,
            s.bust.y,
            radius,
            1.0,
            OUTLINE_COLOR,
        );
    }
}

fn draw_shape_label(canvas: &mut PixelBuffer, model: &BodyModel) {
    let label = format!(
        "SHAPE: {}, SIZE: {}",
        model.shape.as_str().to_ascii_uppercase(),
        model.size
    );
    let scale = 2;
    let (width, height) = measure_label(&label, scale);
    let x = (canvas.width as i64 - width as i64) / 2;
    let y = canvas.height as i64 - height as i64 - 10;
    draw_label(canvas, &label, x.max(0), y, scale, OUTLINE_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyModel;
    use crate::classifier::RuleClassifier;
    use dressform_spec::Measurements;

    fn model_for(bust: f64, waist: f64, hips: f64) -> BodyModel {
        let measurements = Measurements {
            bust: Some(bust),
            waist: Some(waist),
            hips: Some(hips),
            ..Default::default()
        };
        BodyModel::from_measurements(&measurements, &RuleClassifier).unwrap()
    }

    fn body_pixel_count(canvas: &PixelBuffer) -> usize {
        let mut count = 0;
        for y in 0..canvas.height {
            for x in 0..canvas.width {
                if canvas.get(x as i64, y as i64) == BODY_COLOR {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_canvas_dimensions_match_model() {
        let canvas = render_silhouette(&model_for(90.0, 75.0, 95.0));
        assert_eq!(canvas.width, 600);
        assert_eq!(canvas.height, 800);
    }

    #[test]
    fn test_torso_center_is_body_colored() {
        let model = model_for(90.0, 75.0, 95.0);
        let canvas = render_silhouette(&model);
        let cx = model.center_x() as i64;
        let cy = model.segments.waist.y as i64;
        assert_eq!(canvas.get(cx, cy), BODY_COLOR);
    }

    #[test]
    fn test_corners_stay_background() {
        let canvas = render_silhouette(&model_for(90.0, 75.0, 95.0));
        assert_eq!(canvas.get(0, 799), BACKGROUND);
        assert_eq!(canvas.get(599, 799), BACKGROUND);
    }

    #[test]
    fn test_wider_hips_paint_more_body() {
        let narrow = render_silhouette(&model_for(90.0, 75.0, 88.0));
        let wide = render_silhouette(&model_for(90.0, 75.0, 115.0));
        assert!(body_pixel_count(&wide) > body_pixel_count(&narrow));
    }

    #[test]
    fn test_hourglass_waist_narrower_than_rectangle() {
        let hourglass = model_for(92.0, 65.0, 94.0);
        assert_eq!(hourglass.shape, BodyShape::Hourglass);
        let rectangle = model_for(85.0, 75.0, 85.0);
        assert_eq!(rectangle.shape, BodyShape::Rectangle);

        let hg_canvas = render_silhouette(&hourglass);
        let rect_canvas = render_silhouette(&rectangle);

        let waist_row = |canvas: &PixelBuffer, y: i64| {
            let mut width = 0;
            for x in 0..canvas.width as i64 {
                if canvas.get(x, y) == BODY_COLOR {
                    width += 1;
                }
            }
            width
        };
        let hg_width = waist_row(&hg_canvas, hourglass.segments.waist.y as i64);
        let rect_width = waist_row(&rect_canvas, rectangle.segments.waist.y as i64);
        assert!(hg_width < rect_width);
    }

    #[test]
    fn test_label_ink_present_near_bottom() {
        let canvas = render_silhouette(&model_for(90.0, 75.0, 95.0));
        // Label row sits 10px above the bottom edge, centered; probe the
        // middle columns, which the legs never reach.
        let mut found = false;
        'outer: for y in 770..796 {
            for x in 280..320 {
                if canvas.get(x, y) == OUTLINE_COLOR {
                    found = true;
                    break 'outer;
                }
            }
        }
        assert!(found, "shape label should leave outline-colored pixels");
    }

    #[test]
    fn test_profiles_are_positive_and_tapering() {
        for shape in BodyShape::ALL {
            assert!(arm_profile(shape, 0.0) > arm_profile(shape, 1.0));
            assert!(arm_profile(shape, 1.0) > 0.0);
        }
        assert!(leg_profile(1.2, 0.0) > leg_profile(1.2, 0.95));
        assert!(leg_profile(1.0, 0.95) > 0.0);
    }
}
