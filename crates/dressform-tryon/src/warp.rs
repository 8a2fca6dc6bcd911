//! Measurement-driven garment warping.
//!
//! The warp maps a flat garment image onto the silhouette's proportions.
//! Two control meshes anchor it: a source mesh measured from the
//! garment's own coverage, and a target mesh derived either from body
//! measurements or, when the caller gave no girths, from a rendered
//! shape template's opacity profile. A thin-plate spline fit between
//! them yields a dense coordinate field, and the garment is remapped
//! through it.
//!
//! Several cases deliberately skip the spline and plain-resize instead:
//! rectangle bodies (no reshaping to express), tiny sources where the
//! mesh rows collapse, and type/shape pairs where the garment never
//! covers the region the shape differs in. A degenerate fit also falls
//! back to resize, but that path is surfaced as a report warning.

use dressform_render::draw::Point;
use dressform_render::remap::{remap_mask, remap_pixels};
use dressform_render::{CoordField, MaskBuffer};
use dressform_spec::report::WARN_WARP_FALLBACK;
use dressform_spec::{BodyShape, GarmentType, ReportWarning, ResolvedMeasurements};

use crate::body::BodyModel;
use crate::garment::GarmentImage;
use crate::silhouette::render_silhouette;

/// Vertical fractions of the garment covered by mesh sections:
/// shoulder line, bust, waist, hips, hem.
const SECTION_FRACTIONS: [f64; 5] = [0.0, 0.3, 0.4, 0.6, 1.0];

/// Sections used by the shape-template strategy: top, waist, hip, hem.
const SHAPE_SECTION_FRACTIONS: [f64; 4] = [0.0, 0.4, 0.6, 1.0];

/// Fractions of the torso span probed on the rendered shape template.
const TEMPLATE_PROFILE_FRACTIONS: [f64; 3] = [0.2, 0.4, 0.6];

/// Reference measurements the warp ratios are taken against.
const REFERENCE_BUST: f64 = 90.0;
const REFERENCE_WAIST: f64 = 70.0;
const REFERENCE_HIPS: f64 = 95.0;

/// Base garment width as a fraction of the target width.
const BASE_WIDTH_FRACTION: f64 = 0.7;

/// Sources smaller than this skip the mesh warp entirely.
const MIN_WARP_HEIGHT: u32 = 100;
const MIN_WARP_WIDTH: u32 = 50;

const COVERAGE_THRESHOLD: f64 = 0.1;

/// Paired left/right control points at each mesh section, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlMesh {
    pub points: Vec<Point>,
}

impl ControlMesh {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Target mesh in destination pixel space, widths driven by how the
/// body differs from the reference proportions plus per-shape nudges.
pub fn measurement_mesh(
    m: &ResolvedMeasurements,
    shape: BodyShape,
    target_width: u32,
    target_height: u32,
) -> ControlMesh {
    let bust_ratio = m.bust / REFERENCE_BUST;
    let waist_ratio = m.waist / REFERENCE_WAIST;
    let hip_ratio = m.hips / REFERENCE_HIPS;

    let base = BASE_WIDTH_FRACTION * target_width as f64;
    let shoulder_w = base * (1.0 + (bust_ratio - 1.0) * 0.5);
    let bust_w = base * bust_ratio;
    let mut waist_w = base * waist_ratio;
    let mut hip_w = base * hip_ratio;
    let hem_w = base * (1.0 + (hip_ratio - 1.0) * 0.7);

    match shape {
        BodyShape::Hourglass => waist_w *= 0.95,
        BodyShape::Apple => {
            waist_w *= 1.05;
            hip_w *= 0.98;
        }
        BodyShape::Pear => {
            waist_w *= 0.98;
            hip_w *= 1.05;
        }
        BodyShape::Rectangle => waist_w = (bust_w + hip_w) / 2.0,
    }

    let widths = [shoulder_w, bust_w, waist_w, hip_w, hem_w];
    let center_x = target_width as f64 / 2.0;
    let mut points = Vec::with_capacity(widths.len() * 2);
    for (fraction, width) in SECTION_FRACTIONS.iter().zip(widths) {
        let y = fraction * (target_height.saturating_sub(1)) as f64;
        points.push(Point::new(center_x - width / 2.0, y));
        points.push(Point::new(center_x + width / 2.0, y));
    }
    ControlMesh { points }
}

/// Source mesh measured from the garment's coverage mask: at each
/// section row, the leftmost and rightmost covered columns. Rows with no
/// coverage fall back to the full image extent.
pub fn garment_mesh(mask: &MaskBuffer, fractions: &[f64]) -> ControlMesh {
    let width = mask.width;
    let height = mask.height;
    let mut points = Vec::with_capacity(fractions.len() * 2);

    for &fraction in fractions {
        let y = (fraction * height.saturating_sub(1) as f64).round() as i64;
        let mut left = None;
        let mut right = None;
        for x in 0..width as i64 {
            if mask.get(x, y) > COVERAGE_THRESHOLD {
                if left.is_none() {
                    left = Some(x as f64);
                }
                right = Some(x as f64);
            }
        }
        let (lx, rx) = match (left, right) {
            (Some(l), Some(r)) if r > l => (l, r),
            _ => (0.0, (width.saturating_sub(1)) as f64),
        };
        points.push(Point::new(lx, y as f64));
        points.push(Point::new(rx, y as f64));
    }
    ControlMesh { points }
}

/// Target mesh for callers without girth measurements: widths read off
/// a silhouette rendered for the shape at default proportions. The
/// template's opaque extent is probed at three torso heights; the hem
/// section reuses the lowest probe, slightly narrowed.
pub fn shape_mesh(shape: BodyShape, target_width: u32, target_height: u32) -> ControlMesh {
    let model = BodyModel::template_for_shape(shape);
    let template = render_silhouette(&model);
    let torso_top = model.segments.shoulders.y;
    let torso_bottom = model.segments.hips.y + model.segments.hips.height;

    let mut widths = [0.0_f64; 4];
    for (section, fraction) in TEMPLATE_PROFILE_FRACTIONS.iter().enumerate() {
        let y = (torso_top + fraction * (torso_bottom - torso_top)).round() as i64;
        let mut left = None;
        let mut right = None;
        for x in 0..template.width as i64 {
            if template.get(x, y).a > 0.5 {
                if left.is_none() {
                    left = Some(x);
                }
                right = Some(x);
            }
        }
        let extent = match (left, right) {
            (Some(l), Some(r)) if r > l => (r - l) as f64,
            _ => template.width as f64 * BASE_WIDTH_FRACTION,
        };
        widths[section] = extent / template.width as f64 * target_width as f64;
    }
    widths[3] = widths[2] * 0.95;

    match shape {
        BodyShape::Hourglass => widths[1] *= 0.90,
        BodyShape::Apple => {
            widths[1] *= 1.10;
            widths[2] *= 0.95;
        }
        BodyShape::Pear => {
            widths[1] *= 0.95;
            widths[2] *= 1.10;
        }
        BodyShape::Rectangle => {}
    }

    let center_x = target_width as f64 / 2.0;
    let mut points = Vec::with_capacity(widths.len() * 2);
    for (fraction, width) in SHAPE_SECTION_FRACTIONS.iter().zip(widths) {
        let y = fraction * (target_height.saturating_sub(1)) as f64;
        points.push(Point::new(center_x - width / 2.0, y));
        points.push(Point::new(center_x + width / 2.0, y));
    }
    ControlMesh { points }
}

/// Thin-plate spline interpolant fitted over scattered control points.
/// Maps a 2D site to a 2D value with the radial kernel r^2 * ln(r^2)
/// plus an affine term.
#[derive(Debug, Clone)]
pub struct ThinPlateSpline {
    sites: Vec<Point>,
    /// Per-site weights followed by the affine coefficients [a0, ax, ay],
    /// one vector per output axis.
    weights_x: Vec<f64>,
    weights_y: Vec<f64>,
}

fn kernel(r_squared: f64) -> f64 {
    if r_squared <= 0.0 {
        0.0
    } else {
        r_squared * r_squared.ln()
    }
}

impl ThinPlateSpline {
    /// Fit an interpolant with `spline(sites[i]) == values[i]`. Returns
    /// `None` when the linear system is singular (coincident or
    /// degenerate control points).
    pub fn fit(sites: &[Point], values: &[Point]) -> Option<Self> {
        let n = sites.len();
        if n < 3 || values.len() != n {
            return None;
        }
        let size = n + 3;

        let mut matrix = vec![vec![0.0; size]; size];
        for i in 0..n {
            for j in 0..n {
                let dx = sites[i].x - sites[j].x;
                let dy = sites[i].y - sites[j].y;
                matrix[i][j] = kernel(dx * dx + dy * dy);
            }
            matrix[i][n] = 1.0;
            matrix[i][n + 1] = sites[i].x;
            matrix[i][n + 2] = sites[i].y;
            matrix[n][i] = 1.0;
            matrix[n + 1][i] = sites[i].x;
            matrix[n + 2][i] = sites[i].y;
        }

        let mut rhs_x = vec![0.0; size];
        let mut rhs_y = vec![0.0; size];
        for i in 0..n {
            rhs_x[i] = values[i].x;
            rhs_y[i] = values[i].y;
        }

        let weights_x = solve(matrix.clone(), rhs_x)?;
        let weights_y = solve(matrix, rhs_y)?;

        Some(Self {
            sites: sites.to_vec(),
            weights_x,
            weights_y,
        })
    }

    /// Evaluate the interpolant at (x, y).
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let n = self.sites.len();
        let mut out_x = self.weights_x[n] + self.weights_x[n + 1] * x + self.weights_x[n + 2] * y;
        let mut out_y = self.weights_y[n] + self.weights_y[n + 1] * x + self.weights_y[n + 2] * y;
        for (i, site) in self.sites.iter().enumerate() {
            let dx = x - site.x;
            let dy = y - site.y;
            let u = kernel(dx * dx + dy * dy);
            out_x += self.weights_x[i] * u;
            out_y += self.weights_y[i] * u;
        }
        (out_x, out_y)
    }
}

/// Gaussian elimination with partial pivoting. `None` on a (near)
/// singular matrix.
fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Option<Vec<f64>> {
    let n = matrix.len();
    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| {
                matrix[a][col]
                    .abs()
                    .partial_cmp(&matrix[b][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if matrix[pivot_row][col].abs() < 1e-10 {
            return None;
        }
        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = matrix[row][col] / matrix[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let mut value = rhs[row];
        for col in (row + 1)..n {
            value -= matrix[row][col] * solution[col];
        }
        solution[row] = value / matrix[row][row];
    }
    if solution.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(solution)
}

/// Result of warping a garment toward a body.
#[derive(Debug, Clone)]
pub struct WarpOutcome {
    pub garment: GarmentImage,
    /// Set when the spline path degraded to a resize.
    pub warning: Option<ReportWarning>,
    /// False when a resize was the intended transform.
    pub warped: bool,
}

/// True for garment/shape pairs where the mesh warp cannot improve on a
/// resize: the body region the shape differs in is not covered by the
/// garment, or the shape calls for no reshaping at all.
fn warp_is_identity(garment_type: GarmentType, shape: BodyShape) -> bool {
    matches!(
        (garment_type, shape),
        (_, BodyShape::Rectangle)
            | (GarmentType::Top, BodyShape::Pear)
            | (GarmentType::Bottom, BodyShape::Apple)
    )
}

fn resized(garment: &GarmentImage, width: u32, height: u32) -> GarmentImage {
    GarmentImage {
        pixels: garment.pixels.resize(width, height),
        mask: garment.mask.resize(width, height),
    }
}

/// Warp a garment to the model's proportions at the given target size.
pub fn warp_garment(
    garment: &GarmentImage,
    garment_type: GarmentType,
    model: &BodyModel,
    target_width: u32,
    target_height: u32,
) -> WarpOutcome {
    if warp_is_identity(garment_type, model.shape)
        || garment.height() < MIN_WARP_HEIGHT
        || garment.width() < MIN_WARP_WIDTH
    {
        return WarpOutcome {
            garment: resized(garment, target_width, target_height),
            warning: None,
            warped: false,
        };
    }

    // Callers with explicit girths get the measurement mesh; otherwise
    // the target comes from the rendered shape template.
    let (target, source) = if model.measurements().has_girths() {
        (
            measurement_mesh(model.resolved(), model.shape, target_width, target_height),
            garment_mesh(&garment.mask, &SECTION_FRACTIONS),
        )
    } else {
        (
            shape_mesh(model.shape, target_width, target_height),
            garment_mesh(&garment.mask, &SHAPE_SECTION_FRACTIONS),
        )
    };

    // Fit destination -> source so each output pixel knows where to
    // sample from.
    let spline = match ThinPlateSpline::fit(&target.points, &source.points) {
        Some(spline) => spline,
        None => return resize_fallback(garment, target_width, target_height),
    };

    let field = CoordField::from_fn(target_width, target_height, |x, y| spline.apply(x, y));
    if field.has_non_finite() {
        return resize_fallback(garment, target_width, target_height);
    }

    WarpOutcome {
        garment: GarmentImage {
            pixels: remap_pixels(&garment.pixels, &field),
            mask: remap_mask(&garment.mask, &field),
        },
        warning: None,
        warped: true,
    }
}

fn resize_fallback(garment: &GarmentImage, width: u32, height: u32) -> WarpOutcome {
    log::warn!("garment warp degenerated, falling back to resize");
    WarpOutcome {
        garment: resized(garment, width, height),
        warning: Some(ReportWarning::new(
            WARN_WARP_FALLBACK,
            "mesh warp was degenerate, garment was resized instead",
        )),
        warped: false,
    }
}
