//! The try-on pipeline front door.
//!
//! [`FittingRoom`] wires a classifier, a garment catalog, and a storage
//! layout into the caller-facing operations: try a garment on a rendered
//! body or a supplied photo, adjust the fit of a previous result, and
//! recommend garments for a measurement set. Each operation writes its
//! under the results directory and returns a report describing what was
//! produced.

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use dressform_render::png_io::{read_rgba, write_rgba, PngConfig, PngError};
use dressform_render::PixelBuffer;
use dressform_spec::{
    FitAdjustments, GarmentCatalog, GarmentRecord, Measurements, OutputRecord, TryOnError,
    TryOnReport,
};

use crate::adjust::adjust_fit;
use crate::body::BodyModel;
use crate::classifier::ShapeClassifier;
use crate::compose::{compose_try_on, placement_for};
use crate::config::StorageConfig;
use crate::garment::GarmentImage;
use crate::silhouette::render_silhouette;
use crate::warp::warp_garment;

/// How a try-on call names its garment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GarmentSource {
    /// A catalog record id.
    CatalogId(String),
    /// A direct image path, bypassing the catalog.
    Path(PathBuf),
}

/// A written result image plus its report.
#[derive(Debug, Clone)]
pub struct TryOnOutcome {
    pub image_path: PathBuf,
    pub report: TryOnReport,
}

/// A scored catalog entry from [`FittingRoom::recommend`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub score: f64,
}

/// Acceptable garment-to-body ratio bands for fit scoring.
const BUST_BAND: (f64, f64) = (0.9, 1.1);
const WAIST_BAND: (f64, f64) = (0.85, 1.15);
const HIPS_BAND: (f64, f64) = (0.9, 1.1);
/// Score lost per unit of ratio outside the band.
const FALLOFF: f64 = 5.0;
/// Minimum mean score for a garment to be recommended.
const MIN_SCORE: f64 = 0.7;

pub struct FittingRoom {
    classifier: Box<dyn ShapeClassifier>,
    catalog: Box<dyn GarmentCatalog>,
    storage: StorageConfig,
}

impl FittingRoom {
    pub fn new(
        classifier: Box<dyn ShapeClassifier>,
        catalog: Box<dyn GarmentCatalog>,
        storage: StorageConfig,
    ) -> Self {
        Self {
            classifier,
            catalog,
            storage,
        }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Render a body silhouette and composite a garment onto it.
    pub fn try_on(
        &self,
        measurements: &Measurements,
        source: &GarmentSource,
    ) -> Result<TryOnOutcome, TryOnError> {
        let started = Instant::now();
        let model = BodyModel::from_measurements(measurements, self.classifier.as_ref())?;
        let canvas = render_silhouette(&model);
        self.compose_onto(canvas, &model, source, started)
    }

    /// Composite a garment onto a caller-supplied base image (a photo or
    /// a previously rendered figure) instead of a fresh silhouette. The
    /// body model is built at the base image's dimensions so placement
    /// scales with the picture.
    pub fn try_on_over(
        &self,
        base_path: &Path,
        measurements: &Measurements,
        source: &GarmentSource,
    ) -> Result<TryOnOutcome, TryOnError> {
        let started = Instant::now();
        let decoded = read_rgba(base_path).map_err(|e| map_png_error(base_path, e))?;
        let model = BodyModel::with_canvas(
            measurements,
            self.classifier.as_ref(),
            decoded.pixels.width,
            decoded.pixels.height,
        )?;
        self.compose_onto(decoded.pixels, &model, source, started)
    }

    fn compose_onto(
        &self,
        mut canvas: PixelBuffer,
        model: &BodyModel,
        source: &GarmentSource,
        started: Instant,
    ) -> Result<TryOnOutcome, TryOnError> {
        let mut report = TryOnReport::new();
        report.body_shape = Some(model.shape);
        report.warnings.extend(model.warnings.iter().cloned());

        let (garment_path, record) = self.resolve_source(source)?;
        report.garment = Some(match source {
            GarmentSource::CatalogId(id) => id.clone(),
            GarmentSource::Path(path) => path.display().to_string(),
        });

        let garment = GarmentImage::load(&garment_path)?;
        let garment_type = record
            .and_then(|r| r.garment_type)
            .unwrap_or_else(|| garment.detect_type());
        report.garment_type = Some(garment_type);

        let placement = placement_for(garment_type, model);
        let warp = warp_garment(
            &garment,
            garment_type,
            model,
            placement.width,
            placement.height,
        );
        report.warnings.extend(warp.warning.iter().cloned());
        compose_try_on(&mut canvas, &warp.garment, garment_type, model)?;

        let stem = format!("tryon_{}", timestamp_ms());
        let outcome = self.write_result(canvas, &stem, report, started)?;
        log::info!(
            "try-on finished: {} ({} warnings)",
            outcome.image_path.display(),
            outcome.report.warnings.len()
        );
        Ok(outcome)
    }

    /// Re-shape a previously rendered result image.
    pub fn adjust(
        &self,
        image_path: &Path,
        adjustments: &FitAdjustments,
    ) -> Result<TryOnOutcome, TryOnError> {
        let started = Instant::now();
        let mut report = TryOnReport::new();
        report.adjustments = Some(*adjustments);

        let decoded = read_rgba(image_path).map_err(|e| map_png_error(image_path, e))?;
        let adjusted = adjust_fit(&decoded.pixels, adjustments);

        let stem = format!("adjusted_{}", timestamp_ms());
        let outcome = self.write_result(adjusted, &stem, report, started)?;
        log::info!("fit adjustment written: {}", outcome.image_path.display());
        Ok(outcome)
    }

    /// Score the catalog against a measurement set and return at most
    /// `limit` matches sorted best first. Garments without their own
    /// measurements are skipped; a style filter keeps only records with
    /// that style.
    pub fn recommend(
        &self,
        measurements: &Measurements,
        style: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Recommendation>, TryOnError> {
        measurements.validate()?;
        let resolved = measurements.resolve();

        let mut scored: Vec<Recommendation> = self
            .catalog
            .records()
            .iter()
            .filter(|record| match (style, record.style.as_deref()) {
                (None, _) => true,
                (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
                (Some(_), None) => false,
            })
            .filter_map(|record| {
                let score = fit_score(record, &resolved)?;
                (score >= MIN_SCORE).then(|| Recommendation {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    score,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        scored.truncate(limit);
        Ok(scored)
    }

    fn resolve_source(
        &self,
        source: &GarmentSource,
    ) -> Result<(PathBuf, Option<&GarmentRecord>), TryOnError> {
        match source {
            GarmentSource::CatalogId(id) => {
                let record = self
                    .catalog
                    .get(id)
                    .ok_or_else(|| TryOnError::NotFound(format!("garment id '{}'", id)))?;
                Ok((self.storage.garment_path(&record.image), Some(record)))
            }
            GarmentSource::Path(path) => Ok((path.clone(), None)),
        }
    }

    /// Encode into the temp directory, then move into results, so a
    /// failed encode never leaves a partial file under results.
    fn write_result(
        &self,
        canvas: PixelBuffer,
        stem: &str,
        mut report: TryOnReport,
        started: Instant,
    ) -> Result<TryOnOutcome, TryOnError> {
        let staging_path = self.storage.temp_dir.join(format!("{}.png", stem));
        let image_path = self.storage.results_dir.join(format!("{}.png", stem));
        let hash = write_rgba(&canvas, &staging_path, &PngConfig::default())
            .map_err(|e| map_png_error(&staging_path, e))?;
        std::fs::rename(&staging_path, &image_path)?;
        report.outputs.push(OutputRecord {
            path: image_path.clone(),
            hash,
        });
        report.duration_ms = started.elapsed().as_millis() as u64;

        let report_path = self.storage.results_dir.join(TryOnReport::filename(stem));
        let json = report
            .to_json_pretty()
            .map_err(|e| TryOnError::Artifact(format!("report encode error: {}", e)))?;
        std::fs::write(&report_path, json)?;

        Ok(TryOnOutcome { image_path, report })
    }
}

/// Mean per-dimension fit score, or `None` when the record carries no
/// usable measurements. Each dimension scores 1.0 inside its band and
/// loses [`FALLOFF`] per unit of ratio outside it, floored at 0.
fn fit_score(record: &GarmentRecord, body: &dressform_spec::ResolvedMeasurements) -> Option<f64> {
    let gm = record.measurements.as_ref()?;
    let mut total = 0.0;
    let mut count = 0;

    for (garment_dim, body_dim, band) in [
        (gm.bust, body.bust, BUST_BAND),
        (gm.waist, body.waist, WAIST_BAND),
        (gm.hips, body.hips, HIPS_BAND),
    ] {
        let Some(value) = garment_dim else { continue };
        if body_dim <= 0.0 {
            continue;
        }
        let ratio = value / body_dim;
        let deviation = if ratio < band.0 {
            band.0 - ratio
        } else if ratio > band.1 {
            ratio - band.1
        } else {
            0.0
        };
        total += (1.0 - deviation * FALLOFF).max(0.0);
        count += 1;
    }

    (count > 0).then(|| total / count as f64)
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

fn map_png_error(path: &Path, error: PngError) -> TryOnError {
    match error {
        PngError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            TryOnError::NotFound(format!("image {}", path.display()))
        }
        PngError::Io(io) => TryOnError::Io(io),
        other => TryOnError::Image(format!("{}: {}", path.display(), other)),
    }
}
