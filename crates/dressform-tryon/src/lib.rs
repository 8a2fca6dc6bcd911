//! The dressform try-on pipeline.
//!
//! Given body measurements and a garment image, the pipeline classifies
//! the body shape, renders a parametric silhouette, warps the garment to
//! the body's proportions with a thin-plate spline, and composites the
//! result. A separate adjustment pass can re-shape a finished render,
//! and the catalog can be scored for fit recommendations.
//!
//! ```no_run
//! use dressform_spec::Measurements;
//! use dressform_tryon::{FittingRoom, GarmentSource, RuleClassifier, StorageConfig};
//! use dressform_spec::catalog::JsonCatalog;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), dressform_spec::TryOnError> {
//! let catalog = JsonCatalog::load(Path::new("catalog.json"))?;
//! let room = FittingRoom::new(
//!     Box::new(RuleClassifier),
//!     Box::new(catalog),
//!     StorageConfig::under(Path::new("data")),
//! );
//! let measurements = Measurements {
//!     bust: Some(92.0),
//!     waist: Some(65.0),
//!     hips: Some(94.0),
//!     ..Default::default()
//! };
//! let outcome = room.try_on(&measurements, &GarmentSource::CatalogId("dress001".into()))?;
//! println!("wrote {}", outcome.image_path.display());
//! # Ok(())
//! # }
//! ```

pub mod adjust;
pub mod body;
pub mod classifier;
pub mod compose;
pub mod config;
pub mod fitting_room;
pub mod garment;
pub mod silhouette;
pub mod warp;

pub use adjust::{adjust_fit, clamp_adjustments};
pub use body::{BodyModel, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
pub use classifier::{ArtifactClassifier, ClassifierArtifact, RuleClassifier, ShapeClassifier};
pub use config::StorageConfig;
pub use fitting_room::{FittingRoom, GarmentSource, Recommendation, TryOnOutcome};
pub use garment::GarmentImage;
pub use silhouette::render_silhouette;
pub use warp::{warp_garment, ThinPlateSpline, WarpOutcome};
