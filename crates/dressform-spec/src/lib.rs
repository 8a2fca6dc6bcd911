//! Dressform Core Types
//!
//! This crate provides the domain types shared across the dressform
//! virtual-fitting-room pipeline: body measurements, the body-shape
//! taxonomy with its canonical classification rule, the garment catalog
//! contract, the error taxonomy, and the report and snapshot formats.
//!
//! # Overview
//!
//! A try-on request flows measurements through classification into a
//! body-shape label, which drives silhouette generation and garment
//! warping in `dressform-tryon`. Everything here is plain data:
//! deterministic, serde-serializable, and free of raster or I/O concerns.
//!
//! # Example
//!
//! ```
//! use dressform_spec::{Measurements, classify_proportions};
//!
//! let m = Measurements {
//!     bust: Some(92.0),
//!     waist: Some(65.0),
//!     hips: Some(94.0),
//!     ..Default::default()
//! };
//! let resolved = m.resolve();
//! let shape = classify_proportions(resolved.bust, resolved.waist, resolved.hips);
//! assert_eq!(shape.as_str(), "hourglass");
//! ```
//!
//! # Modules
//!
//! - [`measurements`]: measurement fields, defaults, and ratio guards
//! - [`shape`]: body-shape enum, canonical rule, per-shape scale factors
//! - [`garment`]: garment type taxonomy
//! - [`catalog`]: garment catalog contract and JSON-backed implementation
//! - [`error`]: error taxonomy with stable codes
//! - [`report`]: try-on report format
//! - [`snapshot`]: round-trippable body-model snapshot

pub mod catalog;
pub mod error;
pub mod garment;
pub mod measurements;
pub mod report;
pub mod shape;
pub mod snapshot;

pub use catalog::{EmptyCatalog, GarmentCatalog, GarmentMeasurements, GarmentRecord, JsonCatalog};
pub use error::TryOnError;
pub use garment::GarmentType;
pub use measurements::{Measurements, ResolvedMeasurements};
pub use report::{FitAdjustments, OutputRecord, ReportWarning, TryOnReport, REPORT_VERSION};
pub use shape::{classify_proportions, size_for_bust, BodyShape, ShapeFactors};
pub use snapshot::{ArmSegments, BodyModelSnapshot, BodySegments, LegSegments, Segment};
