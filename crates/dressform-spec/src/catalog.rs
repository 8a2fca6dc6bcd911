//! Garment catalog contract and the JSON-backed implementation.
//!
//! The catalog is a read-only, row-keyed lookup from garment id to record.
//! Consumers program against [`GarmentCatalog`]; optional behaviors are
//! part of the contract with documented defaults (an absent record is
//! `None`, an empty catalog iterates nothing) rather than runtime
//! capability probing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::TryOnError;
use crate::garment::GarmentType;

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentRecord {
    pub id: String,
    pub name: String,
    /// Declared type; overrides auto-detection when present.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub garment_type: Option<GarmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Image reference, resolved against the configured image directory.
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Garment's own measurements, used for fit scoring when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<GarmentMeasurements>,
}

/// Key garment dimensions in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GarmentMeasurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bust: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
}

/// Read-only catalog lookup.
pub trait GarmentCatalog {
    /// The record for an id, or `None` when the catalog has no such row.
    fn get(&self, id: &str) -> Option<&GarmentRecord>;

    /// All records. An empty slice is a valid catalog.
    fn records(&self) -> &[GarmentRecord];
}

/// A catalog with no rows. Lookups return `None`; iteration is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl GarmentCatalog for EmptyCatalog {
    fn get(&self, _id: &str) -> Option<&GarmentRecord> {
        None
    }

    fn records(&self) -> &[GarmentRecord] {
        &[]
    }
}

/// Catalog backed by a JSON array of records.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    records: Vec<GarmentRecord>,
    by_id: HashMap<String, usize>,
}

impl JsonCatalog {
    /// Build from already-parsed records. Duplicate ids are an input error.
    pub fn new(records: Vec<GarmentRecord>) -> Result<Self, TryOnError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), index).is_some() {
                return Err(TryOnError::InvalidInput(format!(
                    "duplicate garment id '{}' in catalog",
                    record.id
                )));
            }
        }
        Ok(Self { records, by_id })
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, TryOnError> {
        let records: Vec<GarmentRecord> = serde_json::from_str(json)
            .map_err(|e| TryOnError::Artifact(format!("catalog parse error: {}", e)))?;
        Self::new(records)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TryOnError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TryOnError::NotFound(format!("catalog {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl GarmentCatalog for JsonCatalog {
    fn get(&self, id: &str) -> Option<&GarmentRecord> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    fn records(&self) -> &[GarmentRecord] {
        &self.records
    }
}
