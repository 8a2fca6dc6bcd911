//! Command implementations for the dressform binary.

pub mod adjust;
pub mod classify;
pub mod recommend;
pub mod silhouette;
pub mod try_on;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use dressform_spec::catalog::{EmptyCatalog, GarmentCatalog, JsonCatalog};
use dressform_tryon::{ArtifactClassifier, FittingRoom, RuleClassifier, ShapeClassifier, StorageConfig};

/// Build a classifier: the artifact-backed one when a path is given,
/// the measurement rules otherwise.
pub fn build_classifier(artifact: Option<&Path>) -> Result<Box<dyn ShapeClassifier>> {
    match artifact {
        Some(path) => {
            let classifier = ArtifactClassifier::load(path)
                .with_context(|| format!("failed to load classifier {}", path.display()))?;
            Ok(Box::new(classifier))
        }
        None => Ok(Box::new(RuleClassifier)),
    }
}

/// Build a catalog from an optional JSON path.
pub fn build_catalog(catalog: Option<&Path>) -> Result<Box<dyn GarmentCatalog>> {
    match catalog {
        Some(path) => {
            let catalog = JsonCatalog::load(path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
            Ok(Box::new(catalog))
        }
        None => Ok(Box::new(EmptyCatalog)),
    }
}

/// Assemble a fitting room under a data directory, creating the storage
/// layout on the way. Directory creation is deliberately a CLI concern;
/// the pipeline itself never creates directories.
pub fn build_fitting_room(
    data_dir: &Path,
    catalog: Option<&Path>,
    classifier_artifact: Option<&Path>,
) -> Result<FittingRoom> {
    let storage = StorageConfig::under(data_dir);
    std::fs::create_dir_all(&storage.results_dir)
        .with_context(|| format!("failed to create {}", storage.results_dir.display()))?;
    std::fs::create_dir_all(&storage.temp_dir)
        .with_context(|| format!("failed to create {}", storage.temp_dir.display()))?;
    std::fs::create_dir_all(&storage.templates_dir)
        .with_context(|| format!("failed to create {}", storage.templates_dir.display()))?;
    log::debug!("storage initialized under {}", data_dir.display());

    Ok(FittingRoom::new(
        build_classifier(classifier_artifact)?,
        build_catalog(catalog)?,
        storage,
    ))
}

/// Default data directory: ./dressform-data.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from("dressform-data")
}
