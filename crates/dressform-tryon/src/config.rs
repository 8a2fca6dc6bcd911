//! Storage layout for pipeline inputs and outputs.

use std::path::{Path, PathBuf};

/// Where the pipeline reads templates and writes results. Directory
/// creation is the caller's job; the pipeline only resolves paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Result images and reports land here.
    pub results_dir: PathBuf,
    /// Scratch space for intermediate renders.
    pub temp_dir: PathBuf,
    /// Garment images referenced by catalog records.
    pub templates_dir: PathBuf,
}

impl StorageConfig {
    /// All three directories under one root: `root/results`, `root/temp`,
    /// `root/templates`.
    pub fn under(root: &Path) -> Self {
        Self {
            results_dir: root.join("results"),
            temp_dir: root.join("temp"),
            templates_dir: root.join("templates"),
        }
    }

    /// Resolve a garment image reference. Absolute references pass
    /// through; relative ones resolve against the templates directory.
    pub fn garment_path(&self, image: &str) -> PathBuf {
        let path = Path::new(image);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.templates_dir.join(path)
        }
    }
}
