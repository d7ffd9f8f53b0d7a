use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::core::error::Result;
use crate::storage::layout::StorageLayout;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source_path: PathBuf,
    pub csv_copy_path: Option<PathBuf>, // None skips the intermediate copy
    pub log_results: bool,              // Emit query counts and listings through tracing
    pub lock_backing_file: bool,        // flock a sidecar file around insert/delete
}

impl Default for Config {
    fn default() -> Self {
        Config::for_source("Products.txt")
    }
}

impl Config {
    pub fn for_source(source_path: impl Into<PathBuf>) -> Self {
        let source_path = source_path.into();
        let csv_copy_path = Some(StorageLayout::default_csv_copy_path(&source_path));
        Config {
            source_path,
            csv_copy_path,
            log_results: true,
            lock_backing_file: true,
        }
    }

    /// Load from a JSON file; missing keys fall back to the defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        Ok(config)
    }

    pub fn without_csv_copy(mut self) -> Self {
        self.csv_copy_path = None;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.log_results = false;
        self
    }

    pub fn layout(&self) -> StorageLayout {
        StorageLayout::new(self.source_path.clone(), self.csv_copy_path.clone())
    }
}
