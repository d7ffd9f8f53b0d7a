pub mod tsv;
pub mod csv;
pub mod rows;

use std::path::Path;
use crate::core::error::Result;

/// Normalized ingestion output: one entry per source record, fields trimmed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    pub rows: Vec<Vec<String>>,
}

impl RowSet {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        RowSet { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec<String>> {
        self.rows.iter()
    }
}

/// Read the tab-separated source and, when a copy path is given, route the
/// rows through the comma-separated intermediate file.
pub fn load_rows(source: &Path, csv_copy: Option<&Path>) -> Result<RowSet> {
    let rows = tsv::read_rows(source)?;

    match csv_copy {
        Some(copy_path) => {
            csv::write_rows(copy_path, &rows)?;
            csv::read_rows(copy_path)
        }
        None => Ok(rows),
    }
}
