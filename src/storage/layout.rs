use std::path::{Path, PathBuf};

/// File locations for one store
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub source_path: PathBuf,           // Tab-separated backing file
    pub csv_copy_path: Option<PathBuf>, // Intermediate comma-separated copy
    pub lock_path: PathBuf,             // Advisory lock taken during mutations
}

impl StorageLayout {
    /// Lines at the top of the backing file that hold no record
    pub const HEADER_LINES: usize = 1;

    pub fn new(source_path: PathBuf, csv_copy_path: Option<PathBuf>) -> Self {
        let lock_path = Self::sibling(&source_path, "lock");
        StorageLayout {
            source_path,
            csv_copy_path,
            lock_path,
        }
    }

    /// `Products.txt` -> `Products_db.csv` in the same directory
    pub fn default_csv_copy_path(source_path: &Path) -> PathBuf {
        let stem = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "drugs".to_string());
        source_path.with_file_name(format!("{}_db.csv", stem))
    }

    /// Backing-file line index of the record at 1-based `position`
    pub fn line_for_position(position: usize) -> usize {
        debug_assert!(position >= 1);
        position - 1 + Self::HEADER_LINES
    }

    /// Directory holding the backing file; temporary rewrites are created here
    pub fn directory(&self) -> &Path {
        match self.source_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn sibling(path: &Path, extension: &str) -> PathBuf {
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".");
        name.push(extension);
        path.with_file_name(name)
    }
}
