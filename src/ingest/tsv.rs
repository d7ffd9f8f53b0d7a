use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use crate::core::error::{Error, ErrorKind, Result};
use crate::ingest::RowSet;
use crate::storage::layout::StorageLayout;

/// Read a tab-separated source, dropping the header line.
///
/// Blank lines are rejected: the store relies on data line `n` holding
/// record `n`, and a blank line would shift every record after it. A file
/// without its header line is rejected for the same reason, since the first
/// appended record would land where the header belongs.
pub fn read_rows(path: &Path) -> Result<RowSet> {
    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::Io, format!("Failed to open source {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let mut lines_seen = 0;
    let mut rows = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        lines_seen += 1;
        if line_no < StorageLayout::HEADER_LINES {
            continue;
        }
        if line.trim().is_empty() {
            return Err(Error::new(
                ErrorKind::Parse,
                format!("{}: blank line {} breaks record alignment", path.display(), line_no + 1),
            ));
        }
        rows.push(split_line(&line));
    }

    if lines_seen < StorageLayout::HEADER_LINES {
        return Err(Error::new(
            ErrorKind::Parse,
            format!("{}: missing header line", path.display()),
        ));
    }

    Ok(RowSet::from_rows(rows))
}

pub fn split_line(line: &str) -> Vec<String> {
    line.split('\t').map(|field| field.trim().to_string()).collect()
}
