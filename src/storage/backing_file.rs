use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use crate::core::error::{Error, ErrorKind, Result};

/// Append one line, first terminating a last line that lacks its newline
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new().read(true).append(true).open(path)?;

    let mut data = Vec::with_capacity(line.len() + 2);
    if !ends_with_newline(&mut file)? {
        data.push(b'\n');
    }
    data.extend_from_slice(line.as_bytes());
    data.push(b'\n');

    file.write_all(&data)?;
    file.sync_data()?;
    Ok(())
}

/// All lines, each keeping its own terminator
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.split_inclusive('\n').map(String::from).collect())
}

pub fn line_count(path: &Path) -> Result<usize> {
    Ok(read_lines(path)?.len())
}

/// Rewrite the file without line `index`, leaving every other byte in place.
///
/// `check` sees the doomed line before anything is written; an error from it
/// aborts the rewrite. The new content goes to a temporary file in `directory`
/// (the backing file's own) which then replaces the original, so a failed
/// write leaves the old file intact.
pub fn remove_line<F>(path: &Path, directory: &Path, index: usize, check: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<()>,
{
    let lines = read_lines(path)?;
    let doomed = lines.get(index).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidState,
            format!("{} has {} lines, cannot remove line {}", path.display(), lines.len(), index),
        )
    })?;
    check(doomed)?;

    let mut temp = NamedTempFile::new_in(directory)?;
    for (i, line) in lines.iter().enumerate() {
        if i != index {
            temp.write_all(line.as_bytes())?;
        }
    }
    temp.as_file().sync_data()?;
    temp.persist(path)?;

    Ok(())
}

fn ends_with_newline(file: &mut File) -> Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch(content: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Products.txt");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn append_terminates_unfinished_last_line() {
        let (_dir, path) = scratch("header\nrow1");
        append_line(&path, "row2").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "header\nrow1\nrow2\n");
    }

    #[test]
    fn append_to_terminated_file() {
        let (_dir, path) = scratch("header\n");
        append_line(&path, "row1").unwrap();
        append_line(&path, "row2").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "header\nrow1\nrow2\n");
    }

    #[test]
    fn remove_line_keeps_other_bytes() {
        let (_dir, path) = scratch("header\r\nrow1\r\nrow2\nrow3");
        remove_line(&path, path.parent().unwrap(), 2, |line| {
            assert_eq!(line, "row2\n");
            Ok(())
        })
        .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "header\r\nrow1\r\nrow3");
    }

    #[test]
    fn failed_check_leaves_file_untouched() {
        let (_dir, path) = scratch("header\nrow1\n");
        let err = remove_line(&path, path.parent().unwrap(), 1, |_| {
            Err(Error::new(ErrorKind::InvalidState, "mismatch".to_string()))
        })
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
        assert_eq!(fs::read_to_string(&path).unwrap(), "header\nrow1\n");
    }

    #[test]
    fn out_of_range_index_is_invalid_state() {
        let (_dir, path) = scratch("header\nrow1\n");
        let err = remove_line(&path, path.parent().unwrap(), 5, |_| Ok(())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
        assert_eq!(line_count(&path).unwrap(), 2);
    }
}
