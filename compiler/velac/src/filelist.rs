//! File lists: text files naming one input path per line.

use std::path::{Path, PathBuf};

use crate::FrontendError;

/// Split file-list text into paths. Trailing `\r` is dropped and blank
/// lines are skipped; relative paths stay relative to the working
/// directory.
pub fn parse_file_list(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(PathBuf::from)
        .collect()
}

pub fn read_file_list(path: &Path) -> Result<Vec<PathBuf>, FrontendError> {
    let text = std::fs::read_to_string(path).map_err(|source| FrontendError::ReadFileList {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_file_list(&text);
    tracing::debug!(list = %path.display(), entries = entries.len(), "read file list");
    Ok(entries)
}
