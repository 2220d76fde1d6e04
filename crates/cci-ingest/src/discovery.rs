//! Candidate file discovery inside dataset directories.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Extension of the files that are tagged.
pub const DATA_FILE_EXTENSION: &str = "nc";

/// Supplies the candidate files of a dataset.
pub trait FileEnumerator {
    /// Candidate files of `dataset`, sorted, at most `max_files` when non-zero.
    fn files(&self, dataset: &str, max_files: usize) -> Result<Vec<PathBuf>>;
}

/// Walks the dataset directory tree for `.nc` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileEnumerator;

impl FileEnumerator for FsFileEnumerator {
    fn files(&self, dataset: &str, max_files: usize) -> Result<Vec<PathBuf>> {
        list_data_files(Path::new(dataset), max_files)
    }
}

/// Lists all `.nc` files below a directory, recursively.
///
/// Returns paths sorted lexically; when `max_files` is non-zero only the
/// first `max_files` of them are kept.
pub fn list_data_files(dir: &Path, max_files: usize) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    collect_data_files(dir, &mut files)?;
    files.sort();
    if max_files > 0 {
        files.truncate(max_files);
    }
    Ok(files)
}

fn collect_data_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if path.is_dir() {
            collect_data_files(&path, files)?;
            continue;
        }

        let is_data = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == DATA_FILE_EXTENSION);

        if is_data {
            files.push(path);
        }
    }
    Ok(())
}
