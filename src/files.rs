//! Directory scans for task data.
//!
//! Every listing keeps the order `read_dir` yields; nothing here sorts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// A file read from disk, named by its file name (not the full path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile<C> {
    pub name: String,
    pub content: C,
}

/// Lists the regular files directly inside `dir`.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::io(dir, source))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::io(dir, source))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Lists the regular files in `dir` whose name ends with `ext`.
///
/// `ext` may be given with or without the leading dot.
pub fn list_matching(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let suffix = normalize_ext(ext);
    let files: Vec<PathBuf> = list_files(dir)?
        .into_iter()
        .filter(|path| file_name(path).ends_with(suffix.as_str()))
        .collect();
    debug!(dir = %dir.display(), ext = %suffix, count = files.len(), "scanned directory");
    Ok(files)
}

/// Reads every `ext` file in `dir` as raw bytes.
pub fn gather(dir: &Path, ext: &str) -> Result<Vec<LocalFile<Vec<u8>>>> {
    list_matching(dir, ext)?
        .iter()
        .map(|path| read_bytes(path))
        .collect()
}

/// Reads every `ext` file in `dir` as UTF-8 text.
pub fn gather_text(dir: &Path, ext: &str) -> Result<Vec<LocalFile<String>>> {
    list_matching(dir, ext)?
        .iter()
        .map(|path| {
            let content = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
            Ok(LocalFile {
                name: file_name(path),
                content,
            })
        })
        .collect()
}

pub fn read_bytes(path: &Path) -> Result<LocalFile<Vec<u8>>> {
    let content = fs::read(path).map_err(|source| Error::io(path, source))?;
    Ok(LocalFile {
        name: file_name(path),
        content,
    })
}

fn normalize_ext(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
