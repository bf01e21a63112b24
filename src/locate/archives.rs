// src/locate/archives.rs

use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::error::{BptError, Result};

/// Every `.zip` file under `dir` (any depth), sorted by path.
pub fn all_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let root = dir
        .to_str()
        .ok_or_else(|| BptError::Config(format!("non UTF-8 directory {:?}", dir)))?;
    let pattern = format!("{}/**/*", Pattern::escape(root.trim_end_matches('/')));

    let mut out = Vec::new();
    for entry in glob(&pattern)? {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            BptError::io(path, e.into_error())
        })?;
        if path.is_file() && is_zip(&path) {
            trace!(archive = %path.display(), "found archive");
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Archives under `dir` whose file name contains `needle`, sorted by path.
pub fn find_archives(dir: &Path, needle: &str) -> Result<Vec<PathBuf>> {
    Ok(all_archives(dir)?
        .into_iter()
        .filter(|p| file_name(p).contains(needle))
        .collect())
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_zip(path: &Path) -> bool {
    file_name(path).to_lowercase().ends_with(".zip")
}
