//! Shared file utilities.

use std::{
    fs::read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::glob;

pub fn read_font(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    read(path).with_context(|| format!("Failed to read font: {}", path.display()))
}

/// Find files matching a glob pattern in a directory, sorted by path.
pub fn glob_fonts(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(pattern);
    let pattern_str = pattern.to_str().context("Invalid pattern path")?;
    let mut paths: Vec<PathBuf> = glob(pattern_str)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .collect();
    paths.sort();
    Ok(paths)
}

/// File name of `path` for display, or the whole path when it has none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
