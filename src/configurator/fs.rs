//! File system helpers for generated artifacts.
//!
//! Every write is preceded by an unconditional delete-if-exists so re-runs
//! never interleave old and new content. Deletions are idempotent.

use super::error::{ErrorExt, Result};
use std::{
    io::{self},
    path::Path,
};

/// Removes a file if it exists. A missing file is not an error.
///
/// Returns `true` when a file was actually removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false), // Idempotent
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Creates all directories of the given path. Succeeds if it already exists.
pub fn create_dir_all(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).fs_context("creating directory", path)
}

/// Replaces the file at `path` with `contents`, creating parent directories.
pub fn replace_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    remove_file_if_exists(path)?;
    std::fs::write(path, contents).fs_context("writing file", path)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Reads a file that is expected to exist.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).fs_context("reading file", path)
}

/// Reads the project copy of a generated file if present, otherwise returns
/// the bundled asset.
///
/// A project-local customisation therefore survives repeated runs.
pub fn read_project_or_asset(path: &Path, asset: &str) -> Result<Vec<u8>> {
    if path.is_file() {
        log::debug!("Using project copy of {}", path.display());
        read_file(path)
    } else {
        log::debug!("Using bundled template for {}", path.display());
        Ok(asset.as_bytes().to_vec())
    }
}
