//! Xcode project discovery.

use crate::configurator::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Finds the single `*.xcodeproj` entry directly inside `dir`.
///
/// # Errors
///
/// [`Error::PathResolution`] when no or more than one Xcode project exists.
pub fn find_xcodeproj(dir: &Path) -> Result<PathBuf> {
    let dir_str = dir.to_str().ok_or_else(|| {
        Error::path(format!(
            "Project path contains invalid UTF-8: {}",
            dir.display()
        ))
    })?;
    let pattern = format!("{}/*.xcodeproj", glob::Pattern::escape(dir_str));

    let mut projects: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| Error::path(format!("Invalid Xcode project pattern {pattern}: {e}")))?
        .flatten()
        .collect();
    projects.sort();

    match projects.len() {
        0 => Err(Error::path(format!(
            "Could not find an Xcode project directory (.xcodeproj). Are you sure that '{}' \
             contains one?",
            dir.display()
        ))),
        1 => Ok(projects.remove(0)),
        _ => Err(Error::path(format!(
            "Found multiple Xcode project directories (.xcodeproj) in '{}'. The SDK \
             configurator currently only supports a single xcodeproj directory.",
            dir.display()
        ))),
    }
}
