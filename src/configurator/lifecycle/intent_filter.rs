//! The managed redirect intent filter in `AndroidManifest.xml`.
//!
//! A web redirect (`http`/`https`) is handled by the browser, so the
//! `OneginiRedirectionIntent` block must be absent. Any other scheme requires
//! the app to claim it.

use super::ArtifactState;
use crate::configurator::error::{Error, Result};
use crate::configurator::fs;
use crate::configurator::patch::manifest::{
    self, RedirectTarget, SchemePatch, has_redirection_intent,
};
use std::path::Path;

/// What happened to the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentFilterOutcome {
    /// The managed block was removed
    Removed,
    /// Nothing to remove
    AlreadyAbsent,
    /// The managed block's `<data/>` element was regenerated
    RewroteModern,
    /// The legacy `MainActivity` scheme was rewritten
    RewroteLegacy,
    /// A managed block was added to the launcher activity
    Inserted,
    /// No anchor and no launcher activity; the scheme must be added by hand
    LauncherMissing,
}

impl IntentFilterOutcome {
    /// Resulting state of the managed block.
    pub fn state(self) -> ArtifactState {
        match self {
            IntentFilterOutcome::Removed
            | IntentFilterOutcome::AlreadyAbsent
            | IntentFilterOutcome::LauncherMissing => ArtifactState::Absent,
            _ => ArtifactState::PresentCustom,
        }
    }
}

/// Brings the manifest's redirect declaration in line with `target`.
pub fn sync_redirect_intent(
    manifest_path: &Path,
    target: &RedirectTarget,
) -> Result<IntentFilterOutcome> {
    if !manifest_path.is_file() {
        if target.is_web() {
            return Ok(IntentFilterOutcome::AlreadyAbsent);
        }
        return Err(Error::path(format!(
            "Cannot read the Android Manifest at {}",
            manifest_path.display()
        )));
    }
    let contents = fs::read_file(manifest_path)?;

    if target.is_web() {
        if !has_redirection_intent(&contents) {
            return Ok(IntentFilterOutcome::AlreadyAbsent);
        }
        fs::replace_file(manifest_path, &manifest::remove_redirection_intent(&contents))?;
        log::info!("Removed redirect intent filter for web scheme '{}'", target.scheme);
        return Ok(IntentFilterOutcome::Removed);
    }

    let (patched, outcome) = match manifest::patch_redirect_scheme(&contents, target)? {
        SchemePatch::Modern(patched) => (patched, IntentFilterOutcome::RewroteModern),
        SchemePatch::Legacy(patched) => (patched, IntentFilterOutcome::RewroteLegacy),
        SchemePatch::Missing => match manifest::insert_redirection_intent(&contents, target) {
            Some(patched) => (patched, IntentFilterOutcome::Inserted),
            None => return Ok(IntentFilterOutcome::LauncherMissing),
        },
    };

    if patched != contents {
        fs::replace_file(manifest_path, &patched)?;
    } else {
        log::debug!("Manifest already declares scheme '{}'", target.scheme);
    }
    Ok(outcome)
}
