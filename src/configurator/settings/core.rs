//! Core RunConfig struct.

use super::{Platform, SourceLanguage, TopologySelector};
use std::path::{Path, PathBuf};

/// Feature toggles given explicitly by the caller.
///
/// `None` means "not given"; the documented default applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    pub root_detection: Option<bool>,
    pub debug_detection: Option<bool>,
    pub debug_logs: Option<bool>,
    pub tampering_protection: Option<bool>,
    pub store_cookies: Option<bool>,
}

impl FlagOverrides {
    /// Names of the toggles that were given explicitly, in command line spelling.
    pub fn given(&self) -> Vec<&'static str> {
        [
            ("rootDetection", self.root_detection),
            ("debugDetection", self.debug_detection),
            ("debugLogs", self.debug_logs),
            ("tamperingProtection", self.tampering_protection),
            ("storeCookies", self.store_cookies),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|_| name))
        .collect()
    }
}

/// Immutable configuration of a single run, constructed via [`RunConfigBuilder`].
///
/// [`RunConfigBuilder`]: super::RunConfigBuilder
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub(super) platform: Platform,
    pub(super) app_dir: PathBuf,
    pub(super) bundle_path: PathBuf,
    pub(super) target_name: Option<String>,
    pub(super) module_name: String,
    pub(super) flavor_name: Option<String>,
    pub(super) topology: TopologySelector,
    pub(super) language: SourceLanguage,
    pub(super) flags: FlagOverrides,
    pub(super) bcprov_jar: Option<PathBuf>,
}

impl RunConfig {
    /// Platform being configured.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Project root directory.
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// Path of the Token Server configuration zip.
    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// Xcode target name, if given.
    pub fn target_name(&self) -> Option<&str> {
        self.target_name.as_deref()
    }

    /// Gradle module that holds the application sources.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Optional Android product flavor.
    pub fn flavor_name(&self) -> Option<&str> {
        self.flavor_name.as_deref()
    }

    /// Requested topology.
    pub fn topology(&self) -> TopologySelector {
        self.topology
    }

    /// Language of generated Android sources.
    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Explicit feature toggles.
    pub fn flags(&self) -> &FlagOverrides {
        &self.flags
    }

    /// BouncyCastle provider jar used by keytool.
    pub fn bcprov_jar(&self) -> Option<&Path> {
        self.bcprov_jar.as_deref()
    }
}
