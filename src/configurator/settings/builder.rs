//! Builder for constructing RunConfig.

use super::{FlagOverrides, Platform, RunConfig, SourceLanguage, TopologySelector};
use crate::configurator::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Default Gradle module holding the app sources.
pub const DEFAULT_MODULE_NAME: &str = "app";

/// Builder for [`RunConfig`].
///
/// # Examples
///
/// ```no_run
/// use sdk_configurator::configurator::{Platform, RunConfigBuilder, TopologySelector};
///
/// # fn example() -> sdk_configurator::configurator::Result<()> {
/// let config = RunConfigBuilder::new(Platform::Ios)
///     .bundle_path("ts-config.zip")
///     .app_dir("ExampleApp")
///     .target_name("ExampleApp")
///     .topology(TopologySelector::Native)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RunConfigBuilder {
    platform: Platform,
    app_dir: Option<PathBuf>,
    bundle_path: Option<PathBuf>,
    target_name: Option<String>,
    module_name: Option<String>,
    flavor_name: Option<String>,
    topology: TopologySelector,
    language: SourceLanguage,
    flags: FlagOverrides,
    bcprov_jar: Option<PathBuf>,
}

impl RunConfigBuilder {
    /// Creates a builder for the given platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            app_dir: None,
            bundle_path: None,
            target_name: None,
            module_name: None,
            flavor_name: None,
            topology: TopologySelector::default(),
            language: SourceLanguage::default(),
            flags: FlagOverrides::default(),
            bcprov_jar: None,
        }
    }

    /// Sets the project root. Default: current directory.
    pub fn app_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.app_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the configuration bundle path.
    ///
    /// # Required
    pub fn bundle_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bundle_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the Xcode target name.
    pub fn target_name(mut self, name: impl Into<String>) -> Self {
        self.target_name = non_empty(name.into());
        self
    }

    /// Sets the Gradle module name. Default: `app`.
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = non_empty(name.into());
        self
    }

    /// Sets the Android product flavor.
    pub fn flavor_name(mut self, name: impl Into<String>) -> Self {
        self.flavor_name = non_empty(name.into());
        self
    }

    /// Sets the project topology.
    pub fn topology(mut self, topology: TopologySelector) -> Self {
        self.topology = topology;
        self
    }

    /// Sets the Android source language. Default: Java.
    pub fn language(mut self, language: SourceLanguage) -> Self {
        self.language = language;
        self
    }

    /// Sets the explicit feature toggles.
    pub fn flags(mut self, flags: FlagOverrides) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the BouncyCastle provider jar for keytool.
    pub fn bcprov_jar<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bcprov_jar = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] when no bundle path was given.
    pub fn build(self) -> Result<RunConfig> {
        let bundle_path = self.bundle_path.ok_or_else(|| {
            Error::input(
                "No Token Server configuration provided. Provide one using \
                 'onegini-sdk-configurator <platform> -c <config-zip-location>'",
            )
        })?;

        Ok(RunConfig {
            platform: self.platform,
            app_dir: self.app_dir.unwrap_or_else(|| PathBuf::from(".")),
            bundle_path,
            target_name: self.target_name,
            module_name: self
                .module_name
                .unwrap_or_else(|| DEFAULT_MODULE_NAME.to_string()),
            flavor_name: self.flavor_name,
            topology: self.topology,
            language: self.language,
            flags: self.flags,
            bcprov_jar: self.bcprov_jar,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
