//! Project topology detection and artifact path resolution.
//!
//! A project is either plain native, wrapped by Cordova, or wrapped by
//! NativeScript. Each variant supplies its own [`TopologyLayout`] so the
//! resolver never branches on the topology itself.
//!
//! # Module Organization
//!
//! - [`android`] - package identifier probing (manifest, build-script namespace)
//! - [`cordova`] - `config.xml` parsing and the Cordova layouts
//! - [`nativescript`] - `package.json` parsing and the NativeScript layout
//! - [`native`] - plain Gradle/Xcode layout with module, flavor and target
//! - [`ios`] - Xcode project discovery
//! - [`resolver`] - [`TopologyResolver`] and [`ResolvedPaths`]

pub mod android;
mod cordova;
pub mod ios;
mod native;
mod nativescript;
mod resolver;

pub use cordova::{CordovaPreference, CordovaProject};
pub use native::NativeProject;
pub use nativescript::{NativeScriptPreferences, NativeScriptProject};
pub use resolver::{AndroidPaths, IosPaths, ResolvedPaths, TopologyResolver};

use super::error::{Error, Result};
use super::settings::TopologySelector;
use std::path::{Path, PathBuf};

/// Inputs every layout computes paths from.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    /// Project root
    pub root: &'a Path,
    /// Gradle module holding the app sources (native Android)
    pub module: &'a str,
    /// Optional product flavor (native Android)
    pub flavor: Option<&'a str>,
    /// Xcode target (iOS)
    pub target: Option<&'a str>,
}

/// Path strategy of one project topology.
///
/// Android: the *platform path* holds `AndroidManifest.xml`, the *source path*
/// is the source set holding `res/`, and the *classpath* is the package
/// directory generated sources go to. iOS: the platform path holds the
/// `.xcodeproj`, the source path holds `Configuration/` and `Resources/`.
pub trait TopologyLayout {
    /// Human readable topology name.
    fn name(&self) -> &'static str;

    /// Android directory containing `AndroidManifest.xml`.
    fn android_platform_path(&self, ctx: &LayoutContext<'_>) -> Result<PathBuf>;

    /// Android source set directory containing `res/`.
    fn android_src_path(&self, ctx: &LayoutContext<'_>) -> Result<PathBuf>;

    /// Android package directory for the given dotted package identifier.
    fn android_classpath(&self, ctx: &LayoutContext<'_>, package_id: &str) -> Result<PathBuf>;

    /// Package identifier declared by the framework config, if any.
    fn declared_package_id(&self) -> Option<&str> {
        None
    }

    /// Xcode target declared by the framework config, if any. Takes
    /// precedence over a target given by the caller.
    fn declared_ios_target(&self) -> Option<&str> {
        None
    }

    /// iOS directory containing the Xcode project.
    fn ios_platform_path(&self, ctx: &LayoutContext<'_>) -> PathBuf;

    /// iOS directory holding generated sources and resources.
    fn ios_src_path(&self, ctx: &LayoutContext<'_>) -> PathBuf;

    /// Fails when the topology needs an iOS platform directory that is missing.
    fn ensure_ios_platform(&self, _ctx: &LayoutContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Advisory messages produced while probing the layout.
    fn android_advisories(&self, _ctx: &LayoutContext<'_>) -> Vec<String> {
        Vec::new()
    }
}

/// The detected topology, immutable after detection.
#[derive(Debug, Clone)]
pub enum ProjectTopology {
    /// Plain native project
    Native(NativeProject),
    /// Cordova project with its parsed `config.xml`
    Cordova(CordovaProject),
    /// NativeScript project with its parsed `package.json`
    NativeScript(NativeScriptProject),
}

impl ProjectTopology {
    /// Detects the topology selected by the caller by reading its config file.
    ///
    /// # Errors
    ///
    /// [`Error::Input`] when the framework config cannot
    /// be read or parsed.
    pub fn detect(root: &Path, selector: TopologySelector) -> Result<Self> {
        let topology = match selector {
            TopologySelector::Native => ProjectTopology::Native(NativeProject),
            TopologySelector::Cordova => {
                ProjectTopology::Cordova(CordovaProject::load(&root.join(cordova::CONFIG_FILE))?)
            }
            TopologySelector::NativeScript => ProjectTopology::NativeScript(
                NativeScriptProject::load(&root.join(nativescript::CONFIG_FILE))?,
            ),
        };
        log::debug!("Detected {} topology", topology.layout().name());
        Ok(topology)
    }

    /// The path strategy of this topology.
    pub fn layout(&self) -> &dyn TopologyLayout {
        match self {
            ProjectTopology::Native(project) => project,
            ProjectTopology::Cordova(project) => project,
            ProjectTopology::NativeScript(project) => project,
        }
    }

    /// Whether this is a hybrid framework topology.
    pub fn is_hybrid(&self) -> bool {
        !matches!(self, ProjectTopology::Native(_))
    }

    /// Directory a hybrid framework keeps the given native platform in.
    pub(crate) fn hybrid_platform_dir(root: &Path, platform: &str) -> PathBuf {
        root.join("platforms").join(platform)
    }

    /// Fails with a "platform add" hint when a hybrid platform directory is missing.
    pub(crate) fn require_hybrid_platform(root: &Path, platform: &str, cli: &str) -> Result<PathBuf> {
        let dir = Self::hybrid_platform_dir(root, platform);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(Error::path(format!(
                "Your project does not seem to have the {} platform added. \
                 Please try `{cli} platform add {platform}`",
                if platform == "ios" { "iOS" } else { "Android" }
            )))
        }
    }
}
