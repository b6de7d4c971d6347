//! Artifact path resolution.
//!
//! [`TopologyResolver`] turns a detected [`ProjectTopology`] plus the project
//! root and the optional module, flavor and target names into a
//! [`ResolvedPaths`] record. All paths are computed up front so writers never
//! recompute them; existence checks are re-evaluated on every call.

use super::{LayoutContext, ProjectTopology, android, ios};
use crate::configurator::error::{Error, Result};
use crate::configurator::settings::{Platform, SourceLanguage};
use std::path::{Path, PathBuf};

const CONFIG_MODEL_NAME: &str = "OneginiConfigModel";
const SECURITY_CONTROLLER_NAME: &str = "SecurityController";
const KEYSTORE_FILE: &str = "keystore.bks";
const IOS_CONFIGURATION_DIR: &str = "Configuration";
const IOS_RESOURCES_DIR: &str = "Resources";

/// Every location an Android run reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidPaths {
    /// Dotted package identifier the classpath was derived from
    pub package_id: String,
    /// `AndroidManifest.xml`
    pub manifest: PathBuf,
    /// Package directory of generated sources
    pub classpath: PathBuf,
    /// `res/raw` directory of the source set
    pub resource_dir: PathBuf,
    /// `res/raw/keystore.bks`
    pub keystore: PathBuf,
    /// Advisory messages collected while probing
    pub advisories: Vec<String>,
}

impl AndroidPaths {
    /// Configuration model source for the given language.
    pub fn config_model(&self, language: SourceLanguage) -> PathBuf {
        self.classpath
            .join(format!("{CONFIG_MODEL_NAME}.{}", language.extension()))
    }

    /// Security controller source for the given language.
    pub fn security_controller(&self, language: SourceLanguage) -> PathBuf {
        self.classpath
            .join(format!("{SECURITY_CONTROLLER_NAME}.{}", language.extension()))
    }
}

/// Every location an iOS run reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IosPaths {
    /// Xcode target name
    pub target: String,
    /// The single `*.xcodeproj` directory
    pub xcodeproj: PathBuf,
    /// Directory holding the generated Objective-C sources
    pub config_model_dir: PathBuf,
    /// Directory holding the `.cer` resources
    pub certificate_dir: PathBuf,
}

impl IosPaths {
    /// `OneginiConfigModel.h`
    pub fn config_model_header(&self) -> PathBuf {
        self.config_model_dir.join(format!("{CONFIG_MODEL_NAME}.h"))
    }

    /// `OneginiConfigModel.m`
    pub fn config_model_impl(&self) -> PathBuf {
        self.config_model_dir.join(format!("{CONFIG_MODEL_NAME}.m"))
    }

    /// `SecurityController.h`
    pub fn security_controller_header(&self) -> PathBuf {
        self.config_model_dir
            .join(format!("{SECURITY_CONTROLLER_NAME}.h"))
    }

    /// `SecurityController.m`
    pub fn security_controller_impl(&self) -> PathBuf {
        self.config_model_dir
            .join(format!("{SECURITY_CONTROLLER_NAME}.m"))
    }

    /// Group name the configuration sources are registered under.
    pub fn configuration_group(&self) -> &'static str {
        IOS_CONFIGURATION_DIR
    }

    /// Group name the certificates are registered under.
    pub fn resources_group(&self) -> &'static str {
        IOS_RESOURCES_DIR
    }
}

/// Resolved paths for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPaths {
    Android(AndroidPaths),
    Ios(IosPaths),
}

/// Computes [`ResolvedPaths`] for a topology.
///
/// # Examples
///
/// ```no_run
/// use sdk_configurator::configurator::{Platform, ProjectTopology, TopologyResolver, TopologySelector};
/// use std::path::Path;
///
/// # fn example() -> sdk_configurator::configurator::Result<()> {
/// let root = Path::new("MyApp");
/// let topology = ProjectTopology::detect(root, TopologySelector::Native)?;
/// let paths = TopologyResolver::new(root, &topology)
///     .module("app")
///     .flavor(Some("staging"))
///     .resolve(Platform::Android)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TopologyResolver<'a> {
    root: &'a Path,
    topology: &'a ProjectTopology,
    module: &'a str,
    flavor: Option<&'a str>,
    target: Option<&'a str>,
}

impl<'a> TopologyResolver<'a> {
    /// Creates a resolver with module `app`, no flavor and no target.
    pub fn new(root: &'a Path, topology: &'a ProjectTopology) -> Self {
        Self {
            root,
            topology,
            module: "app",
            flavor: None,
            target: None,
        }
    }

    /// Sets the Gradle module name.
    pub fn module(mut self, module: &'a str) -> Self {
        self.module = module;
        self
    }

    /// Sets the product flavor. Empty names count as no flavor.
    pub fn flavor(mut self, flavor: Option<&'a str>) -> Self {
        self.flavor = flavor.filter(|f| !f.is_empty());
        self
    }

    /// Sets the Xcode target name.
    pub fn target(mut self, target: Option<&'a str>) -> Self {
        self.target = target.filter(|t| !t.is_empty());
        self
    }

    fn context(&self) -> LayoutContext<'a> {
        LayoutContext {
            root: self.root,
            module: self.module,
            flavor: self.flavor,
            target: self.target,
        }
    }

    /// Resolves every path for `platform`.
    pub fn resolve(&self, platform: Platform) -> Result<ResolvedPaths> {
        Ok(match platform {
            Platform::Android => ResolvedPaths::Android(self.resolve_android()?),
            Platform::Ios => ResolvedPaths::Ios(self.resolve_ios()?),
        })
    }

    /// Resolves the Android paths, including package identifier probing.
    pub fn resolve_android(&self) -> Result<AndroidPaths> {
        let ctx = self.context();
        let layout = self.topology.layout();

        let platform_path = layout.android_platform_path(&ctx)?;
        let manifest = platform_path.join(android::MANIFEST_FILE);
        let package_id = match layout.declared_package_id() {
            Some(id) => id.to_string(),
            None => android::native_package_id(&manifest, &build_script_dir(&platform_path))?,
        };
        log::debug!("Android package identifier: {}", package_id);

        let classpath = layout.android_classpath(&ctx, &package_id)?;
        let resource_dir = layout.android_src_path(&ctx)?.join("res").join("raw");
        let keystore = resource_dir.join(KEYSTORE_FILE);

        Ok(AndroidPaths {
            package_id,
            manifest,
            classpath,
            resource_dir,
            keystore,
            advisories: layout.android_advisories(&ctx),
        })
    }

    /// Resolves the iOS paths, including the Xcode project lookup.
    pub fn resolve_ios(&self) -> Result<IosPaths> {
        let layout = self.topology.layout();
        let target = match (layout.declared_ios_target(), self.target) {
            (Some(declared), _) => declared,
            (None, Some(given)) => given,
            (None, None) if matches!(self.topology, ProjectTopology::Cordova(_)) => {
                return Err(Error::input(
                    "No application name found in your 'config.xml'. \
                     Please make sure that you have set one.",
                ));
            }
            (None, None) => {
                return Err(Error::input(
                    "No target name provided. Provide one using \
                     'onegini-sdk-configurator ios -t <target-name>'",
                ));
            }
        };

        let ctx = LayoutContext {
            target: Some(target),
            ..self.context()
        };
        layout.ensure_ios_platform(&ctx)?;

        let xcodeproj = ios::find_xcodeproj(&layout.ios_platform_path(&ctx))?;
        let src = layout.ios_src_path(&ctx);

        Ok(IosPaths {
            target: target.to_string(),
            xcodeproj,
            config_model_dir: src.join(IOS_CONFIGURATION_DIR),
            certificate_dir: src.join(IOS_RESOURCES_DIR),
        })
    }
}

/// Directory whose build script may declare a `namespace`.
///
/// `<module>/src/main` maps to `<module>`; layouts without a `src/main`
/// suffix keep their build script next to the manifest.
fn build_script_dir(platform_path: &Path) -> PathBuf {
    if platform_path.ends_with(Path::new("src").join("main")) {
        platform_path
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| platform_path.to_path_buf())
    } else {
        platform_path.to_path_buf()
    }
}
