//! The strict, synchronous configuration pipelines.
//!
//! Android: load bundle, detect topology, merge flags, resolve paths, sync the
//! security controller and the redirect intent filter, rebuild the keystore,
//! write the configuration model. iOS: load bundle, detect topology, merge
//! flags, resolve paths, verify the target, write the configuration model,
//! sync the security controller, replace the certificate resources.
//!
//! Every path is resolved before the first write; every step commits its
//! side effects before the next one starts.

use super::bundle::{ConfigurationBundle, load_bundle};
use super::certificates::{certificate_resources, write_ios_certificates};
use super::error::{Error, Result};
use super::external::{CommandRunner, ProjectMembership, XcodeprojScripts, find_keytool};
use super::fs;
use super::keystore::{KeystoreBuilder, keystore_hash};
use super::lifecycle::{
    IntentFilterOutcome, sync_android_security_controller, sync_ios_security_controller,
    sync_redirect_intent,
};
use super::patch::config_model::{
    AndroidModelValues, write_android_config_model, write_ios_config_model,
};
use super::patch::manifest::RedirectTarget;
use super::preferences::{FeatureFlags, merge_flags};
use super::report::{ConfigurationReport, android_manifest_hint, ios_info_plist_hint};
use super::settings::{DEFAULT_MODULE_NAME, Platform, RunConfig, SourceLanguage};
use super::topology::{ProjectTopology, TopologyResolver};
use std::path::PathBuf;

/// External collaborators of a run.
///
/// Unset collaborators are discovered on the system when first needed.
pub struct Collaborators<'a> {
    runner: &'a dyn CommandRunner,
    keytool: Option<PathBuf>,
    membership: Option<&'a dyn ProjectMembership>,
    warn: Option<&'a dyn Fn(&str)>,
}

impl<'a> Collaborators<'a> {
    /// Collaborators running external commands through `runner`.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            keytool: None,
            membership: None,
            warn: None,
        }
    }

    /// Uses the given `keytool` instead of searching `PATH` and `JAVA_HOME`.
    pub fn keytool(mut self, path: impl Into<PathBuf>) -> Self {
        self.keytool = Some(path.into());
        self
    }

    /// Uses the given Xcode membership implementation.
    pub fn membership(mut self, membership: &'a dyn ProjectMembership) -> Self {
        self.membership = Some(membership);
        self
    }

    /// Receives advisory messages instead of the log.
    pub fn on_warning(mut self, warn: &'a dyn Fn(&str)) -> Self {
        self.warn = Some(warn);
        self
    }

    fn warn(&self, message: &str) {
        match self.warn {
            Some(warn) => warn(message),
            None => log::warn!("{}", message),
        }
    }
}

/// Configures the project described by `config`.
pub fn configure(config: &RunConfig, collaborators: &Collaborators<'_>) -> Result<ConfigurationReport> {
    match config.platform() {
        Platform::Android => configure_android(config, collaborators),
        Platform::Ios => configure_ios(config, collaborators),
    }
}

/// Loads the bundle, detects the topology and merges the feature flags.
fn prepare(
    config: &RunConfig,
    collaborators: &Collaborators<'_>,
) -> Result<(ConfigurationBundle, ProjectTopology, FeatureFlags)> {
    let bundle = load_bundle(config.bundle_path())?;
    log::debug!("Loaded bundle for {}", bundle.options);

    let topology = ProjectTopology::detect(config.app_dir(), config.topology())?;

    let given = config.flags().given();
    let builtin = if topology.is_hybrid() {
        if !given.is_empty() {
            collaborators.warn(&format!(
                "Ignoring --{} for {} projects. Set the corresponding preferences in the \
                 framework configuration instead.",
                given.join(", --"),
                topology.layout().name()
            ));
        }
        FeatureFlags::default()
    } else {
        FeatureFlags::with_overrides(config.flags())
    };
    let flags = merge_flags(&topology, builtin)?;

    Ok((bundle, topology, flags))
}

fn configure_android(
    config: &RunConfig,
    collaborators: &Collaborators<'_>,
) -> Result<ConfigurationReport> {
    let (bundle, topology, flags) = prepare(config, collaborators)?;
    let options = &bundle.options;

    if topology.is_hybrid() {
        if config.flavor_name().is_some() {
            collaborators.warn(&format!(
                "Ignoring --flavor-name for {} projects.",
                topology.layout().name()
            ));
        }
        if config.module_name() != DEFAULT_MODULE_NAME {
            collaborators.warn(&format!(
                "Ignoring --module-name for {} projects.",
                topology.layout().name()
            ));
        }
    }

    let paths = TopologyResolver::new(config.app_dir(), &topology)
        .module(config.module_name())
        .flavor(config.flavor_name())
        .resolve_android()?;
    for advisory in &paths.advisories {
        collaborators.warn(advisory);
    }

    let keytool = match &collaborators.keytool {
        Some(path) => path.clone(),
        None => find_keytool()?,
    };
    let provider_jar = config.bcprov_jar().ok_or_else(|| {
        Error::tool(
            "keytool",
            "No BouncyCastle provider jar configured. Pass it with --bcprov-jar \
             or the BCPROV_JAR environment variable",
        )
    })?;

    let keystore = KeystoreBuilder::new(collaborators.runner, keytool, provider_jar);
    keystore.check_provider()?;
    let redirect = RedirectTarget::parse(&options.redirect_url)?;

    let language = config.language();
    let security_controller = sync_android_security_controller(&paths, language, &flags)?;

    let mut hints = Vec::new();
    let intent_filter = sync_redirect_intent(&paths.manifest, &redirect)?;
    if intent_filter == IntentFilterOutcome::LauncherMissing {
        collaborators.warn(&format!(
            "Could not find a launcher activity in {}",
            paths.manifest.display()
        ));
        hints.push(android_manifest_hint(&redirect.scheme));
    }

    keystore.build(&bundle.certificates, &paths.keystore)?;
    let keystore_hash = keystore_hash(&paths.keystore)?;

    write_android_config_model(
        &paths,
        language,
        &AndroidModelValues {
            package_id: &paths.package_id,
            options,
            keystore_hash: &keystore_hash,
        },
    )?;

    Ok(ConfigurationReport {
        platform: Platform::Android,
        topology: topology.layout().name(),
        options: bundle.options.clone(),
        flags,
        security_controller,
        intent_filter: Some(intent_filter),
        hints,
    })
}

fn configure_ios(
    config: &RunConfig,
    collaborators: &Collaborators<'_>,
) -> Result<ConfigurationReport> {
    let (bundle, topology, flags) = prepare(config, collaborators)?;
    let options = &bundle.options;

    if config.language() == SourceLanguage::Kotlin {
        collaborators.warn("Ignoring --kotlin for iOS projects.");
    }

    let paths = TopologyResolver::new(config.app_dir(), &topology)
        .target(config.target_name())
        .resolve_ios()?;
    let base64_certificates = bundle.certificates.base64_der_list()?;
    let certificate_files = certificate_resources(&bundle.certificates)?;
    let redirect = RedirectTarget::parse(&options.redirect_url)?;

    let discovered;
    let membership: &dyn ProjectMembership = match collaborators.membership {
        Some(membership) => membership,
        None => {
            discovered = XcodeprojScripts::discover(collaborators.runner)?;
            &discovered
        }
    };

    if !membership.has_target(&paths.xcodeproj, &paths.target)? {
        return Err(Error::path(format!(
            "The target '{}' does not exist in {}. Provide the correct target name using \
             'onegini-sdk-configurator ios -t <target-name>'",
            paths.target,
            paths.xcodeproj.display()
        )));
    }

    fs::create_dir_all(&paths.config_model_dir)?;
    fs::create_dir_all(&paths.certificate_dir)?;

    write_ios_config_model(&paths, options, &base64_certificates, membership)?;
    let security_controller = sync_ios_security_controller(&paths, &flags, membership)?;
    write_ios_certificates(&paths, &certificate_files, membership)?;

    let mut hints = Vec::new();
    if !redirect.is_web() {
        hints.push(ios_info_plist_hint(&redirect.scheme));
    }

    Ok(ConfigurationReport {
        platform: Platform::Ios,
        topology: topology.layout().name(),
        options: bundle.options.clone(),
        flags,
        security_controller,
        intent_filter: None,
        hints,
    })
}
