//! Command line argument parsing and validation.
//!
//! Arguments are parsed with clap and converted once into an immutable
//! [`RunConfig`] for the engine.

use crate::configurator::{
    FlagOverrides, Platform, RunConfig, RunConfigBuilder, SourceLanguage, TopologySelector,
};
use crate::error::{CliError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configures Android and iOS projects for the Onegini SDK
#[derive(Parser, Debug)]
#[command(
    name = "onegini-sdk-configurator",
    version,
    about = "Configures Android and iOS projects for the Onegini SDK",
    long_about = "Configures a native, Cordova or NativeScript project with the configuration zip exported by the Token Server.

Usage:
  onegini-sdk-configurator android -c ts-config.zip -a MyApp -m app -f staging
  onegini-sdk-configurator ios -c ts-config.zip -a MyApp -t MyApp
  onegini-sdk-configurator android --cordova -c ts-config.zip -a my-cordova-app

Exit code 0 = the project is configured."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the Token Server configuration zip
    #[arg(short = 'c', long = "config", global = true, value_name = "ZIP")]
    pub config: Option<PathBuf>,

    /// Root directory of your application project
    #[arg(short = 'a', long = "app-dir", global = true, value_name = "DIR", default_value = ".")]
    pub app_dir: PathBuf,

    /// Xcode target to configure (iOS)
    #[arg(short = 't', long = "target-name", global = true, value_name = "NAME")]
    pub target_name: Option<String>,

    /// Gradle module holding the application sources (Android)
    #[arg(short = 'm', long = "module-name", global = true, value_name = "NAME")]
    pub module_name: Option<String>,

    /// Product flavor to configure (Android)
    #[arg(short = 'f', long = "flavor-name", global = true, value_name = "NAME")]
    pub flavor_name: Option<String>,

    /// Configure a Cordova project
    #[arg(short = 'o', long = "cordova", global = true, conflicts_with = "nativescript")]
    pub cordova: bool,

    /// Configure a NativeScript project
    #[arg(short = 'n', long = "nativescript", global = true)]
    pub nativescript: bool,

    /// Generate the Android configuration model in Kotlin
    #[arg(long = "kotlin", global = true)]
    pub kotlin: bool,

    /// Enable or disable debug detection
    #[arg(
        short = 'd',
        long = "debugDetection",
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub debug_detection: Option<bool>,

    /// Enable or disable root detection
    #[arg(
        short = 'r',
        long = "rootDetection",
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub root_detection: Option<bool>,

    /// Enable or disable debug logs
    #[arg(
        short = 'l',
        long = "debugLogs",
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub debug_logs: Option<bool>,

    /// Enable or disable tampering protection
    #[arg(
        short = 'p',
        long = "tamperingProtection",
        global = true,
        hide = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub tampering_protection: Option<bool>,

    /// Enable or disable storing cookies
    #[arg(
        short = 's',
        long = "storeCookies",
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub store_cookies: Option<bool>,

    /// BouncyCastle provider jar used by keytool to write BKS keystores (Android)
    #[arg(long = "bcprov-jar", global = true, env = "BCPROV_JAR", value_name = "JAR")]
    pub bcprov_jar: Option<PathBuf>,

    /// Print every written and removed file
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Platform subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Configure an Android project
    Android,
    /// Configure an iOS project
    Ios,
}

impl Command {
    /// Platform configured by this command.
    pub fn platform(self) -> Platform {
        match self {
            Command::Android => Platform::Android,
            Command::Ios => Platform::Ios,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), CliError> {
        match &self.config {
            None => Err(CliError::MissingArgument {
                argument: "--config".to_string(),
            }),
            Some(path) if path.as_os_str().is_empty() => Err(CliError::InvalidArguments {
                reason: "--config cannot be empty".to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Topology selected by `--cordova` / `--nativescript`.
    pub fn topology(&self) -> TopologySelector {
        if self.cordova {
            TopologySelector::Cordova
        } else if self.nativescript {
            TopologySelector::NativeScript
        } else {
            TopologySelector::Native
        }
    }

    /// Feature toggles given on the command line.
    pub fn flag_overrides(&self) -> FlagOverrides {
        FlagOverrides {
            root_detection: self.root_detection,
            debug_detection: self.debug_detection,
            debug_logs: self.debug_logs,
            tampering_protection: self.tampering_protection,
            store_cookies: self.store_cookies,
        }
    }

    /// Builds the immutable run configuration.
    pub fn run_config(&self) -> Result<RunConfig> {
        self.validate()?;

        let mut builder = RunConfigBuilder::new(self.command.platform())
            .app_dir(&self.app_dir)
            .topology(self.topology())
            .language(if self.kotlin {
                SourceLanguage::Kotlin
            } else {
                SourceLanguage::Java
            })
            .flags(self.flag_overrides());

        if let Some(config) = &self.config {
            builder = builder.bundle_path(config);
        }
        if let Some(target) = &self.target_name {
            builder = builder.target_name(target);
        }
        if let Some(module) = &self.module_name {
            builder = builder.module_name(module);
        }
        if let Some(flavor) = &self.flavor_name {
            builder = builder.flavor_name(flavor);
        }
        if let Some(jar) = &self.bcprov_jar {
            builder = builder.bcprov_jar(jar);
        }

        Ok(builder.build()?)
    }
}
