//! Configuration resolution and template-patch engine.
//!
//! Turns a Token Server configuration bundle plus a native, Cordova or
//! NativeScript project into generated SDK configuration sources.
//!
//! # Module Organization
//!
//! - [`settings`] - immutable [`RunConfig`] and its builder
//! - [`bundle`] - configuration zip loading ([`OptionSet`], [`CertificateSet`])
//! - [`topology`] - topology detection and [`TopologyResolver`]
//! - [`preferences`] - [`FeatureFlags`] and preference merging
//! - [`patch`] - anchor-based template patching
//! - [`lifecycle`] - optional artifact lifecycle
//! - [`keystore`] - Android keystore generation
//! - [`certificates`] - iOS certificate resources
//! - [`external`] - process execution and Xcode project membership
//! - [`pipeline`] - the Android and iOS pipelines
//! - [`report`] - success summary

pub mod bundle;
pub mod certificates;
pub mod error;
pub mod external;
pub mod fs;
pub mod keystore;
pub mod lifecycle;
pub mod patch;
pub mod pipeline;
pub mod preferences;
pub mod report;
pub mod settings;
pub mod topology;

pub use bundle::{CertificateSet, ConfigurationBundle, OptionSet, ServerPublicKey, load_bundle};
pub use error::{Error, ErrorExt, ErrorKind, Result};
pub use external::{CommandRunner, ProjectMembership, SystemRunner};
pub use pipeline::{Collaborators, configure};
pub use preferences::{FeatureFlag, FeatureFlags, merge_flags};
pub use report::ConfigurationReport;
pub use settings::{
    FlagOverrides, Platform, RunConfig, RunConfigBuilder, SourceLanguage, TopologySelector,
};
pub use topology::{ProjectTopology, ResolvedPaths, TopologyResolver};
