//! Immutable run configuration.
//!
//! The command line is converted exactly once into a [`RunConfig`] through
//! [`RunConfigBuilder`]; the pipeline only ever reads it.

mod builder;
mod core;
mod platform;

pub use builder::{DEFAULT_MODULE_NAME, RunConfigBuilder};
pub use core::{FlagOverrides, RunConfig};
pub use platform::{Platform, SourceLanguage, TopologySelector};
