//! Onegini SDK configurator library.
//!
//! Configures Android and iOS application projects (plain native, Cordova or
//! NativeScript) with the configuration zip exported by the Token Server:
//! - generated configuration model (Java, Kotlin or Objective-C)
//! - optional security controller with non-default feature flags
//! - Android redirect intent filter and BKS keystore
//! - iOS certificate resources and Xcode project membership
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod configurator;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, ConfiguratorError, Result};
