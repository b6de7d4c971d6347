//! Feature flags and their reconciliation with framework preferences.
//!
//! Cordova preferences (`<preference name="OneginiRootDetectionEnabled" .../>`)
//! and NativeScript preferences (`"root-detection-enabled": false`) override the
//! built-in defaults. Native projects have no preference source.

use super::error::{Error, Result};
use super::settings::FlagOverrides;
use super::topology::{CordovaProject, NativeScriptProject, ProjectTopology};
use std::fmt;

/// One security-relevant SDK toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureFlag {
    RootDetection,
    DebugDetection,
    DebugLogs,
    TamperingProtection,
    StoreCookies,
}

impl FeatureFlag {
    /// All flags in emission order.
    pub const ALL: [FeatureFlag; 5] = [
        FeatureFlag::RootDetection,
        FeatureFlag::DebugDetection,
        FeatureFlag::DebugLogs,
        FeatureFlag::TamperingProtection,
        FeatureFlag::StoreCookies,
    ];

    /// Field or selector name in generated sources.
    pub fn field_name(self) -> &'static str {
        match self {
            FeatureFlag::RootDetection => "rootDetection",
            FeatureFlag::DebugDetection => "debugDetection",
            FeatureFlag::DebugLogs => "debugLogs",
            FeatureFlag::TamperingProtection => "tamperingProtection",
            FeatureFlag::StoreCookies => "storeCookies",
        }
    }

    /// Cordova `config.xml` preference name.
    pub fn cordova_preference(self) -> &'static str {
        match self {
            FeatureFlag::RootDetection => "OneginiRootDetectionEnabled",
            FeatureFlag::DebugDetection => "OneginiDebugDetectionEnabled",
            FeatureFlag::DebugLogs => "OneginiDebugLogsEnabled",
            FeatureFlag::TamperingProtection => "OneginiTamperingProtectionEnabled",
            FeatureFlag::StoreCookies => "OneginiStoreCookiesEnabled",
        }
    }

    /// Label used in the success report.
    pub fn label(self) -> &'static str {
        match self {
            FeatureFlag::RootDetection => "Root detection",
            FeatureFlag::DebugDetection => "Debug detection",
            FeatureFlag::DebugLogs => "Debug logs",
            FeatureFlag::TamperingProtection => "Tampering protection",
            FeatureFlag::StoreCookies => "Store cookies",
        }
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Resolved feature flags.
///
/// [`FeatureFlags::default`] is the "no-op" combination: with it no security
/// controller is generated at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub root_detection: bool,
    pub debug_detection: bool,
    pub debug_logs: bool,
    pub tampering_protection: bool,
    pub store_cookies: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            root_detection: true,
            debug_detection: true,
            debug_logs: false,
            tampering_protection: true,
            store_cookies: true,
        }
    }
}

impl FeatureFlags {
    /// Value of a single flag.
    pub fn get(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::RootDetection => self.root_detection,
            FeatureFlag::DebugDetection => self.debug_detection,
            FeatureFlag::DebugLogs => self.debug_logs,
            FeatureFlag::TamperingProtection => self.tampering_protection,
            FeatureFlag::StoreCookies => self.store_cookies,
        }
    }

    /// Sets a single flag.
    pub fn set(&mut self, flag: FeatureFlag, value: bool) {
        match flag {
            FeatureFlag::RootDetection => self.root_detection = value,
            FeatureFlag::DebugDetection => self.debug_detection = value,
            FeatureFlag::DebugLogs => self.debug_logs = value,
            FeatureFlag::TamperingProtection => self.tampering_protection = value,
            FeatureFlag::StoreCookies => self.store_cookies = value,
        }
    }

    /// Defaults with the explicitly given toggles applied.
    pub fn with_overrides(overrides: &FlagOverrides) -> Self {
        let mut flags = Self::default();
        let given = [
            (FeatureFlag::RootDetection, overrides.root_detection),
            (FeatureFlag::DebugDetection, overrides.debug_detection),
            (FeatureFlag::DebugLogs, overrides.debug_logs),
            (FeatureFlag::TamperingProtection, overrides.tampering_protection),
            (FeatureFlag::StoreCookies, overrides.store_cookies),
        ];
        for (flag, value) in given {
            if let Some(value) = value {
                flags.set(flag, value);
            }
        }
        flags
    }

    /// Whether every flag equals its no-op default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Flags that differ from the no-op default, in emission order.
    pub fn non_default(&self) -> Vec<(FeatureFlag, bool)> {
        let defaults = Self::default();
        FeatureFlag::ALL
            .into_iter()
            .filter(|flag| self.get(*flag) != defaults.get(*flag))
            .map(|flag| (flag, self.get(flag)))
            .collect()
    }
}

/// Reconciles framework preferences with `builtin` defaults.
///
/// # Errors
///
/// [`Error::PreferenceParse`] when a Cordova preference is not a boolean
/// literal. These flags control the security posture, so a typo never
/// silently falls back to a default.
pub fn merge_flags(topology: &ProjectTopology, builtin: FeatureFlags) -> Result<FeatureFlags> {
    match topology {
        ProjectTopology::Native(_) => Ok(builtin),
        ProjectTopology::Cordova(project) => merge_cordova(project, builtin),
        ProjectTopology::NativeScript(project) => Ok(merge_nativescript(project, builtin)),
    }
}

fn merge_cordova(project: &CordovaProject, builtin: FeatureFlags) -> Result<FeatureFlags> {
    let mut flags = builtin;
    for flag in FeatureFlag::ALL {
        let name = flag.cordova_preference();
        if let Some(literal) = project.preference(name) {
            let value = parse_bool(literal).ok_or_else(|| Error::PreferenceParse {
                name: name.to_string(),
                value: literal.to_string(),
            })?;
            log::debug!("Preference {} = {}", name, value);
            flags.set(flag, value);
        }
    }
    Ok(flags)
}

fn merge_nativescript(project: &NativeScriptProject, builtin: FeatureFlags) -> FeatureFlags {
    let prefs = &project.preferences;
    FeatureFlags {
        root_detection: prefs.root_detection_enabled.unwrap_or(builtin.root_detection),
        debug_detection: prefs
            .debug_detection_enabled
            .unwrap_or(builtin.debug_detection),
        debug_logs: prefs.debug_logs_enabled,
        tampering_protection: prefs
            .tampering_protection_enabled
            .unwrap_or(builtin.tampering_protection),
        store_cookies: prefs.store_cookies_enabled.unwrap_or(builtin.store_cookies),
    }
}

/// Boolean literals accepted in framework preferences.
fn parse_bool(literal: &str) -> Option<bool> {
    match literal {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
