//! NativeScript projects.
//!
//! NativeScript keeps its native platforms under `platforms/` with a fixed
//! Android layout (`platforms/android/app/src/main`). The app identifier and
//! the SDK preferences live in the project `package.json`.

use super::{LayoutContext, ProjectTopology, TopologyLayout, android};
use crate::configurator::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// NativeScript configuration file in the project root.
pub(super) const CONFIG_FILE: &str = "package.json";

/// SDK preferences decoded from the `onegini` object of `package.json`.
///
/// Absent fields fall back to built-in defaults; a present field always
/// overrides, whatever its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NativeScriptPreferences {
    #[serde(default)]
    pub root_detection_enabled: Option<bool>,
    #[serde(default)]
    pub debug_detection_enabled: Option<bool>,
    #[serde(default)]
    pub debug_logs_enabled: bool,
    #[serde(default)]
    pub tampering_protection_enabled: Option<bool>,
    #[serde(default)]
    pub store_cookies_enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    nativescript: Option<NativeScriptSection>,
    #[serde(default)]
    onegini: NativeScriptPreferences,
}

#[derive(Debug, Deserialize)]
struct NativeScriptSection {
    #[serde(default)]
    id: Option<String>,
}

/// Parsed NativeScript `package.json`.
#[derive(Debug, Clone, Default)]
pub struct NativeScriptProject {
    /// App identifier, used as Android package identifier
    pub id: String,
    /// SDK preferences
    pub preferences: NativeScriptPreferences,
}

impl NativeScriptProject {
    /// Reads and parses the NativeScript `package.json`.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::input(format!("Cannot read the NativeScript package.json: {e}"))
        })?;
        Self::parse(&json)
    }

    /// Parses `package.json` content.
    ///
    /// The identifier is taken from `nativescript.id`, falling back to a
    /// top-level `id`.
    pub fn parse(json: &str) -> Result<Self> {
        let package: PackageJson = serde_json::from_str(json).map_err(|e| {
            Error::input(format!("Cannot read the NativeScript package.json: {e}"))
        })?;
        let id = package
            .nativescript
            .and_then(|section| section.id)
            .or(package.id)
            .unwrap_or_default();

        Ok(Self {
            id,
            preferences: package.onegini,
        })
    }

    fn platform_root(ctx: &LayoutContext<'_>, platform: &str) -> PathBuf {
        ProjectTopology::hybrid_platform_dir(ctx.root, platform)
    }

    fn android_main(ctx: &LayoutContext<'_>) -> Result<PathBuf> {
        let root = ProjectTopology::require_hybrid_platform(ctx.root, "android", "tns")?;
        Ok(root.join("app").join("src").join("main"))
    }
}

impl TopologyLayout for NativeScriptProject {
    fn name(&self) -> &'static str {
        "NativeScript"
    }

    fn android_platform_path(&self, ctx: &LayoutContext<'_>) -> Result<PathBuf> {
        Self::android_main(ctx)
    }

    fn android_src_path(&self, ctx: &LayoutContext<'_>) -> Result<PathBuf> {
        Self::android_main(ctx)
    }

    fn android_classpath(&self, ctx: &LayoutContext<'_>, package_id: &str) -> Result<PathBuf> {
        Ok(Self::android_main(ctx)?
            .join("java")
            .join(android::package_path(package_id)))
    }

    fn declared_package_id(&self) -> Option<&str> {
        Some(self.id.as_str()).filter(|id| !id.is_empty())
    }

    fn ios_platform_path(&self, ctx: &LayoutContext<'_>) -> PathBuf {
        Self::platform_root(ctx, "ios")
    }

    fn ensure_ios_platform(&self, ctx: &LayoutContext<'_>) -> Result<()> {
        ProjectTopology::require_hybrid_platform(ctx.root, "ios", "tns").map(|_| ())
    }

    fn ios_src_path(&self, ctx: &LayoutContext<'_>) -> PathBuf {
        let platform = self.ios_platform_path(ctx);
        match ctx.target {
            Some(target) => platform.join(target),
            None => platform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_id_and_tri_state_preferences() {
        let project = NativeScriptProject::parse(
            r#"{
                "nativescript": { "id": "org.nativescript.example" },
                "onegini": { "root-detection-enabled": true, "debug-logs-enabled": true }
            }"#,
        )
        .unwrap();
        assert_eq!(project.id, "org.nativescript.example");
        assert_eq!(project.preferences.root_detection_enabled, Some(true));
        assert_eq!(project.preferences.debug_detection_enabled, None);
        assert!(project.preferences.debug_logs_enabled);
    }

    #[test]
    fn missing_preferences_object_uses_defaults() {
        let project = NativeScriptProject::parse(r#"{ "id": "com.example.ns" }"#).unwrap();
        assert_eq!(project.id, "com.example.ns");
        assert_eq!(project.preferences, NativeScriptPreferences::default());
    }
}
