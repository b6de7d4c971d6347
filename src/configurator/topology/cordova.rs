//! Cordova projects.
//!
//! Cordova keeps the native projects under `platforms/`. The Android platform
//! exists in two layouts: the current one nests the sources under
//! `platforms/android/app/src/main`, the legacy one keeps the manifest directly
//! in `platforms/android`. The layout is checked on every call.

use super::{LayoutContext, ProjectTopology, TopologyLayout, android};
use crate::configurator::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::path::{Path, PathBuf};

/// Cordova configuration file in the project root.
pub(super) const CONFIG_FILE: &str = "config.xml";

/// A `<preference name=".." value=".."/>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CordovaPreference {
    pub name: String,
    pub value: String,
}

/// Parsed Cordova `config.xml`.
#[derive(Debug, Clone, Default)]
pub struct CordovaProject {
    /// Widget id, used as Android package identifier
    pub id: String,
    /// App display name, used as Xcode target
    pub app_name: String,
    /// All preferences in document order
    pub preferences: Vec<CordovaPreference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AndroidLayout {
    Modern,
    Legacy,
}

impl CordovaProject {
    /// Reads and parses the Cordova `config.xml`.
    pub fn load(path: &Path) -> Result<Self> {
        let xml = std::fs::read_to_string(path).map_err(|e| {
            Error::input(format!("Cannot read the Cordova config.xml: {e}"))
        })?;
        Self::parse(&xml)
    }

    /// Parses `config.xml` content.
    pub fn parse(xml: &str) -> Result<Self> {
        parse_config(xml)
            .map_err(|e| Error::input(format!("Cannot read the Cordova config.xml: {e}")))
    }

    /// Value of the named preference. The last declaration wins.
    pub fn preference(&self, name: &str) -> Option<&str> {
        self.preferences
            .iter()
            .rev()
            .find(|pref| pref.name == name)
            .map(|pref| pref.value.as_str())
    }

    fn android_root(ctx: &LayoutContext<'_>) -> PathBuf {
        ProjectTopology::hybrid_platform_dir(ctx.root, "android")
    }

    fn modern_src(ctx: &LayoutContext<'_>) -> PathBuf {
        Self::android_root(ctx).join("app").join("src").join("main")
    }

    fn android_layout(ctx: &LayoutContext<'_>) -> AndroidLayout {
        if Self::modern_src(ctx).is_dir() {
            AndroidLayout::Modern
        } else {
            AndroidLayout::Legacy
        }
    }

    fn legacy_present(ctx: &LayoutContext<'_>) -> bool {
        Self::android_root(ctx).join(android::MANIFEST_FILE).is_file()
    }

    fn ensure_android_platform(ctx: &LayoutContext<'_>) -> Result<()> {
        ProjectTopology::require_hybrid_platform(ctx.root, "android", "cordova").map(|_| ())
    }
}

impl TopologyLayout for CordovaProject {
    fn name(&self) -> &'static str {
        "Cordova"
    }

    fn android_platform_path(&self, ctx: &LayoutContext<'_>) -> Result<PathBuf> {
        Self::ensure_android_platform(ctx)?;
        Ok(match Self::android_layout(ctx) {
            AndroidLayout::Modern => Self::modern_src(ctx),
            AndroidLayout::Legacy => Self::android_root(ctx),
        })
    }

    fn android_src_path(&self, ctx: &LayoutContext<'_>) -> Result<PathBuf> {
        self.android_platform_path(ctx)
    }

    fn android_classpath(&self, ctx: &LayoutContext<'_>, package_id: &str) -> Result<PathBuf> {
        Self::ensure_android_platform(ctx)?;
        let sources = match Self::android_layout(ctx) {
            AndroidLayout::Modern => Self::modern_src(ctx).join("java"),
            AndroidLayout::Legacy => Self::android_root(ctx).join("src"),
        };
        Ok(sources.join(android::package_path(package_id)))
    }

    fn declared_package_id(&self) -> Option<&str> {
        Some(self.id.as_str()).filter(|id| !id.is_empty())
    }

    fn declared_ios_target(&self) -> Option<&str> {
        Some(self.app_name.as_str()).filter(|name| !name.is_empty())
    }

    fn ios_platform_path(&self, ctx: &LayoutContext<'_>) -> PathBuf {
        ProjectTopology::hybrid_platform_dir(ctx.root, "ios")
    }

    fn ios_src_path(&self, ctx: &LayoutContext<'_>) -> PathBuf {
        let target = ctx.target.unwrap_or(self.app_name.as_str());
        self.ios_platform_path(ctx).join(target)
    }

    fn ensure_ios_platform(&self, ctx: &LayoutContext<'_>) -> Result<()> {
        ProjectTopology::require_hybrid_platform(ctx.root, "ios", "cordova").map(|_| ())
    }

    fn android_advisories(&self, ctx: &LayoutContext<'_>) -> Vec<String> {
        if Self::android_layout(ctx) == AndroidLayout::Modern && Self::legacy_present(ctx) {
            vec![format!(
                "Found both the current ({}) and the legacy ({}) Cordova Android layout. \
                 Using the current layout.",
                Self::modern_src(ctx).display(),
                Self::android_root(ctx).display()
            )]
        } else {
            Vec::new()
        }
    }
}

fn parse_config(xml: &str) -> std::result::Result<CordovaProject, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut project = CordovaProject::default();
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                visit_element(&e, &path, &mut project)?;
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Empty(e)) => visit_element(&e, &path, &mut project)?,
            Ok(Event::Text(e)) => {
                if path.len() == 2 && path[0] == "widget" && path[1] == "name" {
                    let text = e.unescape().map_err(|e| e.to_string())?;
                    project.app_name = text.trim().to_string();
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(project)
}

fn visit_element(
    element: &BytesStart<'_>,
    path: &[String],
    project: &mut CordovaProject,
) -> std::result::Result<(), String> {
    match element.local_name().as_ref() {
        b"widget" if path.is_empty() => {
            if let Some(id) = attribute(element, b"id")? {
                project.id = id;
            }
        }
        b"preference" => {
            let name = attribute(element, b"name")?.unwrap_or_default();
            let value = attribute(element, b"value")?.unwrap_or_default();
            if !name.is_empty() {
                project.preferences.push(CordovaPreference { name, value });
            }
        }
        _ => {}
    }
    Ok(())
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> std::result::Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.as_ref() == key {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
