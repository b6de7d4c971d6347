//! Android package identifier probing.
//!
//! The package identifier is read from the `package` attribute of the
//! manifest. Newer Gradle projects drop that attribute in favour of a
//! `namespace` declaration in the module build script, which is used as
//! fallback.

use crate::configurator::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Manifest file name.
pub const MANIFEST_FILE: &str = "AndroidManifest.xml";

/// Build scripts searched for a `namespace` declaration, in order.
const BUILD_SCRIPTS: [&str; 2] = ["build.gradle", "build.gradle.kts"];

static NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*namespace\s*=?\s*["']([A-Za-z0-9_.]+)["']"#)
        .expect("namespace pattern is valid")
});

/// Reads the `package` attribute of the root `<manifest>` element.
///
/// Returns `Ok(None)` when the manifest exists but declares no package.
pub fn manifest_package_id(manifest_path: &Path) -> Result<Option<String>> {
    let xml = std::fs::read_to_string(manifest_path).map_err(|e| {
        Error::path(format!(
            "Cannot read the Android Manifest {}: {e}",
            manifest_path.display()
        ))
    })?;
    parse_manifest_package(&xml).map_err(|e| {
        Error::input(format!(
            "Cannot read the Android Manifest {}: {e}",
            manifest_path.display()
        ))
    })
}

fn parse_manifest_package(xml: &str) -> std::result::Result<Option<String>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() != b"manifest" {
                    return Ok(None);
                }
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| e.to_string())?;
                    if attr.key.as_ref() == b"package" {
                        let value = attr.unescape_value().map_err(|e| e.to_string())?;
                        let value = value.trim();
                        return Ok((!value.is_empty()).then(|| value.to_string()));
                    }
                }
                return Ok(None);
            }
            Ok(Event::Eof) => return Ok(None),
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }
}

/// Reads a `namespace` declaration from the module's build script.
pub fn build_script_namespace(module_dir: &Path) -> Result<Option<String>> {
    for script in BUILD_SCRIPTS {
        let path = module_dir.join(script);
        if !path.is_file() {
            continue;
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            Error::path(format!("Cannot read build script {}: {e}", path.display()))
        })?;
        if let Some(namespace) = parse_namespace(&contents) {
            log::debug!("Found namespace '{}' in {}", namespace, path.display());
            return Ok(Some(namespace));
        }
    }
    Ok(None)
}

fn parse_namespace(script: &str) -> Option<String> {
    NAMESPACE_RE
        .captures(script)
        .map(|caps| caps[1].to_string())
}

/// Package identifier of a native module: manifest first, namespace second.
pub fn native_package_id(manifest_path: &Path, module_dir: &Path) -> Result<String> {
    if let Some(package) = manifest_package_id(manifest_path)? {
        return Ok(package);
    }
    log::debug!(
        "No package attribute in {}, probing build script namespace",
        manifest_path.display()
    );
    build_script_namespace(module_dir)?.ok_or_else(|| {
        Error::path(format!(
            "Could not find the application package. Neither {} declares a 'package' \
             attribute nor does the build script in {} declare a 'namespace'",
            manifest_path.display(),
            module_dir.display()
        ))
    })
}

/// Relative directory of a dotted package identifier, e.g. `com/example/app`.
pub fn package_path(package_id: &str) -> PathBuf {
    package_id
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_package_attribute() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="com.example.app">
  <application/>
</manifest>"#;
        assert_eq!(
            parse_manifest_package(xml).unwrap().as_deref(),
            Some("com.example.app")
        );
    }

    #[test]
    fn manifest_without_package() {
        let xml = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"><application/></manifest>"#;
        assert_eq!(parse_manifest_package(xml).unwrap(), None);
    }

    #[test]
    fn groovy_and_kotlin_namespace_forms() {
        assert_eq!(
            parse_namespace("android {\n    namespace 'com.example.app'\n}").as_deref(),
            Some("com.example.app")
        );
        assert_eq!(
            parse_namespace("android {\n    namespace = \"com.example.kts\"\n}").as_deref(),
            Some("com.example.kts")
        );
        assert_eq!(parse_namespace("android { compileSdk 34 }"), None);
    }

    #[test]
    fn package_path_splits_segments() {
        assert_eq!(
            package_path("com.example.app"),
            PathBuf::from("com").join("example").join("app")
        );
    }
}
