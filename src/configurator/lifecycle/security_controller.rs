//! The feature-flag `SecurityController`.
//!
//! Only flags that differ from [`FeatureFlags::default`] are emitted. With all
//! flags at their defaults the controller is deleted (and deregistered on iOS).

use super::{ArtifactState, Transition};
use crate::configurator::error::Result;
use crate::configurator::external::ProjectMembership;
use crate::configurator::fs;
use crate::configurator::preferences::{FeatureFlag, FeatureFlags};
use crate::configurator::settings::SourceLanguage;
use crate::configurator::topology::{AndroidPaths, IosPaths};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static FLAG_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(rootDetection|debugDetection|debugLogs|tamperingProtection|storeCookies)\b[^;]*?\b(true|false|YES|NO)\b",
    )
    .expect("flag value pattern is valid")
});

/// Java source of the controller.
pub fn render_java(package_id: &str, flags: &FeatureFlags) -> String {
    let mut source = format!(
        "package {package_id};\n\n\
         @SuppressWarnings({{ \"unused\", \"WeakerAccess\" }})\n\
         public final class SecurityController {{\n"
    );
    for (flag, value) in flags.non_default() {
        source.push_str(&format!("  public static final boolean {flag} = {value};\n"));
    }
    source.push_str("}\n");
    source
}

/// Kotlin source of the controller.
pub fn render_kotlin(package_id: &str, flags: &FeatureFlags) -> String {
    let mut source = format!(
        "package {package_id}\n\n\
         @Suppress(\"unused\")\n\
         object SecurityController {{\n"
    );
    for (flag, value) in flags.non_default() {
        source.push_str(&format!("  const val {flag} = {value}\n"));
    }
    source.push_str("}\n");
    source
}

/// Objective-C header of the controller.
pub fn render_objc_header(flags: &FeatureFlags) -> String {
    let mut source = String::from(
        "#import <Foundation/Foundation.h>\n\n@interface SecurityController : NSObject\n",
    );
    for (flag, _) in flags.non_default() {
        source.push_str(&format!("+ (bool){flag};\n"));
    }
    source.push_str("@end\n");
    source
}

/// Objective-C implementation of the controller.
pub fn render_objc_impl(flags: &FeatureFlags) -> String {
    let mut source =
        String::from("#import \"SecurityController.h\"\n\n@implementation SecurityController\n");
    for (flag, value) in flags.non_default() {
        let value = if value { "YES" } else { "NO" };
        source.push_str(&format!("+(bool){flag}{{\n    return {value};\n}}\n"));
    }
    source.push_str("@end\n");
    source
}

/// Classifies existing controller source.
pub fn observe(contents: &str) -> ArtifactState {
    let defaults = FeatureFlags::default();
    let custom = FLAG_VALUE.captures_iter(contents).any(|caps| {
        let value = matches!(&caps[2], "true" | "YES");
        FeatureFlag::ALL
            .into_iter()
            .find(|flag| flag.field_name() == &caps[1])
            .is_some_and(|flag| defaults.get(flag) != value)
    });
    if custom {
        ArtifactState::PresentCustom
    } else {
        ArtifactState::PresentDefault
    }
}

fn observe_file(path: &Path) -> Result<ArtifactState> {
    if !path.is_file() {
        return Ok(ArtifactState::Absent);
    }
    let contents = fs::read_file(path)?;
    Ok(observe(&String::from_utf8_lossy(&contents)))
}

/// Brings the Android controller in line with `flags`.
///
/// Controllers in both languages are removed first, so switching language or
/// returning to the defaults never leaves a stale class behind.
pub fn sync_android_security_controller(
    paths: &AndroidPaths,
    language: SourceLanguage,
    flags: &FeatureFlags,
) -> Result<Transition> {
    let current = paths.security_controller(language);
    let stale = paths.security_controller(language.other());

    let from = match observe_file(&current)? {
        ArtifactState::Absent => observe_file(&stale)?,
        state => state,
    };

    for path in [&current, &stale] {
        if fs::remove_file_if_exists(path)? {
            log::info!("Removed {}", path.display());
        }
    }

    let to = ArtifactState::required(flags.is_default());
    if to == ArtifactState::PresentCustom {
        let source = match language {
            SourceLanguage::Java => render_java(&paths.package_id, flags),
            SourceLanguage::Kotlin => render_kotlin(&paths.package_id, flags),
        };
        fs::replace_file(&current, source.as_bytes())?;
    }

    Ok(Transition { from, to })
}

/// Brings the iOS controller pair and its Xcode registration in line with `flags`.
pub fn sync_ios_security_controller(
    paths: &IosPaths,
    flags: &FeatureFlags,
    membership: &dyn ProjectMembership,
) -> Result<Transition> {
    let header = paths.security_controller_header();
    let implementation = paths.security_controller_impl();
    let group = paths.configuration_group();

    let from = match observe_file(&implementation)? {
        ArtifactState::Absent if header.is_file() => ArtifactState::PresentDefault,
        state => state,
    };

    for path in [&header, &implementation] {
        membership.remove(&paths.xcodeproj, path, group)?;
        if fs::remove_file_if_exists(path)? {
            log::info!("Removed {}", path.display());
        }
    }

    let to = ArtifactState::required(flags.is_default());
    if to == ArtifactState::PresentCustom {
        fs::replace_file(&header, render_objc_header(flags).as_bytes())?;
        fs::replace_file(&implementation, render_objc_impl(flags).as_bytes())?;
        for path in [&header, &implementation] {
            membership.add(&paths.xcodeproj, path, &paths.target, group)?;
        }
    }

    Ok(Transition { from, to })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_detection_off() -> FeatureFlags {
        FeatureFlags {
            root_detection: false,
            ..FeatureFlags::default()
        }
    }

    #[test]
    fn test_java_emits_only_differing_flags() {
        let source = render_java("com.example.app", &root_detection_off());
        assert!(source.starts_with("package com.example.app;\n"));
        assert!(source.contains("  public static final boolean rootDetection = false;\n"));
        assert_eq!(source.matches("static final boolean").count(), 1);
    }

    #[test]
    fn test_kotlin_and_objc_rendering() {
        let flags = FeatureFlags {
            debug_logs: true,
            ..FeatureFlags::default()
        };
        assert!(render_kotlin("com.example.app", &flags).contains("  const val debugLogs = true\n"));
        assert!(render_objc_header(&flags).contains("+ (bool)debugLogs;\n"));
        assert!(render_objc_impl(&flags).contains("+(bool)debugLogs{\n    return YES;\n}\n"));
    }

    #[test]
    fn test_observe() {
        assert_eq!(
            observe(&render_java("a.b", &root_detection_off())),
            ArtifactState::PresentCustom
        );
        assert_eq!(
            observe(&render_objc_impl(&root_detection_off())),
            ArtifactState::PresentCustom
        );
        assert_eq!(
            observe("public static final boolean rootDetection = true;"),
            ArtifactState::PresentDefault
        );
    }
}
