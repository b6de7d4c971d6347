//! Topology detection and path resolution.

mod common;

use common::*;
use sdk_configurator::configurator::{
    ErrorKind, Platform, ProjectTopology, ResolvedPaths, TopologyResolver, TopologySelector,
};
use serde_json::json;
use std::path::Path;

#[test]
fn native_package_falls_back_to_build_script_namespace() {
    let dir = tempfile::tempdir().unwrap();
    native_android(dir.path(), None, Some("com.example.app"));

    let topology = ProjectTopology::detect(dir.path(), TopologySelector::Native).unwrap();
    let paths = TopologyResolver::new(dir.path(), &topology)
        .resolve_android()
        .unwrap();

    assert_eq!(paths.package_id, "com.example.app");
    assert!(paths.classpath.ends_with("com/example/app"));
    assert_eq!(
        paths.classpath,
        dir.path().join("app/src/main/java/com/example/app")
    );
}

#[test]
fn manifest_package_wins_over_namespace() {
    let dir = tempfile::tempdir().unwrap();
    native_android(dir.path(), Some("com.example.manifest"), Some("com.example.gradle"));

    let topology = ProjectTopology::detect(dir.path(), TopologySelector::Native).unwrap();
    let paths = TopologyResolver::new(dir.path(), &topology)
        .resolve_android()
        .unwrap();
    assert_eq!(paths.package_id, "com.example.manifest");
}

#[test]
fn kotlin_dsl_namespace_is_found() {
    let dir = tempfile::tempdir().unwrap();
    native_android(dir.path(), None, None);
    write(
        &dir.path().join("app/build.gradle.kts"),
        "android {\n    namespace = \"com.example.kts\"\n}\n",
    );

    let topology = ProjectTopology::detect(dir.path(), TopologySelector::Native).unwrap();
    let paths = TopologyResolver::new(dir.path(), &topology)
        .resolve_android()
        .unwrap();
    assert!(paths.classpath.ends_with("com/example/kts"));
}

#[test]
fn missing_package_is_a_path_resolution_error() {
    let dir = tempfile::tempdir().unwrap();
    native_android(dir.path(), None, None);

    let topology = ProjectTopology::detect(dir.path(), TopologySelector::Native).unwrap();
    let err = TopologyResolver::new(dir.path(), &topology)
        .resolve_android()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathResolution);
}

#[test]
fn resolution_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    native_android(dir.path(), Some("com.example.app"), None);

    let topology = ProjectTopology::detect(dir.path(), TopologySelector::Native).unwrap();
    let resolver = TopologyResolver::new(dir.path(), &topology)
        .module("app")
        .flavor(Some(""));
    let first = resolver.resolve(Platform::Android).unwrap();
    let second = resolver.resolve(Platform::Android).unwrap();
    assert_eq!(first, second);
}

#[test]
fn flavor_selects_source_set_but_keeps_main_manifest() {
    let dir = tempfile::tempdir().unwrap();
    native_android(dir.path(), Some("com.example.app"), None);

    let topology = ProjectTopology::detect(dir.path(), TopologySelector::Native).unwrap();
    let paths = TopologyResolver::new(dir.path(), &topology)
        .flavor(Some("staging"))
        .resolve_android()
        .unwrap();

    let root = dir.path();
    assert_eq!(paths.manifest, root.join("app/src/main/AndroidManifest.xml"));
    assert_eq!(
        paths.classpath,
        root.join("app/src/staging/java/com/example/app")
    );
    assert_eq!(paths.keystore, root.join("app/src/staging/res/raw/keystore.bks"));
}

#[test]
fn unknown_module_is_a_path_resolution_error() {
    let dir = tempfile::tempdir().unwrap();
    native_android(dir.path(), Some("com.example.app"), None);

    let topology = ProjectTopology::detect(dir.path(), TopologySelector::Native).unwrap();
    let err = TopologyResolver::new(dir.path(), &topology)
        .module("mobile")
        .resolve_android()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathResolution);
}

#[test]
fn cordova_prefers_current_layout_and_reports_both() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    cordova_config(root, "com.example.cordova", "ExampleApp", &[]);
    cordova_android(root);

    let topology = ProjectTopology::detect(root, TopologySelector::Cordova).unwrap();
    let paths = TopologyResolver::new(root, &topology).resolve_android().unwrap();
    assert_eq!(
        paths.classpath,
        root.join("platforms/android/app/src/main/java/com/example/cordova")
    );
    assert!(paths.advisories.is_empty());

    write(
        &root.join("platforms/android/AndroidManifest.xml"),
        LAUNCHER_MANIFEST,
    );
    let paths = TopologyResolver::new(root, &topology).resolve_android().unwrap();
    assert!(paths.classpath.starts_with(root.join("platforms/android/app")));
    assert_eq!(paths.advisories.len(), 1);
}

#[test]
fn cordova_legacy_layout_is_rechecked_on_every_call() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    cordova_config(root, "com.example.cordova", "ExampleApp", &[]);
    write(
        &root.join("platforms/android/AndroidManifest.xml"),
        LAUNCHER_MANIFEST,
    );

    let topology = ProjectTopology::detect(root, TopologySelector::Cordova).unwrap();
    let legacy = TopologyResolver::new(root, &topology).resolve_android().unwrap();
    assert_eq!(
        legacy.classpath,
        root.join("platforms/android/src/com/example/cordova")
    );
    assert_eq!(legacy.manifest, root.join("platforms/android/AndroidManifest.xml"));

    cordova_android(root);
    let current = TopologyResolver::new(root, &topology).resolve_android().unwrap();
    assert_eq!(
        current.manifest,
        root.join("platforms/android/app/src/main/AndroidManifest.xml")
    );
}

#[test]
fn hybrid_platform_must_be_added() {
    let dir = tempfile::tempdir().unwrap();
    cordova_config(dir.path(), "com.example.cordova", "ExampleApp", &[]);

    let topology = ProjectTopology::detect(dir.path(), TopologySelector::Cordova).unwrap();
    let err = TopologyResolver::new(dir.path(), &topology)
        .resolve_android()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathResolution);
    assert!(err.to_string().contains("cordova platform add android"));
}

#[test]
fn nativescript_uses_declared_id() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    nativescript_config(root, "org.example.ns", json!({}));
    write(
        &root.join("platforms/android/app/src/main/AndroidManifest.xml"),
        LAUNCHER_MANIFEST,
    );

    let topology = ProjectTopology::detect(root, TopologySelector::NativeScript).unwrap();
    let paths = TopologyResolver::new(root, &topology).resolve_android().unwrap();
    assert_eq!(
        paths.classpath,
        root.join("platforms/android/app/src/main/java/org/example/ns")
    );
    assert_eq!(
        paths.resource_dir,
        root.join("platforms/android/app/src/main/res/raw")
    );
}

#[test]
fn missing_framework_config_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProjectTopology::detect(dir.path(), TopologySelector::NativeScript).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn native_ios_requires_exactly_one_xcodeproj() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let topology = ProjectTopology::detect(root, TopologySelector::Native).unwrap();
    let resolver = TopologyResolver::new(root, &topology).target(Some("ExampleApp"));

    assert_eq!(
        resolver.resolve_ios().unwrap_err().kind(),
        ErrorKind::PathResolution
    );

    let project = xcodeproj(root, "ExampleApp");
    let ResolvedPaths::Ios(paths) = resolver.resolve(Platform::Ios).unwrap() else {
        panic!("expected iOS paths");
    };
    assert_eq!(paths.xcodeproj, project);
    assert_eq!(paths.config_model_dir, root.join("Configuration"));
    assert_eq!(paths.certificate_dir, root.join("Resources"));

    xcodeproj(root, "Other");
    assert_eq!(
        resolver.resolve_ios().unwrap_err().kind(),
        ErrorKind::PathResolution
    );
}

#[test]
fn native_ios_requires_a_target() {
    let dir = tempfile::tempdir().unwrap();
    xcodeproj(dir.path(), "ExampleApp");
    let topology = ProjectTopology::detect(dir.path(), TopologySelector::Native).unwrap();

    let err = TopologyResolver::new(dir.path(), &topology)
        .resolve_ios()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn cordova_ios_target_is_the_app_name() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    cordova_config(root, "com.example.cordova", "ExampleApp", &[]);
    let platform = root.join("platforms/ios");
    xcodeproj(&platform, "ExampleApp");

    let topology = ProjectTopology::detect(root, TopologySelector::Cordova).unwrap();
    let paths = TopologyResolver::new(root, &topology).resolve_ios().unwrap();
    assert_eq!(paths.target, "ExampleApp");
    assert_eq!(
        paths.config_model_dir,
        Path::new(&platform).join("ExampleApp/Configuration")
    );
}
