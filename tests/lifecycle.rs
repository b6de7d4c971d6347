//! Optional artifact lifecycle: security controller and redirect intent filter.

mod common;

use common::*;
use sdk_configurator::configurator::lifecycle::{
    ArtifactState, IntentFilterOutcome, sync_android_security_controller,
    sync_ios_security_controller, sync_redirect_intent,
};
use sdk_configurator::configurator::patch::manifest::RedirectTarget;
use sdk_configurator::configurator::topology::{AndroidPaths, IosPaths};
use sdk_configurator::configurator::{
    FeatureFlags, ProjectTopology, SourceLanguage, TopologyResolver, TopologySelector, merge_flags,
};
use std::fs;
use std::path::Path;

fn android_paths(root: &Path) -> AndroidPaths {
    AndroidPaths {
        package_id: "com.example.app".to_string(),
        manifest: root.join("AndroidManifest.xml"),
        classpath: root.join("java/com/example/app"),
        resource_dir: root.join("res/raw"),
        keystore: root.join("res/raw/keystore.bks"),
        advisories: Vec::new(),
    }
}

fn ios_paths(root: &Path) -> IosPaths {
    IosPaths {
        target: "ExampleApp".to_string(),
        xcodeproj: root.join("ExampleApp.xcodeproj"),
        config_model_dir: root.join("Configuration"),
        certificate_dir: root.join("Resources"),
    }
}

fn flag_lines(source: &str) -> Vec<&str> {
    source
        .lines()
        .filter(|line| line.contains("static final boolean") || line.contains("const val"))
        .collect()
}

#[test]
fn default_flags_remove_the_android_controller() {
    let dir = tempfile::tempdir().unwrap();
    let paths = android_paths(dir.path());
    let custom = FeatureFlags {
        debug_detection: false,
        ..FeatureFlags::default()
    };

    let written = sync_android_security_controller(&paths, SourceLanguage::Java, &custom).unwrap();
    assert_eq!(written.from, ArtifactState::Absent);
    assert_eq!(written.to, ArtifactState::PresentCustom);
    let controller = paths.security_controller(SourceLanguage::Java);
    assert!(controller.is_file());

    let removed =
        sync_android_security_controller(&paths, SourceLanguage::Java, &FeatureFlags::default())
            .unwrap();
    assert_eq!(removed.from, ArtifactState::PresentCustom);
    assert_eq!(removed.to, ArtifactState::Absent);
    assert!(removed.removed());
    assert!(!controller.exists());

    // Nothing to remove is not an error.
    let again =
        sync_android_security_controller(&paths, SourceLanguage::Java, &FeatureFlags::default())
            .unwrap();
    assert_eq!(again.from, ArtifactState::Absent);
}

#[test]
fn single_changed_flag_emits_a_single_line() {
    let dir = tempfile::tempdir().unwrap();
    let paths = android_paths(dir.path());
    let flags = FeatureFlags {
        store_cookies: false,
        ..FeatureFlags::default()
    };

    for language in [SourceLanguage::Java, SourceLanguage::Kotlin] {
        sync_android_security_controller(&paths, language, &flags).unwrap();
        let source = fs::read_to_string(paths.security_controller(language)).unwrap();
        let lines = flag_lines(&source);
        assert_eq!(lines.len(), 1, "{source}");
        assert!(lines[0].contains("storeCookies = false"));
    }
    // Switching language leaves only the current controller.
    assert!(!paths.security_controller(SourceLanguage::Java).exists());
}

#[test]
fn cordova_root_detection_preference_reaches_the_controller() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    cordova_config(
        root,
        "com.example.cordova",
        "ExampleApp",
        &[("OneginiRootDetectionEnabled", "false")],
    );
    cordova_android(root);

    let topology = ProjectTopology::detect(root, TopologySelector::Cordova).unwrap();
    let flags = merge_flags(&topology, FeatureFlags::default()).unwrap();
    assert!(!flags.root_detection);

    let paths = TopologyResolver::new(root, &topology).resolve_android().unwrap();
    sync_android_security_controller(&paths, SourceLanguage::Java, &flags).unwrap();

    let source = fs::read_to_string(paths.security_controller(SourceLanguage::Java)).unwrap();
    assert!(source.starts_with("package com.example.cordova;"));
    assert_eq!(
        flag_lines(&source),
        ["  public static final boolean rootDetection = false;"]
    );
}

#[test]
fn ios_controller_membership_follows_the_flags() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ios_paths(dir.path());
    let membership = FakeMembership::with_target("ExampleApp");
    let custom = FeatureFlags {
        root_detection: false,
        debug_logs: true,
        ..FeatureFlags::default()
    };

    sync_ios_security_controller(&paths, &custom, &membership).unwrap();
    let header = paths.security_controller_header();
    let implementation = paths.security_controller_impl();
    assert!(membership.contains("Configuration", &header));
    assert!(membership.contains("Configuration", &implementation));
    let source = fs::read_to_string(&implementation).unwrap();
    assert_eq!(source.matches("+(bool)").count(), 2);
    assert!(source.contains("+(bool)rootDetection{\n    return NO;\n}"));

    let transition = sync_ios_security_controller(&paths, &FeatureFlags::default(), &membership)
        .unwrap();
    assert_eq!(transition.to, ArtifactState::Absent);
    assert!(!header.exists());
    assert!(!implementation.exists());
    assert_eq!(membership.group_len("Configuration"), 0);
}

#[test]
fn default_flags_deregister_even_without_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ios_paths(dir.path());
    let membership = FakeMembership::with_target("ExampleApp");

    sync_ios_security_controller(&paths, &FeatureFlags::default(), &membership).unwrap();
    assert_eq!(membership.removals.borrow().len(), 2);
}

#[test]
fn web_redirect_removes_the_intent_filter() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("AndroidManifest.xml");
    write(&manifest, LAUNCHER_MANIFEST);

    let custom = RedirectTarget::parse("oneginiexample://loginsuccess").unwrap();
    assert_eq!(
        sync_redirect_intent(&manifest, &custom).unwrap(),
        IntentFilterOutcome::Inserted
    );
    assert_eq!(
        sync_redirect_intent(&manifest, &custom).unwrap(),
        IntentFilterOutcome::RewroteModern
    );
    let with_filter = fs::read_to_string(&manifest).unwrap();
    assert_eq!(with_filter.matches("OneginiRedirectionIntent").count(), 1);

    let web = RedirectTarget::parse("https://example.com/callback").unwrap();
    let outcome = sync_redirect_intent(&manifest, &web).unwrap();
    assert_eq!(outcome, IntentFilterOutcome::Removed);
    assert_eq!(outcome.state(), ArtifactState::Absent);
    assert_eq!(fs::read_to_string(&manifest).unwrap(), LAUNCHER_MANIFEST);
    assert_eq!(
        sync_redirect_intent(&manifest, &web).unwrap(),
        IntentFilterOutcome::AlreadyAbsent
    );
}

#[test]
fn manifest_without_launcher_needs_manual_step() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("AndroidManifest.xml");
    let contents = "<manifest><application /></manifest>\n";
    write(&manifest, contents);

    let target = RedirectTarget::parse("oneginiexample://loginsuccess").unwrap();
    assert_eq!(
        sync_redirect_intent(&manifest, &target).unwrap(),
        IntentFilterOutcome::LauncherMissing
    );
    assert_eq!(fs::read_to_string(&manifest).unwrap(), contents);
}
