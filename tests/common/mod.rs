//! Shared fixtures: configuration bundles, project trees and fake
//! collaborators.

#![allow(dead_code)]

use sdk_configurator::configurator::external::{CommandOutput, CommandRunner, CommandSpec};
use sdk_configurator::configurator::{ProjectMembership, Result};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CERT_PEM: &str = "-----BEGIN CERTIFICATE-----\nAAEC\nAwQ=\n-----END CERTIFICATE-----\n";
pub const OTHER_CERT_PEM: &str = "-----BEGIN CERTIFICATE-----\nBQYH\n-----END CERTIFICATE-----\n";

pub const LAUNCHER_MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <application android:label="Example">
        <activity android:name=".MainActivity" android:exported="true">
            <intent-filter>
                <action android:name="android.intent.action.MAIN" />
                <category android:name="android.intent.category.LAUNCHER" />
            </intent-filter>
        </activity>
    </application>
</manifest>
"#;

/// Options of a typical Token Server export.
pub fn default_options() -> Value {
    json!({
        "max_pin_failures": 3,
        "token_server_uri": "https://onegini.example.com",
        "application_identifier": "ExampleApp",
        "application_platform": "android",
        "application_version": "1.0.0",
        "resource_gateway_uri": ["https://onegini.example.com/resources"],
        "redirect_url": "oneginiexample://loginsuccess",
        "server_public_key": {
            "encoded": "MIIBIjANBgkq",
            "algorithm": "RSA"
        },
        "server_type": "Token Server",
        "server_version": "10.2.0"
    })
}

/// Writes a configuration zip with `config.json` and the given certificates.
pub fn write_bundle(dir: &Path, options: &Value, certificates: &[(&str, &str)]) -> PathBuf {
    let path = dir.join("ts-config.zip");
    let file = fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let opts = zip::write::SimpleFileOptions::default();

    zip.start_file("config.json", opts).unwrap();
    zip.write_all(options.to_string().as_bytes()).unwrap();

    zip.add_directory("certificates/", opts).unwrap();
    for (name, pem) in certificates {
        zip.start_file(format!("certificates/{name}"), opts).unwrap();
        zip.write_all(pem.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

/// Bundle with default options and two certificates.
pub fn default_bundle(dir: &Path) -> PathBuf {
    write_bundle(
        dir,
        &default_options(),
        &[("zeta.pem", OTHER_CERT_PEM), ("alpha.pem", CERT_PEM)],
    )
}

pub fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Manifest declaring `package`, or none when `package` is `None`.
pub fn manifest(package: Option<&str>) -> String {
    match package {
        Some(package) => LAUNCHER_MANIFEST.replace(
            "<manifest xmlns:android=\"http://schemas.android.com/apk/res/android\">",
            &format!(
                "<manifest xmlns:android=\"http://schemas.android.com/apk/res/android\" package=\"{package}\">"
            ),
        ),
        None => LAUNCHER_MANIFEST.to_string(),
    }
}

/// Native Gradle module `app` with a manifest and an optional namespace.
pub fn native_android(root: &Path, package: Option<&str>, namespace: Option<&str>) {
    write(
        &root.join("app/src/main/AndroidManifest.xml"),
        &manifest(package),
    );
    if let Some(namespace) = namespace {
        write(
            &root.join("app/build.gradle"),
            &format!("android {{\n    namespace '{namespace}'\n    compileSdk 34\n}}\n"),
        );
    }
}

/// Cordova project with the given preferences.
pub fn cordova_config(root: &Path, id: &str, name: &str, preferences: &[(&str, &str)]) {
    let preferences: String = preferences
        .iter()
        .map(|(name, value)| format!("    <preference name=\"{name}\" value=\"{value}\" />\n"))
        .collect();
    write(
        &root.join("config.xml"),
        &format!(
            "<?xml version='1.0' encoding='utf-8'?>\n\
             <widget id=\"{id}\" version=\"1.0.0\" xmlns=\"http://www.w3.org/ns/widgets\">\n\
             \x20   <name>{name}</name>\n\
             {preferences}\
             </widget>\n"
        ),
    );
}

/// Cordova Android platform in the current layout.
pub fn cordova_android(root: &Path) {
    write(
        &root.join("platforms/android/app/src/main/AndroidManifest.xml"),
        LAUNCHER_MANIFEST,
    );
}

/// NativeScript `package.json` with an `onegini` preferences object.
pub fn nativescript_config(root: &Path, id: &str, onegini: Value) {
    write(
        &root.join("package.json"),
        &json!({ "nativescript": { "id": id }, "onegini": onegini }).to_string(),
    );
}

/// Empty `<name>.xcodeproj` directory in `dir`.
pub fn xcodeproj(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(format!("{name}.xcodeproj"));
    fs::create_dir_all(&path).unwrap();
    path
}

/// Records every command and simulates `keytool` and `gem`.
///
/// A `keytool -import` appends the piped certificate to the keystore file so
/// the store's hash depends on its content.
#[derive(Default)]
pub struct RecordingRunner {
    pub commands: RefCell<Vec<CommandSpec>>,
    pub fail_tool: Option<String>,
}

impl RecordingRunner {
    pub fn failing(tool: &str) -> Self {
        Self {
            fail_tool: Some(tool.to_string()),
            ..Self::default()
        }
    }

    pub fn count(&self, tool: &str) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|command| command.tool_name() == tool)
            .count()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.commands.borrow_mut().push(command.clone());
        let tool = command.tool_name();

        if self.fail_tool.as_deref() == Some(tool.as_str()) {
            return Ok(CommandOutput {
                success: false,
                code: Some(1),
                output: format!("{tool} failed on purpose"),
            });
        }

        let mut output = String::new();
        if tool == "keytool" {
            let keystore = command
                .args
                .iter()
                .position(|arg| arg == "-keystore")
                .map(|idx| PathBuf::from(&command.args[idx + 1]))
                .unwrap();
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(keystore)
                .unwrap();
            file.write_all(command.stdin.as_deref().unwrap_or_default())
                .unwrap();
            output.push_str("Certificate was added to keystore\n");
        } else if tool == "gem" {
            output.push_str("xcodeproj (1.25.0)\n");
        }

        Ok(CommandOutput {
            success: true,
            code: Some(0),
            output,
        })
    }
}

/// In-memory Xcode project: a set of `(group, file)` registrations.
pub struct FakeMembership {
    pub targets: Vec<String>,
    pub files: RefCell<BTreeSet<(String, PathBuf)>>,
    pub removals: RefCell<Vec<PathBuf>>,
}

impl FakeMembership {
    pub fn with_target(target: &str) -> Self {
        Self {
            targets: vec![target.to_string()],
            files: RefCell::new(BTreeSet::new()),
            removals: RefCell::new(Vec::new()),
        }
    }

    pub fn contains(&self, group: &str, file: &Path) -> bool {
        self.files
            .borrow()
            .contains(&(group.to_string(), file.to_path_buf()))
    }

    pub fn group_len(&self, group: &str) -> usize {
        self.files
            .borrow()
            .iter()
            .filter(|(g, _)| g == group)
            .count()
    }
}

impl ProjectMembership for FakeMembership {
    fn add(&self, _project: &Path, file: &Path, target: &str, group: &str) -> Result<()> {
        assert!(self.targets.iter().any(|t| t == target), "unknown target {target}");
        self.files
            .borrow_mut()
            .insert((group.to_string(), file.to_path_buf()));
        Ok(())
    }

    fn remove(&self, _project: &Path, file: &Path, group: &str) -> Result<()> {
        self.removals.borrow_mut().push(file.to_path_buf());
        self.files
            .borrow_mut()
            .remove(&(group.to_string(), file.to_path_buf()));
        Ok(())
    }

    fn has_target(&self, _project: &Path, target: &str) -> Result<bool> {
        Ok(self.targets.iter().any(|t| t == target))
    }
}
