//! Xcode project file membership.

use super::{CommandRunner, CommandSpec, ensure_xcodeproj_gem, find_ruby, run_checked};
use crate::configurator::error::{Error, ErrorExt, Result};
use crate::configurator::patch::assets;
use std::path::{Path, PathBuf};

/// Keeps a native project's file list consistent with generated artifacts.
pub trait ProjectMembership {
    /// Registers `file` under `group` and adds it to `target`.
    fn add(&self, project: &Path, file: &Path, target: &str, group: &str) -> Result<()>;

    /// Deregisters `file` from `group`. Unknown files are ignored.
    fn remove(&self, project: &Path, file: &Path, group: &str) -> Result<()>;

    /// Whether `project` declares a target named `target`.
    fn has_target(&self, project: &Path, target: &str) -> Result<bool>;
}

const ADD_FILE_SCRIPT: &str = "add_file.rb";
const REMOVE_FILE_SCRIPT: &str = "remove_file.rb";
const TARGET_CHECK_SCRIPT: &str = "target_check.rb";

/// [`ProjectMembership`] driving the bundled Ruby scripts of the
/// `xcodeproj` gem.
///
/// The scripts live in a temporary directory for the lifetime of this value.
pub struct XcodeprojScripts<'a> {
    runner: &'a dyn CommandRunner,
    ruby: PathBuf,
    scripts: tempfile::TempDir,
}

impl<'a> XcodeprojScripts<'a> {
    /// Checks for `ruby` and the `xcodeproj` gem and restores the scripts.
    pub fn discover(runner: &'a dyn CommandRunner) -> Result<Self> {
        let ruby = find_ruby()?;
        ensure_xcodeproj_gem(runner)?;
        Self::with_ruby(runner, ruby)
    }

    /// Restores the scripts, using `ruby` without further checks.
    pub fn with_ruby(runner: &'a dyn CommandRunner, ruby: PathBuf) -> Result<Self> {
        Self::staged_in(runner, ruby, &std::env::temp_dir())
    }

    fn staged_in(runner: &'a dyn CommandRunner, ruby: PathBuf, parent: &Path) -> Result<Self> {
        let scripts = tempfile::Builder::new()
            .prefix("onegini-sdk-configurator")
            .tempdir_in(parent)
            .fs_context("creating script directory", parent)?;

        for (name, contents) in [
            (ADD_FILE_SCRIPT, assets::XCODEPROJ_ADD_FILE),
            (REMOVE_FILE_SCRIPT, assets::XCODEPROJ_REMOVE_FILE),
            (TARGET_CHECK_SCRIPT, assets::XCODEPROJ_TARGET_CHECK),
        ] {
            let path = scripts.path().join(name);
            std::fs::write(&path, contents).fs_context("restoring script", &path)?;
        }

        Ok(Self {
            runner,
            ruby,
            scripts,
        })
    }

    fn script(&self, name: &str) -> CommandSpec {
        CommandSpec::new(&self.ruby).arg(self.scripts.path().join(name))
    }

    fn run(&self, command: &CommandSpec) -> Result<String> {
        let output = run_checked(self.runner, command).map_err(|e| match e {
            Error::ExternalTool { output, .. } => {
                Error::tool("xcodeproj", format!("Could not modify Xcode project: {output}"))
            }
            other => other,
        })?;
        if !output.output.trim().is_empty() {
            log::debug!("{}", output.output.trim());
        }
        Ok(output.output)
    }
}

impl ProjectMembership for XcodeprojScripts<'_> {
    fn add(&self, project: &Path, file: &Path, target: &str, group: &str) -> Result<()> {
        log::debug!("Adding {} to group '{}'", file.display(), group);
        self.run(
            &self
                .script(ADD_FILE_SCRIPT)
                .arg(project)
                .arg(file)
                .arg(target)
                .arg(group),
        )
        .map(drop)
    }

    fn remove(&self, project: &Path, file: &Path, group: &str) -> Result<()> {
        log::debug!("Removing {} from group '{}'", file.display(), group);
        self.run(
            &self
                .script(REMOVE_FILE_SCRIPT)
                .arg(project)
                .arg(file)
                .arg(group),
        )
        .map(drop)
    }

    fn has_target(&self, project: &Path, target: &str) -> Result<bool> {
        let output = self.run(&self.script(TARGET_CHECK_SCRIPT).arg(project).arg(target))?;
        Ok(output.trim() == "1")
    }
}
