//! Discovery of the external executables the configurator depends on.

use super::{CommandRunner, CommandSpec};
use crate::configurator::error::{Error, Result};
use std::path::PathBuf;

/// Locates `keytool` on `PATH`, falling back to `$JAVA_HOME/bin`.
pub fn find_keytool() -> Result<PathBuf> {
    if let Ok(path) = which::which("keytool") {
        log::debug!("Found keytool at: {}", path.display());
        return Ok(path);
    }

    if let Some(java_home) = std::env::var_os("JAVA_HOME") {
        let candidate = PathBuf::from(java_home).join("bin").join("keytool");
        if let Ok(path) = which::which(&candidate) {
            log::debug!("Found keytool in JAVA_HOME at: {}", path.display());
            return Ok(path);
        }
    }

    Err(Error::tool(
        "keytool",
        "Could not find keytool utility in your $PATH or $JAVA_HOME/bin. \
         See https://docs.oracle.com/cd/E19182-01/820-7851/inst_cli_jdk_javahome_t \
         for instructions on how to set $JAVA_HOME",
    ))
}

/// Locates `ruby` on `PATH`.
pub fn find_ruby() -> Result<PathBuf> {
    which::which("ruby")
        .inspect(|path| log::debug!("Found ruby at: {}", path.display()))
        .map_err(|_| Error::tool("ruby", "Could not find ruby executable in $PATH"))
}

/// Fails unless `gem list` reports the `xcodeproj` gem.
pub fn ensure_xcodeproj_gem(runner: &dyn CommandRunner) -> Result<()> {
    let gem = which::which("gem").unwrap_or_else(|_| PathBuf::from("gem"));
    let output = runner.run(&CommandSpec::new(gem).arg("list"))?;
    if !output.success {
        return Err(Error::tool(
            "gem",
            format!("Cannot find the xcodeproj gem: {}", output.output.trim()),
        ));
    }

    if !output.output.contains("xcodeproj") {
        return Err(Error::tool(
            "gem",
            "The required gem 'xcodeproj' is not installed. Install it using: \
             'gem install xcodeproj'. In case you are using the OS X System ruby use: \
             'sudo gem install xcodeproj'",
        ));
    }
    Ok(())
}
