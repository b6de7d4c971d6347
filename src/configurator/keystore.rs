//! Android keystore generation.
//!
//! The store is rebuilt from scratch on every run: any existing file is
//! deleted, then each certificate is imported with `keytool` into a fresh BKS
//! store protected by a random, unpersisted passphrase. Only the store's
//! SHA-256 hash ends up in generated sources.

use super::bundle::CertificateSet;
use super::error::{Error, Result};
use super::external::{CommandRunner, CommandSpec};
use super::fs;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

const STORE_TYPE: &str = "BKS";
const PROVIDER_CLASS: &str = "org.bouncycastle.jce.provider.BouncyCastleProvider";
const PASSPHRASE_BYTES: usize = 32;

/// Imports certificates into a BKS store with `keytool`.
pub struct KeystoreBuilder<'a> {
    runner: &'a dyn CommandRunner,
    keytool: PathBuf,
    provider_jar: PathBuf,
}

impl<'a> KeystoreBuilder<'a> {
    /// Creates a builder using the given `keytool` and BouncyCastle provider jar.
    pub fn new(
        runner: &'a dyn CommandRunner,
        keytool: impl Into<PathBuf>,
        provider_jar: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            keytool: keytool.into(),
            provider_jar: provider_jar.into(),
        }
    }

    /// Rebuilds the store at `destination` from `certificates`.
    ///
    /// # Errors
    ///
    /// [`Error::KeystoreBuild`] when the destination cannot be recreated or
    /// `keytool` rejects a certificate.
    pub fn build(&self, certificates: &CertificateSet, destination: &Path) -> Result<()> {
        self.check_provider()?;

        let removed = fs::remove_file_if_exists(destination)
            .map_err(|e| Error::KeystoreBuild(e.to_string()))?;
        if removed {
            log::debug!("Removed previous keystore {}", destination.display());
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::KeystoreBuild(format!("{}: {e}", parent.display())))?;
        }

        let passphrase = generate_passphrase();
        for (alias, pem) in certificates.iter() {
            let command = self.import_command(alias, destination, &passphrase).stdin(pem);
            let output = self.runner.run(&command)?;
            if !output.success {
                return Err(Error::KeystoreBuild(format!(
                    "keytool could not import '{alias}': {}",
                    output.output.trim()
                )));
            }
            log::debug!("Imported certificate '{}'", alias);
        }

        log::info!(
            "Wrote keystore {} ({} certificates)",
            destination.display(),
            certificates.len()
        );
        Ok(())
    }

    /// Fails unless the BouncyCastle provider jar exists.
    pub fn check_provider(&self) -> Result<()> {
        if self.provider_jar.is_file() {
            return Ok(());
        }
        Err(Error::tool(
            "keytool",
            format!(
                "BouncyCastle provider jar not found at {}. Pass it with --bcprov-jar \
                 or the BCPROV_JAR environment variable",
                self.provider_jar.display()
            ),
        ))
    }

    fn import_command(&self, alias: &str, destination: &Path, passphrase: &str) -> CommandSpec {
        CommandSpec::new(&self.keytool)
            .args(["-import", "-alias", alias])
            .arg("-keystore")
            .arg(destination)
            .args(["-storepass", passphrase])
            .arg("-providerpath")
            .arg(&self.provider_jar)
            .args(["-storetype", STORE_TYPE, "-provider", PROVIDER_CLASS, "-noprompt"])
    }
}

/// Hex encoded SHA-256 of the store at `path`.
pub fn keystore_hash(path: &Path) -> Result<String> {
    let bytes = fs::read_file(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

fn generate_passphrase() -> String {
    let mut bytes = [0u8; PASSPHRASE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE.encode(bytes)
}
