//! Zip container reading.

use super::{CertificateSet, OptionSet};
use crate::configurator::error::{Error, ErrorExt, Result};
use std::io::Read;
use std::path::Path;

const OPTIONS_ENTRY: &str = "config.json";
// Zip entry names always use '/', regardless of host platform.
const CERTIFICATES_PREFIX: &str = "certificates/";

/// Decoded content of a configuration bundle.
#[derive(Debug, Clone)]
pub struct ConfigurationBundle {
    pub options: OptionSet,
    pub certificates: CertificateSet,
}

/// Reads and validates the configuration zip at `path`.
///
/// # Errors
///
/// [`Error::Input`] when the archive cannot be read, `config.json` is missing
/// or malformed, no resource gateway is listed, or no certificate is present.
pub fn load_bundle(path: &Path) -> Result<ConfigurationBundle> {
    let file = std::fs::File::open(path).map_err(|e| {
        Error::input(format!(
            "could not read Token Server configuration zip {}: {e}",
            path.display()
        ))
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        Error::input(format!(
            "could not read Token Server configuration zip {}: {e}",
            path.display()
        ))
    })?;

    let mut options = None;
    let mut certificates = CertificateSet::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| {
            Error::input(format!(
                "could not read contents of Token Server configuration zip: {e}"
            ))
        })?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();

        if name == OPTIONS_ENTRY {
            let mut json = String::new();
            entry
                .read_to_string(&mut json)
                .fs_context("reading config.json from bundle", path)?;
            let parsed: OptionSet = serde_json::from_str(&json).map_err(|e| {
                Error::input(format!(
                    "The provided configuration zip does not contain the required information \
                     ({e}). Is the supplied archive a valid Token Server configuration zip?"
                ))
            })?;
            options = Some(parsed);
        } else if let Some(cert_name) = name.strip_prefix(CERTIFICATES_PREFIX) {
            // The full relative name is the key; nested names stay distinct.
            if cert_name.is_empty() {
                continue;
            }
            let mut pem = String::new();
            entry
                .read_to_string(&mut pem)
                .fs_context("reading certificate from bundle", path)?;
            log::debug!("Found certificate '{}' in bundle", cert_name);
            certificates.insert(cert_name, pem)?;
        } else {
            log::debug!("Ignoring bundle entry '{}'", name);
        }
    }

    let options = options.ok_or_else(|| {
        Error::input(
            "The provided configuration zip does not contain the required information. \
             Is the supplied archive a valid Token Server configuration zip?",
        )
    })?;

    if options.resource_gateway_uris.is_empty() {
        crate::bail!(
            "No resource gateway URI is specified in the configuration zip. \
             Please check the Token Server configuration."
        );
    }

    if certificates.is_empty() {
        crate::bail!("Does the Token Server configuration zip contain certificates?");
    }

    Ok(ConfigurationBundle {
        options,
        certificates,
    })
}
