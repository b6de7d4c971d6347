//! iOS certificate resources.

use super::bundle::CertificateSet;
use super::error::{Error, ErrorExt, Result};
use super::external::ProjectMembership;
use super::fs;
use super::topology::IosPaths;
use std::collections::BTreeSet;
use std::path::PathBuf;

const CERTIFICATE_EXTENSION: &str = "cer";

/// One certificate as an iOS resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateResource {
    /// File name inside the resources directory
    pub file_name: String,
    /// DER encoded certificate
    pub der: Vec<u8>,
}

/// Decodes every certificate and assigns its resource file name.
///
/// # Errors
///
/// [`Error::Input`] when a certificate cannot be decoded or two certificates
/// would share a resource file.
pub fn certificate_resources(certificates: &CertificateSet) -> Result<Vec<CertificateResource>> {
    let mut taken = BTreeSet::new();
    certificates
        .der_entries()?
        .into_iter()
        .map(|(name, der)| {
            let file_name = certificate_file_name(name);
            if !taken.insert(file_name.clone()) {
                return Err(Error::input(format!(
                    "The '{name}' certificate would overwrite another certificate's \
                     resource file '{file_name}'"
                )));
            }
            Ok(CertificateResource { file_name, der })
        })
        .collect()
}

/// Replaces every `.cer` resource with `resources`.
///
/// Previous `.cer` files are deregistered and deleted first; each certificate
/// is then written in DER form and registered in the `Resources` group.
pub fn write_ios_certificates(
    paths: &IosPaths,
    resources: &[CertificateResource],
    membership: &dyn ProjectMembership,
) -> Result<Vec<PathBuf>> {
    remove_previous_certificates(paths, membership)?;

    let mut written = Vec::with_capacity(resources.len());
    for resource in resources {
        let path = paths.certificate_dir.join(&resource.file_name);
        fs::replace_file(&path, &resource.der)?;
        membership.add(&paths.xcodeproj, &path, &paths.target, paths.resources_group())?;
        written.push(path);
    }
    Ok(written)
}

fn remove_previous_certificates(
    paths: &IosPaths,
    membership: &dyn ProjectMembership,
) -> Result<()> {
    let dir = &paths.certificate_dir;
    if !dir.is_dir() {
        return Ok(());
    }

    let mut previous = Vec::new();
    for entry in std::fs::read_dir(dir).fs_context("reading certificate directory", dir)? {
        let path = entry.fs_context("reading certificate directory", dir)?.path();
        if path.is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(CERTIFICATE_EXTENSION)
        {
            previous.push(path);
        }
    }
    previous.sort();

    for path in previous {
        fs::remove_file_if_exists(&path)?;
        membership.remove(&paths.xcodeproj, &path, paths.resources_group())?;
        log::info!("Removed {}", path.display());
    }
    Ok(())
}

/// `<name>.cer` for a bundle certificate name such as `ca.pem`. Nested names
/// are flattened into a single file name.
fn certificate_file_name(name: &str) -> String {
    format!("{}.{CERTIFICATE_EXTENSION}", name.replace(['/', '\\'], "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEM: &str = "-----BEGIN CERTIFICATE-----\nAAEC\nAwQ=\n-----END CERTIFICATE-----\n";

    #[test]
    fn test_certificate_file_name() {
        assert_eq!(certificate_file_name("ca.pem"), "ca.pem.cer");
        assert_eq!(certificate_file_name("gateway"), "gateway.cer");
        assert_eq!(certificate_file_name("a/x.pem"), "a_x.pem.cer");
    }

    #[test]
    fn test_same_stem_keeps_distinct_files() {
        let mut set = CertificateSet::new();
        set.insert("ca.pem", PEM).unwrap();
        set.insert("ca.crt", PEM).unwrap();
        let names: Vec<_> = certificate_resources(&set)
            .unwrap()
            .into_iter()
            .map(|resource| resource.file_name)
            .collect();
        assert_eq!(names, ["ca.crt.cer", "ca.pem.cer"]);
    }

    #[test]
    fn test_flattened_name_collision_is_rejected() {
        let mut set = CertificateSet::new();
        set.insert("a/x.pem", PEM).unwrap();
        set.insert("a_x.pem", PEM).unwrap();
        let err = certificate_resources(&set).unwrap_err();
        assert!(matches!(err, Error::Input(_)));
    }
}
