//! Certificates shipped in the configuration bundle.

use crate::configurator::error::{Error, Result};
use base64::Engine;
use std::collections::BTreeMap;

/// Every bundled certificate must start with this line.
pub const PEM_CERTIFICATE_HEADER: &str = "-----BEGIN CERTIFICATE-----";
const PEM_CERTIFICATE_FOOTER: &str = "-----END CERTIFICATE-----";

/// Certificates keyed by their name inside the bundle.
///
/// Iteration is sorted by name, which fixes the order of keystore imports,
/// the base64 list embedded in the iOS model and the `.cer` resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateSet {
    entries: BTreeMap<String, String>,
}

impl CertificateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a PEM certificate, rejecting anything that is not PEM encoded and
    /// names that are already taken.
    pub fn insert(&mut self, name: impl Into<String>, pem: impl Into<String>) -> Result<()> {
        let name = name.into();
        let pem = pem.into();
        if self.entries.contains_key(&name) {
            return Err(Error::input(format!(
                "The Token Server configuration zip contains the '{name}' certificate twice"
            )));
        }
        if !pem.starts_with(PEM_CERTIFICATE_HEADER) {
            return Err(Error::input(format!(
                "The '{name}' certificate file provided in the Token Server configuration zip \
                 does not have the correct format. Make sure that it is a PEM encoded \
                 certificate. All cert files should start with '{PEM_CERTIFICATE_HEADER}'"
            )));
        }
        self.entries.insert(name, pem);
        Ok(())
    }

    /// Number of certificates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no certificate.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, pem)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, pem)| (name.as_str(), pem.as_str()))
    }

    /// DER bytes of every certificate in name order.
    pub fn der_entries(&self) -> Result<Vec<(&str, Vec<u8>)>> {
        self.iter()
            .map(|(name, pem)| Ok((name, decode_pem(name, pem)?)))
            .collect()
    }

    /// Base64 of each certificate's DER bytes, in name order.
    pub fn base64_der_list(&self) -> Result<Vec<String>> {
        Ok(self
            .der_entries()?
            .into_iter()
            .map(|(_, der)| base64::engine::general_purpose::STANDARD.encode(der))
            .collect())
    }
}

/// Decodes the first PEM block of `pem` into DER bytes.
fn decode_pem(name: &str, pem: &str) -> Result<Vec<u8>> {
    let body_start = pem
        .find(PEM_CERTIFICATE_HEADER)
        .map(|idx| idx + PEM_CERTIFICATE_HEADER.len())
        .ok_or_else(|| Error::input(format!("certificate '{name}' has no PEM header")))?;
    let body_end = pem[body_start..]
        .find(PEM_CERTIFICATE_FOOTER)
        .map(|idx| body_start + idx)
        .ok_or_else(|| Error::input(format!("certificate '{name}' has no PEM footer")))?;

    let body: String = pem[body_start..body_end]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    base64::engine::general_purpose::STANDARD
        .decode(body)
        .map_err(|e| Error::input(format!("certificate '{name}' is not valid base64: {e}")))
}
