//! Typed options decoded from `config.json`.

use serde::Deserialize;
use std::fmt;

/// Public key the Token Server signs its responses with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerPublicKey {
    /// Base64 encoded key material
    pub encoded: String,
    /// Key algorithm, e.g. `RSA`
    pub algorithm: String,
}

/// Options issued by the Token Server for one application.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionSet {
    /// Informational only; the SDK fetches the effective value at runtime
    #[serde(default)]
    pub max_pin_failures: i64,

    pub token_server_uri: String,

    #[serde(rename = "application_identifier")]
    pub app_id: String,

    #[serde(rename = "application_platform", default)]
    pub app_platform: String,

    #[serde(rename = "application_version")]
    pub app_version: String,

    /// Never empty once loaded
    #[serde(rename = "resource_gateway_uri", default)]
    pub resource_gateway_uris: Vec<String>,

    pub redirect_url: String,

    #[serde(default)]
    pub server_public_key: Option<ServerPublicKey>,

    #[serde(default)]
    pub server_type: Option<String>,

    #[serde(default)]
    pub server_version: Option<String>,
}

impl OptionSet {
    /// The resource gateway written into configuration models.
    ///
    /// Models carry a single base URL; the first listed gateway wins.
    pub fn primary_resource_gateway(&self) -> &str {
        self.resource_gateway_uris
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.app_id, self.app_version, self.app_platform
        )
    }
}
