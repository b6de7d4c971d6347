//! Success summary and manual follow-up hints.

use super::bundle::OptionSet;
use super::lifecycle::{IntentFilterOutcome, Transition};
use super::preferences::{FeatureFlag, FeatureFlags};
use super::settings::Platform;

const ANDROID_CALLBACK_DOCS: &str = "https://docs.onegini.com/public/android-sdk/topics/authenticate-user-with-pin.html#handling-the-authentication-callback-during-registration";

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ConfigurationReport {
    pub platform: Platform,
    /// Name of the detected topology
    pub topology: &'static str,
    pub options: OptionSet,
    pub flags: FeatureFlags,
    pub security_controller: Transition,
    /// Android only
    pub intent_filter: Option<IntentFilterOutcome>,
    /// Manual steps left to the user
    pub hints: Vec<String>,
}

impl ConfigurationReport {
    /// Label/value rows of the configuration summary.
    ///
    /// Additional resource gateways get rows with an empty label.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let options = &self.options;
        let mut rows = vec![
            ("App Identifier", options.app_id.clone()),
            ("App Platform", options.app_platform.clone()),
            ("App Version", options.app_version.clone()),
            ("Redirect URI", options.redirect_url.clone()),
            ("Max PIN failures", options.max_pin_failures.to_string()),
        ];
        rows.extend(
            FeatureFlag::ALL
                .into_iter()
                .map(|flag| (flag.label(), self.flags.get(flag).to_string())),
        );
        rows.push(("Token Server URI", options.token_server_uri.clone()));
        rows.extend(
            options
                .resource_gateway_uris
                .iter()
                .enumerate()
                .map(|(idx, uri)| (if idx == 0 { "Resource Gateways" } else { "" }, uri.clone())),
        );
        if let Some(server_type) = &options.server_type {
            rows.push(("Server Type", server_type.clone()));
        }
        if let Some(server_version) = &options.server_version {
            rows.push(("Server Version", server_version.clone()));
        }
        rows
    }
}

/// Hint for an Android manifest the scheme could not be added to.
pub fn android_manifest_hint(scheme: &str) -> String {
    format!(
        "Don't forget to update your android manifest to let Android handle the custom URL \
         scheme. The scheme that you must add: {scheme}. More info is provided here: \
         {ANDROID_CALLBACK_DOCS}"
    )
}

/// Hint to declare the redirect scheme in `Info.plist`.
pub fn ios_info_plist_hint(scheme: &str) -> String {
    format!(
        "Make sure the custom URL scheme '{scheme}' is listed under CFBundleURLSchemes in \
         your application's Info.plist so iOS hands the registration callback to your app."
    )
}
