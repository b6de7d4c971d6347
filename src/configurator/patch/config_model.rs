//! Configuration model generation.
//!
//! Android gets a Java or Kotlin `OneginiConfigModel`, iOS an Objective-C
//! pair. The base buffer is the project's existing file when present, the
//! bundled template otherwise.

use super::{Anchor, Replacement, assets, patch};
use crate::configurator::bundle::OptionSet;
use crate::configurator::error::Result;
use crate::configurator::external::ProjectMembership;
use crate::configurator::fs;
use crate::configurator::settings::SourceLanguage;
use crate::configurator::topology::{AndroidPaths, IosPaths};

/// Values written into the Android model.
#[derive(Debug, Clone, Copy)]
pub struct AndroidModelValues<'a> {
    pub package_id: &'a str,
    pub options: &'a OptionSet,
    pub keystore_hash: &'a str,
}

/// Anchors of the Android model in the given language.
pub fn android_anchors(
    language: SourceLanguage,
    values: &AndroidModelValues<'_>,
) -> Result<Vec<Anchor>> {
    let options = values.options;
    let string_fields = [
        ("appIdentifier", options.app_id.as_str()),
        ("redirectionUri", options.redirect_url.as_str()),
        ("appVersion", options.app_version.as_str()),
        ("baseURL", options.token_server_uri.as_str()),
        ("resourceBaseURL", options.primary_resource_gateway()),
        ("keystoreHash", values.keystore_hash),
    ];
    let public_key = options
        .server_public_key
        .as_ref()
        .map(|key| format!("\"{}\"", string_literal(language, &key.encoded)))
        .unwrap_or_else(|| "null".to_string());

    // Java statements end in ';', Kotlin statements do not.
    let terminator = match language {
        SourceLanguage::Java => ";",
        SourceLanguage::Kotlin => "",
    };

    let mut anchors = Vec::with_capacity(string_fields.len() + 3);
    anchors.push(match language {
        SourceLanguage::Java => Anchor::literal(
            r"(?m)^package\s.*;",
            format!("package {};", values.package_id),
        )?,
        SourceLanguage::Kotlin => Anchor::literal(
            r"(?m)^package[ \t]+[\w.]+",
            format!("package {}", values.package_id),
        )?,
    });

    for (field, value) in string_fields {
        anchors.push(Anchor::literal(
            &format!(r#"\b{field}\s=\s".*"{}"#, regex::escape(terminator)),
            format!(
                "{field} = \"{}\"{terminator}",
                string_literal(language, value)
            ),
        )?);
    }

    anchors.push(Anchor::new(
        &format!(
            r#"(?P<prefix>\bserverPublicKey(?::\s*String\?)?)\s=\s(?:".*"|null){}"#,
            regex::escape(terminator)
        ),
        Replacement::KeepGroup {
            group: "prefix",
            value: format!(" = {public_key}{terminator}").into_bytes(),
        },
    )?);

    anchors.push(match language {
        SourceLanguage::Java => Anchor::literal(
            r"\bmaxPinFailures\s=\s.*;",
            format!("maxPinFailures = {};", options.max_pin_failures),
        )?,
        SourceLanguage::Kotlin => Anchor::literal(
            r"\bmaxPinFailures\s=\s-?\d+",
            format!("maxPinFailures = {}", options.max_pin_failures),
        )?,
    });

    Ok(anchors)
}

/// Escapes `value` for a double-quoted Java or Kotlin string literal.
fn string_literal(language: SourceLanguage, value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '"' => escaped.push('\\'),
            '$' if language == SourceLanguage::Kotlin => escaped.push('\\'),
            _ => {}
        }
        escaped.push(c);
    }
    escaped
}

/// Patches `buffer` as an Android model.
pub fn patch_android_model(
    buffer: &[u8],
    language: SourceLanguage,
    values: &AndroidModelValues<'_>,
) -> Result<Vec<u8>> {
    Ok(patch(buffer, &android_anchors(language, values)?))
}

/// Writes the Android model in `language`, removing a stale model in the
/// other language.
pub fn write_android_config_model(
    paths: &AndroidPaths,
    language: SourceLanguage,
    values: &AndroidModelValues<'_>,
) -> Result<()> {
    let stale = paths.config_model(language.other());
    if fs::remove_file_if_exists(&stale)? {
        log::warn!("Removed stale configuration model {}", stale.display());
    }

    let target = paths.config_model(language);
    let template = match language {
        SourceLanguage::Java => assets::ANDROID_CONFIG_MODEL_JAVA,
        SourceLanguage::Kotlin => assets::ANDROID_CONFIG_MODEL_KOTLIN,
    };
    let base = fs::read_project_or_asset(&target, template)?;
    let model = patch_android_model(&base, language, values)?;
    fs::replace_file(&target, &model)
}

/// Anchors of the iOS model implementation.
pub fn ios_anchors(options: &OptionSet, base64_certificates: &[String]) -> Result<Vec<Anchor>> {
    let public_key = options
        .server_public_key
        .as_ref()
        .map(|key| key.encoded.as_str())
        .unwrap_or_default();
    let entries = [
        ("ONGAppIdentifier", options.app_id.as_str()),
        ("ONGAppVersion", options.app_version.as_str()),
        ("ONGAppBaseURL", options.token_server_uri.as_str()),
        ("ONGResourceBaseURL", options.primary_resource_gateway()),
        ("ONGRedirectURL", options.redirect_url.as_str()),
        ("ONGServerPublicKey", public_key),
    ];

    let mut anchors = entries
        .into_iter()
        .map(|(key, value)| {
            Anchor::literal(
                &format!(r#"@"{key}"\s*:\s*@".*""#),
                format!(r#"@"{key}" : @"{}""#, objc_string_literal(value)),
            )
        })
        .collect::<Result<Vec<_>>>()?;

    anchors.push(Anchor::literal(
        r"return @\[.*\];[^\r\n]*",
        format!(
            "return @[@\"{}\"]; //Base64Certificates",
            base64_certificates.join("\", @\"")
        ),
    )?);

    Ok(anchors)
}

/// Escapes `value` for an Objective-C `@"..."` literal.
fn objc_string_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Patches `buffer` as the iOS model implementation.
pub fn patch_ios_model(
    buffer: &[u8],
    options: &OptionSet,
    base64_certificates: &[String],
) -> Result<Vec<u8>> {
    Ok(patch(buffer, &ios_anchors(options, base64_certificates)?))
}

/// Writes the Objective-C model pair and registers both files in the
/// `Configuration` group.
pub fn write_ios_config_model(
    paths: &IosPaths,
    options: &OptionSet,
    base64_certificates: &[String],
    membership: &dyn ProjectMembership,
) -> Result<()> {
    let impl_path = paths.config_model_impl();
    let header_path = paths.config_model_header();

    let implementation = fs::read_project_or_asset(&impl_path, assets::IOS_CONFIG_MODEL_IMPL)?;
    let header = fs::read_project_or_asset(&header_path, assets::IOS_CONFIG_MODEL_HEADER)?;
    let implementation = patch_ios_model(&implementation, options, base64_certificates)?;

    fs::replace_file(&impl_path, &implementation)?;
    fs::replace_file(&header_path, &header)?;

    for file in [&impl_path, &header_path] {
        membership.add(&paths.xcodeproj, file, &paths.target, paths.configuration_group())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal(SourceLanguage::Java, r#"a"b\c$d"#), r#"a\"b\\c$d"#);
        assert_eq!(string_literal(SourceLanguage::Kotlin, "a$b"), r"a\$b");
        assert_eq!(objc_string_literal(r#"x"y\z"#), r#"x\"y\\z"#);
    }
}
