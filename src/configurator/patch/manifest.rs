//! Redirect scheme anchors for `AndroidManifest.xml`.
//!
//! Two historical shapes carry the redirect scheme. The modern shape is a
//! dedicated `<intent-filter android:label="OneginiRedirectionIntent">` block;
//! the legacy shape is the intent filter of Cordova's generic `MainActivity`.
//! The modern shape wins whenever it is present and the two are never both
//! rewritten.

use super::Anchor;
use crate::configurator::error::{Error, Result};
use regex::bytes::Regex;
use std::sync::LazyLock;
use url::Url;

/// Label identifying the managed intent filter.
pub const REDIRECTION_INTENT_LABEL: &str = "OneginiRedirectionIntent";

// The label may sit anywhere among the intent filter's attributes.
const MODERN_BLOCK: &str = r#"(?s)<intent-filter\b[^>]*\bandroid:label="OneginiRedirectionIntent"[^>]*>.*?</intent-filter>"#;
const LEGACY_BLOCK: &str = r#"(?s)<activity\s+.*android:name="MainActivity".*>.*<intent-filter>.*android:scheme="([^"]*)".*</intent-filter>.*</activity>"#;
const DATA_ELEMENT: &str = r"<data\b[^>]*/>";
const SCHEME_ATTRIBUTE: &str = r#"android:scheme="[^"]*""#;

static MODERN_BLOCK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    // Includes the block's indentation and line break so removal leaves no blank line.
    Regex::new(
        r#"(?s)[ \t]*<intent-filter\b[^>]*\bandroid:label="OneginiRedirectionIntent"[^>]*>.*?</intent-filter>[ \t]*(?:\r?\n)?"#,
    )
    .expect("intent-filter pattern is valid")
});

static ACTIVITY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<activity\b[^>]*?(?:/>|>.*?</activity>)")
        .expect("activity pattern is valid")
});

const LAUNCHER_CATEGORY: &[u8] = b"android.intent.category.LAUNCHER";
const ACTIVITY_CLOSE: &[u8] = b"</activity>";

/// Scheme, host and path prefix of the redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub scheme: String,
    pub host: Option<String>,
    pub path_prefix: Option<String>,
}

impl RedirectTarget {
    /// Parses a redirect URL such as `myapp://loginsuccess`.
    pub fn parse(redirect_url: &str) -> Result<Self> {
        let url = Url::parse(redirect_url).map_err(|e| {
            Error::input(format!("invalid redirect URL '{redirect_url}': {e}"))
        })?;
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .map(str::to_string);
        let path_prefix = Some(url.path())
            .filter(|path| !path.is_empty() && *path != "/")
            .map(str::to_string);

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            path_prefix,
        })
    }

    /// Whether the browser handles the redirect, making the intent filter unnecessary.
    pub fn is_web(&self) -> bool {
        matches!(self.scheme.as_str(), "http" | "https")
    }

    /// The `<data/>` element declaring this target.
    pub fn data_element(&self) -> String {
        let mut element = format!(
            r#"<data android:scheme="{}""#,
            quick_xml::escape::escape(self.scheme.as_str())
        );
        if let Some(host) = &self.host {
            element.push_str(&format!(
                r#" android:host="{}""#,
                quick_xml::escape::escape(host.as_str())
            ));
        }
        if let Some(prefix) = &self.path_prefix {
            element.push_str(&format!(
                r#" android:pathPrefix="{}""#,
                quick_xml::escape::escape(prefix.as_str())
            ));
        }
        element.push_str(" />");
        element
    }

    /// A complete modern intent-filter block, lines indented by `indent`.
    pub fn intent_filter_block(&self, indent: &str) -> String {
        let inner = format!("{indent}    ");
        format!(
            "{indent}<intent-filter android:label=\"{REDIRECTION_INTENT_LABEL}\">\n\
             {inner}<action android:name=\"android.intent.action.VIEW\" />\n\
             {inner}<category android:name=\"android.intent.category.DEFAULT\" />\n\
             {inner}<category android:name=\"android.intent.category.BROWSABLE\" />\n\
             {inner}{}\n\
             {indent}</intent-filter>\n",
            self.data_element()
        )
    }
}

/// Which anchor shape a manifest patch rewrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemePatch {
    /// The modern block's `<data/>` element was regenerated
    Modern(Vec<u8>),
    /// The legacy `MainActivity` block's scheme was rewritten
    Legacy(Vec<u8>),
    /// Neither anchor shape exists
    Missing,
}

/// Anchor regenerating the `<data/>` element of the modern block.
pub fn modern_anchor(target: &RedirectTarget) -> Result<Anchor> {
    Anchor::block(
        MODERN_BLOCK,
        vec![Anchor::literal(DATA_ELEMENT, target.data_element())?],
    )
}

/// Anchor rewriting `android:scheme` inside the legacy `MainActivity` block.
pub fn legacy_anchor(target: &RedirectTarget) -> Result<Anchor> {
    Anchor::block(
        LEGACY_BLOCK,
        vec![Anchor::literal(
            SCHEME_ATTRIBUTE,
            format!(
                r#"android:scheme="{}""#,
                quick_xml::escape::escape(target.scheme.as_str())
            ),
        )?],
    )
}

/// Rewrites the redirect scheme, preferring the modern shape.
pub fn patch_redirect_scheme(manifest: &[u8], target: &RedirectTarget) -> Result<SchemePatch> {
    let modern = modern_anchor(target)?;
    if modern.matches(manifest) {
        log::debug!("Rewriting {} intent filter", REDIRECTION_INTENT_LABEL);
        return Ok(SchemePatch::Modern(modern.apply(manifest)));
    }

    let legacy = legacy_anchor(target)?;
    if legacy.matches(manifest) {
        log::debug!("Rewriting legacy MainActivity intent filter");
        return Ok(SchemePatch::Legacy(legacy.apply(manifest)));
    }

    Ok(SchemePatch::Missing)
}

/// Whether the manifest contains the managed intent filter.
pub fn has_redirection_intent(manifest: &[u8]) -> bool {
    MODERN_BLOCK_LINE.is_match(manifest)
}

/// Removes every managed intent-filter block.
pub fn remove_redirection_intent(manifest: &[u8]) -> Vec<u8> {
    MODERN_BLOCK_LINE.replace_all(manifest, &b""[..]).into_owned()
}

/// Inserts a modern block into the launcher activity.
///
/// Returns `None` when no activity declares the launcher category.
pub fn insert_redirection_intent(manifest: &[u8], target: &RedirectTarget) -> Option<Vec<u8>> {
    let activity = ACTIVITY_BLOCK.find_iter(manifest).find(|activity| {
        activity.as_bytes().ends_with(ACTIVITY_CLOSE)
            && contains(activity.as_bytes(), LAUNCHER_CATEGORY)
    })?;

    let close = activity.end() - ACTIVITY_CLOSE.len();
    let line_start = manifest[..close]
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |idx| idx + 1);
    let leading = &manifest[line_start..close];

    // `</activity>` on its own line: insert above it, one level deeper.
    let (insert_at, indent, prefix) = if leading.iter().all(|b| *b == b' ' || *b == b'\t') {
        let indent = String::from_utf8_lossy(leading).into_owned();
        (line_start, format!("{indent}    "), "")
    } else {
        (close, String::from("    "), "\n")
    };

    let mut patched = Vec::with_capacity(manifest.len() + 256);
    patched.extend_from_slice(&manifest[..insert_at]);
    patched.extend_from_slice(prefix.as_bytes());
    patched.extend_from_slice(target.intent_filter_block(&indent).as_bytes());
    patched.extend_from_slice(&manifest[insert_at..]);
    Some(patched)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <application>
        <activity android:name=".MainActivity">
            <intent-filter>
                <action android:name="android.intent.action.MAIN" />
                <category android:name="android.intent.category.LAUNCHER" />
            </intent-filter>
        </activity>
    </application>
</manifest>
"#;

    #[test]
    fn test_parse_custom_scheme() {
        let target = RedirectTarget::parse("oneginiexample://loginsuccess/done").unwrap();
        assert_eq!(target.scheme, "oneginiexample");
        assert_eq!(target.host.as_deref(), Some("loginsuccess"));
        assert_eq!(target.path_prefix.as_deref(), Some("/done"));
        assert!(!target.is_web());
        assert!(RedirectTarget::parse("https://example.com").unwrap().is_web());
    }

    #[test]
    fn test_insert_then_remove_restores_manifest() {
        let target = RedirectTarget::parse("myapp://callback").unwrap();
        let inserted = insert_redirection_intent(MANIFEST.as_bytes(), &target).unwrap();
        let text = String::from_utf8(inserted.clone()).unwrap();
        assert!(text.contains(
            "            <intent-filter android:label=\"OneginiRedirectionIntent\">\n"
        ));
        assert!(text.contains(r#"<data android:scheme="myapp" android:host="callback" />"#));
        assert!(has_redirection_intent(&inserted));

        assert_eq!(remove_redirection_intent(&inserted), MANIFEST.as_bytes());
    }

    #[test]
    fn test_insert_without_launcher() {
        let manifest = r#"<manifest><application><activity android:name=".Other"/></application></manifest>"#;
        let target = RedirectTarget::parse("myapp://callback").unwrap();
        assert!(insert_redirection_intent(manifest.as_bytes(), &target).is_none());
    }

    #[test]
    fn test_modern_patch_is_idempotent() {
        let target = RedirectTarget::parse("myapp://callback").unwrap();
        let inserted = insert_redirection_intent(MANIFEST.as_bytes(), &target).unwrap();
        let changed = RedirectTarget::parse("other://host/path").unwrap();

        let SchemePatch::Modern(once) = patch_redirect_scheme(&inserted, &changed).unwrap() else {
            panic!("expected modern patch");
        };
        let SchemePatch::Modern(twice) = patch_redirect_scheme(&once, &changed).unwrap() else {
            panic!("expected modern patch");
        };
        assert_eq!(once, twice);
        assert!(String::from_utf8(once).unwrap().contains(
            r#"<data android:scheme="other" android:host="host" android:pathPrefix="/path" />"#
        ));
    }

    #[test]
    fn test_label_after_other_attributes() {
        let manifest = MANIFEST.replace(
            "        </activity>",
            "            <intent-filter android:autoVerify=\"false\" android:label=\"OneginiRedirectionIntent\">\n                <data android:scheme=\"old\" />\n            </intent-filter>\n        </activity>",
        );
        assert!(has_redirection_intent(manifest.as_bytes()));

        let target = RedirectTarget::parse("myapp://callback").unwrap();
        let SchemePatch::Modern(patched) = patch_redirect_scheme(manifest.as_bytes(), &target).unwrap()
        else {
            panic!("expected modern patch");
        };
        let text = String::from_utf8(patched).unwrap();
        assert!(text.contains(r#"<data android:scheme="myapp" android:host="callback" />"#));
        assert!(!text.contains(r#"scheme="old""#));

        assert_eq!(remove_redirection_intent(manifest.as_bytes()), MANIFEST.as_bytes());
    }
}
