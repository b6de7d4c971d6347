//! Anchor-based template patching.
//!
//! A template is patched by rewriting a fixed set of anchors, each a regular
//! pattern keyed to a known token (a named field, a `package` line, the marked
//! certificates accessor, a manifest block). Everything outside the anchors is
//! preserved byte for byte, which lets project-local customisations of a
//! generated file survive repeated runs. A missing anchor leaves the buffer
//! unchanged; some templates omit optional fields.
//!
//! Every anchor's output matches its own pattern again and renders to the same
//! bytes, so patching is idempotent.
//!
//! # Module Organization
//!
//! - [`assets`] - bundled default templates
//! - [`config_model`] - configuration model anchors and writers
//! - [`manifest`] - redirect scheme anchors for `AndroidManifest.xml`

pub mod assets;
pub mod config_model;
pub mod manifest;

use super::error::{Error, Result};
use regex::bytes::{Captures, Regex};

/// How an anchor's match is rewritten.
#[derive(Debug, Clone)]
pub enum Replacement {
    /// Replace the whole match with these bytes
    Literal(Vec<u8>),
    /// Keep the named capture group (if it matched), then append these bytes
    KeepGroup {
        group: &'static str,
        value: Vec<u8>,
    },
    /// Apply nested anchors inside the matched block only
    Nested(Vec<Anchor>),
}

/// A match pattern paired with its replacement.
#[derive(Debug, Clone)]
pub struct Anchor {
    pattern: Regex,
    replacement: Replacement,
}

impl Anchor {
    /// Creates an anchor from a regular pattern.
    pub fn new(pattern: &str, replacement: Replacement) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            Error::input(format!("invalid anchor pattern '{pattern}': {e}"))
        })?;
        Ok(Self {
            pattern,
            replacement,
        })
    }

    /// Anchor replacing every match with `value`.
    pub fn literal(pattern: &str, value: impl Into<Vec<u8>>) -> Result<Self> {
        Self::new(pattern, Replacement::Literal(value.into()))
    }

    /// Anchor scoping `inner` anchors to each match of `pattern`.
    pub fn block(pattern: &str, inner: Vec<Anchor>) -> Result<Self> {
        Self::new(pattern, Replacement::Nested(inner))
    }

    /// Whether the anchor occurs in `buffer`.
    pub fn matches(&self, buffer: &[u8]) -> bool {
        self.pattern.is_match(buffer)
    }

    /// Rewrites every occurrence of the anchor in `buffer`.
    pub fn apply(&self, buffer: &[u8]) -> Vec<u8> {
        self.pattern
            .replace_all(buffer, |caps: &Captures<'_>| self.render(caps))
            .into_owned()
    }

    fn render(&self, caps: &Captures<'_>) -> Vec<u8> {
        match &self.replacement {
            Replacement::Literal(value) => value.clone(),
            Replacement::KeepGroup { group, value } => {
                let mut out = caps
                    .name(group)
                    .map(|m| m.as_bytes().to_vec())
                    .unwrap_or_default();
                out.extend_from_slice(value);
                out
            }
            Replacement::Nested(inner) => patch(&caps[0], inner),
        }
    }
}

/// Applies `anchors` to `buffer` in order.
pub fn patch(buffer: &[u8], anchors: &[Anchor]) -> Vec<u8> {
    anchors
        .iter()
        .fold(buffer.to_vec(), |patched, anchor| anchor.apply(&patched))
}
