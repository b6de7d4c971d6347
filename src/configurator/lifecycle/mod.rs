//! Lifecycle of optional generated artifacts.
//!
//! An optional artifact is either absent, present with the no-op default
//! content, or present with custom content. When the governing values equal
//! their defaults the artifact must be absent, including its registration in
//! the native project; otherwise it is (re)written with only the differing
//! values. Stale content is always removed before anything is written.

pub mod intent_filter;
pub mod security_controller;

pub use intent_filter::{IntentFilterOutcome, sync_redirect_intent};
pub use security_controller::{sync_android_security_controller, sync_ios_security_controller};

/// Observed state of an optional artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactState {
    /// Not on disk
    Absent,
    /// On disk, equivalent to the no-op default
    PresentDefault,
    /// On disk with non-default values
    PresentCustom,
}

impl ArtifactState {
    /// The state an artifact must end up in.
    pub fn required(is_default: bool) -> Self {
        if is_default {
            ArtifactState::Absent
        } else {
            ArtifactState::PresentCustom
        }
    }
}

/// State change applied to one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ArtifactState,
    pub to: ArtifactState,
}

impl Transition {
    /// Whether the artifact was on disk before and is gone now.
    pub fn removed(&self) -> bool {
        self.from != ArtifactState::Absent && self.to == ArtifactState::Absent
    }
}
