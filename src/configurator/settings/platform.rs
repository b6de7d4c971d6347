//! Small enums selecting what and how to configure.

use std::fmt;

/// Target platform of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Android (Gradle) project
    Android,
    /// iOS (Xcode) project
    Ios,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "android"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}

/// Which project topology the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopologySelector {
    /// Plain native project
    #[default]
    Native,
    /// Project wrapped by Cordova
    Cordova,
    /// Project wrapped by NativeScript
    NativeScript,
}

/// Language of the generated Android sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceLanguage {
    /// `.java` sources
    #[default]
    Java,
    /// `.kt` sources
    Kotlin,
}

impl SourceLanguage {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            SourceLanguage::Java => "java",
            SourceLanguage::Kotlin => "kt",
        }
    }

    /// The other language, whose stale artifacts must be removed.
    pub fn other(self) -> Self {
        match self {
            SourceLanguage::Java => SourceLanguage::Kotlin,
            SourceLanguage::Kotlin => SourceLanguage::Java,
        }
    }
}
