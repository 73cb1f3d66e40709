//! Stable diagnostic codes for hierarchy spec validation.

use serde::Serialize;
use std::fmt;

/// Machine-readable category of a [`super::errors::SpecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The spec version is not one this crate understands.
    UnsupportedVersion,
    /// The stopword language has no bundled list.
    UnknownLanguage,
    /// A runtime limit is zero or otherwise unusable.
    LimitExceeded,
    /// A field was not recognized by the schema.
    UnknownField,
    /// Stopword overrides contradict each other.
    ConflictingStopwords,
    /// Catch-all for custom rules.
    ValidationFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::UnknownLanguage => "unknown_language",
            Self::LimitExceeded => "limit_exceeded",
            Self::UnknownField => "unknown_field",
            Self::ConflictingStopwords => "conflicting_stopwords",
            Self::ValidationFailed => "validation_failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
