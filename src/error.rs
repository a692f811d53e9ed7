//! Error types for AMI message decoding

use thiserror::Error;

/// Errors raised at the edges of the normalization layer.
///
/// Field-level problems (unparsable numbers, absent flags) never show up
/// here: every coercion policy has a fallback value. Only the questions
/// "which kind is this?" and "is this even a header block?" can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AmiError {
    /// The event name is outside the closed set known to the registry.
    #[error("unknown event kind: {name}")]
    UnknownEvent { name: String },

    /// The header block carried neither an `Event` nor a `Response` header.
    #[error("message has no Event or Response header")]
    MissingEventName,

    /// A header line had no `:` separator.
    #[error("invalid header line: {header}")]
    InvalidHeader { header: String },
}

impl AmiError {
    pub(crate) fn unknown_event(name: impl Into<String>) -> Self {
        Self::UnknownEvent { name: name.into() }
    }

    /// `true` if the error came from registry lookup rather than block decoding.
    pub fn is_unknown_event(&self) -> bool {
        matches!(self, Self::UnknownEvent { .. })
    }
}

/// Result alias used throughout the crate.
pub type AmiResult<T> = Result<T, AmiError>;
