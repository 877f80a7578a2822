use std::fmt;

use crate::parsing::cursor::CursorError;

/// Granularity of a continuation read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationUnit {
    Lines,
    Chars,
}

impl fmt::Display for ContinuationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinuationUnit::Lines => f.write_str("line(s)"),
            ContinuationUnit::Chars => f.write_str("character(s)"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A continuation form declared more input than the stream still holds.
    #[error(
        "Truncated input for key `{key}`: needed {requested} more {unit} but only {available} remained"
    )]
    TruncatedInput {
        key: String,
        unit: ContinuationUnit,
        requested: usize,
        available: usize,
    },
    #[error("Failed to read config input {origin}: {source}")]
    IoFailure {
        origin: String,
        source: std::io::Error,
    },
}

impl ParseError {
    /// Attaches the key being assembled and the input origin to a cursor failure.
    pub(crate) fn from_cursor(err: CursorError, key: &str, origin: &str) -> Self {
        match err {
            CursorError::Exhausted {
                unit,
                requested,
                available,
            } => ParseError::TruncatedInput {
                key: key.to_string(),
                unit,
                requested,
                available,
            },
            CursorError::Io(source) => ParseError::IoFailure {
                origin: origin.to_string(),
                source,
            },
        }
    }
}

/// Failure to look up a required entry in a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Missing required key: {key}")]
    MissingKey { key: String },
}
