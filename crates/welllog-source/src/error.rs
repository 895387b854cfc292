//! Error types raised by source object graphs.

use std::path::PathBuf;

/// A single native attribute could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("attribute {attribute} is not readable: {reason}")]
    Unreadable { attribute: String, reason: String },

    #[error("attribute {attribute} is not supported by this source")]
    Unsupported { attribute: String },
}

/// A relationship cell had a shape the resolver does not understand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationshipError {
    #[error("unexpected relationship cell shape: {found}")]
    UnexpectedShape { found: &'static str },
}

/// The bulk samples of a channel could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("channel {channel} has no samples")]
    Missing { channel: String },

    #[error("samples of channel {channel} are unavailable: {reason}")]
    Unavailable { channel: String, reason: String },
}

/// Errors loading or inspecting a source file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
