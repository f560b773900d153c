//! Error types for workspace sessions and configuration.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which part of a session document a failure points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Session,
    Edit,
    Version,
}

/// Location of a failure inside session data: `session`, `edits[3]`, `versions[0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub record: RecordKind,
    pub index: Option<usize>,
}

impl Location {
    pub(crate) fn session() -> Self {
        Self { record: RecordKind::Session, index: None }
    }

    pub(crate) fn edit(index: usize) -> Self {
        Self { record: RecordKind::Edit, index: Some(index) }
    }

    pub(crate) fn version(index: usize) -> Self {
        Self { record: RecordKind::Version, index: Some(index) }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.record {
            RecordKind::Session => "session",
            RecordKind::Edit => "edits",
            RecordKind::Version => "versions",
        };
        match self.index {
            Some(i) => write!(f, "{name}[{i}]"),
            None => write!(f, "{name}"),
        }
    }
}

/// Why a session import was refused.
///
/// The public `import_session` keeps a boolean contract; this is what gets
/// logged, and what `try_import_session` hands back to callers that care.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Input was not a JSON object at the given location.
    #[error("{0}: expected an object")]
    NotAnObject(Location),

    /// A required key is absent.
    #[error("{at}: missing key '{key}'")]
    MissingKey { at: Location, key: &'static str },

    /// A key is present but holds the wrong kind of value.
    #[error("{at}: wrong type: {detail}")]
    TypeMismatch { at: Location, detail: String },

    /// Well-typed record that still cannot exist (conflicting flags, duplicate ids).
    #[error("{at}: invalid record: {detail}")]
    InvalidRecord { at: Location, detail: String },

    /// Raw text was not JSON at all.
    #[error("session is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading a [`crate::WorkspaceConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}
