//! Workspace statistics.

use serde::{Deserialize, Serialize};

use sanjutsu_types::{Author, Timestamp};

use crate::WorkspaceBuffer;

/// Counts derived from buffer state. Recomputed on every call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceStats {
    /// Characters in the current content.
    pub content_length: usize,
    pub total_edits: usize,
    pub user_edits: usize,
    pub model_edits: usize,
    pub pending_suggestions: usize,
    /// Retained versions.
    pub versions: usize,
    /// Timestamp of the newest edit; `None` before the first edit.
    #[serde(with = "sanjutsu_types::timestamp::option")]
    pub last_modified: Option<Timestamp>,
}

impl WorkspaceStats {
    pub(crate) fn collect(buffer: &WorkspaceBuffer) -> Self {
        let edits = &buffer.edits;
        let user_edits = edits.iter().filter(|e| e.author == Author::User).count();
        Self {
            content_length: buffer.len(),
            total_edits: edits.len(),
            user_edits,
            model_edits: edits.len() - user_edits,
            pending_suggestions: buffer.pending_suggestions().len(),
            versions: buffer.versions.len(),
            last_modified: edits.last().map(|e| e.timestamp),
        }
    }
}
