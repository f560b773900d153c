//! Version snapshots.

use serde::{Deserialize, Serialize};

use crate::{EditId, Timestamp, VersionId};

/// A full-content checkpoint.
///
/// `content` is a self-contained copy, not a diff, so any retained version
/// can be restored without replaying edits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    #[serde(with = "crate::timestamp")]
    pub timestamp: Timestamp,
    pub content: String,
    /// Edits that produced this checkpoint (empty for initial/restored versions).
    pub edit_ids: Vec<EditId>,
    pub description: String,
}

impl Version {
    pub fn new(
        content: impl Into<String>,
        edit_ids: Vec<EditId>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: VersionId::new(),
            timestamp: crate::now(),
            content: content.into(),
            edit_ids,
            description: description.into(),
        }
    }
}
