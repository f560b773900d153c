//! Edit records.
//!
//! An [`Edit`] describes one mutation of workspace content, or one suggested
//! mutation awaiting review. Everything about an edit is fixed at creation
//! except its [`EditState`], which moves at most once: `Pending` to
//! `Applied` or `Pending` to `Rejected`.
//!
//! ## Wire shape
//!
//! The session interchange format carries review state as two booleans,
//! `accepted` and `rejected`. [`EditRecord`] is that flat shape; [`Edit`]
//! converts through it so that the impossible "accepted and rejected"
//! combination is refused at the boundary instead of living in memory.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::{Author, EditId, Timestamp};

/// Kind of text operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EditOp {
    Insert,
    Delete,
    Replace,
}

impl EditOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOp::Insert => "insert",
            EditOp::Delete => "delete",
            EditOp::Replace => "replace",
        }
    }
}

impl std::fmt::Display for EditOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Author × operation tag, serialized as `user_insert`, `model_replace`, etc.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EditType {
    UserInsert,
    UserDelete,
    UserReplace,
    ModelInsert,
    ModelDelete,
    ModelReplace,
}

impl EditType {
    /// Compose the tag for an author and operation.
    pub fn new(author: Author, op: EditOp) -> Self {
        match (author, op) {
            (Author::User, EditOp::Insert) => EditType::UserInsert,
            (Author::User, EditOp::Delete) => EditType::UserDelete,
            (Author::User, EditOp::Replace) => EditType::UserReplace,
            (Author::Model, EditOp::Insert) => EditType::ModelInsert,
            (Author::Model, EditOp::Delete) => EditType::ModelDelete,
            (Author::Model, EditOp::Replace) => EditType::ModelReplace,
        }
    }

    pub fn author(&self) -> Author {
        match self {
            EditType::UserInsert | EditType::UserDelete | EditType::UserReplace => Author::User,
            EditType::ModelInsert | EditType::ModelDelete | EditType::ModelReplace => {
                Author::Model
            }
        }
    }

    pub fn op(&self) -> EditOp {
        match self {
            EditType::UserInsert | EditType::ModelInsert => EditOp::Insert,
            EditType::UserDelete | EditType::ModelDelete => EditOp::Delete,
            EditType::UserReplace | EditType::ModelReplace => EditOp::Replace,
        }
    }

    /// Parse from the wire tag (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditType::UserInsert => "user_insert",
            EditType::UserDelete => "user_delete",
            EditType::UserReplace => "user_replace",
            EditType::ModelInsert => "model_insert",
            EditType::ModelDelete => "model_delete",
            EditType::ModelReplace => "model_replace",
        }
    }
}

impl std::fmt::Display for EditType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Review state of an edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditState {
    /// Content reflects this edit.
    #[default]
    Applied,
    /// Suggested, awaiting accept or reject.
    Pending,
    /// Suggestion declined; content never reflected it.
    Rejected,
}

impl EditState {
    /// `(accepted, rejected)` as carried on the wire.
    pub fn flags(&self) -> (bool, bool) {
        match self {
            EditState::Applied => (true, false),
            EditState::Pending => (false, false),
            EditState::Rejected => (false, true),
        }
    }

    /// Rebuild from wire flags. Both set is not a state.
    pub fn from_flags(accepted: bool, rejected: bool) -> Option<Self> {
        match (accepted, rejected) {
            (true, false) => Some(EditState::Applied),
            (false, false) => Some(EditState::Pending),
            (false, true) => Some(EditState::Rejected),
            (true, true) => None,
        }
    }
}

/// One mutation, or one suggested mutation, of workspace content.
///
/// `position` is a character offset (not bytes) into the content as it was
/// when the edit was created. Positions are never adjusted retroactively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EditRecord", try_from = "EditRecord")]
pub struct Edit {
    pub id: EditId,
    pub timestamp: Timestamp,
    pub edit_type: EditType,
    pub position: usize,
    pub old_text: String,
    pub new_text: String,
    pub author: Author,
    /// Free-text label, set on suggestions.
    pub description: Option<String>,
    state: EditState,
}

impl Edit {
    fn build(
        edit_type: EditType,
        position: usize,
        old_text: String,
        new_text: String,
        state: EditState,
    ) -> Self {
        Self {
            id: EditId::new(),
            timestamp: crate::now(),
            edit_type,
            position,
            old_text,
            new_text,
            author: edit_type.author(),
            description: None,
            state,
        }
    }

    /// An edit whose effect is already in the content.
    pub fn applied(
        edit_type: EditType,
        position: usize,
        old_text: impl Into<String>,
        new_text: impl Into<String>,
    ) -> Self {
        Self::build(edit_type, position, old_text.into(), new_text.into(), EditState::Applied)
    }

    /// A suggestion awaiting review. Content is not touched until accepted.
    pub fn pending(
        edit_type: EditType,
        position: usize,
        old_text: impl Into<String>,
        new_text: impl Into<String>,
    ) -> Self {
        Self::build(edit_type, position, old_text.into(), new_text.into(), EditState::Pending)
    }

    /// Attach a description label.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn accepted(&self) -> bool {
        self.state == EditState::Applied
    }

    pub fn rejected(&self) -> bool {
        self.state == EditState::Rejected
    }

    pub fn is_pending(&self) -> bool {
        self.state == EditState::Pending
    }

    /// Pending → Applied. Returns `false` if the edit was already resolved.
    pub fn accept(&mut self) -> bool {
        self.resolve(EditState::Applied)
    }

    /// Pending → Rejected. Returns `false` if the edit was already resolved.
    pub fn reject(&mut self) -> bool {
        self.resolve(EditState::Rejected)
    }

    fn resolve(&mut self, to: EditState) -> bool {
        if self.state != EditState::Pending {
            return false;
        }
        self.state = to;
        true
    }

    /// Number of characters this edit removes when applied.
    pub fn removed_chars(&self) -> usize {
        match self.edit_type.op() {
            EditOp::Insert => 0,
            EditOp::Delete | EditOp::Replace => self.old_text.chars().count(),
        }
    }
}

/// Flat wire form of an [`Edit`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditRecord {
    pub id: EditId,
    #[serde(with = "crate::timestamp")]
    pub timestamp: Timestamp,
    pub edit_type: EditType,
    pub position: usize,
    pub old_text: String,
    pub new_text: String,
    pub author: Author,
    pub accepted: bool,
    /// Absent in sessions saved before rejection existed.
    #[serde(default)]
    pub rejected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Why a wire record cannot become an [`Edit`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditRecordError {
    #[error("edit {0} is marked both accepted and rejected")]
    ConflictingState(EditId),
    #[error("edit {id} has author '{author}' but type '{edit_type}'")]
    AuthorMismatch {
        id: EditId,
        author: Author,
        edit_type: EditType,
    },
    /// User edits are applied when made; only model edits go through review.
    #[error("user edit {id} is {state:?}; user edits are always accepted")]
    UnappliedUserEdit { id: EditId, state: EditState },
}

impl From<Edit> for EditRecord {
    fn from(edit: Edit) -> Self {
        let (accepted, rejected) = edit.state.flags();
        Self {
            id: edit.id,
            timestamp: edit.timestamp,
            edit_type: edit.edit_type,
            position: edit.position,
            old_text: edit.old_text,
            new_text: edit.new_text,
            author: edit.author,
            accepted,
            rejected,
            description: edit.description,
        }
    }
}

impl TryFrom<EditRecord> for Edit {
    type Error = EditRecordError;

    fn try_from(record: EditRecord) -> Result<Self, Self::Error> {
        let state = EditState::from_flags(record.accepted, record.rejected)
            .ok_or(EditRecordError::ConflictingState(record.id))?;
        if record.edit_type.author() != record.author {
            return Err(EditRecordError::AuthorMismatch {
                id: record.id,
                author: record.author,
                edit_type: record.edit_type,
            });
        }
        if record.author == Author::User && state != EditState::Applied {
            return Err(EditRecordError::UnappliedUserEdit { id: record.id, state });
        }
        Ok(Self {
            id: record.id,
            timestamp: record.timestamp,
            edit_type: record.edit_type,
            position: record.position,
            old_text: record.old_text,
            new_text: record.new_text,
            author: record.author,
            description: record.description,
            state,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_type_composition() {
        for author in [Author::User, Author::Model] {
            for op in [EditOp::Insert, EditOp::Delete, EditOp::Replace] {
                let t = EditType::new(author, op);
                assert_eq!(t.author(), author);
                assert_eq!(t.op(), op);
                assert_eq!(t.as_str(), format!("{}_{}", author, op));
                assert_eq!(EditType::from_str(t.as_str()), Some(t));
            }
        }
        assert_eq!(EditType::from_str("system_insert"), None);
    }

    #[test]
    fn test_edit_type_serde_matches_as_str() {
        let json = serde_json::to_string(&EditType::ModelReplace).unwrap();
        assert_eq!(json, "\"model_replace\"");
    }

    #[test]
    fn test_state_flags_roundtrip() {
        for state in [EditState::Applied, EditState::Pending, EditState::Rejected] {
            let (a, r) = state.flags();
            assert_eq!(EditState::from_flags(a, r), Some(state));
        }
        assert_eq!(EditState::from_flags(true, true), None);
    }

    #[test]
    fn test_pending_transitions_once() {
        let mut edit = Edit::pending(EditType::ModelReplace, 3, "old", "new");
        assert!(edit.is_pending());
        assert!(edit.accept());
        assert!(edit.accepted());
        assert!(!edit.accept());
        assert!(!edit.reject());
        assert_eq!(edit.state(), EditState::Applied);

        let mut edit = Edit::pending(EditType::ModelReplace, 3, "old", "new");
        assert!(edit.reject());
        assert!(edit.rejected());
        assert!(!edit.accepted());
        assert!(!edit.accept());
    }

    #[test]
    fn test_applied_cannot_be_rejected() {
        let mut edit = Edit::applied(EditType::UserInsert, 0, "", "hi");
        assert!(!edit.reject());
        assert!(edit.accepted());
    }

    #[test]
    fn test_author_follows_edit_type() {
        let edit = Edit::applied(EditType::ModelDelete, 0, "x", "");
        assert_eq!(edit.author, Author::Model);
    }

    #[test]
    fn test_removed_chars_counts_characters() {
        let edit = Edit::pending(EditType::ModelReplace, 0, "héllo", "x");
        assert_eq!(edit.removed_chars(), 5);
        let insert = Edit::pending(EditType::ModelInsert, 0, "ignored", "x");
        assert_eq!(insert.removed_chars(), 0);
    }

    #[test]
    fn test_wire_shape_has_flat_flags() {
        let edit = Edit::pending(EditType::ModelReplace, 6, "Beautiful", "Amazing")
            .with_description("tighten wording");
        let value = serde_json::to_value(&edit).unwrap();
        assert_eq!(value["edit_type"], "model_replace");
        assert_eq!(value["author"], "model");
        assert_eq!(value["accepted"], false);
        assert_eq!(value["rejected"], false);
        assert_eq!(value["position"], 6);
        assert_eq!(value["description"], "tighten wording");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));

        let parsed: Edit = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, edit);
    }

    #[test]
    fn test_description_omitted_when_absent() {
        let edit = Edit::applied(EditType::UserInsert, 0, "", "a");
        let value = serde_json::to_value(&edit).unwrap();
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_missing_rejected_defaults_to_false() {
        let json = serde_json::json!({
            "id": EditId::new().to_string(),
            "timestamp": "2024-03-01T10:00:00.000001",
            "edit_type": "model_replace",
            "position": 0,
            "old_text": "a",
            "new_text": "b",
            "author": "model",
            "accepted": false,
        });
        let edit: Edit = serde_json::from_value(json).unwrap();
        assert!(edit.is_pending());
    }

    #[test]
    fn test_conflicting_flags_refused() {
        let mut record: EditRecord =
            Edit::applied(EditType::UserInsert, 0, "", "a").into();
        record.rejected = true;
        assert!(matches!(
            Edit::try_from(record),
            Err(EditRecordError::ConflictingState(_))
        ));
    }

    #[test]
    fn test_author_mismatch_refused() {
        let mut record: EditRecord =
            Edit::applied(EditType::UserInsert, 0, "", "a").into();
        record.author = Author::Model;
        assert!(matches!(
            Edit::try_from(record),
            Err(EditRecordError::AuthorMismatch { .. })
        ));
    }

    #[test]
    fn test_unapplied_user_edit_refused() {
        for (accepted, rejected) in [(false, false), (false, true)] {
            let mut record: EditRecord =
                Edit::applied(EditType::UserInsert, 0, "", "a").into();
            record.accepted = accepted;
            record.rejected = rejected;
            assert!(matches!(
                Edit::try_from(record),
                Err(EditRecordError::UnappliedUserEdit { .. })
            ));
        }
    }
}
