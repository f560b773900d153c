//! The workspace buffer.
//!
//! # Structure
//!
//! ```text
//! WorkspaceBuffer
//! ├── content             # current text, single source of truth
//! ├── edits: Vec<Edit>    # every mutation and suggestion, never pruned
//! ├── versions: Vec<Version>
//! │                       # checkpoint after each content change, last N kept
//! └── current_version_id  # most recent version (lookup only)
//! ```
//!
//! # Positions
//!
//! All positions are character offsets. Out-of-range positions are clamped
//! into `[0, len]` and reversed ranges are swapped; nothing here rejects a
//! range or panics on one.
//!
//! # Versioning
//!
//! Content-changing operations (`set_content`, `insert_text`, `delete_text`,
//! `replace_text`, `accept_suggestion`, `restore_version`) append exactly one
//! version. `suggest_edit` and `reject_suggestion` only touch the edit log:
//! the version history tracks content states, not bookkeeping.
//!
//! `delete_text` versions like every other mutation, so a run of deletes is
//! visible in history and restorable.

use sanjutsu_types::{Author, Edit, EditId, EditOp, EditType, Version, VersionId};

use crate::config::{ConflictPolicy, WorkspaceConfig};
use crate::stats::WorkspaceStats;
use crate::text;

/// Label of the version every new buffer starts with.
pub const INITIAL_DESCRIPTION: &str = "Initial workspace";

/// Label used by [`WorkspaceBuffer::clear_all`].
pub const CLEARED_DESCRIPTION: &str = "Workspace cleared";

/// Characters of suggestion text shown in version labels when no description was given.
const LABEL_PREVIEW_CHARS: usize = 50;

/// Text store with an edit log, reviewable model suggestions and a bounded
/// version history.
///
/// Single-threaded and passive: no locking, no I/O. Hosts that touch one
/// buffer from several threads wrap it in a mutex.
#[derive(Clone, Debug)]
pub struct WorkspaceBuffer {
    pub(crate) content: String,
    pub(crate) edits: Vec<Edit>,
    pub(crate) versions: Vec<Version>,
    pub(crate) current_version_id: VersionId,
    pub(crate) config: WorkspaceConfig,
}

impl Default for WorkspaceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceBuffer {
    /// Create an empty buffer with default configuration.
    pub fn new() -> Self {
        Self::with_config(WorkspaceConfig::default())
    }

    /// Create an empty buffer.
    ///
    /// `config` is not validated here: a `max_versions` of zero is raised to
    /// one (see [`WorkspaceConfig::max_versions`]).
    pub fn with_config(mut config: WorkspaceConfig) -> Self {
        config.max_versions = config.max_versions.max(1);
        let initial = Version::new(String::new(), Vec::new(), INITIAL_DESCRIPTION);
        Self {
            content: String::new(),
            edits: Vec::new(),
            current_version_id: initial.id,
            versions: vec![initial],
            config,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content length in characters.
    pub fn len(&self) -> usize {
        text::char_len(&self.content)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn current_version_id(&self) -> VersionId {
        self.current_version_id
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replace the entire content.
    pub fn set_content(
        &mut self,
        content: impl Into<String>,
        author: Author,
        description: impl Into<String>,
    ) -> Edit {
        let content = content.into();
        let old = std::mem::replace(&mut self.content, content.clone());
        let edit = Edit::applied(EditType::new(author, EditOp::Replace), 0, old, content);
        tracing::debug!(edit = %edit.id, %author, len = self.len(), "set content");
        self.commit(edit, description.into())
    }

    /// Splice `new_text` in at `position` (clamped).
    pub fn insert_text(&mut self, position: usize, new_text: &str, author: Author) -> Edit {
        let pos = text::clamp(&self.content, position);
        let at = text::byte_offset(&self.content, pos);
        self.content.insert_str(at, new_text);
        let edit = Edit::applied(EditType::new(author, EditOp::Insert), pos, "", new_text);
        tracing::debug!(edit = %edit.id, %author, pos, "inserted text");
        self.commit(edit, format!("Inserted text at position {pos}"))
    }

    /// Remove the characters in `start..end` (clamped, swapped if reversed).
    ///
    /// Returns `None` without touching anything when the range is empty.
    pub fn delete_text(&mut self, start: usize, end: usize, author: Author) -> Option<Edit> {
        let (start, end) = text::clamp_range(&self.content, start, end);
        if start == end {
            return None;
        }
        let range = text::byte_range(&self.content, start, end);
        let removed: String = self.content.drain(range).collect();
        let edit = Edit::applied(EditType::new(author, EditOp::Delete), start, removed, "");
        tracing::debug!(edit = %edit.id, %author, start, end, "deleted text");
        Some(self.commit(edit, format!("Deleted text at positions {start}-{end}")))
    }

    /// Replace the characters in `start..end` with `new_text`.
    ///
    /// An empty range is a pure insertion at `start`.
    pub fn replace_text(
        &mut self,
        start: usize,
        end: usize,
        new_text: &str,
        author: Author,
    ) -> Edit {
        let (start, end) = text::clamp_range(&self.content, start, end);
        let range = text::byte_range(&self.content, start, end);
        let old = self.content[range.clone()].to_string();
        self.content.replace_range(range, new_text);
        let edit = Edit::applied(EditType::new(author, EditOp::Replace), start, old, new_text);
        tracing::debug!(edit = %edit.id, %author, start, end, "replaced text");
        self.commit(edit, format!("Replaced text at positions {start}-{end}"))
    }

    /// Empty the workspace through the normal mutation path.
    pub fn clear_all(&mut self) -> Edit {
        self.set_content("", Author::User, CLEARED_DESCRIPTION)
    }

    // =========================================================================
    // Suggestions
    // =========================================================================

    /// Record a model suggestion to replace `start..end` with `new_text`.
    ///
    /// Content is not touched and no version is created.
    pub fn suggest_edit(
        &mut self,
        start: usize,
        end: usize,
        new_text: &str,
        description: impl Into<String>,
    ) -> Edit {
        let (start, end) = text::clamp_range(&self.content, start, end);
        let old = text::slice(&self.content, start, end);
        let edit = Edit::pending(EditType::ModelReplace, start, old, new_text)
            .with_description(description);
        tracing::debug!(edit = %edit.id, start, end, "recorded model suggestion");
        self.edits.push(edit.clone());
        edit
    }

    /// Model edits awaiting review, oldest first.
    pub fn pending_suggestions(&self) -> Vec<&Edit> {
        self.edits
            .iter()
            .filter(|e| is_open_suggestion(e))
            .collect()
    }

    /// Apply a pending suggestion to the current content.
    ///
    /// The suggestion's stored position is used as-is. Under
    /// [`ConflictPolicy::Revalidate`] the text at that position must still
    /// match `old_text`; a mismatch rejects the suggestion and returns `false`.
    /// Under [`ConflictPolicy::ApplyBlindly`] whatever is there is replaced.
    ///
    /// Returns `false` for unknown ids and already-resolved edits.
    pub fn accept_suggestion(&mut self, edit_id: EditId) -> bool {
        let Some(idx) = self.pending_index(edit_id) else {
            tracing::debug!(edit = %edit_id, "accept: no pending edit with that id");
            return false;
        };

        let edit = &self.edits[idx];
        let insert = match edit.edit_type {
            EditType::UserInsert | EditType::ModelInsert => edit.new_text.clone(),
            EditType::UserDelete | EditType::ModelDelete => String::new(),
            EditType::UserReplace | EditType::ModelReplace => edit.new_text.clone(),
        };
        let remove = edit.removed_chars();
        let len = self.len();
        let start = edit.position.min(len);
        let end = (start + remove).min(len);

        if self.config.conflict_policy == ConflictPolicy::Revalidate {
            let in_place = edit.position <= len
                && text::slice(&self.content, start, end) == edit.old_text;
            if !in_place {
                tracing::warn!(
                    edit = %edit_id,
                    position = edit.position,
                    expected = %text::preview(&edit.old_text, LABEL_PREVIEW_CHARS),
                    "suggestion no longer matches content, rejecting"
                );
                self.edits[idx].reject();
                return false;
            }
        }

        let label = suggestion_label(edit);
        let range = text::byte_range(&self.content, start, end);
        self.content.replace_range(range, &insert);
        self.edits[idx].accept();
        tracing::debug!(edit = %edit_id, start, end, "accepted model suggestion");
        self.push_version(vec![edit_id], format!("Accepted model suggestion: {label}"));
        true
    }

    /// Decline a pending suggestion. Content and version history are unchanged.
    pub fn reject_suggestion(&mut self, edit_id: EditId) -> bool {
        let Some(idx) = self.pending_index(edit_id) else {
            tracing::debug!(edit = %edit_id, "reject: no pending edit with that id");
            return false;
        };
        let rejected = self.edits[idx].reject();
        tracing::debug!(
            edit = %edit_id,
            label = %suggestion_label(&self.edits[idx]),
            "rejected model suggestion"
        );
        rejected
    }

    /// Index of `edit_id` if it is one of [`Self::pending_suggestions`].
    fn pending_index(&self, edit_id: EditId) -> Option<usize> {
        self.edits
            .iter()
            .position(|e| e.id == edit_id)
            .filter(|&i| is_open_suggestion(&self.edits[i]))
    }

    // =========================================================================
    // Version history
    // =========================================================================

    /// Retained versions, oldest first.
    pub fn version_history(&self) -> &[Version] {
        &self.versions
    }

    pub fn get_version(&self, id: VersionId) -> Option<&Version> {
        self.versions.iter().find(|v| v.id == id)
    }

    pub fn current_version(&self) -> Option<&Version> {
        self.get_version(self.current_version_id)
    }

    /// Set content back to a retained version's content.
    ///
    /// Appends a new version rather than truncating history. Returns `false`
    /// if the version is unknown or was pruned.
    pub fn restore_version(&mut self, version_id: VersionId) -> bool {
        let Some(version) = self.get_version(version_id) else {
            tracing::debug!(version = %version_id, "restore: unknown version");
            return false;
        };
        let content = version.content.clone();
        let description = format!("Restored to version: {}", version.description);
        self.content = content;
        tracing::debug!(version = %version_id, "restored version");
        self.push_version(Vec::new(), description);
        true
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The last `limit` edits, oldest first. `0` returns the whole log.
    pub fn edit_history(&self, limit: usize) -> &[Edit] {
        if limit == 0 || limit >= self.edits.len() {
            &self.edits
        } else {
            &self.edits[self.edits.len() - limit..]
        }
    }

    /// The last `history_limit` edits (configured, 50 by default).
    pub fn recent_edits(&self) -> &[Edit] {
        self.edit_history(self.config.history_limit)
    }

    pub fn get_edit(&self, id: EditId) -> Option<&Edit> {
        self.edits.iter().find(|e| e.id == id)
    }

    pub fn stats(&self) -> WorkspaceStats {
        WorkspaceStats::collect(self)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Log an applied edit and checkpoint the resulting content.
    fn commit(&mut self, edit: Edit, description: String) -> Edit {
        self.edits.push(edit.clone());
        self.push_version(vec![edit.id], description);
        edit
    }

    fn push_version(&mut self, edit_ids: Vec<EditId>, description: String) {
        let version = Version::new(self.content.clone(), edit_ids, description);
        self.current_version_id = version.id;
        self.versions.push(version);
        self.prune_versions();
    }

    pub(crate) fn prune_versions(&mut self) {
        let max = self.config.max_versions.max(1);
        if self.versions.len() > max {
            let excess = self.versions.len() - max;
            self.versions.drain(..excess);
            tracing::trace!(pruned = excess, kept = max, "pruned version history");
        }
    }
}

fn is_open_suggestion(edit: &Edit) -> bool {
    edit.author == Author::Model && edit.is_pending()
}

/// Description if one was given, otherwise a preview of the suggested text.
fn suggestion_label(edit: &Edit) -> String {
    match edit.description.as_deref() {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => text::preview(&edit.new_text, LABEL_PREVIEW_CHARS),
    }
}

// ============================================================================
// Tests
// ============================================================================
