//! Collaborative workspace buffer for Sanjutsu.
//!
//! The workspace is where calculation results land and where a reviewing
//! model can propose changes. One [`WorkspaceBuffer`] owns the text, every
//! edit ever made to it, and a bounded run of full-content versions.
//!
//! # Design Philosophy
//!
//! - **Content is the source of truth.** Edits and versions record positions
//!   as they were when created; nothing is rebased after the fact.
//! - **Suggestions are data, not effects.** A model edit enters as a pending
//!   record and only changes content when explicitly accepted.
//! - **History is additive.** Restoring a version appends a new one instead of
//!   truncating, and the edit log is never pruned.
//! - **The buffer is passive.** No I/O, no threads, no network. Calculation
//!   results and model suggestions arrive through method calls.
//!
//! # Edit States
//!
//! ```text
//! suggest_edit ──► Pending ──accept_suggestion──► Applied
//!                     │
//!                     └──reject_suggestion───► Rejected
//!
//! set_content / insert_text / delete_text / replace_text ──► Applied
//! ```

mod buffer;
mod calc_block;
mod config;
mod error;
mod session;
mod stats;
mod text;

pub use buffer::{CLEARED_DESCRIPTION, INITIAL_DESCRIPTION, WorkspaceBuffer};
pub use calc_block::CalcRecord;
pub use config::{ConflictPolicy, DEFAULT_HISTORY_LIMIT, DEFAULT_MAX_VERSIONS, WorkspaceConfig};
pub use error::{ConfigError, Location, RecordKind, SessionError};
pub use session::{IMPORTED_DESCRIPTION, SessionExport};
pub use stats::WorkspaceStats;

// Record types live in the leaf crate; re-exported so callers need one import.
pub use sanjutsu_types::{
    Author, Edit, EditId, EditOp, EditState, EditType, ParamValue, Version, VersionId,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_walkthrough() {
        let mut buf = WorkspaceBuffer::new();

        buf.set_content("Hello World", Author::User, "Manual edit");
        assert_eq!(buf.content(), "Hello World");
        assert_eq!(buf.edit_history(0).len(), 1);

        buf.insert_text(5, " Beautiful", Author::User);
        assert_eq!(buf.content(), "Hello Beautiful World");

        let suggestion = buf.suggest_edit(6, 15, "Amazing", "desc");
        assert_eq!(buf.content(), "Hello Beautiful World");
        assert_eq!(buf.pending_suggestions().len(), 1);

        assert!(buf.accept_suggestion(suggestion.id));
        assert_eq!(buf.content(), "Hello Amazing World");
        assert!(buf.pending_suggestions().is_empty());

        let exported = buf.export_session().to_value().unwrap();
        let mut restored = WorkspaceBuffer::new();
        assert!(restored.import_session(&exported));
        assert_eq!(restored.content(), "Hello Amazing World");
    }

    #[test]
    fn test_buffer_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<WorkspaceBuffer>();
    }
}
