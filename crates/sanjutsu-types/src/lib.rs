//! Shared record types for Sanjutsu.
//!
//! This crate is the record foundation: typed IDs, authors, edit records,
//! version snapshots and calculation parameter values. It has **no internal
//! sanjutsu dependencies**. It is a pure leaf crate that the workspace buffer,
//! the formula table and the CLI build on.
//!
//! # Relationship Overview
//!
//! ```text
//! WorkspaceBuffer (sanjutsu-workspace)
//!     └── content (String, single source of truth)
//!     └── edits: Vec<Edit>           ← full audit log, never pruned
//!     │       └── EditId + EditType (author × op) + EditState
//!     └── versions: Vec<Version>     ← full-content checkpoints, pruned
//!             └── VersionId + edit_ids → Edit
//! ```
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------|
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`Edit`]          | One mutation or suggested mutation           |
//! | [`EditType`]      | Author × operation tag (`user_insert`, ...)  |
//! | [`EditState`]     | Applied / Pending / Rejected review state    |
//! | [`Version`]       | Full-content checkpoint                      |
//! | [`EditId`]        | Which edit                                   |
//! | [`VersionId`]     | Which version                                |
//! | [`Author`]        | Who (user or model)                          |
//! | [`ParamValue`]    | Calculation parameter (number or text)       |
//! |-------------------|----------------------------------------------|

pub mod author;
pub mod edit;
pub mod ids;
pub mod param;
pub mod timestamp;
pub mod version;

// Re-export primary types at crate root for convenience.
pub use author::Author;
pub use edit::{Edit, EditOp, EditRecord, EditRecordError, EditState, EditType};
pub use ids::{EditId, VersionId};
pub use param::{ParamValue, format_number};
pub use version::Version;

/// Wall-clock instant attached to edits and versions (always UTC).
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current time. Used by constructors throughout the crate.
pub(crate) fn now() -> Timestamp {
    chrono::Utc::now()
}
