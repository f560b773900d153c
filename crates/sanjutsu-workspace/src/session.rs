//! Session export and import.
//!
//! A session is the whole workspace as one JSON object:
//!
//! ```text
//! {
//!   "content":  "...",
//!   "edits":    [ {id, timestamp, edit_type, position, old_text, new_text,
//!                  author, accepted, rejected[, description]}, ... ],
//!   "versions": [ {id, timestamp, content, edit_ids, description}, ... ],
//!   "stats":    { ... }            // written on export, ignored on import
//! }
//! ```
//!
//! Import is a trust boundary. Records are checked key by key so a failure
//! says *which* record and *what* was wrong (missing key, wrong type,
//! impossible record), and nothing is written to the buffer until the whole
//! document has parsed.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sanjutsu_types::{Edit, EditRecord, Version};

use crate::error::{Location, SessionError};
use crate::stats::WorkspaceStats;
use crate::WorkspaceBuffer;

/// Label of the version synthesized when an imported session has none.
pub const IMPORTED_DESCRIPTION: &str = "Imported workspace";

/// Keys every edit record must carry. `rejected` and `description` are optional.
const EDIT_KEYS: &[&str] = &[
    "id",
    "timestamp",
    "edit_type",
    "position",
    "old_text",
    "new_text",
    "author",
    "accepted",
];

const VERSION_KEYS: &[&str] = &["id", "timestamp", "content", "edit_ids", "description"];

/// Self-describing snapshot of a buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionExport {
    pub content: String,
    pub edits: Vec<Edit>,
    pub versions: Vec<Version>,
    pub stats: WorkspaceStats,
}

impl SessionExport {
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Fully parsed session, not yet applied to a buffer.
struct ParsedSession {
    content: String,
    edits: Vec<Edit>,
    versions: Vec<Version>,
}

impl WorkspaceBuffer {
    /// Snapshot content, edits, versions and stats.
    pub fn export_session(&self) -> SessionExport {
        SessionExport {
            content: self.content.clone(),
            edits: self.edits.clone(),
            versions: self.versions.clone(),
            stats: self.stats(),
        }
    }

    /// Replace this buffer's state with an exported session.
    ///
    /// Returns `false` on malformed input and leaves the buffer untouched.
    /// The reason is logged; use [`Self::try_import_session`] to get it.
    pub fn import_session(&mut self, data: &Value) -> bool {
        match self.try_import_session(data) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "session import rejected");
                false
            }
        }
    }

    /// [`Self::import_session`] for raw JSON text.
    pub fn import_session_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => self.import_session(&value),
            Err(e) => {
                tracing::warn!(error = %SessionError::from(e), "session import rejected");
                false
            }
        }
    }

    /// Import with the failure reason.
    pub fn try_import_session(&mut self, data: &Value) -> Result<(), SessionError> {
        let ParsedSession { content, edits, mut versions } = parse_session(data)?;

        let current_version_id = match versions.last() {
            Some(v) => v.id,
            None => {
                let v = Version::new(content.clone(), Vec::new(), IMPORTED_DESCRIPTION);
                let id = v.id;
                versions.push(v);
                id
            }
        };

        tracing::info!(
            edits = edits.len(),
            versions = versions.len(),
            content_len = content.chars().count(),
            "imported workspace session"
        );

        self.content = content;
        self.edits = edits;
        self.versions = versions;
        self.current_version_id = current_version_id;
        self.prune_versions();
        Ok(())
    }
}

fn parse_session(data: &Value) -> Result<ParsedSession, SessionError> {
    let at = Location::session();
    let obj = data.as_object().ok_or(SessionError::NotAnObject(at))?;

    let content = match require(obj, at, "content")? {
        Value::String(s) => s.clone(),
        other => return Err(mismatch(at, "content", "a string", other)),
    };
    let edit_values = require_array(obj, at, "edits")?;
    let version_values = require_array(obj, at, "versions")?;

    let mut edits = Vec::with_capacity(edit_values.len());
    let mut seen = HashSet::new();
    for (i, value) in edit_values.iter().enumerate() {
        let at = Location::edit(i);
        let record: EditRecord = parse_record(value, at, EDIT_KEYS)?;
        let edit = Edit::try_from(record).map_err(|e| SessionError::InvalidRecord {
            at,
            detail: e.to_string(),
        })?;
        if !seen.insert(edit.id) {
            return Err(SessionError::InvalidRecord {
                at,
                detail: format!("duplicate edit id {}", edit.id),
            });
        }
        edits.push(edit);
    }

    let mut versions = Vec::with_capacity(version_values.len());
    let mut seen = HashSet::new();
    for (i, value) in version_values.iter().enumerate() {
        let at = Location::version(i);
        let version: Version = parse_record(value, at, VERSION_KEYS)?;
        if !seen.insert(version.id) {
            return Err(SessionError::InvalidRecord {
                at,
                detail: format!("duplicate version id {}", version.id),
            });
        }
        versions.push(version);
    }

    Ok(ParsedSession { content, edits, versions })
}

fn require<'a>(
    obj: &'a Map<String, Value>,
    at: Location,
    key: &'static str,
) -> Result<&'a Value, SessionError> {
    obj.get(key).ok_or(SessionError::MissingKey { at, key })
}

fn require_array<'a>(
    obj: &'a Map<String, Value>,
    at: Location,
    key: &'static str,
) -> Result<&'a Vec<Value>, SessionError> {
    match require(obj, at, key)? {
        Value::Array(items) => Ok(items),
        other => Err(mismatch(at, key, "an array", other)),
    }
}

/// Check required keys, then let serde check the types.
fn parse_record<T: DeserializeOwned>(
    value: &Value,
    at: Location,
    keys: &[&'static str],
) -> Result<T, SessionError> {
    let obj = value.as_object().ok_or(SessionError::NotAnObject(at))?;
    if let Some(&key) = keys.iter().find(|k| !obj.contains_key(**k)) {
        return Err(SessionError::MissingKey { at, key });
    }
    T::deserialize(value).map_err(|e| SessionError::TypeMismatch {
        at,
        detail: e.to_string(),
    })
}

fn mismatch(at: Location, key: &str, expected: &str, got: &Value) -> SessionError {
    let got = match got {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    SessionError::TypeMismatch {
        at,
        detail: format!("'{key}' should be {expected}, got {got}"),
    }
}

// ============================================================================
// Tests
// ============================================================================
