//! Session files on disk.
//!
//! A session file is the pretty-printed JSON export of one workspace. Writes
//! go to a temp file in the same directory and are renamed into place, so a
//! crash mid-write never leaves a truncated session behind.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use sanjutsu_workspace::{EditId, VersionId, WorkspaceBuffer, WorkspaceConfig};

/// Load a session into a buffer built with `config`.
pub fn load(path: &Path, config: &WorkspaceConfig) -> Result<WorkspaceBuffer> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading session {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing session {}", path.display()))?;
    let mut buffer = WorkspaceBuffer::with_config(config.clone());
    buffer
        .try_import_session(&value)
        .with_context(|| format!("importing session {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded session");
    Ok(buffer)
}

/// Load a session, or start an empty workspace if the file does not exist.
pub fn load_or_new(path: &Path, config: &WorkspaceConfig) -> Result<WorkspaceBuffer> {
    if path.exists() {
        load(path, config)
    } else {
        tracing::info!(path = %path.display(), "session not found, starting a new workspace");
        Ok(WorkspaceBuffer::with_config(config.clone()))
    }
}

/// Write a session atomically.
pub fn save(buffer: &WorkspaceBuffer, path: &Path) -> Result<()> {
    let json = buffer.export_session().to_json_pretty()?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("writing session {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "saved session");
    Ok(())
}

/// Resolve an edit by full id or unambiguous hex prefix.
pub fn resolve_edit(buffer: &WorkspaceBuffer, query: &str) -> Result<EditId> {
    let matches: Vec<EditId> = buffer
        .edit_history(0)
        .iter()
        .map(|e| e.id)
        .filter(|id| id.matches_hex_prefix(query))
        .collect();
    unique(matches, "edit", query)
}

/// Resolve a retained version by full id or unambiguous hex prefix.
pub fn resolve_version(buffer: &WorkspaceBuffer, query: &str) -> Result<VersionId> {
    let matches: Vec<VersionId> = buffer
        .version_history()
        .iter()
        .map(|v| v.id)
        .filter(|id| id.matches_hex_prefix(query))
        .collect();
    unique(matches, "version", query)
}

fn unique<T: Copy>(matches: Vec<T>, what: &str, query: &str) -> Result<T> {
    match matches.as_slice() {
        [one] => Ok(*one),
        [] => anyhow::bail!("no {what} matches '{query}'"),
        _ => anyhow::bail!("'{query}' matches {} {what}s, use a longer prefix", matches.len()),
    }
}
