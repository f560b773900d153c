//! Workspace buffer configuration.
//!
//! Read from RON, by default at `~/.config/sanjutsu/workspace.ron`:
//!
//! ```ron
//! (
//!     max_versions: 100,
//!     history_limit: 50,
//!     conflict_policy: Revalidate,
//! )
//! ```
//!
//! Every field is optional; missing fields take their defaults. A missing
//! file is not an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default cap on retained versions.
pub const DEFAULT_MAX_VERSIONS: usize = 100;

/// Default number of edits returned by `recent_edits`.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// What `accept_suggestion` does when content moved under a suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConflictPolicy {
    /// The text at the stored position must still equal the suggestion's
    /// `old_text`; otherwise the suggestion is rejected and nothing changes.
    #[default]
    Revalidate,
    /// Apply at the stored position regardless of what is there now.
    ApplyBlindly,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Versions retained; older ones are pruned.
    ///
    /// Config files with `0` fail [`WorkspaceConfig::validate`]. A config
    /// built in code is not validated; [`crate::WorkspaceBuffer::with_config`]
    /// raises `0` to `1` so the current version is always retained.
    pub max_versions: usize,
    /// Default page size for edit history.
    pub history_limit: usize,
    pub conflict_policy: ConflictPolicy,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            max_versions: DEFAULT_MAX_VERSIONS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

impl WorkspaceConfig {
    /// `$XDG_CONFIG_HOME/sanjutsu/workspace.ron` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sanjutsu").join("workspace.ron"))
    }

    /// Parse and validate RON text.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file that must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Load from `path` (or the default path), falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no workspace config, using defaults");
            return Ok(Self::default());
        }
        let config = Self::load(&path)?;
        tracing::debug!(path = %path.display(), ?config, "loaded workspace config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_versions == 0 {
            return Err(ConfigError::Invalid("max_versions must be at least 1".into()));
        }
        Ok(())
    }

    /// Serialize back to RON (for `--print-config` style output).
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
