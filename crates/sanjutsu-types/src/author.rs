//! Edit authorship.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Origin of an edit.
///
/// User edits are applied immediately. Model edits may be applied directly
/// or enter the buffer as pending suggestions awaiting review.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Author {
    /// Person at the keyboard.
    #[default]
    #[strum(serialize = "user", serialize = "human")]
    User,
    /// Reviewing assistant (local LLM).
    #[strum(serialize = "model", serialize = "assistant")]
    Model,
}

impl Author {
    /// Parse from string (case-insensitive).
    ///
    /// Supports aliases: "human" -> User, "assistant" -> Model.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Model => "model",
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_aliases() {
        assert_eq!(Author::from_str("user"), Some(Author::User));
        assert_eq!(Author::from_str("Human"), Some(Author::User));
        assert_eq!(Author::from_str("MODEL"), Some(Author::Model));
        assert_eq!(Author::from_str("assistant"), Some(Author::Model));
        assert_eq!(Author::from_str("system"), None);
    }

    #[test]
    fn test_author_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Author::Model).unwrap(), "\"model\"");
        let parsed: Author = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Author::User);
    }
}
