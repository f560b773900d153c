//! Typed identifiers for edits and versions.
//!
//! Both ID types wrap UUIDv7 (time-ordered, process-unique). On the wire they
//! are the standard hyphenated UUID string, which is also what `Display`
//! prints. The `short()` form (first 8 hex chars) is for human-facing output and
//! is never used as a lookup key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An edit identifier (UUIDv7).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditId(uuid::Uuid);

/// A version identifier (UUIDv7).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(uuid::Uuid);

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_typed_id {
    ($T:ident, $name:literal) => {
        impl $T {
            /// Create a new time-ordered ID (UUIDv7).
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// First 8 hex characters, for human display only (not lookup).
            pub fn short(&self) -> String {
                self.0.as_simple().to_string()[..8].to_string()
            }

            /// Full 32-character hex string (no hyphens).
            pub fn to_hex(&self) -> String {
                self.0.as_simple().to_string()
            }

            /// Parse from a hex string (32 chars, no hyphens) or standard UUID format.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                uuid::Uuid::parse_str(s).map(Self)
            }

            /// Check if a query string matches this ID by hex prefix.
            /// Hyphens are ignored and case does not matter.
            pub fn matches_hex_prefix(&self, prefix: &str) -> bool {
                let query = prefix.replace('-', "").to_ascii_lowercase();
                self.to_hex().starts_with(&query)
            }

            /// A nil / zero ID. Sentinel values only.
            pub fn nil() -> Self {
                Self(uuid::Uuid::nil())
            }

            /// Check if this is the nil ID.
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $T {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $T {
            fn from(u: uuid::Uuid) -> Self {
                Self(u)
            }
        }

        impl From<$T> for uuid::Uuid {
            fn from(id: $T) -> uuid::Uuid {
                id.0
            }
        }

        impl FromStr for $T {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // Full UUID with hyphens, same as the wire form
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.short())
            }
        }
    };
}

impl_typed_id!(EditId, "EditId");
impl_typed_id!(VersionId, "VersionId");

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unique() {
        let a = EditId::new();
        let b = EditId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_is_8_chars() {
        assert_eq!(VersionId::new().short().len(), 8);
    }

    #[test]
    fn test_parse_both_formats() {
        let id = EditId::new();
        assert_eq!(EditId::parse(&id.to_hex()).unwrap(), id);
        assert_eq!(EditId::parse(&id.to_string()).unwrap(), id);
        assert_eq!(id.to_string().parse::<EditId>().unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(VersionId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_ordering_is_time_ordered() {
        let ids: Vec<VersionId> = (0..10).map(|_| VersionId::new()).collect();
        for i in 1..ids.len() {
            assert!(ids[i] >= ids[i - 1]);
        }
    }

    #[test]
    fn test_serde_is_hyphenated_string() {
        let id = EditId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let parsed: EditId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_hex_prefix_ignores_hyphens() {
        let id = VersionId::new();
        let displayed = id.to_string();
        assert!(id.matches_hex_prefix(&displayed[..13]));
        assert!(!id.matches_hex_prefix("zzzz"));
    }

    #[test]
    fn test_hex_prefix_ignores_case() {
        let id = EditId::new();
        let upper = id.to_string()[..13].to_ascii_uppercase();
        assert!(id.matches_hex_prefix(&upper));
    }

    #[test]
    fn test_debug_shows_type_and_short() {
        let id = VersionId::new();
        let debug = format!("{:?}", id);
        assert!(debug.starts_with("VersionId("));
        assert!(debug.ends_with(')'));
    }

    #[test]
    fn test_nil() {
        assert!(EditId::nil().is_nil());
        assert!(!EditId::new().is_nil());
    }
}
