//! Strongly-typed identifiers for analytics entities
//!
//! The upstream ledger keys salespeople, clients, and funds by opaque
//! strings, so entity identifiers are newtype wrappers around `String`.
//! Wrapping them prevents accidental mixing of dimensions (e.g., indexing
//! a client table with a fund key). The snapshot version is a UUID minted
//! by the data source each time a ledger snapshot is produced.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_key {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a key from the raw ledger string
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the underlying string key
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the key, returning the underlying string
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_key!(SalesPersonId);
define_key!(ClientId);
define_key!(FundId);

// Province is a grouping key in its own right (geographic rollups), even
// though it originates as a client attribute.
define_key!(Province);

/// Version identifier for one immutable ledger snapshot
///
/// Composed views are pure functions of `(version, grouping, mode, search)`,
/// so this is the key that makes memoization safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerVersion(Uuid);

impl LedgerVersion {
    /// Creates a new random version identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a new time-ordered version identifier (v7)
    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LedgerVersion {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LedgerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_keys_compare_by_value() {
        let a = ClientId::new("Client A");
        let b = ClientId::from("Client A");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Client A");
    }

    #[test]
    fn test_keys_serialize_transparently() {
        let id = SalesPersonId::new("Alice");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Alice\"");
    }

    #[test]
    fn test_ledger_versions_are_distinct() {
        assert_ne!(LedgerVersion::new(), LedgerVersion::new());
    }

    #[test]
    fn test_version_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let version = LedgerVersion::from_uuid(uuid);
        assert_eq!(*version.as_uuid(), uuid);
    }
}
