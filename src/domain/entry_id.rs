//! Type-safe guestbook entry identifier.
//!
//! [`EntryId`] is a newtype wrapper around the store-assigned integer id so
//! that entry identifiers cannot be confused with other integers (counts,
//! limits, capacities).

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a guestbook entry.
///
/// Assigned by the store at insertion time (`SERIAL` in PostgreSQL, an
/// in-process counter in the memory store) and immutable thereafter. Ids
/// grow monotonically within a single store instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Wraps a raw store id.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_is_strictly_greater() {
        let id = EntryId::new(3);
        assert!(id.next() > id);
        assert_eq!(id.next().get(), 4);
    }

    #[test]
    fn next_saturates() {
        let id = EntryId::new(i64::MAX);
        assert_eq!(id.next(), id);
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&EntryId::new(42)).ok();
        assert_eq!(json.as_deref(), Some("42"));
    }

    #[test]
    fn display_matches_raw() {
        assert_eq!(format!("{}", EntryId::new(7)), "7");
    }
}
