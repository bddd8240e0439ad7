//! Stored guestbook entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EntryId;

/// A single guestbook submission as returned by the store.
///
/// Entries are immutable once created; there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GuestbookEntry {
    /// Store-assigned identifier.
    #[schema(value_type = i64)]
    pub id: EntryId,
    /// Display name, at most 50 characters, without `<` or `>`.
    pub name: String,
    /// Message body, at most 500 characters, without `<` or `>`.
    pub message: String,
    /// Server-assigned insertion timestamp.
    pub created_at: DateTime<Utc>,
}

/// Sorts entries newest first, breaking timestamp ties by descending id.
pub fn sort_newest_first(entries: &mut [GuestbookEntry]) {
    entries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
