//! Process-local guestbook store.
//!
//! [`MemoryStore`] keeps entries in insertion order (newest at the head)
//! behind a single [`tokio::sync::Mutex`]. Id assignment, head insertion and
//! truncation to capacity all happen under one guard, so concurrent creates
//! never lose an id or overshoot the cap.
//!
//! Nothing is persisted: all entries are lost when the process exits. This
//! is acceptable for the demo deployment this backend exists for.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Mutex;

use super::{Clock, GuestbookStore, StoreBackend, StoreOutcome, SystemClock};
use crate::domain::entry::sort_newest_first;
use crate::domain::{EntryId, GuestbookEntry, NewEntry};
use crate::error::GuestbookError;

/// Default number of entries retained by a [`MemoryStore`].
pub const DEFAULT_CAPACITY: usize = 100;

/// Mutable state guarded by the store mutex.
#[derive(Debug)]
struct MemoryState {
    /// Newest insertion first.
    entries: VecDeque<GuestbookEntry>,
    next_id: EntryId,
}

/// In-memory guestbook capped at a fixed number of entries.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Creates an empty store using the system clock. Ids start at 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(capacity, Arc::new(SystemClock))
    }

    /// Creates an empty store stamping entries from `clock`.
    #[must_use]
    pub fn with_clock(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self::from_entries(Vec::new(), EntryId::new(1), capacity, clock)
    }

    /// Creates a store seeded with the three demo entries. Ids continue
    /// from 4.
    #[must_use]
    pub fn with_demo_entries(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self::from_entries(demo_entries(), EntryId::new(4), capacity, clock)
    }

    fn from_entries(
        entries: Vec<GuestbookEntry>,
        next_id: EntryId,
        capacity: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let capacity = capacity.max(1);
        let mut entries: VecDeque<GuestbookEntry> = entries.into();
        entries.truncate(capacity);
        Self {
            state: Mutex::new(MemoryState { entries, next_id }),
            capacity,
            clock,
        }
    }

    /// Maximum number of entries retained.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl GuestbookStore for MemoryStore {
    async fn list(&self) -> Result<StoreOutcome<Vec<GuestbookEntry>>, GuestbookError> {
        let mut entries: Vec<GuestbookEntry> = {
            let state = self.state.lock().await;
            state.entries.iter().cloned().collect()
        };
        sort_newest_first(&mut entries);
        Ok(StoreOutcome::Ready(entries))
    }

    async fn create(&self, entry: NewEntry) -> Result<StoreOutcome<GuestbookEntry>, GuestbookError> {
        let (name, message) = entry.into_parts();
        let mut state = self.state.lock().await;

        let id = state.next_id;
        state.next_id = id.next();

        let created = GuestbookEntry {
            id,
            name,
            message,
            created_at: self.clock.now(),
        };
        state.entries.push_front(created.clone());
        state.entries.truncate(self.capacity);
        drop(state);

        Ok(StoreOutcome::Ready(created))
    }

    async fn ping(&self) -> Result<(), GuestbookError> {
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}

/// The three entries a fresh demo deployment starts with, newest first.
fn demo_entries() -> Vec<GuestbookEntry> {
    [
        (1, "xXx_Gamer_xXx", "Cool site bro! Add me on MSN!", (15, 10, 30)),
        (2, "Sk8erBoi2008", "FIRST!!1! Nice games section 🎮", (14, 15, 45)),
        (3, "Anonymous", "Anyone know how to beat level 3??", (13, 20, 15)),
    ]
    .into_iter()
    .filter_map(|(id, name, message, (day, hour, min))| {
        march_2008(day, hour, min).map(|created_at| GuestbookEntry {
            id: EntryId::new(id),
            name: name.to_string(),
            message: message.to_string(),
            created_at,
        })
    })
    .collect()
}

fn march_2008(day: u32, hour: u32, min: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2008, 3, day, hour, min, 0).single()
}
