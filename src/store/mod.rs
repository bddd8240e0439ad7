//! Storage layer: the [`GuestbookStore`] trait and its two backends.
//!
//! - [`MemoryStore`] keeps a capped, process-local list. Everything is lost
//!   when the process exits.
//! - [`PostgresStore`] uses `sqlx::PgPool` against a `guestbook_entries`
//!   table and creates that table on demand.
//!
//! Both backends report recovery explicitly through [`StoreOutcome`] so
//! callers never inspect error text to find out whether schema
//! provisioning happened.

pub mod clock;
pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{GuestbookEntry, NewEntry};
use crate::error::GuestbookError;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Result of a store operation that completed without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome<T> {
    /// The operation ran and produced a value.
    Ready(T),
    /// The backing table was missing and has just been created. The
    /// operation itself did not run; the client should retry.
    SchemaProvisioned,
}

impl<T> StoreOutcome<T> {
    /// Returns the ready value, if any.
    #[must_use]
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::SchemaProvisioned => None,
        }
    }
}

/// Which backend a store instance runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process-local [`MemoryStore`].
    Memory,
    /// PostgreSQL-backed [`PostgresStore`].
    Postgres,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// Guestbook persistence contract shared by every backend.
///
/// Entries are append-only: there is no update or delete operation.
#[async_trait]
pub trait GuestbookStore: Send + Sync + fmt::Debug {
    /// Returns entries newest first, up to the backend's listing cap.
    ///
    /// # Errors
    ///
    /// Returns a [`GuestbookError`] if the backing store fails.
    async fn list(&self) -> Result<StoreOutcome<Vec<GuestbookEntry>>, GuestbookError>;

    /// Inserts a new entry and returns it with its assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns a [`GuestbookError`] if the backing store fails.
    async fn create(&self, entry: NewEntry) -> Result<StoreOutcome<GuestbookEntry>, GuestbookError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns a [`GuestbookError`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), GuestbookError>;

    /// Identifies the backend.
    fn backend(&self) -> StoreBackend;
}
