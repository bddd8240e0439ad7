//! Guestbook service: validates submissions and drives the store.

use std::sync::Arc;

use crate::api::dto::CreateEntryRequest;
use crate::domain::{GuestbookEntry, NewEntry};
use crate::error::GuestbookError;
use crate::store::{GuestbookStore, StoreBackend, StoreOutcome};

/// Orchestration layer for guestbook operations.
///
/// Stateless coordinator over a shared [`GuestbookStore`]. Owns no data of
/// its own, so cloning is cheap and every clone sees the same store.
#[derive(Debug, Clone)]
pub struct GuestbookService {
    store: Arc<dyn GuestbookStore>,
}

impl GuestbookService {
    /// Creates a new `GuestbookService` over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn GuestbookStore>) -> Self {
        Self { store }
    }

    /// Returns the backend the service runs on.
    #[must_use]
    pub fn backend(&self) -> StoreBackend {
        self.store.backend()
    }

    /// Lists entries newest first.
    ///
    /// A listing that triggered schema provisioning returns an empty list.
    ///
    /// # Errors
    ///
    /// Returns a [`GuestbookError`] if the store fails.
    pub async fn list_entries(&self) -> Result<Vec<GuestbookEntry>, GuestbookError> {
        match self.store.list().await? {
            StoreOutcome::Ready(entries) => Ok(entries),
            StoreOutcome::SchemaProvisioned => {
                tracing::info!(backend = %self.backend(), "guestbook schema provisioned during list");
                Ok(Vec::new())
            }
        }
    }

    /// Validates a submission and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Validation`] if either field is missing, or
    /// another [`GuestbookError`] if the store fails.
    pub async fn create_entry(
        &self,
        req: &CreateEntryRequest,
    ) -> Result<StoreOutcome<GuestbookEntry>, GuestbookError> {
        let entry = NewEntry::from_fields(req.name.as_ref(), req.message.as_ref())?;
        let outcome = self.store.create(entry).await?;
        match &outcome {
            StoreOutcome::Ready(created) => {
                tracing::info!(id = %created.id, backend = %self.backend(), "entry created");
            }
            StoreOutcome::SchemaProvisioned => {
                tracing::info!(backend = %self.backend(), "guestbook schema provisioned during create");
            }
        }
        Ok(outcome)
    }

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns a [`GuestbookError`] if the store cannot be reached.
    pub async fn ping(&self) -> Result<(), GuestbookError> {
        self.store.ping().await
    }
}
