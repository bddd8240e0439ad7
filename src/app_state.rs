//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::GuestbookService;
use crate::store::GuestbookStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Guestbook service for all business logic.
    pub guestbook: GuestbookService,
}

impl AppState {
    /// Builds state around a store instance.
    #[must_use]
    pub fn new(store: Arc<dyn GuestbookStore>) -> Self {
        Self {
            guestbook: GuestbookService::new(store),
        }
    }
}
