//! Service layer: business logic orchestration.
//!
//! [`GuestbookService`] validates submissions and delegates storage to
//! whichever [`super::store::GuestbookStore`] the process was started with.

pub mod guestbook_service;

pub use guestbook_service::GuestbookService;
