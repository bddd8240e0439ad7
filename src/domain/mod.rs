//! Domain layer: entry identity, stored entries, and submission validation.

pub mod entry;
pub mod entry_id;
pub mod new_entry;

pub use entry::GuestbookEntry;
pub use entry_id::EntryId;
pub use new_entry::NewEntry;
