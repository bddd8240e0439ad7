//! # guestbook-api
//!
//! JSON guestbook API for a retro personal website.
//!
//! One HTTP contract, two interchangeable stores chosen at start-up: a
//! capped in-memory list (lost on restart) and a PostgreSQL table that is
//! created on first use.
//!
//! ## Architecture
//!
//! ```text
//! Clients (browser form, fetch)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── GuestbookService (service/)
//!     │
//!     ├── GuestbookStore trait (store/)
//!     │     ├── MemoryStore
//!     │     └── PostgresStore
//!     │
//!     └── Entry types + validation (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;
