//! Data Transfer Objects for REST request/response serialization.

pub mod guestbook_dto;

pub use guestbook_dto::*;
