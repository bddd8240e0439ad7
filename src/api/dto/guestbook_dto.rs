//! Guestbook request and response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::GuestbookError;

/// Message returned by `POST` when the table had to be created first.
pub const TABLE_CREATED: &str = "Table created, please try again";

/// Request body for `POST /api/guestbook`.
///
/// Fields are kept as raw JSON so that validation can apply the coercion
/// rules in [`crate::domain::NewEntry::from_fields`].
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateEntryRequest {
    /// Display name (max 50 characters after sanitization).
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Sk8erBoi2008")]
    pub name: Option<Value>,
    /// Message body (max 500 characters after sanitization).
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Cool site bro!")]
    pub message: Option<Value>,
}

impl CreateEntryRequest {
    /// Parses a raw request body.
    ///
    /// An empty body, or a JSON value that is not an object, yields a
    /// request with no fields (which then fails validation).
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::MalformedBody`] if the body is not JSON.
    pub fn from_body(body: &[u8]) -> Result<Self, GuestbookError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value =
            serde_json::from_slice(body).map_err(|e| GuestbookError::MalformedBody(e.to_string()))?;
        let Value::Object(mut fields) = value else {
            return Ok(Self::default());
        };
        Ok(Self {
            name: fields.remove("name"),
            message: fields.remove("message"),
        })
    }
}

/// Body of the 201 response sent when the table was provisioned instead of
/// storing the entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RetryResponse {
    /// Always [`TABLE_CREATED`].
    pub message: String,
}

impl Default for RetryResponse {
    fn default() -> Self {
        Self {
            message: TABLE_CREATED.to_string(),
        }
    }
}
