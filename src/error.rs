//! Guestbook error types with HTTP status code mapping.
//!
//! [`GuestbookError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and a flat JSON error body.

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Message returned when either guestbook field is missing.
pub const FIELDS_REQUIRED: &str = "Name and message are required";

/// Methods advertised in the `Allow` header of a 405 response.
pub const ALLOWED_METHODS: &str = "GET, POST";

/// JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// { "error": "Name and message are required" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant            | HTTP Status                | Client message              |
/// |--------------------|----------------------------|-----------------------------|
/// | `Validation`       | 400 Bad Request            | the validation message      |
/// | `MalformedBody`    | 400 Bad Request            | `Malformed JSON body`       |
/// | `MethodNotAllowed` | 405 Method Not Allowed     | `Method <X> not allowed`    |
/// | `SchemaSetup`      | 500 Internal Server Error  | `Failed to setup database`  |
/// | `Storage`          | 500 Internal Server Error  | `Internal server error`     |
/// | `Internal`         | 500 Internal Server Error  | `Internal server error`     |
#[derive(Debug, thiserror::Error)]
pub enum GuestbookError {
    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// The request body could not be parsed as JSON.
    #[error("malformed JSON body: {0}")]
    MalformedBody(String),

    /// The HTTP method is not served by the guestbook endpoint.
    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    /// The backing table was missing and could not be created.
    #[error("schema setup failed: {0}")]
    SchemaSetup(String),

    /// Backing store failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GuestbookError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::SchemaSetup(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the message exposed to the client.
    ///
    /// Server-side variants collapse to a generic message; the detail is
    /// only ever logged.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::MalformedBody(_) => "Malformed JSON body".to_string(),
            Self::MethodNotAllowed(method) => format!("Method {method} not allowed"),
            Self::SchemaSetup(_) => "Failed to setup database".to_string(),
            Self::Storage(_) | Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<sqlx::Error> for GuestbookError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl IntoResponse for GuestbookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.client_message(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        if matches!(self, Self::MethodNotAllowed(_)) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}
