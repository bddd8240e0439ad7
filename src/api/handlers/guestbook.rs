//! Guestbook handlers: list, create, CORS preflight, method fallback.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::dto::{CreateEntryRequest, RetryResponse};
use crate::app_state::AppState;
use crate::domain::GuestbookEntry;
use crate::error::{ErrorResponse, GuestbookError};
use crate::store::StoreOutcome;

/// Path the guestbook is served on.
pub const GUESTBOOK_PATH: &str = "/api/guestbook";

/// `GET /api/guestbook` — List entries, newest first.
///
/// # Errors
///
/// Returns [`GuestbookError`] on store failures.
#[utoipa::path(
    get,
    path = "/api/guestbook",
    tag = "Guestbook",
    summary = "List guestbook entries",
    description = "Returns entries newest first. The postgres backend returns at most 50; the memory backend returns everything it holds (at most 100). If the table had to be created, the list is empty.",
    responses(
        (status = 200, description = "Entries, newest first", body = Vec<GuestbookEntry>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_entries(State(state): State<AppState>) -> Result<impl IntoResponse, GuestbookError> {
    let entries = state.guestbook.list_entries().await?;
    Ok(Json(entries))
}

/// `POST /api/guestbook` — Sign the guestbook.
///
/// # Errors
///
/// Returns [`GuestbookError::Validation`] if a field is missing,
/// [`GuestbookError::MalformedBody`] for non-JSON bodies, or a store error.
#[utoipa::path(
    post,
    path = "/api/guestbook",
    tag = "Guestbook",
    summary = "Create a guestbook entry",
    description = "Validates and sanitizes `name` and `message`, then stores the entry. If the postgres table had to be created first, the entry is not stored and a retry message is returned instead.",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created, or table created and the client should retry", body = GuestbookEntry),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn create_entry(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, GuestbookError> {
    let req = CreateEntryRequest::from_body(&body)?;
    let response = match state.guestbook.create_entry(&req).await? {
        StoreOutcome::Ready(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        StoreOutcome::SchemaProvisioned => {
            (StatusCode::CREATED, Json(RetryResponse::default())).into_response()
        }
    };
    Ok(response)
}

/// `OPTIONS /api/guestbook` — CORS preflight.
#[utoipa::path(
    options,
    path = "/api/guestbook",
    tag = "Guestbook",
    summary = "CORS preflight",
    responses(
        (status = 200, description = "Empty body with CORS headers"),
    )
)]
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on the guestbook path.
pub async fn method_not_allowed(method: Method) -> GuestbookError {
    GuestbookError::MethodNotAllowed(method)
}

/// Guestbook routes, with the open CORS headers on every response.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            GUESTBOOK_PATH,
            get(list_entries)
                .post(create_entry)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
}

fn cors_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}
