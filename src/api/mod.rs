//! REST API layer: route handlers, DTOs, and router composition.
//!
//! The guestbook lives at `/api/guestbook`; system endpoints sit at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for the service.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "guestbook-api", description = "Retro guestbook JSON API"),
    paths(
        handlers::guestbook::list_entries,
        handlers::guestbook::create_entry,
        handlers::guestbook::preflight,
        handlers::system::health_handler,
    ),
    components(schemas(
        crate::domain::GuestbookEntry,
        dto::CreateEntryRequest,
        dto::RetryResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "Guestbook", description = "Sign and read the guestbook"),
        (name = "System", description = "Health and metadata"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the servable application: routes, request tracing, and state.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
