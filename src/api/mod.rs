//! REST API layer: route handlers, DTOs, and router composition.
//!
//! The service exposes exactly three routes under `/qr`. The OpenAPI
//! description in [`ApiDoc`] documents them but is not served.

pub mod dto;
pub mod handlers;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of the record endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "qr-ledger", description = "Per-user QR-code metadata records"),
    paths(
        handlers::qr::create_record,
        handlers::qr::list_records,
        handlers::qr::delete_record,
    ),
    components(schemas(
        crate::domain::QrRecord,
        crate::domain::RecordId,
        crate::domain::UserId,
        dto::CreateQrRequest,
        dto::MessageResponse,
        crate::error::ErrorResponse,
    )),
    tags((name = "QR Records", description = "Create, list and delete QR records"))
)]
pub struct ApiDoc;

/// Builds the API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}

/// Builds the complete application: routes, HTTP tracing, CORS and state.
pub fn app(state: AppState) -> Router {
    build_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
