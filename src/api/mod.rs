//! REST API layer: route handlers, DTOs, router composition and the
//! OpenAPI document.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "roster-gateway", description = "File-backed user roster with adult filtering"),
    paths(
        handlers::records::load_records,
        handlers::records::save_records,
        handlers::records::load_adults,
        handlers::records::filter_adults,
        handlers::system::health_handler,
        handlers::system::filter_config_handler,
    ),
    components(schemas(
        crate::domain::UserRecord,
        crate::domain::RecordCollection,
        crate::domain::RecordField,
        crate::error::ErrorResponse,
        dto::RecordsRequest,
        dto::LoadRecordsResponse,
        dto::SaveRecordsResponse,
        dto::AdultsResponse,
    )),
    tags(
        (name = "Records", description = "Load, save and filter the user roster"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
///
/// With the `swagger-ui` feature, the interactive docs are served at
/// `/swagger-ui` and the raw document at `/api-docs/openapi.json`.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
