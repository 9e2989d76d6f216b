//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Thin glue over the settlement service: each endpoint maps 1:1 onto
//! one orchestrator operation and surfaces its error kind unchanged.
//! All resource endpoints are mounted under `/api/v1`.

pub mod dto;
pub mod handlers;

use axum::Router;
#[cfg(feature = "swagger-ui")]
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document assembled from the annotated handlers.
#[cfg(feature = "swagger-ui")]
#[derive(OpenApi)]
#[openapi(
    info(
        title = "bolao-gateway",
        description = "REST API for a pari-mutuel wagering pool: place wagers, manage the event lifecycle, and settle the prize pool."
    ),
    paths(
        handlers::wager::place_wager,
        handlers::wager::estimate_return,
        handlers::wager::list_user_wagers,
        handlers::event::active_event,
        handlers::event::close_wagering,
        handlers::event::open_wagering,
        handlers::event::resolve_event,
        handlers::event::reset_event,
        handlers::event::list_event_wagers,
        handlers::user::list_users,
        handlers::user::promote_user,
        handlers::user::demote_user,
        handlers::system::health_handler,
        handlers::system::fee_info_handler,
    ),
    components(schemas(crate::error::ErrorResponse))
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
///
/// With the `swagger-ui` feature enabled (the default), the OpenAPI
/// document is served at `/api-docs/openapi.json` and browsable at
/// `/swagger-ui`.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

#[cfg(all(test, feature = "swagger-ui"))]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn openapi_document_covers_the_route_map() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/wagers",
            "/api/v1/wagers/estimate",
            "/api/v1/users/{id}/wagers",
            "/api/v1/events/active",
            "/api/v1/events/active/resolve",
            "/api/v1/events/reset",
            "/api/v1/users",
            "/health",
            "/config/fee",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path in OpenAPI document: {path}"
            );
        }
    }
}
