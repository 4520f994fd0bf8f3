/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Feed routes (posts, uploads, SSE)
 * 2. API routes (auth, user)
 * 3. GraphQL (HTTP, websocket, SDL)
 * 4. Static images
 * 5. Fallback handler (404)
 *
 * # Layers
 *
 * Every request passes through the authentication middleware, which
 * attaches an `IdentityContext` without ever rejecting the request.
 */

use async_graphql_axum::GraphQLSubscription;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::graphql::{graphiql, graphql_handler, schema_sdl, GRAPHQL_PATH, GRAPHQL_WS_PATH};
use crate::backend::middleware::auth::authentication;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::feed_routes::configure_feed_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// Images are served from the configured image directory under `/images`.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_feed_routes(Router::new());
    let router = configure_api_routes(router);

    let router = router
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .route("/graphql/schema", get(schema_sdl))
        .route_service(GRAPHQL_WS_PATH, GraphQLSubscription::new(app_state.schema.clone()));

    let router = router.nest_service("/images", ServeDir::new(&app_state.config.images_dir));

    let router = router.fallback(not_found);

    router
        .layer(middleware::from_fn_with_state(app_state.tokens.clone(), authentication))
        .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Not found", "status": 404 })),
    )
}
