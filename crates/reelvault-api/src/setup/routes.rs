//! Route configuration and setup.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Setup all application routes
pub fn build_router(state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(&state)?;

    let api_routes = Router::new()
        .route(
            "/videos/{video_id}/upload",
            post(handlers::video_upload::upload_video),
        )
        .route(
            "/videos/{video_id}/thumbnail",
            post(handlers::thumbnail_upload::upload_thumbnail),
        )
        .with_state(state.clone());

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(api_routes)
        .nest_service("/assets", ServeDir::new(&state.config.assets_root))
        .route("/api/openapi.json", get(openapi_json))
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        // One request-wide bound; the thumbnail path applies its own smaller
        // limit inside the service. Axum's 2 MB default would shadow it.
        .layer(RequestBodyLimitLayer::new(state.config.max_video_upload_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(state: &Arc<AppState>) -> Result<CorsLayer, anyhow::Error> {
    let origins = &state.config.cors_origins;

    if origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any));
    }

    let parsed = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin {}: {}", o, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(parsed))
}

async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
