use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        // Rating source proxy
        .route("/api/imdb", post(handlers::proxy_imdb))
        // Rating resolution
        .route("/api/ratings", get(handlers::get_rating_by_imdb))
        .route("/api/ratings/{tmdb_id}", get(handlers::get_rating_by_tmdb))
        // API document
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
