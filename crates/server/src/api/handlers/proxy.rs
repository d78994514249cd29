use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Shared caches may keep a title for a day and serve it stale for a week while revalidating.
pub const PROXY_CACHE_CONTROL: &str = "public, s-maxage=86400, stale-while-revalidate=604800";

/// Request body for the IMDb proxy
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImdbProxyRequest {
    /// IMDb title ID, e.g. `tt0137523`
    #[serde(default)]
    pub imdb_id: Option<String>,
}

/// `"Response": "False"` envelopes are not memoized so titles added upstream show up.
fn is_found(payload: &Value) -> bool {
    payload.get("Response").and_then(Value::as_str) != Some("False")
}

/// Forward a title lookup to the rating source without exposing its API key
#[utoipa::path(
    post,
    path = "/api/imdb",
    tag = "imdb",
    request_body = ImdbProxyRequest,
    responses(
        (status = 200, description = "Upstream title payload, verbatim"),
        (status = 400, description = "IMDb ID is missing"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn proxy_imdb(
    State(state): State<AppState>,
    payload: Result<Json<ImdbProxyRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let imdb_id = payload
        .ok()
        .and_then(|Json(body)| body.imdb_id)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("IMDb ID is required".to_string()))?;

    let cache_key = format!("imdb:title:{}", imdb_id);
    let imdb = state.clients.imdb.clone();

    let body = state
        .services
        .response_cache
        .get_or_fetch(
            &cache_key,
            || async move { imdb.get_title_raw(&imdb_id).await },
            is_found,
        )
        .await?;

    Ok(([(header::CACHE_CONTROL, PROXY_CACHE_CONTROL)], Json(body)))
}
