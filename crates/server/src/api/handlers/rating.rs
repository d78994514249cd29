use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use ratings::{ExternalRating, MediaType, RatingRequest};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for TMDB-keyed lookups
#[derive(Debug, Deserialize, IntoParams)]
pub struct MediaTypeQuery {
    /// `movie` (default) or `tv`
    #[serde(default)]
    pub media_type: MediaType,
}

/// Query parameters for IMDb-keyed lookups
#[derive(Debug, Deserialize, IntoParams)]
pub struct ImdbIdQuery {
    pub imdb_id: String,
}

/// Resolve the IMDb rating of a TMDB movie or series
#[utoipa::path(
    get,
    path = "/api/ratings/{tmdb_id}",
    tag = "ratings",
    params(
        ("tmdb_id" = i64, Path, description = "TMDB ID"),
        MediaTypeQuery
    ),
    responses(
        (status = 200, description = "Resolved rating", body = ExternalRating),
        (status = 400, description = "Invalid TMDB ID or media type"),
        (status = 404, description = "No IMDb ID could be found"),
        (status = 502, description = "Rating source failed")
    )
)]
pub async fn get_rating_by_tmdb(
    State(state): State<AppState>,
    tmdb_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<MediaTypeQuery>, QueryRejection>,
) -> AppResult<Json<ExternalRating>> {
    let Path(tmdb_id) = tmdb_id.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request = RatingRequest::for_tmdb(tmdb_id, query.media_type);
    let rating = state.services.resolver.resolve(&request).await?;
    Ok(Json(rating))
}

/// Fetch the IMDb rating of a title by its IMDb ID
#[utoipa::path(
    get,
    path = "/api/ratings",
    tag = "ratings",
    params(ImdbIdQuery),
    responses(
        (status = 200, description = "Resolved rating", body = ExternalRating),
        (status = 400, description = "Missing imdb_id"),
        (status = 404, description = "Blank IMDb ID"),
        (status = 502, description = "Rating source failed")
    )
)]
pub async fn get_rating_by_imdb(
    State(state): State<AppState>,
    query: Result<Query<ImdbIdQuery>, QueryRejection>,
) -> AppResult<Json<ExternalRating>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request = RatingRequest::for_imdb(query.imdb_id);
    let rating = state.services.resolver.resolve(&request).await?;
    Ok(Json(rating))
}
