//! TMDB ID mapping adapter

use std::sync::Arc;

use async_trait::async_trait;
use tmdb::{ExternalIds, TmdbClient};

use crate::{IdMapper, MappingError, MediaType};

pub struct TmdbIdMapper {
    client: Arc<TmdbClient>,
}

impl TmdbIdMapper {
    pub fn new(client: Arc<TmdbClient>) -> Self {
        Self { client }
    }

    fn imdb_id(
        result: tmdb::Result<ExternalIds>,
        tmdb_id: i64,
        media_type: MediaType,
    ) -> Result<String, MappingError> {
        let no_reference = MappingError::NoCrossReference {
            tmdb_id,
            media_type,
        };
        match result {
            Ok(ids) => ids.imdb_id().map(str::to_string).ok_or(no_reference),
            Err(tmdb::TmdbError::Api {
                status_code: 404, ..
            }) => Err(no_reference),
            Err(e) => Err(MappingError::Unavailable(e.to_string())),
        }
    }
}

#[async_trait]
impl IdMapper for TmdbIdMapper {
    async fn map_movie_id(&self, tmdb_id: i64) -> Result<String, MappingError> {
        let result = self.client.get_movie_external_ids(tmdb_id).await;
        Self::imdb_id(result, tmdb_id, MediaType::Movie)
    }

    async fn map_series_id(&self, tmdb_id: i64) -> Result<String, MappingError> {
        let result = self.client.get_tv_external_ids(tmdb_id).await;
        Self::imdb_id(result, tmdb_id, MediaType::Tv)
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    use super::*;

    async fn spawn_stub() -> String {
        let app = Router::new()
            .route(
                "/movie/{id}/external_ids",
                get(|Path(id): Path<i64>| async move {
                    match id {
                        550 => (StatusCode::OK, Json(json!({ "id": 550, "imdb_id": "tt0137523" }))),
                        1 => (StatusCode::OK, Json(json!({ "id": 1, "imdb_id": "" }))),
                        2 => (StatusCode::OK, Json(json!({ "id": 2, "imdb_id": null }))),
                        500 => (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(json!({ "status_message": "internal error" })),
                        ),
                        _ => (
                            StatusCode::NOT_FOUND,
                            Json(json!({ "status_code": 34, "status_message": "not found" })),
                        ),
                    }
                }),
            )
            .route(
                "/tv/{id}/external_ids",
                get(|Path(id): Path<i64>| async move {
                    Json(json!({ "id": id, "imdb_id": "tt0903747" }))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn mapper(base_url: &str) -> TmdbIdMapper {
        let client = TmdbClient::new(reqwest::Client::new(), "key")
            .with_base_url(base_url);
        TmdbIdMapper::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_maps_movie_and_series() {
        let mapper = mapper(&spawn_stub().await);
        assert_eq!(mapper.map_movie_id(550).await.unwrap(), "tt0137523");
        assert_eq!(mapper.map_series_id(1396).await.unwrap(), "tt0903747");
    }

    #[tokio::test]
    async fn test_missing_cross_reference() {
        let mapper = mapper(&spawn_stub().await);

        for tmdb_id in [1, 2, 404] {
            let err = mapper.map_movie_id(tmdb_id).await.unwrap_err();
            assert!(
                matches!(
                    err,
                    MappingError::NoCrossReference { tmdb_id: id, media_type: MediaType::Movie }
                        if id == tmdb_id
                ),
                "tmdb {tmdb_id}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let mapper = mapper(&spawn_stub().await);
        let err = mapper.map_movie_id(500).await.unwrap_err();
        assert!(matches!(err, MappingError::Unavailable(_)));
    }
}
