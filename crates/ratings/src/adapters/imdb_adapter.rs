//! IMDb rating source adapter

use std::sync::Arc;

use async_trait::async_trait;
use imdb::{ImdbClient, ImdbError};

use crate::{FetchedRating, ImdbType, RatingSource, SourceError};

pub struct ImdbRatingSource {
    client: Arc<ImdbClient>,
}

impl ImdbRatingSource {
    pub fn new(client: Arc<ImdbClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RatingSource for ImdbRatingSource {
    async fn fetch_rating(&self, imdb_id: &str) -> Result<FetchedRating, SourceError> {
        let title = self
            .client
            .get_title(imdb_id)
            .await
            .map_err(|e| match e {
                ImdbError::NotFound { imdb_id, .. } => SourceError::NotFound(imdb_id),
                ImdbError::Api {
                    status_code: 404, ..
                } => SourceError::NotFound(imdb_id.to_string()),
                other => SourceError::Unavailable(other.to_string()),
            })?;

        let imdb_type = if title.title_type.is_series() {
            ImdbType::Series
        } else {
            ImdbType::Movie
        };

        Ok(FetchedRating {
            imdb_id: if title.imdb_id.is_empty() {
                imdb_id.to_string()
            } else {
                title.imdb_id
            },
            imdb_rating: title.imdb_rating,
            imdb_votes: title.imdb_votes,
            imdb_type,
        })
    }

    fn name(&self) -> &'static str {
        "imdb"
    }
}
