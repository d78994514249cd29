//! Rating resolution: cache, then ID mapping, then the rating source.

use std::sync::Arc;

use crate::{
    CacheUpsert, ExternalRating, IdMapper, MappingError, MediaType, RatingCache, RatingRequest,
    RatingSource, ResolveError,
};

/// Resolves IMDb ratings for catalog items.
///
/// Each call is a strict sequence of awaited steps, never two in flight:
///
/// 1. With no IMDb ID but a TMDB ID, read the cache. A full entry is
///    returned as is; a partial entry (IMDb ID, no rating) donates its IMDb ID.
/// 2. Still no IMDb ID: ask the mapper (movie or series variant).
/// 3. Fetch the rating and, when a TMDB ID was given, write it through to the cache.
///
/// Cache and mapping failures are logged and treated as misses. Only a
/// missing IMDb ID or a failed fetch reach the caller.
pub struct RatingResolver {
    source: Arc<dyn RatingSource>,
    mapper: Arc<dyn IdMapper>,
    cache: Arc<dyn RatingCache>,
}

impl RatingResolver {
    pub fn new(
        source: Arc<dyn RatingSource>,
        mapper: Arc<dyn IdMapper>,
        cache: Arc<dyn RatingCache>,
    ) -> Self {
        Self {
            source,
            mapper,
            cache,
        }
    }

    pub async fn resolve(&self, request: &RatingRequest) -> Result<ExternalRating, ResolveError> {
        let mut imdb_id = request.imdb_id().map(str::to_string);

        if imdb_id.is_none() {
            if let Some(tmdb_id) = request.tmdb_id {
                match self.cache.get(tmdb_id).await {
                    Ok(Some(entry)) => {
                        if let Some(rating) = entry.cached_rating(request.media_type) {
                            tracing::debug!(
                                "Rating cache hit for TMDB {} ({})",
                                tmdb_id,
                                rating.imdb_id
                            );
                            return Ok(rating);
                        }
                        if let Some(cached_id) = entry.known_imdb_id() {
                            tracing::debug!(
                                "Partial rating cache entry for TMDB {}, reusing {}",
                                tmdb_id,
                                cached_id
                            );
                            imdb_id = Some(cached_id.to_string());
                        }
                    }
                    Ok(None) => {
                        tracing::debug!("Rating cache miss for TMDB {}", tmdb_id);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read rating cache for TMDB {}: {}", tmdb_id, e);
                    }
                }
            }
        }

        if imdb_id.is_none() {
            if let Some(tmdb_id) = request.tmdb_id {
                match self.map_id(tmdb_id, request.media_type).await {
                    Ok(mapped) => {
                        tracing::debug!("Mapped TMDB {} to {}", tmdb_id, mapped);
                        imdb_id = Some(mapped);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to map TMDB {} to an IMDb ID: {}", tmdb_id, e);
                    }
                }
            }
        }

        let Some(imdb_id) = imdb_id else {
            return Err(ResolveError::IdentifierNotFound);
        };

        let fetched = self
            .source
            .fetch_rating(&imdb_id)
            .await
            .map_err(|source| ResolveError::RatingFetch {
                imdb_id: imdb_id.clone(),
                source,
            })?;
        let rating = ExternalRating::from(fetched);

        if let Some(tmdb_id) = request.tmdb_id {
            let upsert = CacheUpsert {
                tmdb_id,
                imdb_id: rating.imdb_id.clone(),
                imdb_rating: rating.imdb_rating,
                imdb_votes: rating.imdb_votes,
                media_type: request.media_type,
            };
            if let Err(e) = self.cache.upsert(upsert).await {
                tracing::warn!("Failed to cache rating for TMDB {}: {}", tmdb_id, e);
            }
        }

        tracing::debug!(
            "Resolved {} from {}: {:?}",
            rating.imdb_id,
            self.source.name(),
            rating.imdb_rating
        );

        Ok(rating)
    }

    async fn map_id(&self, tmdb_id: i64, media_type: MediaType) -> Result<String, MappingError> {
        match media_type {
            MediaType::Tv => self.mapper.map_series_id(tmdb_id).await,
            MediaType::Movie => self.mapper.map_movie_id(tmdb_id).await,
        }
    }
}
