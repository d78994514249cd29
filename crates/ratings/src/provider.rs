//! Collaborator traits consumed by the resolver

use async_trait::async_trait;

use crate::{CacheEntry, CacheError, CacheUpsert, FetchedRating, MappingError, SourceError};

/// Third-party source that owns ratings and vote counts.
#[async_trait]
pub trait RatingSource: Send + Sync {
    async fn fetch_rating(&self, imdb_id: &str) -> Result<FetchedRating, SourceError>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Catalog cross reference from TMDB IDs to IMDb IDs.
#[async_trait]
pub trait IdMapper: Send + Sync {
    async fn map_movie_id(&self, tmdb_id: i64) -> Result<String, MappingError>;

    async fn map_series_id(&self, tmdb_id: i64) -> Result<String, MappingError>;
}

/// Persisted ratings keyed by TMDB ID.
///
/// Writes replace the whole row; concurrent writers race and the last one wins.
#[async_trait]
pub trait RatingCache: Send + Sync {
    async fn get(&self, tmdb_id: i64) -> Result<Option<CacheEntry>, CacheError>;

    async fn upsert(&self, entry: CacheUpsert) -> Result<(), CacheError>;
}
