use serde::Serialize;
use thiserror::Error;

use crate::MediaType;

/// Failure of the rating source.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("No rating record for {0}")]
    NotFound(String),

    #[error("Rating source unavailable: {0}")]
    Unavailable(String),
}

/// Failure to map a TMDB ID to an IMDb ID.
#[derive(Debug, Clone, Error)]
pub enum MappingError {
    #[error("TMDB {media_type:?} {tmdb_id} has no IMDb cross reference")]
    NoCrossReference { tmdb_id: i64, media_type: MediaType },

    #[error("ID mapping unavailable: {0}")]
    Unavailable(String),
}

/// Failure of the rating cache store.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("Rating cache storage error: {0}")]
    Storage(String),
}

/// Failures that reach the caller of [`crate::RatingResolver::resolve`].
///
/// Everything else is logged and absorbed by the resolver.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("IMDb ID not found")]
    IdentifierNotFound,

    #[error("Failed to fetch IMDb rating for {imdb_id}: {source}")]
    RatingFetch {
        imdb_id: String,
        #[source]
        source: SourceError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveErrorKind {
    IdentifierNotFound,
    RatingFetchFailure,
}

impl ResolveError {
    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            ResolveError::IdentifierNotFound => ResolveErrorKind::IdentifierNotFound,
            ResolveError::RatingFetch { .. } => ResolveErrorKind::RatingFetchFailure,
        }
    }
}
