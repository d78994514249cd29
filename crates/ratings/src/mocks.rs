//! Mock collaborators for testing `RatingResolver`.
//!
//! Each mock is cheaply cloneable and shares its state between clones, so a
//! test can hand one clone to the resolver and keep another for assertions.
//!
//! ```ignore
//! let source = MockRatingSource::new();
//! let resolver = RatingResolver::new(
//!     Arc::new(source.clone()),
//!     Arc::new(MockIdMapper::new()),
//!     Arc::new(MockRatingCache::new()),
//! );
//! resolver.resolve(&RatingRequest::for_imdb("tt0137523")).await;
//! assert_eq!(source.fetch_count(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    CacheEntry, CacheError, CacheUpsert, FetchedRating, IdMapper, MappingError, MediaType,
    RatingCache, RatingSource, SourceError,
};

// ============================================================================
// Mock Rating Source
// ============================================================================

#[derive(Clone, Default)]
pub struct MockRatingSource {
    ratings: Arc<Mutex<HashMap<String, FetchedRating>>>,
    fetched: Arc<Mutex<Vec<String>>>,
    unavailable: Arc<Mutex<bool>>,
}

impl MockRatingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, rating: FetchedRating) {
        self.ratings
            .lock()
            .unwrap()
            .insert(rating.imdb_id.clone(), rating);
    }

    /// Make every fetch fail as if the source were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }

    /// IMDb IDs passed to `fetch_rating`, in call order.
    pub fn fetched_ids(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl RatingSource for MockRatingSource {
    async fn fetch_rating(&self, imdb_id: &str) -> Result<FetchedRating, SourceError> {
        self.fetched.lock().unwrap().push(imdb_id.to_string());
        if *self.unavailable.lock().unwrap() {
            return Err(SourceError::Unavailable("mock source is down".into()));
        }
        self.ratings
            .lock()
            .unwrap()
            .get(imdb_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(imdb_id.to_string()))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// ============================================================================
// Mock ID Mapper
// ============================================================================

#[derive(Clone, Default)]
pub struct MockIdMapper {
    movies: Arc<Mutex<HashMap<i64, String>>>,
    series: Arc<Mutex<HashMap<i64, String>>>,
    movie_calls: Arc<Mutex<usize>>,
    series_calls: Arc<Mutex<usize>>,
}

impl MockIdMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_movie(&self, tmdb_id: i64, imdb_id: &str) {
        self.movies
            .lock()
            .unwrap()
            .insert(tmdb_id, imdb_id.to_string());
    }

    pub fn insert_series(&self, tmdb_id: i64, imdb_id: &str) {
        self.series
            .lock()
            .unwrap()
            .insert(tmdb_id, imdb_id.to_string());
    }

    pub fn movie_calls(&self) -> usize {
        *self.movie_calls.lock().unwrap()
    }

    pub fn series_calls(&self) -> usize {
        *self.series_calls.lock().unwrap()
    }

    pub fn call_count(&self) -> usize {
        self.movie_calls() + self.series_calls()
    }
}

#[async_trait]
impl IdMapper for MockIdMapper {
    async fn map_movie_id(&self, tmdb_id: i64) -> Result<String, MappingError> {
        *self.movie_calls.lock().unwrap() += 1;
        self.movies
            .lock()
            .unwrap()
            .get(&tmdb_id)
            .cloned()
            .ok_or(MappingError::NoCrossReference {
                tmdb_id,
                media_type: MediaType::Movie,
            })
    }

    async fn map_series_id(&self, tmdb_id: i64) -> Result<String, MappingError> {
        *self.series_calls.lock().unwrap() += 1;
        self.series
            .lock()
            .unwrap()
            .get(&tmdb_id)
            .cloned()
            .ok_or(MappingError::NoCrossReference {
                tmdb_id,
                media_type: MediaType::Tv,
            })
    }
}

// ============================================================================
// Mock Rating Cache
// ============================================================================

#[derive(Clone, Default)]
pub struct MockRatingCache {
    entries: Arc<Mutex<HashMap<i64, CacheEntry>>>,
    get_count: Arc<Mutex<usize>>,
    upsert_count: Arc<Mutex<usize>>,
    fail_reads: Arc<Mutex<bool>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MockRatingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry without counting it as an upsert.
    pub fn insert_entry(
        &self,
        tmdb_id: i64,
        imdb_id: Option<&str>,
        imdb_rating: Option<f64>,
        imdb_votes: Option<i64>,
        media_type: MediaType,
    ) {
        self.entries.lock().unwrap().insert(
            tmdb_id,
            CacheEntry {
                tmdb_id,
                imdb_id: imdb_id.map(str::to_string),
                imdb_rating,
                imdb_votes,
                media_type,
                updated_at: Utc::now(),
            },
        );
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    pub fn get_count(&self) -> usize {
        *self.get_count.lock().unwrap()
    }

    pub fn upsert_count(&self) -> usize {
        *self.upsert_count.lock().unwrap()
    }
}

#[async_trait]
impl RatingCache for MockRatingCache {
    async fn get(&self, tmdb_id: i64) -> Result<Option<CacheEntry>, CacheError> {
        *self.get_count.lock().unwrap() += 1;
        if *self.fail_reads.lock().unwrap() {
            return Err(CacheError::Storage("mock read failure".into()));
        }
        Ok(self.entries.lock().unwrap().get(&tmdb_id).cloned())
    }

    async fn upsert(&self, entry: CacheUpsert) -> Result<(), CacheError> {
        *self.upsert_count.lock().unwrap() += 1;
        if *self.fail_writes.lock().unwrap() {
            return Err(CacheError::Storage("mock write failure".into()));
        }
        self.entries.lock().unwrap().insert(
            entry.tmdb_id,
            CacheEntry {
                tmdb_id: entry.tmdb_id,
                imdb_id: Some(entry.imdb_id),
                imdb_rating: entry.imdb_rating,
                imdb_votes: entry.imdb_votes,
                media_type: entry.media_type,
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }
}
