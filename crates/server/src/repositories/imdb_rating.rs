use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ratings::{CacheEntry, CacheError, CacheUpsert, MediaType, RatingCache};
use sqlx::SqlitePool;

/// Common SELECT fields for rating cache queries
const SELECT_RATING: &str = r#"
    SELECT tmdb_id, imdb_id, imdb_rating, imdb_votes, media_type, updated_at
    FROM imdb_ratings
"#;

pub struct ImdbRatingRepository;

impl ImdbRatingRepository {
    /// Get cached rating by TMDB ID
    pub async fn get(pool: &SqlitePool, tmdb_id: i64) -> Result<Option<ImdbRatingRow>, sqlx::Error> {
        let query = format!("{} WHERE tmdb_id = $1", SELECT_RATING);
        sqlx::query_as::<_, ImdbRatingRow>(&query)
            .bind(tmdb_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or fully replace the cached rating for a TMDB ID
    pub async fn upsert(pool: &SqlitePool, entry: &CacheUpsert) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO imdb_ratings (tmdb_id, imdb_id, imdb_rating, imdb_votes, media_type, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT(tmdb_id) DO UPDATE SET
                imdb_id = excluded.imdb_id,
                imdb_rating = excluded.imdb_rating,
                imdb_votes = excluded.imdb_votes,
                media_type = excluded.media_type,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(entry.tmdb_id)
        .bind(&entry.imdb_id)
        .bind(entry.imdb_rating)
        .bind(entry.imdb_votes)
        .bind(entry.media_type.as_str())
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Count cached ratings
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM imdb_ratings")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}

/// Internal row type for mapping SQLite results
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ImdbRatingRow {
    pub tmdb_id: i64,
    pub imdb_id: Option<String>,
    pub imdb_rating: Option<f64>,
    pub imdb_votes: Option<i64>,
    pub media_type: String,
    pub updated_at: DateTime<Utc>,
}

impl From<ImdbRatingRow> for CacheEntry {
    fn from(row: ImdbRatingRow) -> Self {
        Self {
            tmdb_id: row.tmdb_id,
            imdb_id: row.imdb_id,
            imdb_rating: row.imdb_rating,
            imdb_votes: row.imdb_votes,
            media_type: row.media_type.parse().unwrap_or(MediaType::Movie),
            updated_at: row.updated_at,
        }
    }
}

/// [`RatingCache`] backed by the `imdb_ratings` table.
#[derive(Clone)]
pub struct SqliteRatingCache {
    db: SqlitePool,
}

impl SqliteRatingCache {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingCache for SqliteRatingCache {
    async fn get(&self, tmdb_id: i64) -> Result<Option<CacheEntry>, CacheError> {
        ImdbRatingRepository::get(&self.db, tmdb_id)
            .await
            .map(|row| row.map(CacheEntry::from))
            .map_err(|e| CacheError::Storage(e.to_string()))
    }

    async fn upsert(&self, entry: CacheUpsert) -> Result<(), CacheError> {
        ImdbRatingRepository::upsert(&self.db, &entry)
            .await
            .map_err(|e| CacheError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratings::mocks::{MockIdMapper, MockRatingSource};
    use ratings::{FetchedRating, ImdbType, RatingRequest, RatingResolver};
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn memory_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::migrate(&pool).await.unwrap();
        pool
    }

    fn upsert(tmdb_id: i64, imdb_id: &str, rating: Option<f64>, votes: Option<i64>) -> CacheUpsert {
        CacheUpsert {
            tmdb_id,
            imdb_id: imdb_id.to_string(),
            imdb_rating: rating,
            imdb_votes: votes,
            media_type: MediaType::Tv,
        }
    }

    #[tokio::test]
    async fn test_get_missing_row() {
        let cache = SqliteRatingCache::new(memory_pool().await);
        assert!(cache.get(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let cache = SqliteRatingCache::new(memory_pool().await);
        cache
            .upsert(upsert(1396, "tt0903747", Some(9.5), Some(2_100_000)))
            .await
            .unwrap();

        let entry = cache.get(1396).await.unwrap().unwrap();
        assert_eq!(entry.imdb_id.as_deref(), Some("tt0903747"));
        assert_eq!(entry.imdb_rating, Some(9.5));
        assert_eq!(entry.imdb_votes, Some(2_100_000));
        assert_eq!(entry.media_type, MediaType::Tv);
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_row() {
        let pool = memory_pool().await;
        let cache = SqliteRatingCache::new(pool.clone());
        cache
            .upsert(upsert(7, "tt0000007", Some(6.1), Some(900)))
            .await
            .unwrap();
        cache
            .upsert(upsert(7, "tt0000008", None, None))
            .await
            .unwrap();

        let entry = cache.get(7).await.unwrap().unwrap();
        assert_eq!(entry.imdb_id.as_deref(), Some("tt0000008"));
        assert_eq!(entry.imdb_rating, None);
        assert_eq!(entry.imdb_votes, None);
        assert_eq!(ImdbRatingRepository::count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_resolver_write_through_round_trip() {
        let pool = memory_pool().await;
        let mapper = MockIdMapper::new();
        mapper.insert_movie(550, "tt0137523");
        let source = MockRatingSource::new();
        source.insert(FetchedRating {
            imdb_id: "tt0137523".to_string(),
            imdb_rating: Some(8.8),
            imdb_votes: Some(2_200_000),
            imdb_type: ImdbType::Movie,
        });
        let resolver = RatingResolver::new(
            Arc::new(source.clone()),
            Arc::new(mapper),
            Arc::new(SqliteRatingCache::new(pool.clone())),
        );
        let request = RatingRequest::for_tmdb(550, MediaType::Movie);

        let fetched = resolver.resolve(&request).await.unwrap();
        let row = ImdbRatingRepository::get(&pool, 550).await.unwrap().unwrap();
        assert_eq!(row.imdb_id.as_deref(), Some(fetched.imdb_id.as_str()));
        assert_eq!(row.imdb_rating, fetched.imdb_rating);
        assert_eq!(row.imdb_votes, fetched.imdb_votes);

        let cached = resolver.resolve(&request).await.unwrap();
        assert_eq!(cached, fetched);
        assert_eq!(source.fetch_count(), 1);
    }
}
