use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Media kind of a catalog item, in TMDB's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    #[serde(alias = "series")]
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// The rating source's word for this media kind.
    pub fn imdb_type(&self) -> ImdbType {
        match self {
            MediaType::Tv => ImdbType::Series,
            MediaType::Movie => ImdbType::Movie,
        }
    }
}

impl FromStr for MediaType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "tv" | "series" => MediaType::Tv,
            _ => MediaType::Movie,
        })
    }
}

/// Media kind in the rating source's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ImdbType {
    Movie,
    Series,
}

/// What to resolve. At least one identifier has to lead to an IMDb ID.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    #[serde(default)]
    pub tmdb_id: Option<i64>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
}

impl RatingRequest {
    pub fn for_tmdb(tmdb_id: i64, media_type: MediaType) -> Self {
        Self {
            tmdb_id: Some(tmdb_id),
            imdb_id: None,
            media_type,
        }
    }

    pub fn for_imdb(imdb_id: impl Into<String>) -> Self {
        Self {
            tmdb_id: None,
            imdb_id: Some(imdb_id.into()),
            media_type: MediaType::Movie,
        }
    }

    /// IMDb ID supplied by the caller, ignoring blanks.
    pub fn imdb_id(&self) -> Option<&str> {
        self.imdb_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// A point-in-time rating snapshot handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExternalRating {
    pub imdb_id: String,
    pub imdb_rating: Option<f64>,
    pub imdb_votes: Option<i64>,
    pub imdb_type: ImdbType,
}

/// A rating as reported by the rating source.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRating {
    pub imdb_id: String,
    pub imdb_rating: Option<f64>,
    pub imdb_votes: Option<i64>,
    pub imdb_type: ImdbType,
}

impl From<FetchedRating> for ExternalRating {
    fn from(fetched: FetchedRating) -> Self {
        Self {
            imdb_id: fetched.imdb_id,
            imdb_rating: fetched.imdb_rating,
            imdb_votes: fetched.imdb_votes,
            imdb_type: fetched.imdb_type,
        }
    }
}

/// Persisted rating, keyed by TMDB ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub tmdb_id: i64,
    pub imdb_id: Option<String>,
    pub imdb_rating: Option<f64>,
    pub imdb_votes: Option<i64>,
    pub media_type: MediaType,
    pub updated_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Usable rating from this entry, typed by the requested media kind.
    ///
    /// Returns `None` unless both the IMDb ID and a valid rating are present.
    pub fn cached_rating(&self, media_type: MediaType) -> Option<ExternalRating> {
        let imdb_id = self.imdb_id.as_deref().filter(|id| !id.is_empty())?;
        let rating = self
            .imdb_rating
            .filter(|r| r.is_finite() && (0.0..=10.0).contains(r))?;

        Some(ExternalRating {
            imdb_id: imdb_id.to_string(),
            imdb_rating: Some(rating),
            imdb_votes: self.imdb_votes,
            imdb_type: media_type.imdb_type(),
        })
    }

    /// IMDb ID left behind by an earlier resolution, if any.
    pub fn known_imdb_id(&self) -> Option<&str> {
        self.imdb_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Whole-row write for the rating cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheUpsert {
    pub tmdb_id: i64,
    pub imdb_id: String,
    pub imdb_rating: Option<f64>,
    pub imdb_votes: Option<i64>,
    pub media_type: MediaType,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(imdb_id: Option<&str>, rating: Option<f64>) -> CacheEntry {
        CacheEntry {
            tmdb_id: 1,
            imdb_id: imdb_id.map(str::to_string),
            imdb_rating: rating,
            imdb_votes: Some(10),
            media_type: MediaType::Movie,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_media_type_vocabulary() {
        assert_eq!(MediaType::Tv.imdb_type(), ImdbType::Series);
        assert_eq!(MediaType::Movie.imdb_type(), ImdbType::Movie);
        assert_eq!("series".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert_eq!("anything".parse::<MediaType>().unwrap(), MediaType::Movie);

        let parsed: MediaType = serde_json::from_str("\"series\"").unwrap();
        assert_eq!(parsed, MediaType::Tv);
    }

    #[test]
    fn test_cached_rating_uses_requested_media_type() {
        let rating = entry(Some("tt0903747"), Some(9.5))
            .cached_rating(MediaType::Tv)
            .unwrap();
        assert_eq!(rating.imdb_type, ImdbType::Series);
        assert_eq!(rating.imdb_votes, Some(10));
    }

    #[test]
    fn test_cached_rating_requires_id_and_valid_rating() {
        assert!(entry(Some("tt1"), None).cached_rating(MediaType::Movie).is_none());
        assert!(entry(None, Some(7.0)).cached_rating(MediaType::Movie).is_none());
        assert!(entry(Some("tt1"), Some(f64::NAN)).cached_rating(MediaType::Movie).is_none());
        assert!(entry(Some("tt1"), Some(11.0)).cached_rating(MediaType::Movie).is_none());
    }

    #[test]
    fn test_blank_imdb_id_is_absent() {
        let request = RatingRequest {
            tmdb_id: Some(1),
            imdb_id: Some("  ".to_string()),
            media_type: MediaType::Movie,
        };
        assert_eq!(request.imdb_id(), None);
    }

    #[test]
    fn test_external_rating_wire_format() {
        let rating = ExternalRating {
            imdb_id: "tt0137523".to_string(),
            imdb_rating: Some(8.8),
            imdb_votes: Some(2_200_000),
            imdb_type: ImdbType::Movie,
        };
        let value = serde_json::to_value(&rating).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "imdbId": "tt0137523",
                "imdbRating": 8.8,
                "imdbVotes": 2200000,
                "imdbType": "movie"
            })
        );
    }
}
