use serde::{Deserialize, Serialize};

/// Cross references returned by `/movie/{id}/external_ids` and `/tv/{id}/external_ids`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalIds {
    pub id: i64,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub tvdb_id: Option<i64>,
    #[serde(default)]
    pub wikidata_id: Option<String>,
}

impl ExternalIds {
    /// IMDb ID, treating TMDB's empty string the same as null.
    pub fn imdb_id(&self) -> Option<&str> {
        self.imdb_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
