use serde::{Deserialize, Serialize};

/// Application settings stored in TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// TMDB configuration (IMDb ID mapping)
    #[serde(default)]
    pub tmdb: TmdbSettings,
    /// Rating source configuration
    #[serde(default)]
    pub imdb: ImdbSettings,
    /// In-memory response cache configuration
    #[serde(default)]
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbSettings {
    #[serde(default)]
    pub api_key: String,
}

impl TmdbSettings {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImdbSettings {
    /// Shared credential for the rating source; never sent to clients
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "ImdbSettings::default_base_url")]
    pub base_url: String,
}

impl Default for ImdbSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
        }
    }
}

impl ImdbSettings {
    fn default_base_url() -> String {
        "https://www.omdbapi.com".to_string()
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "CacheSettings::default_max_entries")]
    pub max_entries: u64,
    #[serde(default = "CacheSettings::default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: Self::default_max_entries(),
            ttl_secs: Self::default_ttl_secs(),
        }
    }
}

impl CacheSettings {
    fn default_max_entries() -> u64 {
        1024
    }

    // Matches the proxy's shared-cache max age
    fn default_ttl_secs() -> u64 {
        86400
    }
}
