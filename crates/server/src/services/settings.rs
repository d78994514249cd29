use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::models::Settings;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Settings loaded once at startup. Edit the file and restart to apply changes.
pub struct SettingsService {
    settings_path: PathBuf,
    settings: Settings,
}

impl SettingsService {
    /// Initialize the settings service.
    /// Creates default settings file if it doesn't exist.
    pub async fn new(config: &Config) -> Result<Self, SettingsError> {
        let settings_path = config.settings_path();
        let settings = Self::load_or_create(&settings_path).await?;

        Ok(Self {
            settings_path,
            settings,
        })
    }

    /// Load settings from file, or create with defaults if file doesn't exist.
    async fn load_or_create(path: &Path) -> Result<Settings, SettingsError> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let settings: Settings = toml::from_str(&content)?;
                tracing::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }

                let default = Settings::default();
                let toml_str = toml::to_string_pretty(&default)?;
                tokio::fs::write(path, toml_str).await?;
                tracing::info!("Created default settings file at {}", path.display());
                Ok(default)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_data_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("marquee-{}-{}-{}", name, std::process::id(), nanos))
    }

    #[tokio::test]
    async fn test_creates_default_file() {
        let data_path = temp_data_path("create");
        let config = Config::new(&data_path, "127.0.0.1:0".parse().unwrap());

        let service = SettingsService::new(&config).await.unwrap();

        assert!(service.path().exists());
        assert!(!service.get().imdb.is_configured());

        tokio::fs::remove_dir_all(&data_path).await.unwrap();
    }

    #[tokio::test]
    async fn test_loads_existing_file() {
        let data_path = temp_data_path("load");
        tokio::fs::create_dir_all(&data_path).await.unwrap();
        let config = Config::new(&data_path, "127.0.0.1:0".parse().unwrap());
        tokio::fs::write(
            config.settings_path(),
            "[tmdb]\napi_key = \"tmdb-key\"\n\n[cache]\nmax_entries = 8\n",
        )
        .await
        .unwrap();

        let service = SettingsService::new(&config).await.unwrap();
        let settings = service.get();

        assert_eq!(settings.tmdb.api_key, "tmdb-key");
        assert_eq!(settings.cache.max_entries, 8);
        assert_eq!(settings.cache.ttl_secs, 86400);

        tokio::fs::remove_dir_all(&data_path).await.unwrap();
    }
}
