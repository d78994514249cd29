use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Process-level configuration, fixed for the lifetime of the server.
///
/// Runtime-editable values (API keys, cache sizing) live in [`crate::models::Settings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_path: PathBuf,
    pub database_url: String,
    pub max_connections: u32,
    pub bind: SocketAddr,
}

impl Config {
    pub fn new(data_path: impl Into<PathBuf>, bind: SocketAddr) -> Self {
        let data_path = data_path.into();
        let database_url = format!("sqlite:{}?mode=rwc", data_path.join("marquee.db").display());
        Self {
            data_path,
            database_url,
            max_connections: 5,
            bind,
        }
    }

    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_path.join("settings.toml")
    }
}
