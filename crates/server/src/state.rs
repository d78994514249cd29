use std::sync::Arc;
use std::time::Duration;

use imdb::ImdbClient;
use ratings::{ImdbRatingSource, RatingResolver, TmdbIdMapper};
use reqwest::Client;
use sqlx::SqlitePool;
use tmdb::TmdbClient;

use crate::config::Config;
use crate::models::Settings;
use crate::repositories::SqliteRatingCache;
use crate::services::ResponseCache;

/// Outbound API clients
#[derive(Clone)]
pub struct Clients {
    pub tmdb: Arc<TmdbClient>,
    pub imdb: Arc<ImdbClient>,
}

impl Clients {
    pub fn from_settings(http_client: Client, settings: &Settings) -> Self {
        if !settings.tmdb.is_configured() {
            tracing::warn!("TMDB API key is not configured; TMDB ID lookups will fail");
        }
        if !settings.imdb.is_configured() {
            tracing::warn!("IMDb API key is not configured; rating lookups will fail");
        }

        let tmdb = TmdbClient::new(http_client.clone(), settings.tmdb.api_key.as_str());
        let imdb = ImdbClient::new(http_client, settings.imdb.api_key.as_str())
            .with_base_url(&settings.imdb.base_url);

        Self {
            tmdb: Arc::new(tmdb),
            imdb: Arc::new(imdb),
        }
    }
}

/// Long-lived services shared by handlers
#[derive(Clone)]
pub struct Services {
    pub resolver: Arc<RatingResolver>,
    pub response_cache: Arc<ResponseCache>,
}

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub clients: Clients,
    pub services: Services,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config, settings: &Settings) -> Self {
        let clients = Clients::from_settings(Client::new(), settings);
        let resolver = create_resolver(db.clone(), &clients);
        let response_cache = ResponseCache::new(
            settings.cache.max_entries,
            Duration::from_secs(settings.cache.ttl_secs),
        );

        Self {
            db,
            config: Arc::new(config),
            clients,
            services: Services {
                resolver: Arc::new(resolver),
                response_cache: Arc::new(response_cache),
            },
        }
    }
}

/// Wire the resolver to IMDb, TMDB and the SQLite rating cache.
pub fn create_resolver(db: SqlitePool, clients: &Clients) -> RatingResolver {
    RatingResolver::new(
        Arc::new(ImdbRatingSource::new(Arc::clone(&clients.imdb))),
        Arc::new(TmdbIdMapper::new(Arc::clone(&clients.tmdb))),
        Arc::new(SqliteRatingCache::new(db)),
    )
}
