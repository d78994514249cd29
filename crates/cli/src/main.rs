use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ratings::{MediaType, RatingRequest, ResolveGuard};
use server::{create_pool, create_resolver, Clients, Config, SettingsService};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "IMDb ratings for TMDB movies and series", long_about = None)]
#[command(version = env!("APP_VERSION"))]
struct Cli {
    /// Directory holding settings.toml and the rating database
    #[arg(long, env = "MARQUEE_DATA_PATH", default_value = "data", global = true)]
    data_path: PathBuf,

    /// Override the database URL (defaults to <data-path>/marquee.db)
    #[arg(long, env = "MARQUEE_DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Resolve ratings once and print them as JSON
    Resolve {
        /// TMDB IDs to resolve (repeatable)
        #[arg(long = "tmdb-id")]
        tmdb_ids: Vec<i64>,

        /// IMDb IDs to resolve (repeatable)
        #[arg(long = "imdb-id")]
        imdb_ids: Vec<String>,

        /// Media type of the TMDB IDs: movie or tv
        #[arg(long, default_value = "movie")]
        media_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, host } => {
            let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
            let config = build_config(cli.data_path, cli.database_url, addr);
            server::run_server(config).await
        }
        Command::Resolve {
            tmdb_ids,
            imdb_ids,
            media_type,
        } => {
            let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
            let config = build_config(cli.data_path, cli.database_url, addr);
            let media_type: MediaType = media_type.parse()?;

            let mut requests: Vec<RatingRequest> = tmdb_ids
                .into_iter()
                .map(|id| RatingRequest::for_tmdb(id, media_type))
                .collect();
            requests.extend(imdb_ids.into_iter().map(RatingRequest::for_imdb));

            resolve(config, requests).await
        }
    }
}

/// `RUST_LOG` directives when present and valid, otherwise `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn build_config(data_path: PathBuf, database_url: Option<String>, addr: SocketAddr) -> Config {
    let config = Config::new(data_path, addr);
    match database_url {
        Some(url) => config.with_database_url(url),
        None => config,
    }
}

async fn resolve(
    config: Config,
    requests: Vec<RatingRequest>,
) -> Result<(), Box<dyn std::error::Error>> {
    if requests.is_empty() {
        return Err("Nothing to resolve: pass --tmdb-id or --imdb-id".into());
    }

    let settings = SettingsService::new(&config).await?;
    let pool = create_pool(&config.database_url, config.max_connections).await?;
    let clients = Clients::from_settings(reqwest::Client::new(), settings.get());
    let resolver = create_resolver(pool.clone(), &clients);
    let guard = ResolveGuard::new();

    let mut failures = 0;
    for request in &requests {
        match guard.resolve_once(&resolver, request).await {
            None => {}
            Some(Ok(rating)) => println!("{}", serde_json::to_string_pretty(&rating)?),
            Some(Err(e)) => {
                failures += 1;
                tracing::error!(
                    "Failed to resolve TMDB {:?} / IMDb {:?}: {}",
                    request.tmdb_id,
                    request.imdb_id(),
                    e
                );
            }
        }
    }

    pool.close().await;

    if failures > 0 {
        return Err(format!("{} of {} resolutions failed", failures, guard.issued_count()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honors_debug_directives() {
        let filter = log_filter(Some("ratings=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_cli_parses_repeated_ids() {
        let cli = Cli::try_parse_from([
            "marquee",
            "resolve",
            "--tmdb-id",
            "550",
            "--tmdb-id",
            "550",
            "--imdb-id",
            "tt0137523",
            "--media-type",
            "tv",
        ])
        .unwrap();

        match cli.command {
            Command::Resolve {
                tmdb_ids,
                imdb_ids,
                media_type,
            } => {
                assert_eq!(tmdb_ids, vec![550, 550]);
                assert_eq!(imdb_ids, vec!["tt0137523".to_string()]);
                assert_eq!(media_type, "tv");
            }
            Command::Serve { .. } => panic!("expected resolve"),
        }
    }
}
