pub mod proxy;
pub mod rating;

// Re-export all handlers
pub use proxy::{proxy_imdb, ImdbProxyRequest, PROXY_CACHE_CONTROL};
pub use rating::{get_rating_by_imdb, get_rating_by_tmdb, ImdbIdQuery, MediaTypeQuery};
