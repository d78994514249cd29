mod imdb_adapter;
mod tmdb_adapter;

pub use imdb_adapter::ImdbRatingSource;
pub use tmdb_adapter::TmdbIdMapper;
