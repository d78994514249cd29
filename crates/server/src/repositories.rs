mod imdb_rating;

pub use imdb_rating::{ImdbRatingRepository, ImdbRatingRow, SqliteRatingCache};
