mod settings;

pub use settings::{CacheSettings, ImdbSettings, Settings, TmdbSettings};
