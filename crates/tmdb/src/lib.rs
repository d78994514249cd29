mod client;
mod error;
mod external_ids;
pub mod models;

pub use client::TmdbClient;
pub use error::TmdbError;
pub use models::ExternalIds;

pub type Result<T> = std::result::Result<T, TmdbError>;
