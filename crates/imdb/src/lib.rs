//! Client for the IMDb rating source.
//!
//! The upstream speaks the OMDb title lookup protocol: `GET /?i=<imdb id>&apikey=<key>`.
//! Ratings and vote counts come back as display strings ("8.8", "2,200,000")
//! or the "N/A" sentinel; [`Title`] normalizes them to numbers.

mod client;
mod error;
pub mod models;
mod title;

pub use client::ImdbClient;
pub use error::ImdbError;
pub use models::{Title, TitleType};

pub type Result<T> = std::result::Result<T, ImdbError>;
