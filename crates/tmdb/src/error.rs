use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    /// Transport failure. The URL is stripped because it carries the API key.
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    #[error("Failed to parse JSON response at '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },
}

impl From<reqwest::Error> for TmdbError {
    fn from(e: reqwest::Error) -> Self {
        TmdbError::Request(e.without_url())
    }
}
