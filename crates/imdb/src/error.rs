use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImdbError {
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

    #[error("Title not found: {imdb_id} ({message})")]
    NotFound { imdb_id: String, message: String },
}

impl ImdbError {
    /// HTTP status reported by the upstream, if the failure carried one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ImdbError::Api { status_code, .. } => Some(*status_code),
            ImdbError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ImdbError {
    fn from(e: reqwest::Error) -> Self {
        ImdbError::Request(e.without_url())
    }
}
