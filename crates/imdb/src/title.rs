use serde_json::Value;

use crate::{error::ImdbError, models::Title, ImdbClient};

impl ImdbClient {
    /// Look up a title and return the upstream JSON payload untouched.
    ///
    /// GET /?i={imdb_id}&apikey={key}
    pub async fn get_title_raw(&self, imdb_id: &str) -> crate::Result<Value> {
        let url = self.url("/");
        let api_key = self.api_key();

        let response = self
            .client()
            .get(&url)
            .query(&[("i", imdb_id), ("apikey", api_key)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Look up a title and decode its rating fields.
    ///
    /// A `"Response": "False"` envelope is reported as [`ImdbError::NotFound`].
    pub async fn get_title(&self, imdb_id: &str) -> crate::Result<Title> {
        let payload = self.get_title_raw(imdb_id).await?;

        if payload.get("Response").and_then(Value::as_str) == Some("False") {
            let message = payload
                .get("Error")
                .and_then(Value::as_str)
                .unwrap_or("Incorrect IMDb ID.")
                .to_string();
            return Err(ImdbError::NotFound {
                imdb_id: imdb_id.to_string(),
                message,
            });
        }

        serde_path_to_error::deserialize(payload).map_err(|e| ImdbError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}
