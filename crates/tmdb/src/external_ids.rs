use crate::{models::ExternalIds, TmdbClient};

impl TmdbClient {
    /// Get the external IDs of a movie
    ///
    /// GET /movie/{movie_id}/external_ids
    pub async fn get_movie_external_ids(&self, movie_id: i64) -> crate::Result<ExternalIds> {
        self.get_external_ids(&format!("/movie/{}/external_ids", movie_id))
            .await
    }

    /// Get the external IDs of a TV series
    ///
    /// GET /tv/{series_id}/external_ids
    pub async fn get_tv_external_ids(&self, series_id: i64) -> crate::Result<ExternalIds> {
        self.get_external_ids(&format!("/tv/{}/external_ids", series_id))
            .await
    }

    async fn get_external_ids(&self, path: &str) -> crate::Result<ExternalIds> {
        let url = self.url(path);
        let api_key = self.api_key();

        let response = self
            .client()
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
