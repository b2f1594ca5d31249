use reqwest::Client;
use std::sync::Arc;

use crate::error::TmdbError;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

pub struct TmdbClient {
    client: Client,
    base_url: Arc<str>,
    api_key: String,
    pub(crate) lang: String,
}

impl TmdbClient {
    /// Create a TmdbClient with a shared reqwest Client.
    ///
    /// An empty API key leaves the client usable but every search returns no
    /// results without touching the network.
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: Arc::from(BASE_URL),
            api_key: api_key.into(),
            lang: "fr-FR".to_string(),
        }
    }

    /// Point the client at another API root (used against mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = Arc::from(base_url.trim_end_matches('/'));
        self
    }

    /// Set the result language (builder pattern)
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Full poster URL for a `poster_path` returned by a search.
    /// Empty input gives an empty string.
    pub fn image_url(&self, poster_path: &str) -> String {
        if poster_path.is_empty() {
            String::new()
        } else {
            format!("{}{}", IMAGE_BASE_URL, poster_path)
        }
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TmdbError::Api {
                status_code: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}
