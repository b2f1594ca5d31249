use crate::models::{PaginatedResponse, SearchResult};
use crate::TmdbClient;

impl TmdbClient {
    /// Search movies by title
    /// GET /search/movie
    pub async fn search_movie(&self, query: &str) -> crate::Result<Vec<SearchResult>> {
        self.search("/search/movie", query).await
    }

    /// Search TV shows by title
    /// GET /search/tv
    pub async fn search_tv(&self, query: &str) -> crate::Result<Vec<SearchResult>> {
        self.search("/search/tv", query).await
    }

    async fn search(&self, path: &str, query: &str) -> crate::Result<Vec<SearchResult>> {
        if !self.is_configured() || query.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client()
            .get(self.url(path))
            .query(&[
                ("api_key", self.api_key()),
                ("query", query),
                ("language", self.lang.as_str()),
            ])
            .send()
            .await?;

        let page: PaginatedResponse<SearchResult> = self.handle_response(response).await?;
        Ok(page.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(server: &Server, key: &str) -> TmdbClient {
        TmdbClient::with_client(reqwest::Client::new(), key).with_base_url(server.url())
    }

    #[tokio::test]
    async fn test_search_movie_returns_results() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search/movie")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("api_key".into(), "secret".into()),
                Matcher::UrlEncoded("query".into(), "Dune".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "page": 1,
                    "results": [{"id": 1, "title": "Dune", "poster_path": "/dune.jpg"}],
                    "total_pages": 1,
                    "total_results": 1
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server, "secret");
        let results = client.search_movie("Dune").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_title(), Some("Dune"));
        assert_eq!(
            client.image_url(results[0].poster_path.as_deref().unwrap()),
            "https://image.tmdb.org/t/p/w500/dune.jpg"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_without_key_skips_network() {
        let mut server = Server::new_async().await;
        let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

        let results = client_for(&server, "").search_tv("Anything").await.unwrap();
        assert!(results.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_api_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/search/tv")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("Invalid API key")
            .create_async()
            .await;

        let err = client_for(&server, "bad").search_tv("Show").await.unwrap_err();
        assert!(matches!(err, crate::TmdbError::Api { status_code: 401, .. }));
    }

    #[test]
    fn test_image_url_empty_path() {
        let client = TmdbClient::with_client(reqwest::Client::new(), "k");
        assert_eq!(client.image_url(""), "");
    }
}
