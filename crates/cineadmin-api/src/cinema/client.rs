//! `CinemaClient` - cinema backend HTTP client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalCinemaApi;
use super::types::{
    AccessToken, ActorRef, CategoryRef, CityRef, CreatedDirector, CreatedMovie, DirectorRef,
    NewDirector, NewMovie,
};

/// Default base URL of the movie service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/movie/";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cinema backend API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CinemaClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests (always ends with `/`).
    base_url: Url,
}

/// Builder for `CinemaClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CinemaClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl CinemaClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (config file, or wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CinemaClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(CinemaClient {
            http_client,
            base_url: with_trailing_slash(base_url),
        })
    }
}

/// `Url::join` drops the last path segment unless it ends with `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl CinemaClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CinemaClientBuilder {
        CinemaClientBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))
    }

    /// Sends a GET request and decodes the JSON body.
    #[instrument(skip_all)]
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "cinema API request");

        let result = self.http_client.get(url).send().await;
        let response = result.with_context(|| format!("request failed: {path}"))?;
        let body = read_success_body(response, path).await?;

        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed = raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }

    /// Sends a POST request with Bearer auth and a JSON body.
    ///
    /// Returns `None` when the backend answers with an empty body.
    #[instrument(skip_all)]
    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: &AccessToken,
    ) -> Result<Option<T>> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "cinema API request");

        let result = self
            .http_client
            .post(url)
            .bearer_auth(token.expose())
            .json(body)
            .send()
            .await;
        let response = result.with_context(|| format!("request failed: {path}"))?;
        let body = read_success_body(response, path).await?;

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" || trimmed == "\"\"" {
            return Ok(None);
        }

        let raw_result: std::result::Result<T, _> = serde_json::from_str(trimmed);
        let parsed = raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(Some(parsed))
    }
}

/// Reads the response body, turning non-2xx statuses into errors.
async fn read_success_body(response: Response, path: &str) -> Result<String> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<failed to read body>"));
        bail!("cinema API error (HTTP {status}) on {path}: {body}");
    }

    response
        .text()
        .await
        .with_context(|| format!("failed to read response body: {path}"))
}

impl LocalCinemaApi for CinemaClient {
    #[instrument(skip_all)]
    async fn list_actors(&self) -> Result<Vec<ActorRef>> {
        self.get_json("actors/getall").await
    }

    #[instrument(skip_all)]
    async fn list_cities(&self) -> Result<Vec<CityRef>> {
        self.get_json("cities/getall").await
    }

    #[instrument(skip_all)]
    async fn list_categories(&self) -> Result<Vec<CategoryRef>> {
        self.get_json("categories/getall").await
    }

    #[instrument(skip_all)]
    async fn list_directors(&self) -> Result<Vec<DirectorRef>> {
        self.get_json("directors/getall").await
    }

    #[instrument(skip_all)]
    async fn create_director(&self, director: &NewDirector) -> Result<CreatedDirector> {
        let created: Option<CreatedDirector> = self
            .post_json("directors/add", director, &director.token)
            .await?;
        created.context("directors/add returned an empty response")
    }

    #[instrument(skip_all)]
    async fn create_movie(&self, movie: &NewMovie) -> Result<Option<CreatedMovie>> {
        self.post_json("movies/add", movie, &movie.user_access_token)
            .await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use chrono::NaiveDate;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::cinema::types::{CategoryId, DirectorId};

    fn client_for(server: &MockServer) -> CinemaClient {
        let base_url = format!("{}/api/movie/", server.uri());
        CinemaClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    fn sample_movie() -> NewMovie {
        NewMovie {
            movie_name: String::from("Dune"),
            description: String::from("Desert epic"),
            duration: 155,
            release_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            trailer_url: None,
            category_id: CategoryId::new("cat1"),
            director_id: DirectorId::new("dir2"),
            director_name: None,
            is_in_vision: true,
            user_access_token: AccessToken::new("my-secret-token"),
        }
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = CinemaClient::builder().build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_uses_default_base_url() {
        // Arrange & Act
        let client = CinemaClient::builder()
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_appends_trailing_slash() {
        // Arrange
        let custom_url = Url::parse("http://localhost:9000/api/movie").unwrap();

        // Act
        let client = CinemaClient::builder()
            .base_url(custom_url)
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(
            client.base_url().as_str(),
            "http://localhost:9000/api/movie/"
        );
        assert_eq!(
            client.endpoint("movies/add").unwrap().as_str(),
            "http://localhost:9000/api/movie/movies/add"
        );
    }

    #[tokio::test]
    async fn test_list_categories_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/cinema/categories.json");

        Mock::given(method("GET"))
            .and(path("/api/movie/categories/getall"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let categories = client.list_categories().await.unwrap();

        // Assert
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[2].category_name, "Sci-Fi");
    }

    #[tokio::test]
    async fn test_list_actors_and_cities_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/movie/actors/getall"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(include_str!("../../../../fixtures/cinema/actors.json")),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/movie/cities/getall"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(include_str!("../../../../fixtures/cinema/cities.json")),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let actors = client.list_actors().await.unwrap();
        let cities = client.list_cities().await.unwrap();

        // Assert
        assert_eq!(actors.len(), 2);
        assert_eq!(cities[0].city_name, "New York");
    }

    #[tokio::test]
    async fn test_create_director_sends_token_in_header_and_body() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/movie/directors/add"))
            .and(header("Authorization", "Bearer my-secret-token"))
            .and(body_json(serde_json::json!({
                "directorName": "Denis",
                "token": "my-secret-token",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(include_str!(
                "../../../../fixtures/cinema/director_created.json"
            )))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let director = NewDirector {
            director_name: String::from("Denis"),
            token: AccessToken::new("my-secret-token"),
        };

        // Act
        let created = client.create_director(&director).await.unwrap();

        // Assert
        assert_eq!(created.director_id, DirectorId::new("dir9"));
    }

    #[tokio::test]
    async fn test_create_director_empty_response_is_error() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/movie/directors/add"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let director = NewDirector {
            director_name: String::from("Denis"),
            token: AccessToken::new("tok"),
        };

        // Act
        let result = client.create_director(&director).await;

        // Assert
        assert!(result.unwrap_err().to_string().contains("empty response"));
    }

    #[tokio::test]
    async fn test_create_movie_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/movie/movies/add"))
            .and(header("Authorization", "Bearer my-secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(include_str!(
                "../../../../fixtures/cinema/movie_created.json"
            )))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let created = client.create_movie(&sample_movie()).await.unwrap();

        // Assert
        assert_eq!(created.unwrap().movie_id.as_str(), "mov42");
    }

    #[tokio::test]
    async fn test_create_movie_empty_body_is_none() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/movie/movies/add"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let created = client.create_movie(&sample_movie()).await.unwrap();

        // Assert
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn test_http_error_includes_status_and_body() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Access Denied"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let result = client.create_movie(&sample_movie()).await;

        // Assert
        let err = result.unwrap_err().to_string();
        assert!(err.contains("cinema API error"));
        assert!(err.contains("403"));
        assert!(err.contains("Access Denied"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/movie/directors/getall"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let result = client.list_directors().await;

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to decode JSON response")
        );
    }
}
