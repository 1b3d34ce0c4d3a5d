//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::credential::Credential;
use super::error::{Result, TmdbError};
use super::params::{ListingKind, ListingRequest, SearchQuery};
use super::types::{ApiResult, MovieDetails, MovieSummary, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Default bounded wait for `search/movie`.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_millis(8000);

/// Sub-resources bundled into the details response.
const DETAILS_APPEND: &str = "credits,videos,similar";

/// TMDB API client.
///
/// Holds no per-call state; every operation issues at most one request.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Access credential (`None` fails every operation).
    credential: Option<Credential>,
    /// `language` query parameter.
    language: String,
    /// Bounded wait for searches.
    search_timeout: Duration,
    /// Bounded wait for listings (`None` = transport default).
    listing_timeout: Option<Duration>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    credential: Option<Credential>,
    language: Option<String>,
    user_agent: Option<String>,
    search_timeout: Option<Duration>,
    listing_timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            credential: None,
            language: None,
            user_agent: None,
            search_timeout: None,
            listing_timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the access credential.
    ///
    /// Leaving it unset is not a build error; each operation then fails
    /// with [`TmdbError::Configuration`].
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Sets a v3 API key as the credential.
    #[must_use]
    pub fn api_key(self, key: impl Into<String>) -> Self {
        self.credential(Credential::ApiKey(key.into()))
    }

    /// Sets a v4 bearer token as the credential.
    #[must_use]
    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.credential(Credential::BearerToken(token.into()))
    }

    /// Sets the response language (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the bounded wait for searches (default: 8000ms).
    #[must_use]
    pub const fn search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = Some(timeout);
        self
    }

    /// Sets a bounded wait for listings (default: none).
    #[must_use]
    pub const fn listing_timeout(mut self, timeout: Duration) -> Self {
        self.listing_timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`TmdbError::Configuration`] if:
    /// - `user_agent` is not set.
    /// - the default base URL fails to parse.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let user_agent = self
            .user_agent
            .ok_or_else(|| TmdbError::Configuration(String::from("user_agent is required")))?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).map_err(|e| {
                TmdbError::Configuration(format!("invalid default base URL: {e}"))
            })?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .map_err(|e| TmdbError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(TmdbClient {
            http_client,
            base_url,
            credential: self.credential,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            search_timeout: self.search_timeout.unwrap_or(DEFAULT_SEARCH_TIMEOUT),
            listing_timeout: self.listing_timeout,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the configured credential, or a configuration error.
    fn credential(&self) -> Result<&Credential> {
        self.credential
            .as_ref()
            .filter(|c| !c.is_blank())
            .ok_or_else(|| {
                tracing::error!("TMDB access credential is not configured");
                TmdbError::Configuration(String::from(
                    "TMDB access credential is not configured",
                ))
            })
    }

    /// Sends a GET request and decodes a JSON object body.
    ///
    /// With `deadline`, the transport future is dropped (cancelling the
    /// request) once the bound elapses.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        path: &str,
        query: &[(&str, String)],
        deadline: Option<Duration>,
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TmdbError::Configuration(format!("invalid request path {path}: {e}")))?;

        let request = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&[("language", self.language.as_str())])
            .query(query);
        let request = credential.apply(request);

        tracing::debug!(path, ?deadline, "TMDB API request");

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, TmdbError>((status, body))
        };

        let outcome = match deadline {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .unwrap_or(Err(TmdbError::Timeout { after: limit })),
            None => exchange.await,
        };

        outcome
            .and_then(|(status, body)| decode_response(status, &body))
            .inspect_err(|err| tracing::warn!(path, error = %err, "TMDB API request failed"))
    }
}

/// Maps the status and decodes the body of a completed exchange.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        let message = serde_json::from_str::<TmdbErrorResponse>(body)
            .ok()
            .map(|e| e.status_message);
        return Err(TmdbError::from_status(status, message));
    }

    if body.trim().is_empty() {
        return Err(TmdbError::MalformedResponse {
            reason: String::from("empty body"),
        });
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| TmdbError::MalformedResponse {
            reason: format!("invalid JSON: {e}"),
        })?;

    if !value.is_object() {
        return Err(TmdbError::MalformedResponse {
            reason: String::from("expected a JSON object"),
        });
    }

    serde_json::from_value(value).map_err(|e| TmdbError::MalformedResponse {
        reason: format!("unexpected shape: {e}"),
    })
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn search_movies(&self, query: &SearchQuery) -> Result<ApiResult<MovieSummary>> {
        let credential = self.credential()?;

        if query.is_blank() {
            tracing::warn!("search query is empty; skipping request");
            return Ok(ApiResult::empty());
        }

        self.get_json(
            credential,
            "search/movie",
            &query.to_query(),
            Some(self.search_timeout),
        )
        .await
    }

    #[instrument(skip_all)]
    async fn list_movies(&self, request: &ListingRequest) -> Result<ApiResult<MovieSummary>> {
        let credential = self.credential()?;
        self.get_json(
            credential,
            request.kind.path(),
            &request.to_query(),
            self.listing_timeout,
        )
        .await
    }

    async fn list_popular_movies(&self, page: u32) -> Result<ApiResult<MovieSummary>> {
        self.list_movies(&ListingRequest::new(ListingKind::Popular).page(page))
            .await
    }

    async fn list_top_rated(&self, page: u32) -> Result<ApiResult<MovieSummary>> {
        self.list_movies(&ListingRequest::new(ListingKind::TopRated).page(page))
            .await
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        let credential = self.credential()?;
        let path = format!("movie/{movie_id}");
        let query = [("append_to_response", String::from(DETAILS_APPEND))];
        self.get_json(credential, &path, &query, None).await
    }
}
