//! HTTP client for the Open Brewery DB REST API.
//!
//! Wraps `reqwest` with typed status handling, transport-level retries, and
//! JSON decoding into [`RawBrewery`]. Implements [`BreweryTransport`] so the
//! catalog can use it without knowing anything about HTTP.

use std::time::Duration;

use async_trait::async_trait;
use brewdb_core::{AppConfig, BreweryTransport, RawBrewery};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::retry::RetryPolicy;

/// Client for the Open Brewery DB API.
///
/// Use [`OpenBreweryClient::from_config`] in the application and
/// [`OpenBreweryClient::with_base_url`] to point at a mock server in tests.
pub struct OpenBreweryClient {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl OpenBreweryClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`OpenBreweryClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::build(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            RetryPolicy::from_config(config),
        )
    }

    /// Creates a client with a custom base URL and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for transient errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        Self::build(
            base_url,
            timeout_secs,
            user_agent,
            RetryPolicy::new(max_retries, Duration::from_millis(backoff_base_ms)),
        )
    }

    fn build(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so endpoint segments append to the base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            retry,
        })
    }

    /// Fetches one page of breweries from `v1/breweries`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] / [`ClientError::RateLimited`] on a
    ///   non-2xx status, after retries for transient ones.
    /// - [`ClientError::Deserialize`] if the body is not a brewery array.
    pub async fn list_breweries(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawBrewery>, ClientError> {
        let page = page.to_string();
        let per_page = per_page.to_string();
        let url = self.build_url(
            &["v1", "breweries"],
            &[("page", &page), ("per_page", &per_page)],
        );
        self.get_json(url).await
    }

    /// Fetches up to 15 name matches from `v1/breweries/autocomplete`.
    ///
    /// # Errors
    ///
    /// Same as [`OpenBreweryClient::list_breweries`].
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<RawBrewery>, ClientError> {
        let url = self.build_url(&["v1", "breweries", "autocomplete"], &[("query", query)]);
        self.get_json(url).await
    }

    /// Fetches a single brewery from `v1/breweries/{id}`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] if no brewery has this id.
    /// - Otherwise the same as [`OpenBreweryClient::list_breweries`].
    pub async fn get_brewery(&self, id: &str) -> Result<RawBrewery, ClientError> {
        let url = self.build_url(&["v1", "breweries", id], &[]);
        self.get_json(url).await
    }

    /// Builds the request URL from path segments and query parameters.
    ///
    /// Segments are percent-encoded individually, so an id containing `/`
    /// stays a single segment.
    fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    async fn get_json<T>(&self, url: Url) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.retry
            .run(|| {
                let url = url.clone();
                async move { self.request_json::<T>(url).await }
            })
            .await
    }

    /// Sends a single GET request and decodes the body.
    ///
    /// # Errors
    ///
    /// Maps 404 to [`ClientError::NotFound`], 429 to
    /// [`ClientError::RateLimited`], any other non-2xx status to
    /// [`ClientError::UnexpectedStatus`].
    async fn request_json<T>(&self, url: Url) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(%url, "Open Brewery DB request");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_string(),
            });
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl BreweryTransport for OpenBreweryClient {
    type Error = ClientError;

    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<RawBrewery>, ClientError> {
        self.list_breweries(page, per_page).await
    }

    async fn fetch_autocomplete(&self, query: &str) -> Result<Vec<RawBrewery>, ClientError> {
        self.autocomplete(query).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<RawBrewery, ClientError> {
        self.get_brewery(id).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
