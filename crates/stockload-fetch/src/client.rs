//! HTTP client for the daily series endpoint.

use reqwest::Client;
use std::time::Duration;
use stockload_types::{
    Credential, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, PipelineConfig, RawSeriesResponse, Symbol,
};
use thiserror::Error;

use crate::url::{redacted, series_url};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint the request is sent to.
    pub endpoint: String,
    /// API credential appended as `apikey`.
    pub credential: Credential,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credential: Credential::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("stockload/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&PipelineConfig> for ClientConfig {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            credential: config.credential.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            ..Self::default()
        }
    }
}

/// Errors that can occur while fetching a series.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status.
    #[error("Server returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The body is not valid JSON.
    #[error("Response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The endpoint could not be combined into a request URL.
    #[error("Invalid endpoint URL {endpoint}: {source}")]
    InvalidUrl {
        /// Configured endpoint.
        endpoint: String,
        /// Parse failure.
        #[source]
        source: ::url::ParseError,
    },

    /// A saved response could not be read.
    #[error("Failed to read saved response: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP client that fetches one raw daily series per call.
///
/// No retries: a failed request fails the run.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    config: ClientConfig,
}

impl FetchClient {
    /// Creates a new fetch client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client from a pipeline configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_pipeline(config: &PipelineConfig) -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::from(config))
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches and decodes the daily series for `symbol`.
    ///
    /// The body is returned without any validation beyond JSON decoding.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-success status, or a body
    /// that is not JSON.
    pub async fn fetch(&self, symbol: &Symbol) -> Result<RawSeriesResponse, FetchError> {
        let url = series_url(&self.config.endpoint, symbol, &self.config.credential).map_err(
            |source| FetchError::InvalidUrl {
                endpoint: self.config.endpoint.clone(),
                source,
            },
        )?;
        tracing::debug!(url = %redacted(&url), "requesting daily series");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let raw = RawSeriesResponse::from_slice(&body)?;
        tracing::info!(%symbol, bytes = body.len(), "fetched daily series");
        Ok(raw)
    }
}
