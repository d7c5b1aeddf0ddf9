//! Client module for requesting random picks from the content server
//!
//! Wraps a reqwest client and collapses every failure of the request and
//! body-reading chain into a single `FetchError`.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while fetching a fragment
///
/// All variants are the same failure as far as the page is concerned; only
/// the message shown to the user differs.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-related errors (connection refused, DNS failure, timeout)
    #[error("Failed to connect to server: {0}")]
    NetworkError(String),

    /// Non-2xx status code
    #[error("Network response was not ok (status {0})")]
    HttpError(u16),

    /// Error reading response body
    #[error("Failed to read response body: {0}")]
    ResponseError(String),
}

/// Configuration of the underlying HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Total request timeout; `None` waits for the server indefinitely
    pub request_timeout: Option<Duration>,
    /// Timeout for establishing the connection
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: None,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the `/random` endpoint
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: Client,
    config: ClientConfig,
}

impl ContentClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET the given URL and return the full body as text
    pub async fn fetch_fragment(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::NetworkError("request timed out".to_string())
                } else if e.is_connect() {
                    FetchError::NetworkError(format!("could not reach {}", url))
                } else {
                    FetchError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpError(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::ResponseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.request_timeout.is_none());
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_client_with_config() {
        let config = ClientConfig {
            request_timeout: Some(Duration::from_secs(5)),
            connect_timeout: Duration::from_secs(2),
        };
        let client = ContentClient::with_config(config).unwrap();
        assert_eq!(client.config().request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(client.config().connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_fetch_error_messages() {
        let error = FetchError::HttpError(500);
        assert_eq!(error.to_string(), "Network response was not ok (status 500)");

        let error = FetchError::NetworkError("request timed out".to_string());
        assert_eq!(error.to_string(), "Failed to connect to server: request timed out");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_server_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ContentClient::new().unwrap();
        let url = format!("http://{}/random", addr);
        let err = client.fetch_fragment(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::NetworkError(_)));
        assert_eq!(
            err.to_string(),
            format!("Failed to connect to server: could not reach {}", url)
        );
    }
}
