//! HTTP client for downloading the remote world catalog.
//!
//! One synchronization performs exactly one GET. There is no retry or
//! backoff here: a failed round trip is reported as-is and the caller
//! decides whether the cached copy can stand in.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::ApiError;

/// Source of raw catalog payloads.
///
/// The synchronizer needs nothing beyond "one GET, body or failure", so
/// tests stand in with canned implementations.
pub trait CatalogSource {
    /// Fetch the raw response body for `url`.
    ///
    /// `Ok` carries the body of any success-status response, even an
    /// empty or malformed one - classifying the payload is the parser's
    /// concern, not the transport's.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ApiError>> + Send;
}

/// Catalog downloader backed by reqwest.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Create a client with the given request timeout.
    /// A timed-out request surfaces as a plain network error.
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch(&self, url: &str) -> Result<String, ApiError> {
        debug!(url, "Fetching catalog");

        let response = self.client.get(url).send().await?;
        let response = Self::check_response(response).await?;

        let body = response.text().await?;
        debug!(bytes = body.len(), "Catalog response received");
        Ok(body)
    }
}
