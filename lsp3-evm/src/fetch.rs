//! HTTP retrieval of profile documents.

use std::time::Duration;

use reqwest::Client;

use crate::error::ResolveError;

/// Fetches raw document bytes over HTTP(S).
///
/// One GET per call. Non-success statuses and transport failures are
/// reported, never retried.
#[derive(Clone, Debug, Default)]
pub struct MetadataFetcher {
    client: Client,
    timeout: Option<Duration>,
}

impl MetadataFetcher {
    /// Creates a fetcher around an existing client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Sends `GET url` and returns the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Http`] on transport failure and
    /// [`ResolveError::HttpStatus`] on a non-success status.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "lsp3.fetch", skip(self), err)
    )]
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, ResolveError> {
        let mut req = self.client.get(url);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let http_error = |source| ResolveError::Http {
            url: url.to_owned(),
            source,
        };
        let response = req.send().await.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::HttpStatus {
                url: url.to_owned(),
                status,
            });
        }
        let body = response.bytes().await.map_err(http_error)?;
        Ok(body.to_vec())
    }
}
