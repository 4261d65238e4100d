use crate::error::ChainError;
use crate::fetch::{Fetcher, join_url};

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::pin::Pin;

/// Blocking HTTP fetcher built on `ureq`.
///
/// Locations are appended to `base_url`. Any non-2xx status is a fetch error.
pub struct HttpFetcher {
    agent: ureq::Agent,
    base_url: String,
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpFetcher {
    pub fn new(base_url: String) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, ChainError> {
        let url = join_url(&self.base_url, location)?;
        tracing::debug!(%url, "GET");

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| ChainError::fetch(location, format!("request to {url} failed: {e}")))?;

        response
            .into_body()
            .read_to_vec()
            .map_err(|e| ChainError::fetch(location, format!("failed to read body: {e}")))
    }
}

/// Async HTTP fetcher built on `reqwest`.
///
/// Requires the `async` feature flag.
#[cfg(feature = "async")]
pub struct AsyncHttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "async")]
impl std::fmt::Debug for AsyncHttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncHttpFetcher")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(feature = "async")]
impl AsyncHttpFetcher {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Use an existing client, e.g. one with custom timeouts or proxies.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(feature = "async")]
impl crate::fetch::AsyncFetcher for AsyncHttpFetcher {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, ChainError>> + Send + 'a>> {
        Box::pin(async move {
            let url = join_url(&self.base_url, location)?;
            tracing::debug!(%url, "GET");

            let response = self.client.get(&url).send().await.map_err(|e| {
                ChainError::fetch(location, format!("request to {url} failed: {e}"))
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(ChainError::fetch(location, format!("HTTP status {status}")));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| ChainError::fetch(location, format!("failed to read body: {e}")))?;

            Ok(body.to_vec())
        })
    }
}
