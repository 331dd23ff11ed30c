// src/services/transport.rs
// DOCUMENTATION: HTTP GET capability used by the Places client
// PURPOSE: Keep the network call behind a seam so it can be swapped in tests

use crate::errors::TransportError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Status and body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// URL in, status and body out
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Production transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        match Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS)) {
            Ok(transport) => transport,
            Err(e) => {
                log::warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                Self::from_client(Client::new())
            }
        }
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            let e = TransportError::from(e);
            log::error!("Google Places API request failed: {}", e);
            e
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
