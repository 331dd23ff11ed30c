// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Compose request URLs and run one GET per request

use crate::config::Config;
use crate::errors::{PlacesError, TransportError};
use crate::models::{ParamEncoding, PlacesRequest, PlacesResponse, SearchKind};
use crate::services::transport::{ReqwestTransport, Transport};
use std::time::Duration;

/// Base URL of the Places web API
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Google Places API client
/// DOCUMENTATION: Holds only the API key, base URL, encoding mode and
/// transport. Every call takes its own `PlacesRequest`, so a client can be
/// shared freely.
pub struct PlacesClient<T = ReqwestTransport> {
    /// HTTP transport for making requests
    transport: T,
    /// Google Places API key
    api_key: String,
    /// Base URL for Google Places API
    base_url: String,
    /// How parameter values are written into the query string
    encoding: ParamEncoding,
}

impl PlacesClient<ReqwestTransport> {
    /// Create new Google Places API client
    /// DOCUMENTATION: Uses the reqwest transport with the default timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(api_key, ReqwestTransport::default())
    }

    /// Create client from application configuration
    pub fn from_config(config: &Config) -> Result<Self, PlacesError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.http_timeout_secs))?;
        let encoding = if config.percent_encode {
            ParamEncoding::Percent
        } else {
            ParamEncoding::Literal
        };

        Ok(Self::with_transport(config.google_places_api_key.clone(), transport)
            .with_base_url(config.api_url.clone())
            .with_encoding(encoding))
    }
}

impl<T: Transport> PlacesClient<T> {
    /// Create client over any transport
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            encoding: ParamEncoding::default(),
        }
    }

    /// Point the client at another endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_encoding(mut self, encoding: ParamEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Get API key
    pub fn get_api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn encoding(&self) -> ParamEncoding {
        self.encoding
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Query string for `request`, without the leading `?`
    pub fn query_string(&self, request: &PlacesRequest) -> String {
        request.render_query(&self.api_key, self.encoding)
    }

    /// Full request URL
    /// DOCUMENTATION: `<base>/<segment>/<format>?<query>`; next-page
    /// requests resolve to the `textsearch` segment here
    pub fn request_url(&self, request: &PlacesRequest) -> String {
        let params = self.query_string(request);
        self.compose_url(Some(request.kind()), request.result_format().as_str(), &params)
    }

    pub(crate) fn compose_url(
        &self,
        kind: Option<SearchKind>,
        format: &str,
        params: &str,
    ) -> String {
        let segment = kind.map(|k| k.effective_path_segment()).unwrap_or_default();
        format!("{}/{}/{}?{}", self.base_url, segment, format, params)
    }

    /// Run one request
    /// DOCUMENTATION: Issues a single GET, no retries. Non-success statuses
    /// become `TransportError::Status`; JSON bodies are decoded, other
    /// formats are returned raw.
    pub async fn execute(&self, request: &PlacesRequest) -> Result<PlacesResponse, PlacesError> {
        let url = self.request_url(request);

        log::debug!(
            "Google Places {} request (format={})",
            request.kind(),
            request.result_format()
        );

        let response = self.transport.get(&url).await?;

        if !response.is_success() {
            log::error!(
                "Google Places API error {}: {}",
                response.status,
                response.body
            );
            return Err(TransportError::Status {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        PlacesResponse::decode(request.result_format(), response.body)
    }

    /// Nearby search for places
    ///
    /// # Arguments
    /// * `location` - "lat,lng" center point
    /// * `radius` - Search radius in meters (max 50000, not checked here)
    pub async fn nearby_search(
        &self,
        location: &str,
        radius: u32,
    ) -> Result<PlacesResponse, PlacesError> {
        self.execute(&PlacesRequest::nearby(location, radius)).await
    }

    pub async fn radar_search(
        &self,
        location: &str,
        radius: u32,
    ) -> Result<PlacesResponse, PlacesError> {
        self.execute(&PlacesRequest::radar(location, radius)).await
    }

    pub async fn text_search(&self, query: &str) -> Result<PlacesResponse, PlacesError> {
        self.execute(&PlacesRequest::text(query)).await
    }

    pub async fn next_page_search(&self, page_token: &str) -> Result<PlacesResponse, PlacesError> {
        self.execute(&PlacesRequest::next_page(page_token)).await
    }

    /// Get detailed information about a place from its result `reference`
    pub async fn details_search(&self, reference: &str) -> Result<PlacesResponse, PlacesError> {
        self.execute(&PlacesRequest::details(reference)).await
    }
}
