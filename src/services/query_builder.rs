// src/services/query_builder.rs
// DOCUMENTATION: Stateful query builder over the Places client
// PURPOSE: Setter-style API where each search mutates fields and fires at once

use crate::errors::PlacesError;
use crate::models::request::render_query;
use crate::models::{
    ExtraParams, PlacesRequest, PlacesResponse, ResultFormat, SearchKind, SearchTarget,
    DEFAULT_LANGUAGE,
};
use crate::services::google_places_client::PlacesClient;
use crate::services::transport::{ReqwestTransport, Transport};
use std::collections::HashMap;

/// Settings key holding the API key in the framework-style constructor
pub const API_KEY_SETTING: &str = "apiKey";

/// Mutable request fields
/// DOCUMENTATION: Fields not used by the active kind stay in the state but
/// are left out of the query string
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState {
    pub kind: Option<SearchKind>,
    pub language: String,
    pub sensor: bool,
    pub result_format: ResultFormat,
    pub query: String,
    pub location: String,
    pub radius: u32,
    pub next_page_token: String,
    pub details_reference: String,
    pub extra_params: ExtraParams,
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            kind: None,
            language: DEFAULT_LANGUAGE.to_string(),
            sensor: false,
            result_format: ResultFormat::default(),
            query: String::new(),
            location: String::new(),
            radius: 0,
            next_page_token: String::new(),
            details_reference: String::new(),
            extra_params: ExtraParams::new(),
        }
    }
}

impl RequestState {
    /// Fields of the active kind, if any
    pub fn target(&self) -> Option<SearchTarget> {
        let target = match self.kind? {
            SearchKind::Nearby => SearchTarget::Nearby {
                location: self.location.clone(),
                radius: self.radius,
            },
            SearchKind::Radar => SearchTarget::Radar {
                location: self.location.clone(),
                radius: self.radius,
            },
            SearchKind::Text => SearchTarget::Text {
                query: self.query.clone(),
            },
            SearchKind::NextPage => SearchTarget::NextPage {
                page_token: self.next_page_token.clone(),
            },
            SearchKind::Details => SearchTarget::Details {
                reference: self.details_reference.clone(),
            },
        };
        Some(target)
    }

    /// Snapshot the state into an immutable request
    pub fn to_request(&self) -> Option<PlacesRequest> {
        let request = PlacesRequest::new(self.target()?)
            .with_sensor(self.sensor)
            .with_language(self.language.clone())
            .with_result_format(self.result_format.clone())
            .with_extra_params(self.extra_params.clone());
        Some(request)
    }
}

/// Stateful Google Places query builder
/// DOCUMENTATION: One instance is one in-flight logical request. Search
/// methods take `&mut self`, and state set for one search (extra params,
/// sensor, format) carries over into the next until overwritten.
pub struct PlacesQueryBuilder<T = ReqwestTransport> {
    client: PlacesClient<T>,
    state: RequestState,
}

impl PlacesQueryBuilder<ReqwestTransport> {
    /// Create builder from a bare API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(PlacesClient::new(api_key))
    }

    /// Create builder from a framework settings map
    /// DOCUMENTATION: Reads the key stored under "apiKey"; the key format
    /// itself is not checked
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self, PlacesError> {
        let api_key = settings
            .get(API_KEY_SETTING)
            .ok_or(PlacesError::MissingApiKey)?;
        Ok(Self::new(api_key.clone()))
    }
}

impl<T: Transport> PlacesQueryBuilder<T> {
    pub fn with_client(client: PlacesClient<T>) -> Self {
        Self {
            client,
            state: RequestState::default(),
        }
    }

    pub fn client(&self) -> &PlacesClient<T> {
        &self.client
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub async fn nearby_search(
        &mut self,
        location: impl Into<String>,
        radius: u32,
    ) -> Result<PlacesResponse, PlacesError> {
        self.state.kind = Some(SearchKind::Nearby);
        self.set_location(location);
        self.set_radius(radius);
        self.fire().await
    }

    pub async fn radar_search(
        &mut self,
        location: impl Into<String>,
        radius: u32,
    ) -> Result<PlacesResponse, PlacesError> {
        self.state.kind = Some(SearchKind::Radar);
        self.set_location(location);
        self.set_radius(radius);
        self.fire().await
    }

    /// Text search, e.g. "hotels in New York"
    pub async fn text_search(
        &mut self,
        query: impl Into<String>,
    ) -> Result<PlacesResponse, PlacesError> {
        self.state.kind = Some(SearchKind::Text);
        self.set_query(query);
        self.fire().await
    }

    /// Next results page, from the previous response's "next_page_token"
    pub async fn next_page_search(
        &mut self,
        next_page_token: impl Into<String>,
    ) -> Result<PlacesResponse, PlacesError> {
        self.state.kind = Some(SearchKind::NextPage);
        self.set_next_page_token(next_page_token);
        self.fire().await
    }

    /// Extra details by the "reference" of a search result
    pub async fn details_search(
        &mut self,
        reference: impl Into<String>,
    ) -> Result<PlacesResponse, PlacesError> {
        self.state.kind = Some(SearchKind::Details);
        self.set_details_reference(reference);
        self.fire().await
    }

    async fn fire(&self) -> Result<PlacesResponse, PlacesError> {
        // kind is always set by the caller
        let request = self.state.to_request().ok_or_else(|| {
            PlacesError::InvalidInput("no search kind selected".to_string())
        })?;
        self.client.execute(&request).await
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.state.language = language.into();
    }

    pub fn set_sensor(&mut self, sensor: bool) {
        self.state.sensor = sensor;
    }

    /// "lat,lng"
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.state.location = location.into();
    }

    /// Meters; the API caps this at 50000
    pub fn set_radius(&mut self, radius: u32) {
        self.state.radius = radius;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    pub fn set_results_format(&mut self, format: impl Into<ResultFormat>) {
        self.state.result_format = format.into();
    }

    pub fn set_next_page_token(&mut self, next_page_token: impl Into<String>) {
        self.state.next_page_token = next_page_token.into();
    }

    pub fn set_details_reference(&mut self, reference: impl Into<String>) {
        self.state.details_reference = reference.into();
    }

    /// Select the kind rendered by `query_string`/`request_url` without firing
    pub fn set_search_kind(&mut self, kind: SearchKind) {
        self.state.kind = Some(kind);
    }

    /// Add an optional parameter; a repeated name overwrites the earlier value
    pub fn add_extra_param(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), PlacesError> {
        self.state.extra_params.insert(name, value)
    }

    /// Current state as an immutable request, `None` before any kind is set
    pub fn to_request(&self) -> Option<PlacesRequest> {
        self.state.to_request()
    }

    /// Query string for the current state
    pub fn query_string(&self) -> String {
        render_query(
            self.client.get_api_key(),
            self.state.sensor,
            self.state.target().as_ref(),
            &self.state.extra_params,
            self.client.encoding(),
        )
    }

    /// Request URL for the current state
    pub fn request_url(&self) -> String {
        let params = self.query_string();
        self.client
            .compose_url(self.state.kind, self.state.result_format.as_str(), &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;
    use crate::services::transport::mock::RecordingTransport;

    fn builder(transport: RecordingTransport) -> PlacesQueryBuilder<RecordingTransport> {
        PlacesQueryBuilder::with_client(PlacesClient::with_transport("ABC", transport))
    }

    fn last_url(builder: &PlacesQueryBuilder<RecordingTransport>) -> String {
        builder.client().transport().last_url().unwrap()
    }

    #[test]
    fn test_defaults() {
        let builder = builder(RecordingTransport::new());
        let state = builder.state();

        assert_eq!(state.language, "en");
        assert!(!state.sensor);
        assert_eq!(state.result_format, ResultFormat::Json);
        assert!(state.kind.is_none());
        assert!(builder.to_request().is_none());
    }

    #[test]
    fn test_query_without_kind_has_only_key_sensor_and_extras() {
        let mut builder = builder(RecordingTransport::new());
        builder.set_query("ignored");
        builder.add_extra_param("keyword", "tapas").unwrap();

        assert_eq!(builder.query_string(), "key=ABC&sensor=false&keyword=tapas");
    }

    #[tokio::test]
    async fn test_nearby_search_url() {
        let mut builder = builder(RecordingTransport::new());

        builder.nearby_search("40.7,-74.0", 1500).await.unwrap();

        assert_eq!(
            last_url(&builder),
            "https://maps.googleapis.com/maps/api/place/nearbysearch/json?key=ABC&sensor=false&location=40.7,-74.0&radius=1500"
        );
    }

    #[tokio::test]
    async fn test_text_search_url() {
        let mut builder = builder(RecordingTransport::new());

        builder.text_search("pizza in Rome").await.unwrap();

        assert_eq!(
            last_url(&builder),
            "https://maps.googleapis.com/maps/api/place/textsearch/json?key=ABC&sensor=false&query=pizza in Rome"
        );
    }

    #[tokio::test]
    async fn test_next_page_search_after_text_search() {
        let mut builder = builder(RecordingTransport::new());

        builder.text_search("pizza").await.unwrap();
        builder.next_page_search("NEXT").await.unwrap();

        let url = last_url(&builder);
        assert!(url.contains("/textsearch/json?"));
        assert!(url.ends_with("key=ABC&sensor=false&pagetoken=NEXT"));
        assert!(!url.contains("query="));
        assert_eq!(builder.state().kind, Some(SearchKind::NextPage));
    }

    #[tokio::test]
    async fn test_radar_and_nearby_share_params() {
        let mut builder = builder(RecordingTransport::new());

        builder.nearby_search("1,2", 50).await.unwrap();
        builder.radar_search("1,2", 50).await.unwrap();

        let urls = builder.client().transport().urls();
        assert_eq!(urls[0].replace("nearbysearch", "radarsearch"), urls[1]);
    }

    #[tokio::test]
    async fn test_details_search_with_extra_params() {
        let mut builder = builder(RecordingTransport::new());
        builder.add_extra_param("type", "restaurant").unwrap();
        builder.add_extra_param("type", "cafe").unwrap();
        builder.set_sensor(true);

        builder.details_search("REF").await.unwrap();

        assert_eq!(
            last_url(&builder),
            "https://maps.googleapis.com/maps/api/place/details/json?key=ABC&sensor=true&reference=REF&type=cafe"
        );
    }

    #[tokio::test]
    async fn test_state_carries_over_between_searches() {
        let mut builder = builder(RecordingTransport::new());
        builder.add_extra_param("keyword", "vegan").unwrap();

        builder.text_search("food").await.unwrap();
        builder.nearby_search("1,2", 10).await.unwrap();

        for url in builder.client().transport().urls() {
            assert!(url.ends_with("&keyword=vegan"), "missing extra param: {}", url);
        }
        assert_eq!(builder.state().query, "food");
    }

    #[tokio::test]
    async fn test_xml_format_returns_raw_body() {
        let body = "<PlaceSearchResponse><status>OK</status></PlaceSearchResponse>";
        let mut builder = builder(RecordingTransport::new().respond(200, body));
        builder.set_results_format("xml");

        let response = builder.text_search("pizza").await.unwrap();

        assert_eq!(response, PlacesResponse::Raw(body.to_string()));
        assert!(last_url(&builder).contains("/textsearch/xml?"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let mut builder = builder(RecordingTransport::new().respond(200, "{\"status\":"));

        let err = builder.text_search("pizza").await.unwrap_err();

        match err {
            PlacesError::Decode { body, .. } => assert_eq!(body, "{\"status\":"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_denied_request_is_transport_error() {
        let mut builder = builder(RecordingTransport::new().respond(403, "forbidden"));

        let err = builder.nearby_search("1,2", 10).await.unwrap_err();

        assert!(matches!(
            err,
            PlacesError::Transport(TransportError::Status { status: 403, .. })
        ));
    }

    #[test]
    fn test_render_is_pure() {
        let mut builder = builder(RecordingTransport::new());
        builder.set_search_kind(SearchKind::NextPage);
        builder.set_next_page_token("T");
        builder.add_extra_param("language", "es").unwrap();

        let first = builder.request_url();
        let second = builder.request_url();

        assert_eq!(first, second);
        assert!(first.contains("/textsearch/json?key=ABC&sensor=false&pagetoken=T&language=es"));
        assert_eq!(builder.state().kind, Some(SearchKind::NextPage));
    }

    #[test]
    fn test_to_request_snapshot() {
        let mut builder = builder(RecordingTransport::new());
        builder.set_search_kind(SearchKind::Radar);
        builder.set_location("1,2");
        builder.set_radius(700);
        builder.set_language("it");

        let request = builder.to_request().unwrap();
        builder.set_radius(1);

        assert_eq!(request.kind(), SearchKind::Radar);
        assert_eq!(request.language(), "it");
        assert_eq!(
            request.target(),
            &SearchTarget::Radar {
                location: "1,2".to_string(),
                radius: 700,
            }
        );
    }

    #[test]
    fn test_from_settings_reads_api_key() {
        let mut settings = HashMap::new();
        settings.insert("apiKey".to_string(), "XYZ".to_string());

        let builder = PlacesQueryBuilder::from_settings(&settings).unwrap();

        assert_eq!(builder.client().get_api_key(), "XYZ");
    }

    #[test]
    fn test_from_settings_without_key_fails() {
        let settings = HashMap::new();

        let result = PlacesQueryBuilder::from_settings(&settings);

        assert!(matches!(result, Err(PlacesError::MissingApiKey)));
    }

    #[test]
    fn test_new_and_from_settings_agree() {
        let mut settings = HashMap::new();
        settings.insert("apiKey".to_string(), "K".to_string());

        let mut a = PlacesQueryBuilder::new("K");
        let mut b = PlacesQueryBuilder::from_settings(&settings).unwrap();
        a.set_search_kind(SearchKind::Text);
        b.set_search_kind(SearchKind::Text);

        assert_eq!(a.request_url(), b.request_url());
    }
}
