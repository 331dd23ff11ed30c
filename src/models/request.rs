// src/models/request.rs
// DOCUMENTATION: Immutable request descriptors for the Places web API
// PURPOSE: Hold everything one logical request needs and render its query string

use crate::errors::PlacesError;
use crate::models::search::{ResultFormat, SearchKind};
use geo_types::Point;
use std::borrow::Cow;

/// Default response language
pub const DEFAULT_LANGUAGE: &str = "en";

/// How parameter values are written into the query string
/// DOCUMENTATION: `Literal` reproduces the historical wire format, where
/// spaces and commas are sent as-is. `Percent` encodes every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamEncoding {
    #[default]
    Literal,
    Percent,
}

impl ParamEncoding {
    pub fn encode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            ParamEncoding::Literal => Cow::Borrowed(value),
            ParamEncoding::Percent => urlencoding::encode(value),
        }
    }
}

/// Caller-supplied optional parameters (e.g. "type", "keyword")
/// DOCUMENTATION: Ordered mapping; insertion order is the render order.
/// Re-inserting a name overwrites the value and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraParams {
    entries: Vec<(String, String)>,
}

impl ExtraParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a parameter
    /// Names must be non-empty; values are not checked.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), PlacesError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PlacesError::InvalidInput(
                "extra parameter name must not be empty".to_string(),
            ));
        }

        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Kind of search plus the fields that kind renders
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTarget {
    Nearby { location: String, radius: u32 },
    Radar { location: String, radius: u32 },
    Text { query: String },
    NextPage { page_token: String },
    Details { reference: String },
}

impl SearchTarget {
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchTarget::Nearby { .. } => SearchKind::Nearby,
            SearchTarget::Radar { .. } => SearchKind::Radar,
            SearchTarget::Text { .. } => SearchKind::Text,
            SearchTarget::NextPage { .. } => SearchKind::NextPage,
            SearchTarget::Details { .. } => SearchKind::Details,
        }
    }

    /// Kind-specific parameters, in render order
    fn params(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        match self {
            SearchTarget::Nearby { location, radius }
            | SearchTarget::Radar { location, radius } => vec![
                ("location", Cow::Borrowed(location.as_str())),
                ("radius", Cow::Owned(radius.to_string())),
            ],
            SearchTarget::Text { query } => vec![("query", Cow::Borrowed(query.as_str()))],
            SearchTarget::NextPage { page_token } => {
                vec![("pagetoken", Cow::Borrowed(page_token.as_str()))]
            }
            SearchTarget::Details { reference } => {
                vec![("reference", Cow::Borrowed(reference.as_str()))]
            }
        }
    }
}

/// Format a point as the "lat,lng" string the API expects
/// `geo_types` points are (x = longitude, y = latitude).
pub fn location_from_point(point: &Point<f64>) -> String {
    format!("{},{}", point.y(), point.x())
}

/// Render a query string
/// DOCUMENTATION: `key` and `sensor` always come first, then the
/// kind-specific parameters (none when `target` is `None`), then extra
/// parameters in insertion order
pub(crate) fn render_query(
    api_key: &str,
    sensor: bool,
    target: Option<&SearchTarget>,
    extra_params: &ExtraParams,
    encoding: ParamEncoding,
) -> String {
    let mut params = format!("key={}&sensor={}", encoding.encode(api_key), sensor);

    if let Some(target) = target {
        for (name, value) in target.params() {
            push_param(&mut params, name, &value, encoding);
        }
    }

    for (name, value) in extra_params.iter() {
        push_param(&mut params, name, value, encoding);
    }

    params
}

fn push_param(params: &mut String, name: &str, value: &str, encoding: ParamEncoding) {
    params.push('&');
    params.push_str(name);
    params.push('=');
    params.push_str(&encoding.encode(value));
}

/// One logical Places API request
/// DOCUMENTATION: Built fresh for every call and never mutated by the
/// client, so nothing leaks from one request into the next
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesRequest {
    target: SearchTarget,
    sensor: bool,
    language: String,
    result_format: ResultFormat,
    extra_params: ExtraParams,
}

impl PlacesRequest {
    pub fn new(target: SearchTarget) -> Self {
        Self {
            target,
            sensor: false,
            language: DEFAULT_LANGUAGE.to_string(),
            result_format: ResultFormat::default(),
            extra_params: ExtraParams::new(),
        }
    }

    /// Nearby search around `location` ("lat,lng") within `radius` meters
    pub fn nearby(location: impl Into<String>, radius: u32) -> Self {
        Self::new(SearchTarget::Nearby {
            location: location.into(),
            radius,
        })
    }

    pub fn nearby_point(point: Point<f64>, radius: u32) -> Self {
        Self::nearby(location_from_point(&point), radius)
    }

    /// Radar search around `location` ("lat,lng") within `radius` meters
    pub fn radar(location: impl Into<String>, radius: u32) -> Self {
        Self::new(SearchTarget::Radar {
            location: location.into(),
            radius,
        })
    }

    pub fn radar_point(point: Point<f64>, radius: u32) -> Self {
        Self::radar(location_from_point(&point), radius)
    }

    /// Free-text search, e.g. "hotels in New York"
    pub fn text(query: impl Into<String>) -> Self {
        Self::new(SearchTarget::Text {
            query: query.into(),
        })
    }

    /// Next page of a previous search, from its `next_page_token`
    pub fn next_page(page_token: impl Into<String>) -> Self {
        Self::new(SearchTarget::NextPage {
            page_token: page_token.into(),
        })
    }

    /// Place details by the `reference` of a search result
    pub fn details(reference: impl Into<String>) -> Self {
        Self::new(SearchTarget::Details {
            reference: reference.into(),
        })
    }

    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_result_format(mut self, format: impl Into<ResultFormat>) -> Self {
        self.result_format = format.into();
        self
    }

    pub fn with_param(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, PlacesError> {
        self.extra_params.insert(name, value)?;
        Ok(self)
    }

    pub fn with_extra_params(mut self, extra_params: ExtraParams) -> Self {
        self.extra_params = extra_params;
        self
    }

    pub fn kind(&self) -> SearchKind {
        self.target.kind()
    }

    pub fn target(&self) -> &SearchTarget {
        &self.target
    }

    pub fn sensor(&self) -> bool {
        self.sensor
    }

    /// Requested language. Stored for callers; not sent on the wire.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn result_format(&self) -> &ResultFormat {
        &self.result_format
    }

    pub fn extra_params(&self) -> &ExtraParams {
        &self.extra_params
    }

    /// Query string for this request, without the leading `?`
    pub fn render_query(&self, api_key: &str, encoding: ParamEncoding) -> String {
        render_query(
            api_key,
            self.sensor,
            Some(&self.target),
            &self.extra_params,
            encoding,
        )
    }
}
