// src/models/response.rs
// DOCUMENTATION: Result of a Places API call
// PURPOSE: Carry either the decoded JSON document or the raw body

use crate::errors::PlacesError;
use crate::models::search::ResultFormat;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Body returned by the API
/// DOCUMENTATION: JSON responses are decoded into a `serde_json::Value`;
/// anything else (XML, unknown formats) is returned untouched
#[derive(Debug, Clone, PartialEq)]
pub enum PlacesResponse {
    Json(Value),
    Raw(String),
}

impl PlacesResponse {
    /// Decode `body` according to the requested format
    pub fn decode(format: &ResultFormat, body: String) -> Result<Self, PlacesError> {
        if !format.is_json() {
            return Ok(PlacesResponse::Raw(body));
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(PlacesResponse::Json(value)),
            Err(source) => {
                log::error!("Failed to parse Google Places response: {}", source);
                Err(PlacesError::Decode { body, source })
            }
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            PlacesResponse::Json(value) => Some(value),
            PlacesResponse::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            PlacesResponse::Raw(body) => Some(body),
            PlacesResponse::Json(_) => None,
        }
    }

    /// API status string ("OK", "ZERO_RESULTS", "REQUEST_DENIED", ...)
    pub fn status(&self) -> Option<&str> {
        self.as_json()?.get("status")?.as_str()
    }

    /// Opaque token for the following page, when the API returned one
    pub fn next_page_token(&self) -> Option<&str> {
        self.as_json()?.get("next_page_token")?.as_str()
    }

    /// Deserialize a JSON response into a caller-defined type
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, PlacesError> {
        match self {
            PlacesResponse::Json(value) => {
                serde_json::from_value(value.clone()).map_err(|source| PlacesError::Decode {
                    body: value.to_string(),
                    source,
                })
            }
            PlacesResponse::Raw(body) => {
                serde_json::from_str(body).map_err(|source| PlacesError::Decode {
                    body: body.clone(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_json_body_is_decoded() {
        let body = r#"{"status":"OK","results":[],"next_page_token":"CpQ"}"#.to_string();
        let response = PlacesResponse::decode(&ResultFormat::Json, body).unwrap();

        assert_eq!(response.status(), Some("OK"));
        assert_eq!(response.next_page_token(), Some("CpQ"));
    }

    #[test]
    fn test_xml_body_is_passed_through() {
        let body = "<PlaceSearchResponse><status>OK</status></PlaceSearchResponse>".to_string();
        let response = PlacesResponse::decode(&ResultFormat::Xml, body.clone()).unwrap();

        assert_eq!(response, PlacesResponse::Raw(body));
        assert!(response.status().is_none());
    }

    #[test]
    fn test_malformed_json_keeps_body() {
        let err = PlacesResponse::decode(&ResultFormat::Json, "<html>".to_string()).unwrap_err();

        match err {
            PlacesError::Decode { body, .. } => assert_eq!(body, "<html>"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_into_caller_type() {
        #[derive(Deserialize)]
        struct Page {
            status: String,
            results: Vec<Value>,
        }

        let response = PlacesResponse::Json(serde_json::json!({
            "status": "ZERO_RESULTS",
            "results": []
        }));
        let page: Page = response.deserialize().unwrap();

        assert_eq!(page.status, "ZERO_RESULTS");
        assert!(page.results.is_empty());
    }
}
