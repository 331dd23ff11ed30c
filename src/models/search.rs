// src/models/search.rs
// DOCUMENTATION: Search kinds and result formats of the Places web API
// PURPOSE: Map each request kind to its URL path segment

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The five supported Places API operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Nearby,
    Radar,
    Text,
    Details,
    NextPage,
}

impl SearchKind {
    /// Path segment registered for this kind
    /// `next_page` is never sent; see `effective_path_segment`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            SearchKind::Nearby => "nearbysearch",
            SearchKind::Radar => "radarsearch",
            SearchKind::Text => "textsearch",
            SearchKind::Details => "details",
            SearchKind::NextPage => "next_page",
        }
    }

    /// Path segment actually used in the request URL
    /// DOCUMENTATION: Next-page requests go to the text search endpoint,
    /// driven by `pagetoken` instead of `query`
    pub fn effective_path_segment(&self) -> &'static str {
        match self {
            SearchKind::NextPage => SearchKind::Text.path_segment(),
            other => other.path_segment(),
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Response format requested from the API
/// DOCUMENTATION: Unknown formats are kept verbatim and passed through,
/// the API is the one to reject them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultFormat {
    #[default]
    Json,
    Xml,
    Other(String),
}

impl ResultFormat {
    pub fn as_str(&self) -> &str {
        match self {
            ResultFormat::Json => "json",
            ResultFormat::Xml => "xml",
            ResultFormat::Other(s) => s,
        }
    }

    /// Whether the response body should be decoded as JSON
    pub fn is_json(&self) -> bool {
        matches!(self, ResultFormat::Json)
    }
}

impl FromStr for ResultFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "json" => ResultFormat::Json,
            "xml" => ResultFormat::Xml,
            other => ResultFormat::Other(other.to_string()),
        })
    }
}

impl From<&str> for ResultFormat {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(format) => format,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
