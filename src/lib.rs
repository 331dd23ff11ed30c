// src/lib.rs
// DOCUMENTATION: Crate root
// PURPOSE: Client for the Google Places web API (nearby, radar, text,
// next-page and details requests)
//
// ```ignore
// use places_query::PlacesQueryBuilder;
//
// async fn search() -> Result<(), places_query::PlacesError> {
//     let mut places = PlacesQueryBuilder::new("API_KEY");
//     places.add_extra_param("type", "restaurant")?;
//
//     let page = places.nearby_search("40.7,-74.0", 1500).await?;
//     if let Some(token) = page.next_page_token() {
//         let token = token.to_string();
//         places.next_page_search(token).await?;
//     }
//     Ok(())
// }
// ```

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::Config;
pub use errors::{PlacesError, TransportError};
pub use models::{
    ExtraParams, ParamEncoding, PlacesRequest, PlacesResponse, ResultFormat, SearchKind,
    SearchTarget,
};
pub use services::{
    HttpResponse, PlacesClient, PlacesQueryBuilder, RequestState, ReqwestTransport, Transport,
};
