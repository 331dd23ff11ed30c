// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod google_places_client;
pub mod query_builder;
pub mod transport;

pub use google_places_client::*;
pub use query_builder::*;
pub use transport::{HttpResponse, ReqwestTransport, Transport};
