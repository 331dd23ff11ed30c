// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export request and response types

pub mod request;
pub mod response;
pub mod search;

pub use request::*;
pub use response::*;
pub use search::*;
