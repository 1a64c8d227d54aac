//! PokeAPI Module
//!
//! Typed, cache-aware access to the PokeAPI resources the REPL uses.
//!
//! # Endpoints
//! - `GET /location-area/` - paginated list of location areas
//! - `GET /location-area/{name}` - encounters in one area
//! - `GET /pokemon/{name}` - a single pokemon

mod client;
pub mod types;

pub use client::Client;
pub use types::{LocationArea, LocationAreaList, NamedResource, Pokemon};
