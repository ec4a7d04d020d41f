//! MCP server for Google Places
//!
//! Three tools over the Places web service: text search, place details, and
//! nearby search. Each is one GET with a fixed field list.

pub mod config;
pub mod server;
pub mod types;

pub use config::PlacesConfig;
pub use server::{PlacesRequest, PlacesServer};
pub use types::{LatLng, NearbySearchArgs, PlaceDetailsArgs, PlacesSearchArgs};
