//! MCP server for public transit route search
//!
//! Exposes `search_transit_route`, backed by the NAVITIME Route (totalnavi)
//! API on RapidAPI. Departure time defaults and the `+09:00` suffixing of
//! response times live in `types` and `normalize`.

pub mod config;
pub mod normalize;
pub mod server;
pub mod types;

pub use config::TransitConfig;
pub use server::{TransitRequest, TransitServer};
pub use types::{TransitArgs, TransitParams};
