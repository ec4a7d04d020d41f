//! Tool arguments and upstream query parameters for directions lookups.

use geo_mcp_shared::args::non_null;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Travel mode used when the caller does not pick one.
pub const DEFAULT_MODE: &str = "driving";

/// Input for the get_directions tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct DirectionsArgs {
    /// Starting point: an address, place name, or "lat,lng"
    pub origin: String,

    /// End point: an address, place name, or "lat,lng"
    pub destination: String,

    /// Travel mode: driving, walking, bicycling, or transit (default: driving)
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String")]
    pub mode: Option<String>,
}

/// Query string sent to `/directions/json`, minus the API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionsParams {
    pub origin: String,
    pub destination: String,
    /// `None` leaves the choice to the upstream default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl DirectionsArgs {
    pub fn to_params(&self) -> DirectionsParams {
        DirectionsParams {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            mode: Some(self.mode.clone().unwrap_or_else(|| DEFAULT_MODE.to_string())),
        }
    }
}
